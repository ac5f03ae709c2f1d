/// Pixel memory layout of a caller-side buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// Single channel, 16-bit grayscale (native endian).
    Gray16,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 => 1,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Bits per channel.
    pub fn bit_depth(&self) -> u32 {
        match self {
            Self::Gray16 => 16,
            _ => 8,
        }
    }

    /// Whether red and blue are swapped relative to RGB order.
    pub fn is_bgr(&self) -> bool {
        matches!(self, Self::Bgr8 | Self::Bgra8)
    }

    /// The RGB-ordered layout with the given channel count and bit depth.
    ///
    /// Returns `None` for combinations no TGA canonical spec can produce.
    pub fn from_channels(channels: u32, bit_depth: u32) -> Option<Self> {
        match (channels, bit_depth) {
            (1, 8) => Some(Self::Gray8),
            (1, 16) => Some(Self::Gray16),
            (3, 8) => Some(Self::Rgb8),
            (4, 8) => Some(Self::Rgba8),
            _ => None,
        }
    }
}

/// Typed pixels that a decoded buffer can be reinterpreted as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    /// The byte layout matching this pixel type.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::BGR8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgr8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::BGRA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgra8
    }
}
