use crate::error::TgaError;
use crate::pixel::PixelLayout;

/// Vertical position of the first stored scanline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Origin {
    /// First stored row is the top of the image.
    #[default]
    Top,
    /// First stored row is the bottom of the image (TGA's historical default).
    Bottom,
}

/// Format-agnostic description of an image, as exchanged with the codec.
///
/// On decode this is derived from the TGA header; on encode it is the
/// caller's description of the file to write. Rows handed across this
/// boundary are always ordered top to bottom; `origin` only says how they
/// are (or will be) stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSpec {
    pub width: u32,
    pub height: u32,
    /// 1, 3 or 4.
    pub channels: u32,
    /// 8 or 16.
    pub bit_depth: u32,
    pub origin: Origin,
}

impl ImageSpec {
    pub fn new(width: u32, height: u32, layout: PixelLayout, origin: Origin) -> Self {
        Self {
            width,
            height,
            channels: layout.channels() as u32,
            bit_depth: layout.bit_depth(),
            origin,
        }
    }

    /// The RGB-ordered layout of this spec, if TGA can represent it.
    pub fn layout(&self) -> Option<PixelLayout> {
        PixelLayout::from_channels(self.channels, self.bit_depth)
    }

    pub fn pixel_bytes(&self) -> usize {
        self.channels as usize * (self.bit_depth as usize / 8)
    }

    pub fn scanline_bytes(&self) -> usize {
        self.width as usize * self.pixel_bytes()
    }

    /// Size of the whole image in `layout`, with overflow checking.
    pub fn image_bytes(&self, layout: PixelLayout) -> Result<usize, TgaError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
            .ok_or(TgaError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}
