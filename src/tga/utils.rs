//! Packed 16-bit color unpacking.

/// Replicate a 5-bit channel into 8 bits.
#[inline]
pub(crate) fn expand5(v: u16) -> u8 {
    let v = (v & 0x1F) as u8;
    (v << 3) | (v >> 2)
}

/// Replicate a 6-bit channel into 8 bits.
#[inline]
pub(crate) fn expand6(v: u16) -> u8 {
    let v = (v & 0x3F) as u8;
    (v << 2) | (v >> 4)
}

/// How a 16-bit stored value splits into channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Packed16 {
    /// 15-bit: x-5-5-5, top bit ignored, always opaque.
    Rgb555,
    /// 16-bit with an attribute bit: 1-5-5-5, top bit is alpha.
    Argb1555,
    /// 16-bit with no attribute bits: 5-6-5.
    Rgb565,
}

impl Packed16 {
    /// Pick the packing from the declared bit size and attribute-bit count.
    pub(crate) fn select(bits: u8, attribute_bits: u8) -> Self {
        match (bits, attribute_bits) {
            (15, _) => Self::Rgb555,
            (_, 0) => Self::Rgb565,
            _ => Self::Argb1555,
        }
    }

    /// Unpack to `[r, g, b, a]`.
    pub(crate) fn unpack(self, v: u16) -> [u8; 4] {
        match self {
            Self::Rgb555 => [expand5(v >> 10), expand5(v >> 5), expand5(v), 255],
            Self::Argb1555 => [
                expand5(v >> 10),
                expand5(v >> 5),
                expand5(v),
                if v & 0x8000 != 0 { 255 } else { 0 },
            ],
            Self::Rgb565 => [expand5(v >> 11), expand6(v >> 5), expand5(v), 255],
        }
    }
}
