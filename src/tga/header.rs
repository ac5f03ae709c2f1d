//! The fixed 18-byte TGA header and the supported format matrix.

use alloc::vec::Vec;

use crate::error::{TgaError, TgaWarning, warn};
use crate::spec::{ImageSpec, Origin};

pub(crate) const HEADER_LEN: usize = 18;

const DESC_ATTRIBUTE_BITS: u8 = 0x0F;
const DESC_RESERVED: u8 = 0x10;
const DESC_TOP_LEFT: u8 = 0x20;
const DESC_INTERLEAVE_SHIFT: u8 = 6;

/// Broad pixel encoding, with RLE folded out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TgaKind {
    ColorMapped,
    TrueColor,
    Grayscale,
}

/// Parsed TGA header. Field order and widths follow the on-disk layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_first_index: u16,
    pub color_map_length: u16,
    pub color_map_entry_size: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// Parse the header from the first 18 bytes of `data`.
    ///
    /// Only checks length; call [`TgaHeader::validate`] before trusting the
    /// combination of fields.
    pub fn parse(data: &[u8]) -> Result<Self, TgaError> {
        let b: &[u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|s| s.try_into().ok())
            .ok_or(TgaError::MalformedHeader {
                available: data.len(),
            })?;
        let le = |i: usize| u16::from_le_bytes([b[i], b[i + 1]]);
        Ok(Self {
            id_length: b[0],
            color_map_type: b[1],
            image_type: b[2],
            color_map_first_index: le(3),
            color_map_length: le(5),
            color_map_entry_size: b[7],
            x_origin: le(8),
            y_origin: le(10),
            width: le(12),
            height: le(14),
            pixel_depth: b[16],
            image_descriptor: b[17],
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut b = [0u8; HEADER_LEN];
        b[0] = self.id_length;
        b[1] = self.color_map_type;
        b[2] = self.image_type;
        b[3..5].copy_from_slice(&self.color_map_first_index.to_le_bytes());
        b[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        b[7] = self.color_map_entry_size;
        b[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        b[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        b[12..14].copy_from_slice(&self.width.to_le_bytes());
        b[14..16].copy_from_slice(&self.height.to_le_bytes());
        b[16] = self.pixel_depth;
        b[17] = self.image_descriptor;
        b
    }

    /// Check the (image type, color map type, pixel depth, entry size)
    /// combination against the supported matrix and report descriptor oddities.
    pub fn validate(&self, warnings: &mut Vec<TgaWarning>) -> Result<TgaKind, TgaError> {
        let kind = self.kind().ok_or_else(|| self.unsupported())?;
        let supported = match kind {
            TgaKind::ColorMapped => {
                self.color_map_type == 1
                    && self.pixel_depth == 8
                    && matches!(self.color_map_entry_size, 15 | 16 | 24 | 32)
            }
            TgaKind::TrueColor => {
                self.color_map_type == 0 && matches!(self.pixel_depth, 15 | 16 | 24 | 32)
            }
            TgaKind::Grayscale => self.color_map_type == 0 && matches!(self.pixel_depth, 8 | 16),
        };
        if !supported {
            return Err(self.unsupported());
        }

        let interleave = self.image_descriptor >> DESC_INTERLEAVE_SHIFT;
        if interleave != 0 {
            warn(warnings, TgaWarning::Interleaved { flag: interleave });
        }
        if self.image_descriptor & DESC_RESERVED != 0 {
            warn(warnings, TgaWarning::ReservedDescriptorBit);
        }

        if self.raw_pixel_bytes() == 0 && (self.width > 0 || self.height > 0) {
            return Err(TgaError::ZeroPixelStride {
                width: u32::from(self.width),
                height: u32::from(self.height),
                pixel_depth: self.pixel_depth,
            });
        }
        Ok(kind)
    }

    fn unsupported(&self) -> TgaError {
        TgaError::UnsupportedFormat {
            image_type: self.image_type,
            color_map_type: self.color_map_type,
            pixel_depth: self.pixel_depth,
            color_map_entry_size: self.color_map_entry_size,
        }
    }

    pub fn kind(&self) -> Option<TgaKind> {
        match self.image_type {
            1 | 9 => Some(TgaKind::ColorMapped),
            2 | 10 => Some(TgaKind::TrueColor),
            3 | 11 => Some(TgaKind::Grayscale),
            _ => None,
        }
    }

    pub fn is_rle(&self) -> bool {
        matches!(self.image_type, 9..=11)
    }

    pub fn attribute_bits(&self) -> u8 {
        self.image_descriptor & DESC_ATTRIBUTE_BITS
    }

    pub fn origin(&self) -> Origin {
        if self.image_descriptor & DESC_TOP_LEFT != 0 {
            Origin::Top
        } else {
            Origin::Bottom
        }
    }

    /// Bytes one stored pixel occupies. 15-bit pixels take two bytes.
    pub fn raw_pixel_bytes(&self) -> usize {
        usize::from(self.pixel_depth).div_ceil(8)
    }

    pub fn raw_scanline_bytes(&self) -> usize {
        usize::from(self.width) * self.raw_pixel_bytes()
    }

    /// Bytes one color map entry occupies. 15-bit entries take two bytes.
    pub fn color_map_entry_bytes(&self) -> usize {
        usize::from(self.color_map_entry_size).div_ceil(8)
    }

    pub fn color_map_bytes(&self) -> usize {
        if self.color_map_type == 1 {
            usize::from(self.color_map_length) * self.color_map_entry_bytes()
        } else {
            0
        }
    }

    pub fn color_map_offset(&self) -> usize {
        HEADER_LEN + usize::from(self.id_length)
    }

    /// Offset of the first byte of pixel data (raw or RLE).
    pub fn data_offset(&self) -> usize {
        self.color_map_offset() + self.color_map_bytes()
    }

    /// Size of the fully decoded raw pixel stream.
    pub fn raw_image_bytes(&self) -> usize {
        usize::from(self.width) * usize::from(self.height) * self.raw_pixel_bytes()
    }

    /// Canonical channel count and bit depth for a validated header.
    pub fn canonical_spec(&self, kind: TgaKind) -> ImageSpec {
        let alpha_from_attr = if self.attribute_bits() == 0 { 3 } else { 4 };
        let (channels, bit_depth) = match kind {
            TgaKind::Grayscale => (1, u32::from(self.pixel_depth)),
            TgaKind::ColorMapped => match self.color_map_entry_size {
                16 => (alpha_from_attr, 8),
                24 => (3, 8),
                _ => (4, 8),
            },
            TgaKind::TrueColor => match self.pixel_depth {
                16 => (alpha_from_attr, 8),
                24 => (3, 8),
                _ => (4, 8),
            },
        };
        ImageSpec {
            width: u32::from(self.width),
            height: u32::from(self.height),
            channels,
            bit_depth,
            origin: self.origin(),
        }
    }

    /// Header for an uncompressed file described by `spec`.
    pub fn for_output(spec: &ImageSpec) -> Self {
        let mut descriptor = if spec.channels == 4 { 8 } else { 0 };
        if spec.origin == Origin::Top {
            descriptor |= DESC_TOP_LEFT;
        }
        Self {
            image_type: if spec.channels == 1 { 3 } else { 2 },
            width: spec.width as u16,
            height: spec.height as u16,
            pixel_depth: (spec.channels * spec.bit_depth) as u8,
            image_descriptor: descriptor,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelLayout;

    fn header(image_type: u8, pixel_depth: u8) -> TgaHeader {
        TgaHeader {
            image_type,
            pixel_depth,
            width: 3,
            height: 2,
            ..TgaHeader::default()
        }
    }

    #[test]
    fn parse_reads_little_endian_fields() {
        let mut b = [0u8; 20];
        b[0] = 4;
        b[1] = 1;
        b[2] = 9;
        b[3..5].copy_from_slice(&0x0102u16.to_le_bytes());
        b[5..7].copy_from_slice(&0x0304u16.to_le_bytes());
        b[7] = 24;
        b[12..14].copy_from_slice(&640u16.to_le_bytes());
        b[14..16].copy_from_slice(&480u16.to_le_bytes());
        b[16] = 8;
        b[17] = 0x2F;
        let h = TgaHeader::parse(&b).unwrap();
        assert_eq!(h.color_map_first_index, 0x0102);
        assert_eq!(h.color_map_length, 0x0304);
        assert_eq!((h.width, h.height), (640, 480));
        assert_eq!(h.attribute_bits(), 15);
        assert_eq!(h.origin(), Origin::Top);
        assert!(h.is_rle());
        assert_eq!(h.color_map_offset(), 22);
        assert_eq!(h.data_offset(), 22 + 0x0304 * 3);
        assert_eq!(h.to_bytes(), &b[..HEADER_LEN]);
    }

    #[test]
    fn fifteen_bit_values_take_two_bytes() {
        let h = header(2, 15);
        assert_eq!(h.raw_pixel_bytes(), 2);
        assert_eq!(h.raw_scanline_bytes(), 6);
        assert_eq!(h.raw_image_bytes(), 12);

        let cm = TgaHeader {
            color_map_type: 1,
            color_map_length: 5,
            color_map_entry_size: 15,
            ..header(1, 8)
        };
        assert_eq!(cm.color_map_bytes(), 10);
    }

    #[test]
    fn validate_warns_on_descriptor_bits() {
        let mut warnings = Vec::new();
        let h = TgaHeader {
            image_descriptor: 0xD0,
            ..header(3, 8)
        };
        assert_eq!(h.validate(&mut warnings).unwrap(), TgaKind::Grayscale);
        assert_eq!(
            warnings,
            [
                TgaWarning::Interleaved { flag: 3 },
                TgaWarning::ReservedDescriptorBit
            ]
        );
    }

    #[test]
    fn output_header_matches_spec() {
        let spec = ImageSpec::new(3, 2, PixelLayout::Rgba8, Origin::Top);
        let h = TgaHeader::for_output(&spec);
        assert_eq!((h.image_type, h.pixel_depth, h.image_descriptor), (2, 32, 0x28));
        let mut warnings = Vec::new();
        let kind = h.validate(&mut warnings).unwrap();
        assert_eq!(h.canonical_spec(kind), spec);
        assert!(warnings.is_empty());
    }
}
