//! Scanline conversion between stored TGA pixels, the canonical layout and
//! caller layouts.
//!
//! Byte counts per pixel are passed explicitly; rows are always processed as
//! whole slices with `chunks_exact`, so a short row can never be read past.

use alloc::vec::Vec;

use super::colormap::ColorMap;
use super::header::{TgaHeader, TgaKind};
use super::utils::Packed16;
use crate::error::{TgaError, TgaWarning, warn};
use crate::pixel::PixelLayout;

/// Everything needed to turn one stored row into canonical pixels.
#[derive(Clone, Debug)]
pub(crate) struct RowDecoder {
    kind: TgaKind,
    pixel_depth: u8,
    attribute_bits: u8,
    raw_pixel_bytes: usize,
    canonical: PixelLayout,
    color_map: ColorMap,
}

impl RowDecoder {
    pub fn new(
        header: &TgaHeader,
        kind: TgaKind,
        canonical: PixelLayout,
        color_map: ColorMap,
    ) -> Self {
        Self {
            kind,
            pixel_depth: header.pixel_depth,
            attribute_bits: header.attribute_bits(),
            raw_pixel_bytes: header.raw_pixel_bytes(),
            canonical,
            color_map,
        }
    }

    pub fn canonical(&self) -> PixelLayout {
        self.canonical
    }

    /// Convert one stored row into the canonical layout.
    ///
    /// `row` is only used to label warnings.
    pub fn decode_row(
        &self,
        raw: &[u8],
        out: &mut [u8],
        row: u32,
        warnings: &mut Vec<TgaWarning>,
    ) {
        let out_bpp = self.canonical.bytes_per_pixel();
        let pixels = raw
            .chunks_exact(self.raw_pixel_bytes)
            .zip(out.chunks_exact_mut(out_bpp));

        match self.kind {
            TgaKind::Grayscale if self.pixel_depth == 16 => {
                for (src, dst) in pixels {
                    let v = u16::from_le_bytes([src[0], src[1]]);
                    dst.copy_from_slice(&v.to_ne_bytes());
                }
            }
            TgaKind::Grayscale => {
                for (src, dst) in pixels {
                    dst[0] = src[0];
                }
            }
            TgaKind::ColorMapped if self.color_map.is_empty() => {
                for (src, dst) in pixels {
                    put_rgba(dst, [src[0], src[0], src[0], 255]);
                }
            }
            TgaKind::ColorMapped => {
                let mut bad: Option<(u8, usize)> = None;
                for (src, dst) in pixels {
                    let rgba = match self.color_map.lookup(src[0]) {
                        Some(entry) => entry,
                        None => {
                            let first = bad.map_or(src[0], |(i, _)| i);
                            bad = Some((first, bad.map_or(1, |(_, n)| n + 1)));
                            [0, 0, 0, 255]
                        }
                    };
                    put_rgba(dst, rgba);
                }
                if let Some((index, count)) = bad {
                    warn(
                        warnings,
                        TgaWarning::ColorMapIndexOutOfRange {
                            row,
                            index: u16::from(index),
                            first: self.color_map.first_index(),
                            length: self.color_map.len(),
                            count,
                        },
                    );
                }
            }
            TgaKind::TrueColor => match self.pixel_depth {
                15 | 16 => {
                    let packing = Packed16::select(self.pixel_depth, self.attribute_bits);
                    for (src, dst) in pixels {
                        put_rgba(dst, packing.unpack(u16::from_le_bytes([src[0], src[1]])));
                    }
                }
                24 => {
                    for (src, dst) in pixels {
                        put_rgba(dst, [src[2], src[1], src[0], 255]);
                    }
                }
                _ => {
                    let keep_alpha = self.attribute_bits != 0;
                    for (src, dst) in pixels {
                        let a = if keep_alpha { src[3] } else { 255 };
                        put_rgba(dst, [src[2], src[1], src[0], a]);
                    }
                }
            },
        }
    }
}

/// Write an RGBA value into a 1, 3 or 4 byte canonical pixel.
#[inline]
fn put_rgba(dst: &mut [u8], rgba: [u8; 4]) {
    match dst.len() {
        1 => dst[0] = rgba[0],
        3 => dst.copy_from_slice(&rgba[..3]),
        _ => dst.copy_from_slice(&rgba),
    }
}

/// Convert a canonical row into the caller's layout.
pub(crate) fn reformat_row(
    src: &[u8],
    src_layout: PixelLayout,
    dst: &mut [u8],
    dst_layout: PixelLayout,
) {
    use PixelLayout::*;

    let src_bpp = src_layout.bytes_per_pixel();
    let dst_bpp = dst_layout.bytes_per_pixel();
    if src_layout == dst_layout {
        dst[..src.len()].copy_from_slice(src);
        return;
    }
    let pixels = src.chunks_exact(src_bpp).zip(dst.chunks_exact_mut(dst_bpp));

    match (src_layout, dst_layout) {
        (Rgb8 | Rgba8 | Bgr8 | Bgra8, Rgb8 | Rgba8 | Bgr8 | Bgra8) => {
            let swap = src_layout.is_bgr() != dst_layout.is_bgr();
            for (s, d) in pixels {
                let (r, b) = if swap { (s[2], s[0]) } else { (s[0], s[2]) };
                d[0] = r;
                d[1] = s[1];
                d[2] = b;
                if dst_bpp == 4 {
                    d[3] = if src_bpp == 4 { s[3] } else { 255 };
                }
            }
        }
        (Gray8, Rgb8 | Rgba8 | Bgr8 | Bgra8) => {
            for (s, d) in pixels {
                d[..3].fill(s[0]);
                if dst_bpp == 4 {
                    d[3] = 255;
                }
            }
        }
        _ => {
            let n = src_bpp.min(dst_bpp);
            let force_alpha = dst_layout.channels() == 4 && n < 4;
            for (s, d) in pixels {
                d[..n].copy_from_slice(&s[..n]);
                d[n..].fill(0);
                if force_alpha {
                    d[3] = 255;
                }
            }
        }
    }
}

/// Check that `src` rows can be written into a file whose canonical layout
/// is `file`. Gray converts between 8 and 16 bits; color must match channel
/// count (RGB or BGR order both accepted).
pub(crate) fn check_encodable(src: PixelLayout, file: PixelLayout) -> Result<(), TgaError> {
    let ok = match (src.channels(), file.channels()) {
        (1, 1) => true,
        (a, b) => a == b && src.bit_depth() == file.bit_depth(),
    };
    if ok {
        Ok(())
    } else {
        Err(TgaError::LayoutMismatch {
            expected: file,
            actual: src,
        })
    }
}

/// Convert one caller row into stored TGA bytes (BGR(A), little-endian gray).
pub(crate) fn encode_row(src: &[u8], src_layout: PixelLayout, dst: &mut [u8], file: PixelLayout) {
    use PixelLayout::*;

    let src_bpp = src_layout.bytes_per_pixel();
    let dst_bpp = file.bytes_per_pixel();
    let pixels = src.chunks_exact(src_bpp).zip(dst.chunks_exact_mut(dst_bpp));

    match (src_layout, file) {
        (Gray8, Gray8) | (Bgr8, Rgb8) | (Bgra8, Rgba8) => {
            dst[..src.len()].copy_from_slice(src);
        }
        (Gray16, Gray16) => {
            for (s, d) in pixels {
                let v = u16::from_ne_bytes([s[0], s[1]]);
                d.copy_from_slice(&v.to_le_bytes());
            }
        }
        (Gray8, Gray16) => {
            for (s, d) in pixels {
                let v = (u16::from(s[0]) << 8) | u16::from(s[0]);
                d.copy_from_slice(&v.to_le_bytes());
            }
        }
        (Gray16, Gray8) => {
            for (s, d) in pixels {
                d[0] = (u16::from_ne_bytes([s[0], s[1]]) >> 8) as u8;
            }
        }
        _ => {
            for (s, d) in pixels {
                d[0] = s[2];
                d[1] = s[1];
                d[2] = s[0];
                if dst_bpp == 4 {
                    d[3] = s[3];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn reformat_rgb_to_rgba_adds_opaque_alpha() {
        let mut out = [0u8; 8];
        reformat_row(&[1, 2, 3, 4, 5, 6], PixelLayout::Rgb8, &mut out, PixelLayout::Rgba8);
        assert_eq!(out, [1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn reformat_gray8_replicates() {
        let mut rgb = [0u8; 6];
        reformat_row(&[9, 200], PixelLayout::Gray8, &mut rgb, PixelLayout::Rgb8);
        assert_eq!(rgb, [9, 9, 9, 200, 200, 200]);
        let mut rgba = [0u8; 4];
        reformat_row(&[7], PixelLayout::Gray8, &mut rgba, PixelLayout::Rgba8);
        assert_eq!(rgba, [7, 7, 7, 255]);
    }

    #[test]
    fn reformat_gray16_is_never_widened() {
        let v = 0xABCDu16.to_ne_bytes();
        let mut rgba = [0xEEu8; 4];
        reformat_row(&v, PixelLayout::Gray16, &mut rgba, PixelLayout::Rgba8);
        assert_eq!(rgba, [v[0], v[1], 0, 255]);
        let mut rgb = [0xEEu8; 3];
        reformat_row(&v, PixelLayout::Gray16, &mut rgb, PixelLayout::Rgb8);
        assert_eq!(rgb, [v[0], v[1], 0]);
    }

    #[test]
    fn reformat_rgba_to_bgr_swaps_and_drops_alpha() {
        let mut out = [0u8; 3];
        reformat_row(&[10, 20, 30, 40], PixelLayout::Rgba8, &mut out, PixelLayout::Bgr8);
        assert_eq!(out, [30, 20, 10]);
    }

    #[test]
    fn reformat_color_to_gray_copies_first_byte() {
        let mut out = [0u8; 2];
        reformat_row(&[10, 20, 30, 40, 50, 60], PixelLayout::Rgb8, &mut out, PixelLayout::Gray8);
        assert_eq!(out, [10, 40]);
    }

    #[test]
    fn encode_row_reorders_to_bgra() {
        let mut out = vec![0u8; 4];
        encode_row(&[1, 2, 3, 4], PixelLayout::Rgba8, &mut out, PixelLayout::Rgba8);
        assert_eq!(out, [3, 2, 1, 4]);
    }

    #[test]
    fn encode_row_gray_depth_conversion() {
        let mut wide = [0u8; 2];
        encode_row(&[0x12], PixelLayout::Gray8, &mut wide, PixelLayout::Gray16);
        assert_eq!(wide, [0x12, 0x12]);
        let mut narrow = [0u8; 1];
        encode_row(&0xAB01u16.to_ne_bytes(), PixelLayout::Gray16, &mut narrow, PixelLayout::Gray8);
        assert_eq!(narrow, [0xAB]);
    }

    #[test]
    fn encodable_pairs() {
        assert!(check_encodable(PixelLayout::Gray16, PixelLayout::Gray8).is_ok());
        assert!(check_encodable(PixelLayout::Bgra8, PixelLayout::Rgba8).is_ok());
        assert!(check_encodable(PixelLayout::Rgb8, PixelLayout::Rgba8).is_err());
        assert!(check_encodable(PixelLayout::Gray8, PixelLayout::Rgb8).is_err());
    }
}
