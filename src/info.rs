use alloc::vec::Vec;

use crate::error::{TgaError, TgaWarning};
use crate::pixel::PixelLayout;
use crate::spec::ImageSpec;
use crate::tga::{TgaImage, canonical_layout};

/// Header-level description of a TGA file, read without decoding pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Canonical spec the decoder will produce.
    pub spec: ImageSpec,
    /// Raw TGA image type (1, 2, 3, 9, 10 or 11).
    pub image_type: u8,
    /// Whether pixel data is run-length encoded.
    pub compressed: bool,
    pub native_layout: PixelLayout,
    /// Header oddities found while probing.
    pub warnings: Vec<TgaWarning>,
}

impl ImageInfo {
    /// Probe the 18-byte header. The color map and pixel data are not read.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TgaError> {
        let mut warnings = Vec::new();
        let (header, _, spec) = TgaImage::read_header(data, &mut warnings)?;
        Ok(Self {
            width: spec.width,
            height: spec.height,
            spec,
            image_type: header.image_type,
            compressed: header.is_rle(),
            native_layout: canonical_layout(&spec),
            warnings,
        })
    }
}
