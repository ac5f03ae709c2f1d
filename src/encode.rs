use alloc::vec::Vec;

use enough::Stop;

use crate::error::TgaError;
use crate::pixel::PixelLayout;
use crate::spec::ImageSpec;

/// Builder for encoding an uncompressed TGA file into memory.
///
/// The file is described by `spec` (L8, L16, RGB8 or RGBA8, either origin);
/// caller pixels are always top row first. RGB and BGR orders are accepted
/// for color, and gray converts between 8 and 16 bits.
///
/// ```no_run
/// use zentga::{EncodeRequest, ImageSpec, Origin, PixelLayout, Unstoppable};
///
/// let pixels = vec![0u8; 4 * 4 * 3];
/// let spec = ImageSpec::new(4, 4, PixelLayout::Rgb8, Origin::Bottom);
/// let tga = EncodeRequest::new(spec).encode(&pixels, PixelLayout::Rgb8, Unstoppable)?;
/// # Ok::<(), zentga::TgaError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    spec: ImageSpec,
}

impl EncodeRequest {
    pub fn new(spec: ImageSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &ImageSpec {
        &self.spec
    }

    /// Encode `pixels` (in `layout`) to a complete TGA file.
    pub fn encode(
        &self,
        pixels: &[u8],
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<Vec<u8>, TgaError> {
        crate::tga::encode(&self.spec, pixels, layout, &stop)
    }
}
