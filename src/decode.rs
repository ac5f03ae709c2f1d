use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::error::{TgaError, TgaWarning};
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::spec::{ImageSpec, Origin};

/// Decoded image output. Pixels may be borrowed (zero-copy) or owned.
///
/// Rows are always top to bottom, whatever the file's stored origin.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    /// Canonical spec of the source file (its own channel count, bit depth
    /// and stored origin).
    pub spec: ImageSpec,
    /// Non-fatal problems found while decoding.
    pub warnings: Vec<TgaWarning>,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
            spec: self.spec,
            warnings: self.warnings,
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// Stored origin of the source file.
    pub fn origin(&self) -> Origin {
        self.spec.origin
    }

    pub(crate) fn borrowed(
        data: &'a [u8],
        spec: ImageSpec,
        layout: PixelLayout,
        warnings: Vec<TgaWarning>,
    ) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width: spec.width,
            height: spec.height,
            layout,
            spec,
            warnings,
        }
    }

    pub(crate) fn owned(
        data: Vec<u8>,
        spec: ImageSpec,
        layout: PixelLayout,
        warnings: Vec<TgaWarning>,
    ) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width: spec.width,
            height: spec.height,
            layout,
            spec,
            warnings,
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(TgaError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Builder for decoding an in-memory TGA file.
///
/// ```no_run
/// use zentga::{DecodeRequest, PixelLayout, Unstoppable};
///
/// let data: &[u8] = &[]; // your TGA bytes
/// let decoded = DecodeRequest::new(data)
///     .with_layout(PixelLayout::Rgba8)
///     .decode(Unstoppable)?;
/// println!("{}x{}", decoded.width, decoded.height);
/// # Ok::<(), zentga::TgaError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    layout: Option<PixelLayout>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            layout: None,
        }
    }

    /// Reject files whose dimensions or allocations exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Output layout. Defaults to the file's canonical layout.
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, TgaError> {
        crate::tga::decode(self.data, self.limits, self.layout, &stop)
    }
}
