//! Codec-neutral stream interfaces.
//!
//! An image-I/O layer drives any codec through these two traits; the TGA
//! streams implement them and [`crate::Registry`] hands them out boxed.

use crate::error::TgaError;
use crate::pixel::PixelLayout;
use crate::spec::ImageSpec;

/// A readable image stream, open from construction until [`close`].
///
/// [`close`]: ImageInput::close
pub trait ImageInput {
    /// Short format name, e.g. `"TGA"`.
    fn format_name(&self) -> &'static str;

    /// Canonical spec of the open image, `None` once closed.
    fn spec(&self) -> Option<&ImageSpec>;

    /// Select a subimage and mip level. Returns `false` if it does not exist.
    fn seek_subimage(&mut self, subimage: u32, miplevel: u32) -> bool;

    /// Read logical row `y` (0 is the top) in the canonical layout.
    fn read_native_scanline(&mut self, y: u32, buf: &mut [u8]) -> Result<(), TgaError>;

    /// Read the whole image into `buf` in `layout`, top row first.
    ///
    /// Returns the number of bytes written.
    fn read_image(&mut self, buf: &mut [u8], layout: PixelLayout) -> Result<usize, TgaError>;

    /// Release the underlying handle and decoded state. Idempotent.
    fn close(&mut self);
}

/// A writable image stream. Opening writes whatever precedes pixel data.
pub trait ImageOutput {
    fn format_name(&self) -> &'static str;

    /// Spec the stream was opened with.
    fn spec(&self) -> &ImageSpec;

    /// Write the whole image from `pixels` in `layout`, top row first.
    fn write_image(&mut self, pixels: &[u8], layout: PixelLayout) -> Result<(), TgaError>;

    /// Flush and release the underlying handle. Idempotent.
    fn close(&mut self) -> Result<(), TgaError>;
}
