use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::error::TgaError;
use crate::pixel::PixelLayout;
use crate::spec::ImageSpec;
use crate::tga::{encode_rows, prepare_output};
use crate::traits::ImageOutput;

/// Streaming TGA writer. Always writes uncompressed pixel data.
///
/// The header is written when the stream is created; [`write_image`]
/// then writes every row once, in the order the declared origin requires.
///
/// [`write_image`]: TgaOutput::write_image
pub struct TgaOutput<W> {
    writer: Option<W>,
    spec: ImageSpec,
    file_layout: PixelLayout,
    written: bool,
}

impl TgaOutput<BufWriter<File>> {
    /// Create (or truncate) a file at `path`. The spec is validated first, so
    /// an unsupported spec leaves the file system untouched.
    pub fn create(path: impl AsRef<Path>, spec: ImageSpec) -> Result<Self, TgaError> {
        prepare_output(&spec)?;
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), spec)
    }
}

impl<W: Write> TgaOutput<W> {
    /// Validate `spec` and write the header.
    ///
    /// Only L8, L16, RGB8 and RGBA8 can be written; anything else fails with
    /// [`TgaError::UnsupportedOutputFormat`].
    pub fn new(mut writer: W, spec: ImageSpec) -> Result<Self, TgaError> {
        let (header, file_layout) = prepare_output(&spec)?;
        writer.write_all(&header.to_bytes())?;
        Ok(Self {
            writer: Some(writer),
            spec,
            file_layout,
            written: false,
        })
    }

    pub fn spec(&self) -> &ImageSpec {
        &self.spec
    }

    /// Write the whole image from `pixels` (in `layout`, top row first).
    ///
    /// Color layouts must match the file's channel count (RGB or BGR order);
    /// gray converts between 8 and 16 bits. A second call fails with
    /// [`TgaError::AlreadyWritten`].
    pub fn write_image(&mut self, pixels: &[u8], layout: PixelLayout) -> Result<(), TgaError> {
        self.write_image_with_stop(pixels, layout, Unstoppable)
    }

    /// [`write_image`](Self::write_image) with cooperative cancellation.
    pub fn write_image_with_stop(
        &mut self,
        pixels: &[u8],
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<(), TgaError> {
        let writer = self.writer.as_mut().ok_or(TgaError::NotOpen)?;
        if self.written {
            return Err(TgaError::AlreadyWritten);
        }
        encode_rows(&self.spec, self.file_layout, pixels, layout, &stop, |row| {
            self.written = true;
            writer.write_all(row)?;
            Ok(())
        })
    }

    /// Flush and drop the writer. Idempotent.
    pub fn close(&mut self) -> Result<(), TgaError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W, TgaError> {
        let mut writer = self.writer.take().ok_or(TgaError::NotOpen)?;
        writer.flush()?;
        Ok(writer)
    }
}

impl<W: Write> ImageOutput for TgaOutput<W> {
    fn format_name(&self) -> &'static str {
        "TGA"
    }

    fn spec(&self) -> &ImageSpec {
        TgaOutput::spec(self)
    }

    fn write_image(&mut self, pixels: &[u8], layout: PixelLayout) -> Result<(), TgaError> {
        TgaOutput::write_image(self, pixels, layout)
    }

    fn close(&mut self) -> Result<(), TgaError> {
        TgaOutput::close(self)
    }
}
