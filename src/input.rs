use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::error::{TgaError, TgaWarning};
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::spec::ImageSpec;
use crate::tga::rle::ReadSource;
use crate::tga::{ColorMap, HEADER_LEN, TgaImage, check_limits, decode_rle_buffer};
use crate::traits::ImageInput;

/// Streaming TGA reader.
///
/// The header, color map and (for RLE files) the whole decompressed pixel
/// stream are loaded once when the stream is opened. After that rows can be
/// read in any order: RLE rows come from memory, uncompressed rows are read
/// by seeking straight to them.
///
/// ```no_run
/// use zentga::{PixelLayout, TgaInput};
///
/// let mut input = TgaInput::open("texture.tga")?;
/// let spec = *input.spec().unwrap();
/// let mut pixels = vec![0u8; spec.width as usize * spec.height as usize * 4];
/// input.read_image(&mut pixels, PixelLayout::Rgba8)?;
/// # Ok::<(), zentga::TgaError>(())
/// ```
pub struct TgaInput<R> {
    reader: Option<R>,
    image: Option<TgaImage>,
    /// Decompressed pixel stream; empty for uncompressed files.
    raw: Vec<u8>,
    warnings: Vec<TgaWarning>,
    /// Everything in `warnings`, so re-reading a row does not repeat it.
    seen: BTreeSet<TgaWarning>,
}

impl TgaInput<BufReader<File>> {
    /// Open a TGA file by path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TgaError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> TgaInput<R> {
    /// Open a TGA stream positioned at the start of the file.
    pub fn new(reader: R) -> Result<Self, TgaError> {
        Self::with_limits(reader, &Limits::default(), Unstoppable)
    }

    /// Open with resource limits, checked before the color map or RLE buffer
    /// is allocated. `stop` is polled while decompressing.
    pub fn with_limits(mut reader: R, limits: &Limits, stop: impl Stop) -> Result<Self, TgaError> {
        let mut warnings = Vec::new();

        let mut head = Vec::with_capacity(HEADER_LEN);
        reader.by_ref().take(HEADER_LEN as u64).read_to_end(&mut head)?;
        let (header, kind, spec) = TgaImage::read_header(&head, &mut warnings)?;
        check_limits(Some(limits), &header, &spec, 0)?;
        stop.check()?;

        let color_map = if header.color_map_type == 1 {
            reader.seek(SeekFrom::Start(header.color_map_offset() as u64))?;
            let mut table = Vec::with_capacity(header.color_map_bytes());
            reader
                .by_ref()
                .take(header.color_map_bytes() as u64)
                .read_to_end(&mut table)?;
            ColorMap::parse(&header, &table)?
        } else {
            ColorMap::default()
        };

        let raw = if header.is_rle() {
            reader.seek(SeekFrom::Start(header.data_offset() as u64))?;
            decode_rle_buffer(&mut ReadSource(&mut reader), &header, &stop, &mut warnings)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            "TGA: opened {}x{} image type {} ({} channel(s), {}-bit)",
            spec.width,
            spec.height,
            header.image_type,
            spec.channels,
            spec.bit_depth
        );

        Ok(Self {
            reader: Some(reader),
            image: Some(TgaImage::new(header, kind, spec, color_map)),
            raw,
            seen: warnings.iter().cloned().collect(),
            warnings,
        })
    }

    /// Canonical spec, `None` once closed.
    pub fn spec(&self) -> Option<&ImageSpec> {
        self.image.as_ref().map(|image| &image.spec)
    }

    /// Layout that [`read_native_scanline`](Self::read_native_scanline) produces.
    pub fn native_layout(&self) -> Option<PixelLayout> {
        self.image.as_ref().map(TgaImage::canonical)
    }

    /// TGA files hold exactly one image with no mip levels.
    pub fn seek_subimage(&mut self, subimage: u32, miplevel: u32) -> bool {
        self.image.is_some() && subimage == 0 && miplevel == 0
    }

    /// Read logical row `y` (0 is the top, whatever the stored origin) in the
    /// canonical layout.
    pub fn read_native_scanline(&mut self, y: u32, buf: &mut [u8]) -> Result<(), TgaError> {
        let image = self.image.as_ref().ok_or(TgaError::NotOpen)?;
        let reader = self.reader.as_mut().ok_or(TgaError::NotOpen)?;
        let raw = &self.raw;
        let mut fresh = Vec::new();
        let result = image.read_native_row(y, buf, &mut fresh, |file_row, row| {
            fetch_row(reader, image, raw, file_row, row)
        });
        self.keep(fresh);
        result
    }

    /// Read the whole image into `buf` in `layout`, top row first.
    ///
    /// A `buf` smaller than the image fails with
    /// [`TgaError::BufferTooSmall`] before anything is written. Returns the
    /// number of bytes written.
    pub fn read_image(&mut self, buf: &mut [u8], layout: PixelLayout) -> Result<usize, TgaError> {
        self.read_image_with_stop(buf, layout, Unstoppable)
    }

    /// [`read_image`](Self::read_image) with cooperative cancellation.
    pub fn read_image_with_stop(
        &mut self,
        buf: &mut [u8],
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<usize, TgaError> {
        let image = self.image.as_ref().ok_or(TgaError::NotOpen)?;
        let reader = self.reader.as_mut().ok_or(TgaError::NotOpen)?;
        let raw = &self.raw;
        let mut fresh = Vec::new();
        let result = image.read_image(buf, layout, &stop, &mut fresh, |file_row, row| {
            fetch_row(reader, image, raw, file_row, row)
        });
        self.keep(fresh);
        result
    }

    fn keep(&mut self, fresh: Vec<TgaWarning>) {
        for warning in fresh {
            if self.seen.insert(warning.clone()) {
                self.warnings.push(warning);
            }
        }
    }

    /// Distinct warnings collected since the stream was opened, in the order
    /// they first occurred.
    pub fn warnings(&self) -> &[TgaWarning] {
        &self.warnings
    }

    /// Drop the reader, color map and RLE buffer. Later reads return
    /// [`TgaError::NotOpen`].
    pub fn close(&mut self) {
        self.reader = None;
        self.image = None;
        self.raw = Vec::new();
    }
}

/// Load stored row `file_row` from the RLE buffer or from the stream.
fn fetch_row<R: Read + Seek>(
    reader: &mut R,
    image: &TgaImage,
    raw: &[u8],
    file_row: u32,
    row: &mut [u8],
) -> Result<(), TgaError> {
    let start = image.raw_row_offset(file_row);
    if image.header.is_rle() {
        let src = raw
            .get(start..start + row.len())
            .ok_or(TgaError::UnexpectedEof)?;
        row.copy_from_slice(src);
        return Ok(());
    }
    reader.seek(SeekFrom::Start((image.header.data_offset() + start) as u64))?;
    reader.read_exact(row).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => TgaError::UnexpectedEof,
        _ => TgaError::Io(e),
    })
}

impl<R: Read + Seek> ImageInput for TgaInput<R> {
    fn format_name(&self) -> &'static str {
        "TGA"
    }

    fn spec(&self) -> Option<&ImageSpec> {
        TgaInput::spec(self)
    }

    fn seek_subimage(&mut self, subimage: u32, miplevel: u32) -> bool {
        TgaInput::seek_subimage(self, subimage, miplevel)
    }

    fn read_native_scanline(&mut self, y: u32, buf: &mut [u8]) -> Result<(), TgaError> {
        TgaInput::read_native_scanline(self, y, buf)
    }

    fn read_image(&mut self, buf: &mut [u8], layout: PixelLayout) -> Result<usize, TgaError> {
        TgaInput::read_image(self, buf, layout)
    }

    fn close(&mut self) {
        TgaInput::close(self)
    }
}
