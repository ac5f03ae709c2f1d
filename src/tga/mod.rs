//! Truevision TGA decoder and encoder internals.
//!
//! Use [`crate::DecodeRequest`] / [`crate::EncodeRequest`] for in-memory data
//! and `TgaInput` / `TgaOutput` for streams.

mod colormap;
mod convert;
pub(crate) mod header;
pub(crate) mod rle;
mod utils;

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

pub(crate) use colormap::ColorMap;
pub(crate) use convert::{RowDecoder, check_encodable, encode_row, reformat_row};
pub(crate) use header::{HEADER_LEN, TgaHeader, TgaKind};

use crate::decode::DecodeOutput;
use crate::error::{TgaError, TgaWarning, warn};
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::spec::{ImageSpec, Origin};

/// File extensions conventionally used for TGA files.
pub const EXTENSIONS: &[&str] = &["tga", "vda", "icb", "vst"];

/// Layout of a decoded spec. `TgaHeader::validate` only admits combinations
/// that have one.
pub(crate) fn canonical_layout(spec: &ImageSpec) -> PixelLayout {
    spec.layout().unwrap_or(PixelLayout::Rgba8)
}

/// Header-derived state shared by every decode path.
#[derive(Clone, Debug)]
pub(crate) struct TgaImage {
    pub header: TgaHeader,
    pub spec: ImageSpec,
    rows: RowDecoder,
}

impl TgaImage {
    /// Parse and validate the header, returning it with its canonical spec.
    pub fn read_header(
        data: &[u8],
        warnings: &mut Vec<TgaWarning>,
    ) -> Result<(TgaHeader, TgaKind, ImageSpec), TgaError> {
        let header = TgaHeader::parse(data)?;
        let kind = header.validate(warnings)?;
        let spec = header.canonical_spec(kind);
        Ok((header, kind, spec))
    }

    pub fn new(header: TgaHeader, kind: TgaKind, spec: ImageSpec, color_map: ColorMap) -> Self {
        Self {
            rows: RowDecoder::new(&header, kind, canonical_layout(&spec), color_map),
            header,
            spec,
        }
    }

    pub fn canonical(&self) -> PixelLayout {
        self.rows.canonical()
    }

    /// Stored row holding logical (top-to-bottom) row `y`.
    pub fn file_row(&self, y: u32) -> u32 {
        match self.spec.origin {
            Origin::Top => y,
            Origin::Bottom => self.spec.height - 1 - y,
        }
    }

    /// Byte offset of stored row `file_row` within the raw pixel stream.
    pub fn raw_row_offset(&self, file_row: u32) -> usize {
        file_row as usize * self.header.raw_scanline_bytes()
    }

    #[cfg(feature = "std")]
    pub fn check_row(&self, y: u32) -> Result<(), TgaError> {
        if y >= self.spec.height {
            return Err(TgaError::RowOutOfRange {
                row: y,
                height: self.spec.height,
            });
        }
        Ok(())
    }

    /// Produce canonical row `y` into `out`. `fetch` loads stored row bytes.
    #[cfg(feature = "std")]
    pub fn read_native_row<F>(
        &self,
        y: u32,
        out: &mut [u8],
        warnings: &mut Vec<TgaWarning>,
        fetch: F,
    ) -> Result<(), TgaError>
    where
        F: FnOnce(u32, &mut [u8]) -> Result<(), TgaError>,
    {
        self.check_row(y)?;
        let needed = self.spec.scanline_bytes();
        if out.len() < needed {
            return Err(TgaError::BufferTooSmall {
                needed,
                actual: out.len(),
            });
        }
        let mut raw = vec![0u8; self.header.raw_scanline_bytes()];
        fetch(self.file_row(y), &mut raw)?;
        self.rows.decode_row(&raw, &mut out[..needed], y, warnings);
        Ok(())
    }

    /// Fill `out` with the whole image in `dest` layout, top row first.
    ///
    /// Fails before touching `out` if it is too small.
    pub fn read_image<F>(
        &self,
        out: &mut [u8],
        dest: PixelLayout,
        stop: &dyn Stop,
        warnings: &mut Vec<TgaWarning>,
        mut fetch: F,
    ) -> Result<usize, TgaError>
    where
        F: FnMut(u32, &mut [u8]) -> Result<(), TgaError>,
    {
        let needed = self.spec.image_bytes(dest)?;
        if out.len() < needed {
            return Err(TgaError::BufferTooSmall {
                needed,
                actual: out.len(),
            });
        }
        if needed == 0 {
            return Ok(0);
        }

        let canonical = self.canonical();
        let mut raw = vec![0u8; self.header.raw_scanline_bytes()];
        let mut native = vec![0u8; self.spec.scanline_bytes()];
        let dst_stride = self.spec.width as usize * dest.bytes_per_pixel();

        for (y, dst) in out[..needed].chunks_exact_mut(dst_stride).enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            let y = y as u32;
            fetch(self.file_row(y), &mut raw)?;
            self.rows.decode_row(&raw, &mut native, y, warnings);
            reformat_row(&native, canonical, dst, dest);
        }
        Ok(needed)
    }
}

/// Check dimensions and the planned allocations against `limits`.
pub(crate) fn check_limits(
    limits: Option<&Limits>,
    header: &TgaHeader,
    spec: &ImageSpec,
    out_bytes: usize,
) -> Result<(), TgaError> {
    if let Some(limits) = limits {
        limits.check(spec)?;
        let raw = if header.is_rle() {
            header.raw_image_bytes()
        } else {
            0
        };
        limits.check_memory(raw.saturating_add(out_bytes))?;
    }
    Ok(())
}

/// Decompress the whole RLE stream, warning if it ends early.
pub(crate) fn decode_rle_buffer<S: rle::RleSource>(
    src: &mut S,
    header: &TgaHeader,
    stop: &dyn Stop,
    warnings: &mut Vec<TgaWarning>,
) -> Result<Vec<u8>, TgaError> {
    let expected = header.raw_image_bytes();
    let mut raw = vec![0u8; expected];
    let decoded = rle::decode_rle(src, header.raw_pixel_bytes(), &mut raw, stop)?;
    if decoded != expected {
        warn(warnings, TgaWarning::RleSizeMismatch { decoded, expected });
    }
    Ok(raw)
}

/// Decode a complete in-memory TGA file.
pub(crate) fn decode<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
    layout: Option<PixelLayout>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, TgaError> {
    let mut warnings = Vec::new();
    let (header, kind, spec) = TgaImage::read_header(data, &mut warnings)?;
    let dest = layout.unwrap_or(canonical_layout(&spec));
    let out_bytes = spec.image_bytes(dest)?;
    check_limits(limits, &header, &spec, out_bytes)?;
    stop.check()?;

    let pixel_data = data.get(header.data_offset()..).unwrap_or(&[]);

    // Stored top-down 8-bit gray already is the requested layout.
    if !header.is_rle()
        && kind == TgaKind::Grayscale
        && header.pixel_depth == 8
        && spec.origin == Origin::Top
        && dest == PixelLayout::Gray8
    {
        let pixels = pixel_data.get(..out_bytes).ok_or(TgaError::UnexpectedEof)?;
        return Ok(DecodeOutput::borrowed(pixels, spec, dest, warnings));
    }

    let color_map = if header.color_map_type == 1 {
        let table = data.get(header.color_map_offset()..).unwrap_or(&[]);
        ColorMap::parse(&header, table)?
    } else {
        ColorMap::default()
    };
    let image = TgaImage::new(header, kind, spec, color_map);

    let raw: Cow<'a, [u8]> = if header.is_rle() {
        let mut src = rle::SliceSource::new(pixel_data);
        Cow::Owned(decode_rle_buffer(&mut src, &header, stop, &mut warnings)?)
    } else {
        Cow::Borrowed(
            pixel_data
                .get(..header.raw_image_bytes())
                .ok_or(TgaError::UnexpectedEof)?,
        )
    };

    let mut pixels = vec![0u8; out_bytes];
    let row_bytes = header.raw_scanline_bytes();
    image.read_image(&mut pixels, dest, stop, &mut warnings, |file_row, buf| {
        let start = image.raw_row_offset(file_row);
        buf.copy_from_slice(&raw[start..start + row_bytes]);
        Ok(())
    })?;
    Ok(DecodeOutput::owned(pixels, spec, dest, warnings))
}

/// Validate an output spec and return the header plus the file's layout.
pub(crate) fn prepare_output(spec: &ImageSpec) -> Result<(TgaHeader, PixelLayout), TgaError> {
    let layout = spec.layout().ok_or(TgaError::UnsupportedOutputFormat {
        channels: spec.channels,
        bit_depth: spec.bit_depth,
    })?;
    if spec.width > u32::from(u16::MAX) || spec.height > u32::from(u16::MAX) {
        return Err(TgaError::DimensionsTooLarge {
            width: spec.width,
            height: spec.height,
        });
    }
    Ok((TgaHeader::for_output(spec), layout))
}

/// Convert caller pixels row by row into stored order, handing each stored
/// row to `emit`.
pub(crate) fn encode_rows<F>(
    spec: &ImageSpec,
    file_layout: PixelLayout,
    pixels: &[u8],
    layout: PixelLayout,
    stop: &dyn Stop,
    mut emit: F,
) -> Result<(), TgaError>
where
    F: FnMut(&[u8]) -> Result<(), TgaError>,
{
    check_encodable(layout, file_layout)?;
    let needed = spec.image_bytes(layout)?;
    if pixels.len() < needed {
        return Err(TgaError::BufferTooSmall {
            needed,
            actual: pixels.len(),
        });
    }
    if needed == 0 {
        return Ok(());
    }

    let src_stride = spec.width as usize * layout.bytes_per_pixel();
    let mut row = vec![0u8; spec.width as usize * file_layout.bytes_per_pixel()];
    let rows = pixels[..needed].chunks_exact(src_stride);
    let mut write = |i: usize, src: &[u8]| {
        if i % 16 == 0 {
            stop.check()?;
        }
        encode_row(src, layout, &mut row, file_layout);
        emit(&row)
    };
    match spec.origin {
        Origin::Top => rows.enumerate().try_for_each(|(i, src)| write(i, src)),
        Origin::Bottom => rows.rev().enumerate().try_for_each(|(i, src)| write(i, src)),
    }
}

/// Encode a complete TGA file into memory.
pub(crate) fn encode(
    spec: &ImageSpec,
    pixels: &[u8],
    layout: PixelLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, TgaError> {
    let (header, file_layout) = prepare_output(spec)?;
    let body = spec.image_bytes(file_layout)?;
    let mut out = Vec::with_capacity(HEADER_LEN + body);
    out.extend_from_slice(&header.to_bytes());
    encode_rows(spec, file_layout, pixels, layout, stop, |row| {
        out.extend_from_slice(row);
        Ok(())
    })?;
    Ok(out)
}
