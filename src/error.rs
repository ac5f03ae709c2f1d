use alloc::string::String;
use enough::StopReason;

use crate::pixel::PixelLayout;

/// Errors from TGA decoding and encoding.
///
/// Every variant carries the field values that made the file or request
/// unusable, so a failure can be traced back to the specific input.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TgaError {
    #[error("malformed TGA header: need 18 bytes, got {available}")]
    MalformedHeader { available: usize },

    #[error(
        "unsupported TGA format: image type {image_type}, color map type {color_map_type}, \
         pixel depth {pixel_depth}, color map entry size {color_map_entry_size}"
    )]
    UnsupportedFormat {
        image_type: u8,
        color_map_type: u8,
        pixel_depth: u8,
        color_map_entry_size: u8,
    },

    #[error("malformed color map: {0}")]
    MalformedColorMap(String),

    #[error("zero pixel stride for {width}x{height} image (pixel depth {pixel_depth})")]
    ZeroPixelStride {
        width: u32,
        height: u32,
        pixel_depth: u8,
    },

    #[error(
        "RLE packet overflow: packet of {packet_bytes} bytes at offset {offset} \
         exceeds {capacity}-byte image"
    )]
    RleOverflow {
        offset: usize,
        packet_bytes: usize,
        capacity: usize,
    },

    #[error(
        "unsupported output format: {channels} channel(s) at {bit_depth} bits \
         (supported: L8, L16, RGB8, RGBA8)"
    )]
    UnsupportedOutputFormat { channels: u32, bit_depth: u32 },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: PixelLayout,
        actual: PixelLayout,
    },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("row {row} out of range for image of height {height}")]
    RowOutOfRange { row: u32, height: u32 },

    #[error("no codec registered for extension {0:?}")]
    UnknownExtension(String),

    #[error("stream is closed")]
    NotOpen,

    #[error("image already written; a TGA file holds one image")]
    AlreadyWritten,

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TgaError {
    fn from(r: StopReason) -> Self {
        TgaError::Cancelled(r)
    }
}

/// Non-fatal conditions found while decoding.
///
/// Decoding continues with a defined fallback. Each warning is logged through
/// `tracing` and also kept on the decoder so callers can inspect it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum TgaWarning {
    /// Descriptor bits 6-7 are set. Rows are still read as non-interleaved.
    Interleaved { flag: u8 },
    /// Descriptor bit 4 is set; it is reserved and should be zero.
    ReservedDescriptorBit,
    /// Palette indices outside `[first, first + length)` were found in a row
    /// and replaced with opaque black.
    ColorMapIndexOutOfRange {
        row: u32,
        index: u16,
        first: u16,
        length: u16,
        count: usize,
    },
    /// The RLE stream ended before the image was filled; the rest is zero.
    RleSizeMismatch { decoded: usize, expected: usize },
}

impl core::fmt::Display for TgaWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interleaved { flag } => {
                write!(f, "interleaved TGA (flag {flag}) is not supported; reading rows linearly")
            }
            Self::ReservedDescriptorBit => {
                write!(f, "image descriptor bit 4 is set (reserved, should be 0)")
            }
            Self::ColorMapIndexOutOfRange {
                row,
                index,
                first,
                length,
                count,
            } => write!(
                f,
                "row {row}: {count} color map index(es) out of range, first was {index} \
                 (valid {first}..{})",
                u32::from(*first) + u32::from(*length)
            ),
            Self::RleSizeMismatch { decoded, expected } => write!(
                f,
                "RLE decoded size {decoded} does not match expected image size {expected}"
            ),
        }
    }
}

/// Log a warning and keep it.
pub(crate) fn warn(sink: &mut alloc::vec::Vec<TgaWarning>, warning: TgaWarning) {
    tracing::warn!("TGA: {warning}");
    sink.push(warning);
}
