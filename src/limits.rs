use crate::error::TgaError;
use crate::spec::ImageSpec;

/// Resource limits applied when a TGA file is opened.
///
/// All fields default to `None` (no limit). Limits are checked against the
/// header before the color map or RLE buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes the decoder may hold at once (RLE buffer plus output).
    pub max_memory_bytes: Option<u64>,
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), TgaError> {
    match limit {
        Some(max) if value > max => Err(TgaError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check the image dimensions.
    pub(crate) fn check(&self, spec: &ImageSpec) -> Result<(), TgaError> {
        within("width", u64::from(spec.width), self.max_width.map(u64::from))?;
        within("height", u64::from(spec.height), self.max_height.map(u64::from))?;
        within(
            "pixel count",
            u64::from(spec.width) * u64::from(spec.height),
            self.max_pixels,
        )
    }

    /// Check a planned allocation of `bytes`.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), TgaError> {
        within("allocation of", bytes as u64, self.max_memory_bytes)
    }
}
