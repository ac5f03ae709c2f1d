//! Palette loading for color-mapped images.

use alloc::format;
use alloc::vec::Vec;

use super::header::TgaHeader;
use super::utils::Packed16;
use crate::error::TgaError;

/// Expanded palette. Entries are RGBA8 regardless of the stored entry size.
#[derive(Clone, Debug, Default)]
pub(crate) struct ColorMap {
    entries: Vec<[u8; 4]>,
    first_index: u16,
}

impl ColorMap {
    /// Expand the color map table that starts at the beginning of `table`.
    ///
    /// `table` may extend past the color map; only
    /// `color_map_length * entry_bytes` bytes are consumed.
    pub fn parse(header: &TgaHeader, table: &[u8]) -> Result<Self, TgaError> {
        let entry_size = header.color_map_entry_size;
        if !matches!(entry_size, 15 | 16 | 24 | 32) {
            return Err(TgaError::MalformedColorMap(format!(
                "illegal entry size {entry_size} bits"
            )));
        }
        let entry_bytes = header.color_map_entry_bytes();
        let length = usize::from(header.color_map_length);
        let packing = Packed16::select(entry_size, header.attribute_bits());

        let mut entries = Vec::with_capacity(length);
        for raw in table.chunks_exact(entry_bytes).take(length) {
            let rgba = match entry_size {
                15 | 16 => packing.unpack(u16::from_le_bytes([raw[0], raw[1]])),
                24 => [raw[2], raw[1], raw[0], 255],
                _ => [raw[2], raw[1], raw[0], raw[3]],
            };
            entries.push(rgba);
        }
        if entries.len() < length {
            return Err(TgaError::MalformedColorMap(format!(
                "short read at entry {}/{length} ({} of {} bytes available)",
                entries.len(),
                table.len(),
                length * entry_bytes
            )));
        }

        Ok(Self {
            entries,
            first_index: header.color_map_first_index,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first_index(&self) -> u16 {
        self.first_index
    }

    pub fn len(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Resolve a stored index, or `None` if it falls outside the table.
    #[inline]
    pub fn lookup(&self, index: u8) -> Option<[u8; 4]> {
        u16::from(index)
            .checked_sub(self.first_index)
            .and_then(|i| self.entries.get(usize::from(i)))
            .copied()
    }
}
