//! Synthetic TGA files for integration tests.

#![allow(dead_code)]

/// Builder for a TGA file: header fields, image ID, color map table and
/// pixel payload, laid out in file order.
#[derive(Clone, Debug)]
pub struct TgaFile {
    pub image_type: u8,
    pub color_map_type: u8,
    pub color_map_first: u16,
    pub color_map_length: u16,
    pub color_map_entry_size: u8,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    pub descriptor: u8,
    pub id: Vec<u8>,
    pub color_map: Vec<u8>,
}

impl TgaFile {
    /// Top-left, no color map, no image ID.
    pub fn new(image_type: u8, width: u16, height: u16, pixel_depth: u8) -> Self {
        Self {
            image_type,
            color_map_type: 0,
            color_map_first: 0,
            color_map_length: 0,
            color_map_entry_size: 0,
            width,
            height,
            pixel_depth,
            descriptor: 0x20,
            id: Vec::new(),
            color_map: Vec::new(),
        }
    }

    /// Attach a color map. `table` holds `length` packed entries.
    pub fn color_map(mut self, first: u16, length: u16, entry_size: u8, table: &[u8]) -> Self {
        self.color_map_type = 1;
        self.color_map_first = first;
        self.color_map_length = length;
        self.color_map_entry_size = entry_size;
        self.color_map = table.to_vec();
        self
    }

    pub fn descriptor(mut self, descriptor: u8) -> Self {
        self.descriptor = descriptor;
        self
    }

    pub fn bottom_left(mut self) -> Self {
        self.descriptor &= !0x20;
        self
    }

    pub fn id(mut self, id: &[u8]) -> Self {
        self.id = id.to_vec();
        self
    }

    pub fn header(&self) -> [u8; 18] {
        let mut b = [0u8; 18];
        b[0] = self.id.len() as u8;
        b[1] = self.color_map_type;
        b[2] = self.image_type;
        b[3..5].copy_from_slice(&self.color_map_first.to_le_bytes());
        b[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        b[7] = self.color_map_entry_size;
        b[12..14].copy_from_slice(&self.width.to_le_bytes());
        b[14..16].copy_from_slice(&self.height.to_le_bytes());
        b[16] = self.pixel_depth;
        b[17] = self.descriptor;
        b
    }

    /// Complete file with `pixels` (raw or RLE packets) after the color map.
    pub fn build(&self, pixels: &[u8]) -> Vec<u8> {
        let mut out = self.header().to_vec();
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.color_map);
        out.extend_from_slice(pixels);
        out
    }
}

pub fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            if (x + y) % 2 == 0 {
                for c in 0..bpp {
                    pixels[off + c] = 190 + (c as u8 * 15);
                }
            } else {
                for c in 0..bpp {
                    pixels[off + c] = 10 + (c as u8 * 30);
                }
            }
        }
    }
    pixels
}

pub fn noise_pattern(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}
