//! TGA packet run-length decoding.
//!
//! Each packet starts with one header byte. Bit 7 set: run packet, one pixel
//! repeated `(h & 0x7F) + 1` times. Bit 7 clear: raw packet, `(h & 0x7F) + 1`
//! literal pixels. Packets may cross scanline boundaries but never the end of
//! the image.

use enough::Stop;

use crate::error::TgaError;

/// Byte supply for the decoder. `fill` returns fewer bytes than requested
/// only at end of input.
pub(crate) trait RleSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, TgaError>;
}

/// Reads packets out of an in-memory slice.
pub(crate) struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl RleSource for SliceSource<'_> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, TgaError> {
        let available = self.data.len().saturating_sub(self.pos);
        let n = buf.len().min(available);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Reads packets straight from a stream positioned at the pixel data.
#[cfg(feature = "std")]
pub(crate) struct ReadSource<'a, R: std::io::Read>(pub &'a mut R);

#[cfg(feature = "std")]
impl<R: std::io::Read> RleSource for ReadSource<'_, R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, TgaError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.0.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

/// Decompress into `out` until it is full or the input runs dry.
///
/// Returns the number of bytes written. A short count is not an error here;
/// the caller decides how to report it. `out` must start zeroed so that a
/// short stream leaves black pixels behind.
pub(crate) fn decode_rle<S: RleSource>(
    src: &mut S,
    pixel_bytes: usize,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<usize, TgaError> {
    let capacity = out.len();
    let mut pos = 0usize;
    let mut pixel = [0u8; 4];
    let mut packets = 0u32;

    while pos < capacity {
        if packets % 4096 == 0 {
            stop.check()?;
        }
        packets = packets.wrapping_add(1);

        let mut header = [0u8; 1];
        if src.fill(&mut header)? == 0 {
            break;
        }
        let count = usize::from(header[0] & 0x7F) + 1;
        let packet_bytes = count * pixel_bytes;
        if pos + packet_bytes > capacity {
            return Err(TgaError::RleOverflow {
                offset: pos,
                packet_bytes,
                capacity,
            });
        }

        if header[0] & 0x80 != 0 {
            let value = &mut pixel[..pixel_bytes];
            if src.fill(value)? < pixel_bytes {
                break;
            }
            for dst in out[pos..pos + packet_bytes].chunks_exact_mut(pixel_bytes) {
                dst.copy_from_slice(value);
            }
            pos += packet_bytes;
        } else {
            let n = src.fill(&mut out[pos..pos + packet_bytes])?;
            pos += n;
            if n < packet_bytes {
                break;
            }
        }
    }

    Ok(pos)
}
