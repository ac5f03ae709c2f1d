//! # zentga
//!
//! Truevision TGA image decoder and encoder.
//!
//! ## Supported Formats
//!
//! | Image type | Kind | Pixel depth | Color map entries |
//! |---|---|---|---|
//! | 1, 9 | color-mapped (9 = RLE) | 8 | 15, 16, 24, 32 |
//! | 2, 10 | truecolor (10 = RLE) | 15, 16, 24, 32 | n/a |
//! | 3, 11 | grayscale (11 = RLE) | 8, 16 | n/a |
//!
//! Every file decodes to a canonical layout: 8-bit gray, 16-bit gray
//! (native endian), RGB8 or RGBA8, always top row first. The encoder writes
//! uncompressed L8, L16, RGB8 or RGBA8 files with either origin.
//!
//! Non-fatal problems (interleaved files, out-of-range palette indices, a
//! short RLE stream) are logged through `tracing` and collected as
//! [`TgaWarning`] values.
//!
//! ## Zero-Copy Decoding
//!
//! Uncompressed top-left 8-bit grayscale files decoded as
//! [`PixelLayout::Gray8`] borrow straight from the input. Everything else is
//! converted into an owned buffer.
//!
//! ## Non-Goals
//!
//! - RLE on the encode side
//! - TGA 2.0 footer and extension area
//! - Color space conversion
//!
//! ## Usage
//!
//! ```no_run
//! use zentga::{DecodeRequest, EncodeRequest, ImageInfo, ImageSpec, Origin, PixelLayout};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your TGA bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} type {}", info.width, info.height, info.image_type);
//!
//! // Decode to RGBA
//! let decoded = DecodeRequest::new(data)
//!     .with_layout(PixelLayout::Rgba8)
//!     .decode(Unstoppable)?;
//!
//! // Encode back to an uncompressed bottom-left file
//! let spec = ImageSpec::new(decoded.width, decoded.height, PixelLayout::Rgba8, Origin::Bottom);
//! let encoded = EncodeRequest::new(spec)
//!     .encode(decoded.pixels(), decoded.layout, Unstoppable)?;
//! # Ok::<(), zentga::TgaError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;
mod spec;
mod tga;

mod decode;
mod encode;

#[cfg(feature = "std")]
mod input;
#[cfg(feature = "std")]
mod output;
#[cfg(feature = "std")]
mod registry;
#[cfg(feature = "std")]
mod traits;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{TgaError, TgaWarning};
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;
pub use spec::{ImageSpec, Origin};
pub use tga::EXTENSIONS;

#[cfg(feature = "std")]
pub use input::TgaInput;
#[cfg(feature = "std")]
pub use output::TgaOutput;
#[cfg(feature = "std")]
pub use registry::{Codec, Registry};
#[cfg(feature = "std")]
pub use traits::{ImageInput, ImageOutput};

/// Decode an in-memory TGA file to its canonical layout.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, TgaError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode `pixels` (in `layout`, top row first) as an uncompressed TGA file
/// described by `spec`.
pub fn encode(
    spec: &ImageSpec,
    pixels: &[u8],
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<alloc::vec::Vec<u8>, TgaError> {
    EncodeRequest::new(*spec).encode(pixels, layout, stop)
}
