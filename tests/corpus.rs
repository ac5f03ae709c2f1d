//! Test corpus: roundtrip tests with various patterns, sizes, layouts and
//! storage options, plus file-path and registry round trips.

mod common;

use std::io::Cursor;

use common::{TgaFile, checkerboard, noise_pattern};
use enough::Unstoppable;
use zentga::*;

const SIZES: &[(usize, usize)] = &[(1, 1), (2, 3), (17, 5), (64, 1), (1, 64), (33, 31)];

const LAYOUTS: &[PixelLayout] = &[
    PixelLayout::Gray8,
    PixelLayout::Gray16,
    PixelLayout::Rgb8,
    PixelLayout::Rgba8,
];

// ── In-memory roundtrips ─────────────────────────────────────────────

#[test]
fn pattern_roundtrips_across_sizes_layouts_origins() {
    for &(w, h) in SIZES {
        for &layout in LAYOUTS {
            for origin in [Origin::Top, Origin::Bottom] {
                let bpp = layout.bytes_per_pixel();
                for pixels in [checkerboard(w, h, bpp), noise_pattern(w, h, bpp)] {
                    let spec = ImageSpec::new(w as u32, h as u32, layout, origin);
                    let encoded = encode(&spec, &pixels, layout, Unstoppable).unwrap();
                    let decoded = decode(&encoded, Unstoppable).unwrap();
                    assert_eq!(decoded.layout, layout, "{w}x{h} {layout:?} {origin:?}");
                    assert_eq!(
                        decoded.pixels(),
                        &pixels[..],
                        "{w}x{h} {layout:?} {origin:?}"
                    );
                }
            }
        }
    }
}

/// Compress stored rows into raw packets of at most 128 pixels.
fn rle_raw_packets(stored: &[u8], pixel_bytes: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in stored.chunks(128 * pixel_bytes) {
        out.push((chunk.len() / pixel_bytes - 1) as u8);
        out.extend_from_slice(chunk);
    }
    out
}

/// Compress stored pixels into maximal run packets.
fn rle_run_packets(stored: &[u8], pixel_bytes: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let pixels: Vec<&[u8]> = stored.chunks(pixel_bytes).collect();
    let mut i = 0;
    while i < pixels.len() {
        let mut run = 1;
        while i + run < pixels.len() && run < 128 && pixels[i + run] == pixels[i] {
            run += 1;
        }
        out.push(0x80 | (run - 1) as u8);
        out.extend_from_slice(pixels[i]);
        i += run;
    }
    out
}

#[test]
fn rle_files_match_uncompressed() {
    for &(w, h) in SIZES {
        let formats = [(8u8, 3u8, 0x20u8), (16, 3, 0), (24, 2, 0x20), (32, 2, 0x08)];
        for (depth, image_type, descriptor) in formats {
            let pixel_bytes = usize::from(depth) / 8;
            for stored in [checkerboard(w, h, pixel_bytes), noise_pattern(w, h, pixel_bytes)] {
                let file = TgaFile::new(image_type, w as u16, h as u16, depth)
                    .descriptor(descriptor);
                let plain_bytes = file.build(&stored);
                let plain = decode(&plain_bytes, Unstoppable).unwrap();

                let rle_file = TgaFile {
                    image_type: image_type + 8,
                    ..file.clone()
                };
                for payload in [
                    rle_raw_packets(&stored, pixel_bytes),
                    rle_run_packets(&stored, pixel_bytes),
                ] {
                    let rle_bytes = rle_file.build(&payload);
                    let rle = decode(&rle_bytes, Unstoppable).unwrap();
                    assert_eq!(rle.pixels(), plain.pixels(), "{w}x{h} depth {depth}");
                    assert!(rle.warnings.is_empty());
                }
            }
        }
    }
}

#[test]
fn stream_and_memory_decode_agree() {
    for &(w, h) in SIZES {
        let stored = noise_pattern(w, h, 3);
        let data = TgaFile::new(10, w as u16, h as u16, 24)
            .bottom_left()
            .build(&rle_run_packets(&stored, 3));
        for layout in [PixelLayout::Rgb8, PixelLayout::Bgra8, PixelLayout::Gray8] {
            let decoded = DecodeRequest::new(&data)
                .with_layout(layout)
                .decode(Unstoppable)
                .unwrap();
            let mut input = TgaInput::new(Cursor::new(&data[..])).unwrap();
            let mut buf = vec![0u8; w * h * layout.bytes_per_pixel()];
            input.read_image(&mut buf, layout).unwrap();
            assert_eq!(decoded.pixels(), &buf[..], "{w}x{h} {layout:?}");
        }
    }
}

// ── Files & registry ─────────────────────────────────────────────────

#[test]
fn file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.tga");
    let pixels = noise_pattern(9, 4, 4);
    let spec = ImageSpec::new(9, 4, PixelLayout::Rgba8, Origin::Bottom);

    let mut output = TgaOutput::create(&path, spec).unwrap();
    output.write_image(&pixels, PixelLayout::Rgba8).unwrap();
    output.close().unwrap();

    let mut input = TgaInput::open(&path).unwrap();
    assert_eq!(input.spec(), Some(&spec));
    let mut back = vec![0u8; pixels.len()];
    input.read_image(&mut back, PixelLayout::Rgba8).unwrap();
    assert_eq!(back, pixels);
    input.close();
}

#[test]
fn create_validates_before_touching_the_file_system() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.tga");
    let spec = ImageSpec {
        width: 1,
        height: 1,
        channels: 2,
        bit_depth: 8,
        origin: Origin::Top,
    };
    assert!(matches!(
        TgaOutput::create(&path, spec),
        Err(TgaError::UnsupportedOutputFormat { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        TgaInput::open(dir.path().join("missing.tga")),
        Err(TgaError::Io(_))
    ));
}

#[test]
fn registry_roundtrip_through_trait_objects() {
    let dir = tempfile::tempdir().unwrap();
    let pixels = checkerboard(6, 6, 3);
    let spec = ImageSpec::new(6, 6, PixelLayout::Rgb8, Origin::Top);

    for ext in EXTENSIONS {
        let path = dir.path().join(format!("image.{ext}"));
        let registry = Registry::global();
        assert_eq!(registry.for_path(&path).unwrap(), Codec::Tga);

        let mut output = registry.create_output(&path, spec).unwrap();
        assert_eq!(output.format_name(), "TGA");
        output.write_image(&pixels, PixelLayout::Rgb8).unwrap();
        output.close().unwrap();

        let mut input = registry.open_input(&path).unwrap();
        assert_eq!(input.spec(), Some(&spec));
        assert!(input.seek_subimage(0, 0));
        assert!(!input.seek_subimage(0, 1));
        let mut row = vec![0u8; 18];
        input.read_native_scanline(5, &mut row).unwrap();
        assert_eq!(&row[..], &pixels[5 * 18..]);
        let mut back = vec![0u8; pixels.len()];
        assert_eq!(input.read_image(&mut back, PixelLayout::Rgb8).unwrap(), back.len());
        assert_eq!(back, pixels);
        input.close();
        assert!(input.spec().is_none());
    }

    assert!(matches!(
        Registry::global().open_input(&dir.path().join("image.png")),
        Err(TgaError::UnknownExtension(_))
    ));
}
