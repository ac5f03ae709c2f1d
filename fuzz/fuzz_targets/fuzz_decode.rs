#![no_main]
use libfuzzer_sys::fuzz_target;
use zentga::*;

fuzz_target!(|data: &[u8]| {
    // In-memory decode in several layouts must never panic
    let _ = decode(data, enough::Unstoppable);
    for layout in [PixelLayout::Gray8, PixelLayout::Rgb8, PixelLayout::Bgra8] {
        let _ = DecodeRequest::new(data)
            .with_layout(layout)
            .decode(enough::Unstoppable);
    }

    // Stream decode, scanline by scanline then whole image
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let cursor = std::io::Cursor::new(data);
    let Ok(mut input) = TgaInput::with_limits(cursor, &limits, enough::Unstoppable) else {
        return;
    };
    let Some(spec) = input.spec().copied() else {
        return;
    };
    let mut row = vec![0u8; spec.scanline_bytes()];
    for y in 0..spec.height.min(64) {
        let _ = input.read_native_scanline(y, &mut row);
    }
    let mut image = vec![0u8; spec.width as usize * spec.height as usize * 4];
    let _ = input.read_image(&mut image, PixelLayout::Rgba8);
});
