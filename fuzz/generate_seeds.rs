#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(image_type: u8, cm: (u8, u16, u8), w: u16, h: u16, depth: u8, desc: u8) -> Vec<u8> {
    let (cm_type, cm_len, cm_size) = cm;
    let mut b = vec![0u8; 18];
    b[1] = cm_type;
    b[2] = image_type;
    b[5..7].copy_from_slice(&cm_len.to_le_bytes());
    b[7] = cm_size;
    b[12..14].copy_from_slice(&w.to_le_bytes());
    b[14..16].copy_from_slice(&h.to_le_bytes());
    b[16] = depth;
    b[17] = desc;
    b
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Truecolor 24-bit 2x2, bottom-left
    let mut tc24 = header(2, (0, 0, 0), 2, 2, 24, 0);
    tc24.extend_from_slice(&[0, 0, 255, 0, 255, 0, 255, 0, 0, 128, 128, 128]);
    fs::write(format!("{dir}/truecolor24_2x2.tga"), tc24).unwrap();

    // Truecolor 32-bit 1x1 with alpha, top-left
    let mut tc32 = header(2, (0, 0, 0), 1, 1, 32, 0x28);
    tc32.extend_from_slice(&[10, 20, 30, 40]);
    fs::write(format!("{dir}/truecolor32_1x1.tga"), tc32).unwrap();

    // Truecolor 16-bit 1555 2x1
    let mut tc16 = header(2, (0, 0, 0), 2, 1, 16, 0x21);
    tc16.extend_from_slice(&0xFFFFu16.to_le_bytes());
    tc16.extend_from_slice(&0x001Fu16.to_le_bytes());
    fs::write(format!("{dir}/truecolor16_2x1.tga"), tc16).unwrap();

    // Color-mapped, 15-bit entries, 2 entries, 2x1
    let mut cm15 = header(1, (1, 2, 15), 2, 1, 8, 0x20);
    cm15.extend_from_slice(&0x7FFFu16.to_le_bytes());
    cm15.extend_from_slice(&0x0000u16.to_le_bytes());
    cm15.extend_from_slice(&[0, 1]);
    fs::write(format!("{dir}/colormap15_2x1.tga"), cm15).unwrap();

    // Grayscale 16-bit 1x2
    let mut g16 = header(3, (0, 0, 0), 1, 2, 16, 0);
    g16.extend_from_slice(&[0x34, 0x12, 0xFF, 0xFF]);
    fs::write(format!("{dir}/gray16_1x2.tga"), g16).unwrap();

    // RLE truecolor 24-bit 4x1: one run packet
    let mut rle24 = header(10, (0, 0, 0), 4, 1, 24, 0x20);
    rle24.extend_from_slice(&[0x83, 0xFF, 0x00, 0x00]);
    fs::write(format!("{dir}/rle24_run_4x1.tga"), rle24).unwrap();

    // RLE grayscale 8-bit 3x1: one raw packet
    let mut rle8 = header(11, (0, 0, 0), 3, 1, 8, 0x20);
    rle8.extend_from_slice(&[0x02, 10, 20, 30]);
    fs::write(format!("{dir}/rle_gray_raw_3x1.tga"), rle8).unwrap();

    // RLE color-mapped with 24-bit entries
    let mut rle_cm = header(9, (1, 2, 24), 4, 1, 8, 0x20);
    rle_cm.extend_from_slice(&[0, 0, 255, 255, 0, 0]);
    rle_cm.extend_from_slice(&[0x81, 0, 0x01, 1, 0]);
    fs::write(format!("{dir}/rle_colormap24_4x1.tga"), rle_cm).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/short_header.bin"), &header(2, (0, 0, 0), 1, 1, 24, 0)[..10]).unwrap();
    fs::write(format!("{dir}/bad_entry_size.tga"), header(1, (1, 1, 7), 1, 1, 8, 0)).unwrap();
    let mut overflow = header(10, (0, 0, 0), 2, 1, 24, 0);
    overflow.extend_from_slice(&[0x85, 1, 2, 3]);
    fs::write(format!("{dir}/rle_overflow.tga"), overflow).unwrap();
    let mut interleaved = header(3, (0, 0, 0), 1, 1, 8, 0x40);
    interleaved.push(7);
    fs::write(format!("{dir}/interleaved.tga"), interleaved).unwrap();

    println!("Generated seed corpus in {dir}/");
}
