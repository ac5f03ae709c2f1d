#![no_main]
use libfuzzer_sys::fuzz_target;
use zentga::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    for origin in [Origin::Top, Origin::Bottom] {
        let spec = ImageSpec::new(decoded.width, decoded.height, decoded.layout, origin);
        let Ok(reencoded) = encode(&spec, decoded.pixels(), decoded.layout, enough::Unstoppable)
        else {
            return;
        };
        let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };

        assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
        assert_eq!(decoded.width, decoded2.width);
        assert_eq!(decoded.height, decoded2.height);
        assert_eq!(decoded.layout, decoded2.layout);
        assert!(decoded2.warnings.is_empty());
    }
});
