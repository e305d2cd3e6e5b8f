#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    match toml_decode::decode(text) {
        Ok(mut table) => {
            std::hint::black_box(&mut table);
        }
        Err(err) => {
            let start = err.span.start as usize;
            assert!(start <= text.len());
            assert!(text.is_char_boundary(start));
            assert_eq!(err.position().is_none(), start == text.len());
            std::hint::black_box(err.to_string());
        }
    }
});
