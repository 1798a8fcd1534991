#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_merge::codec::{self, BomFormat};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the CycloneDX JSON decoder.
///
/// Also wraps the input as a component list so mutations reach the
/// component model instead of failing on the envelope.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = codec::decode(s, BomFormat::Json);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"{{"bomFormat":"CycloneDX","specVersion":"1.5","components":[{s}]}}"#,
            );
            let _ = codec::decode(&wrapped, BomFormat::Json);
        }
    }
});
