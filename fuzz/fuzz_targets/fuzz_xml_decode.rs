#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_merge::codec::{self, BomFormat};

/// Fuzz the CycloneDX XML decoder, re-encoding whatever decodes.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(bom) = codec::decode(s, BomFormat::Xml) {
            let _ = codec::encode(&bom, BomFormat::Xml, false);
        }
    }
});
