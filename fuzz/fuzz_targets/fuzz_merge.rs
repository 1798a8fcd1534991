#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_merge::codec::{self, BomFormat};
use sbom_merge::merge::{merge_as_dependency, merge_documents};

/// Fuzz both merge modes over two JSON documents split at the first NUL.
///
/// Merging is infallible, so any decoded pair must merge without panicking
/// and leave the inputs untouched.
fuzz_target!(|data: &[u8]| {
    let Some(split) = data.iter().position(|&b| b == 0) else {
        return;
    };
    let (left, right) = (&data[..split], &data[split + 1..]);
    let (Ok(left), Ok(right)) = (std::str::from_utf8(left), std::str::from_utf8(right)) else {
        return;
    };
    let (Ok(a), Ok(b)) = (
        codec::decode(left, BomFormat::Json),
        codec::decode(right, BomFormat::Json),
    ) else {
        return;
    };

    let before = a.clone();
    let merged = merge_documents(&a, &b);
    let _ = merge_as_dependency(&a, &b);
    let _ = merge_documents(&merged, &merged);
    assert_eq!(a, before);
});
