//! CycloneDX JSON.

use super::CodecError;
use crate::model::Bom;

pub(super) fn decode(content: &str) -> Result<Bom, CodecError> {
    let content = content.trim_start_matches('\u{feff}');
    Ok(serde_json::from_str(content)?)
}

pub(super) fn encode(bom: &Bom, pretty: bool) -> Result<String, CodecError> {
    let mut out = if pretty {
        serde_json::to_string_pretty(bom)?
    } else {
        serde_json::to_string(bom)?
    };
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"bomFormat":"CycloneDX","specVersion":"1.6","version":1,
                      "components":[{"type":"library","name":"lib","x-vendor":true}]}"#;
        let bom = decode(json).expect("decode");
        assert_eq!(bom.component_count(), 1);
    }

    #[test]
    fn test_compact_and_pretty() {
        let bom = Bom::new("1.5");
        let compact = encode(&bom, false).expect("encode");
        assert_eq!(compact.lines().count(), 1);
        let pretty = encode(&bom, true).expect("encode");
        assert!(pretty.lines().count() > 1);
        assert!(compact.starts_with(r#"{"bomFormat":"CycloneDX","specVersion":"1.5""#));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(decode("{\"components\": ["), Err(CodecError::Json(_))));
    }
}
