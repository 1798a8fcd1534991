//! Codec integration tests: format detection, JSON and XML decoding of the
//! fixture documents, and encoding merged results in either format.

use sbom_merge::codec::{self, BomFormat, CodecError, FormatPreference};
use sbom_merge::merge::merge_documents;
use sbom_merge::model::{Bom, LicenseChoice};
use std::path::{Path, PathBuf};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should exist")
}

mod detection {
    use super::*;

    #[test]
    fn compound_extensions() {
        let content = read_fixture("lib.cdx.xml");
        let path = fixture_path("lib.cdx.xml");
        assert_eq!(
            codec::detect_format(Some(&path), &content).unwrap(),
            BomFormat::Xml
        );
    }

    #[test]
    fn sniffs_content_without_extension() {
        let json = read_fixture("app.cdx.json");
        let xml = read_fixture("lib.cdx.xml");
        let path = Path::new("bom");

        assert_eq!(codec::detect_format(Some(path), &json).unwrap(), BomFormat::Json);
        assert_eq!(codec::detect_format(None, &xml).unwrap(), BomFormat::Xml);
    }

    #[test]
    fn rejects_unrecognizable_content() {
        assert!(matches!(
            codec::detect_format(None, "SPDXVersion: SPDX-2.3"),
            Err(CodecError::UnknownFormat(_))
        ));
    }

    #[test]
    fn preference_resolution() {
        assert_eq!(FormatPreference::Auto.resolve(BomFormat::Xml), BomFormat::Xml);
        assert_eq!(FormatPreference::Json.resolve(BomFormat::Xml), BomFormat::Json);
        assert_eq!(FormatPreference::Xml.resolve(BomFormat::Json), BomFormat::Xml);
    }
}

mod decoding {
    use super::*;

    #[test]
    fn json_fixture() {
        let bom = codec::decode(&read_fixture("app.cdx.json"), BomFormat::Json).unwrap();
        assert_eq!(bom.spec_version.as_deref(), Some("1.5"));
        assert_eq!(bom.root_ref(), Some("pkg:cargo/app@1.0.0"));
        assert_eq!(bom.component_count(), 2);

        let tools = bom.metadata.and_then(|m| m.tools).expect("tools");
        assert!(tools.tools.is_none());
        assert_eq!(tools.components.map(|c| c.len()), Some(1));
    }

    #[test]
    fn xml_fixture() {
        let bom = codec::decode(&read_fixture("lib.cdx.xml"), BomFormat::Xml).unwrap();
        assert_eq!(bom.spec_version.as_deref(), Some("1.4"));
        assert_eq!(bom.bom_format.as_deref(), Some("CycloneDX"));
        assert_eq!(bom.root_ref(), Some("pkg:cargo/lib@3.1.0"));

        let log = &bom.components.as_ref().expect("components")[0];
        assert_eq!(log.purl.as_deref(), Some("pkg:cargo/log@0.4.21"));
        assert_eq!(
            log.licenses,
            Some(vec![LicenseChoice::expression("MIT OR Apache-2.0")])
        );

        let legacy = bom
            .metadata
            .and_then(|m| m.tools)
            .and_then(|t| t.tools)
            .expect("legacy tools");
        assert_eq!(legacy[0].name.as_deref(), Some("cyclonedx-maven-plugin"));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let result = codec::decode(&read_fixture("unsupported-version.cdx.json"), BomFormat::Json);
        assert!(matches!(result, Err(CodecError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = codec::decode(&read_fixture("malformed.cdx.json"), BomFormat::Json);
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn foreign_bom_format_is_rejected() {
        let result = codec::decode(r#"{"bomFormat":"SPDX"}"#, BomFormat::Json);
        assert!(matches!(result, Err(CodecError::UnknownFormat(_))));
    }
}

mod encoding {
    use super::*;

    #[test]
    fn xml_input_reencodes_to_equal_document() {
        let bom = codec::decode(&read_fixture("lib.cdx.xml"), BomFormat::Xml).unwrap();
        let xml = codec::encode(&bom, BomFormat::Xml, true).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert_eq!(codec::decode(&xml, BomFormat::Xml).unwrap(), bom);
    }

    #[test]
    fn merged_json_inputs_encode_as_xml() {
        let a = codec::decode(&read_fixture("app.cdx.json"), BomFormat::Json).unwrap();
        let b = codec::decode(&read_fixture("part.cdx.json"), BomFormat::Json).unwrap();
        let merged = merge_documents(&a, &b);

        let xml = codec::encode(&merged, BomFormat::Xml, false).unwrap();
        assert!(xml.contains(r#"xmlns="http://cyclonedx.org/schema/bom/1.5""#));
        assert!(xml.contains(r#"bom-ref="pkg:cargo/anyhow@1.0.86""#));

        let back = codec::decode(&xml, BomFormat::Xml).unwrap();
        assert_eq!(back.components, merged.components);
        assert_eq!(back.dependencies, merged.dependencies);
    }

    #[test]
    fn top_level_elements_follow_schema_order() {
        let bom = codec::decode(&read_fixture("part.cdx.json"), BomFormat::Json).unwrap();
        let xml = codec::encode(&bom, BomFormat::Xml, true).unwrap();

        // Direct children of <bom> are indented by exactly two spaces.
        let position = |tag: &str| {
            xml.find(&format!("\n  <{tag}>"))
                .unwrap_or_else(|| panic!("{tag} should be a child of bom"))
        };
        let metadata = position("metadata");
        let components = position("components");
        let dependencies = position("dependencies");
        let vulnerabilities = position("vulnerabilities");
        assert!(metadata < components, "metadata must precede components");
        assert!(components < dependencies, "components must precede dependencies");
        assert!(dependencies < vulnerabilities);
    }

    #[test]
    fn compact_and_pretty_json() {
        let bom = Bom::new("1.6");
        let compact = codec::encode(&bom, BomFormat::Json, false).unwrap();
        let pretty = codec::encode(&bom, BomFormat::Json, true).unwrap();

        assert_eq!(compact.trim_end().lines().count(), 1);
        assert!(pretty.lines().count() > 1);
        assert_eq!(
            codec::decode(&compact, BomFormat::Json).unwrap(),
            codec::decode(&pretty, BomFormat::Json).unwrap()
        );
    }
}
