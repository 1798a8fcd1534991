//! Reading BOM files.

use crate::codec::{self, BomFormat};
use crate::error::{ErrorContext, SbomMergeError};
use crate::model::Bom;
use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// A decoded BOM together with where it came from.
#[derive(Debug, Clone)]
pub struct ParsedBom {
    pub bom: Bom,
    /// Wire format the file was read in
    pub format: BomFormat,
    pub path: PathBuf,
}

impl ParsedBom {
    #[must_use]
    pub const fn bom(&self) -> &Bom {
        &self.bom
    }

    #[must_use]
    pub fn into_bom(self) -> Bom {
        self.bom
    }
}

/// Read and decode one file, with the path in every error.
pub fn read_bom(path: &Path) -> crate::error::Result<(Bom, BomFormat)> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SbomMergeError::io(path, e))?;
    codec::decode_auto(Some(path), &content).with_context(|| path.display().to_string())
}

/// Parse a BOM with context for error messages.
pub fn parse_bom_with_context(path: &Path, quiet: bool) -> Result<ParsedBom> {
    if !quiet {
        tracing::info!("Parsing SBOM: {:?}", path);
    }

    let (bom, format) = read_bom(path).map_err(|e| {
        anyhow::Error::new(e).context(format!("Failed to read SBOM: {}", path.display()))
    })?;

    if !quiet {
        tracing::info!(
            "Parsed {} components ({format}, spec {})",
            bom.component_count(),
            bom.spec_version.as_deref().unwrap_or("unknown")
        );
    }

    Ok(ParsedBom {
        bom,
        format,
        path: path.to_path_buf(),
    })
}

/// Parse several BOMs in parallel, preserving input order.
///
/// Fails on the first input that cannot be read or decoded.
pub fn parse_boms_parallel(paths: &[PathBuf], quiet: bool) -> Result<Vec<ParsedBom>> {
    paths
        .par_iter()
        .map(|path| parse_bom_with_context(path, quiet))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("tempfile");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_read_bom_reports_format() {
        let file = write_temp(
            ".cdx.json",
            r#"{"bomFormat":"CycloneDX","specVersion":"1.5","version":1}"#,
        );
        let (bom, format) = read_bom(file.path()).expect("read");
        assert_eq!(format, BomFormat::Json);
        assert_eq!(bom.spec_version.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_read_bom_error_names_file() {
        let file = write_temp(".json", "{ not json");
        let err = read_bom(file.path()).expect_err("invalid");
        let message = err.to_string();
        assert!(
            message.contains(&file.path().display().to_string()),
            "{message}"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_bom(Path::new("/nonexistent/bom.json")).expect_err("missing");
        assert!(matches!(err, SbomMergeError::Io { .. }));
    }

    #[test]
    fn test_parallel_parse_keeps_order() {
        let a = write_temp(".json", r#"{"bomFormat":"CycloneDX","serialNumber":"a"}"#);
        let b = write_temp(".json", r#"{"bomFormat":"CycloneDX","serialNumber":"b"}"#);
        let paths = vec![a.path().to_path_buf(), b.path().to_path_buf()];

        let parsed = parse_boms_parallel(&paths, true).expect("parse");
        let serials: Vec<_> = parsed
            .iter()
            .filter_map(|p| p.bom().serial_number.as_deref())
            .collect();
        assert_eq!(serials, ["a", "b"]);
    }
}
