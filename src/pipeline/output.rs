//! Output handling: encoding and writing to stdout or a file.

use crate::codec::{self, BomFormat};
use crate::error::SbomMergeError;
use crate::model::Bom;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }

    fn describe(&self) -> String {
        match self {
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::File(path) => path.display().to_string(),
        }
    }
}

/// Encode a BOM for output.
pub fn render_bom(bom: &Bom, format: BomFormat, pretty: bool) -> crate::error::Result<String> {
    codec::encode(bom, format, pretty)
        .map_err(|e| SbomMergeError::from_encode(format!("as {format}"), e))
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write output to stdout")?;
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {:?}", path))?;
            if !quiet {
                tracing::info!("Output written to {:?}", path);
            }
            Ok(())
        }
    }
}

/// Encode `bom` and write it to `target`.
pub fn write_bom(
    bom: &Bom,
    format: BomFormat,
    pretty: bool,
    target: &OutputTarget,
    quiet: bool,
) -> Result<()> {
    let content = render_bom(bom, format, pretty)
        .with_context(|| format!("Failed to encode SBOM for {}", target.describe()))?;
    write_output(&content, target, quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/merged.cdx.json");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_write_bom_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.cdx.xml");
        let target = OutputTarget::File(path.clone());

        write_bom(&Bom::new("1.6"), BomFormat::Xml, false, &target, true).expect("write");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.contains("http://cyclonedx.org/schema/bom/1.6"));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let target = OutputTarget::File(PathBuf::from("/nonexistent/dir/out.json"));
        let err = write_output("{}", &target, true).expect_err("should fail");
        assert!(err.to_string().contains("/nonexistent/dir/out.json"));
    }
}
