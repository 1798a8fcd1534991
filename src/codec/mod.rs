//! CycloneDX wire formats.
//!
//! Decodes JSON and XML documents into [`Bom`] and encodes them back. The
//! merge engine never sees wire bytes; everything here runs before or after
//! it.

mod json;
mod xml;

use crate::model::Bom;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// CycloneDX spec versions accepted on decode.
pub const SUPPORTED_SPEC_VERSIONS: &[&str] = &["1.2", "1.3", "1.4", "1.5", "1.6"];

/// Errors raised while decoding or encoding a document.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unable to detect BOM format: {0}")]
    UnknownFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("unsupported CycloneDX spec version: {0}")]
    UnsupportedVersion(String),
}

/// Concrete wire format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BomFormat {
    Json,
    Xml,
}

impl BomFormat {
    /// Format implied by a file name, compound extensions included
    /// (`app.cdx.json`, `bom.xml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Format implied by the first non-whitespace byte.
    pub fn sniff(content: &str) -> Option<Self> {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();
        if trimmed.starts_with('{') {
            Some(Self::Json)
        } else if trimmed.starts_with('<') {
            Some(Self::Xml)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl std::fmt::Display for BomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BomFormat::Json => write!(f, "json"),
            BomFormat::Xml => write!(f, "xml"),
        }
    }
}

/// Requested output format: follow the input, or force one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreference {
    /// Same format as the first input
    #[default]
    Auto,
    /// CycloneDX JSON
    Json,
    /// CycloneDX XML
    Xml,
}

impl FormatPreference {
    /// Resolve against the format the first input was read in.
    pub fn resolve(self, detected: BomFormat) -> BomFormat {
        match self {
            Self::Auto => detected,
            Self::Json => BomFormat::Json,
            Self::Xml => BomFormat::Xml,
        }
    }
}

impl std::fmt::Display for FormatPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatPreference::Auto => write!(f, "auto"),
            FormatPreference::Json => write!(f, "json"),
            FormatPreference::Xml => write!(f, "xml"),
        }
    }
}

/// Detect the format of `content`, trusting the file extension first.
pub fn detect_format(path: Option<&Path>, content: &str) -> Result<BomFormat, CodecError> {
    path.and_then(BomFormat::from_path)
        .or_else(|| BomFormat::sniff(content))
        .ok_or_else(|| CodecError::UnknownFormat("expected CycloneDX JSON or XML".to_string()))
}

/// Decode a document in the given format.
pub fn decode(content: &str, format: BomFormat) -> Result<Bom, CodecError> {
    let bom = match format {
        BomFormat::Json => json::decode(content)?,
        BomFormat::Xml => xml::decode(content)?,
    };
    check_document(&bom)?;
    Ok(bom)
}

/// Detect the format and decode.
pub fn decode_auto(path: Option<&Path>, content: &str) -> Result<(Bom, BomFormat), CodecError> {
    let format = detect_format(path, content)?;
    decode(content, format).map(|bom| (bom, format))
}

/// Encode a document.
pub fn encode(bom: &Bom, format: BomFormat, pretty: bool) -> Result<String, CodecError> {
    match format {
        BomFormat::Json => json::encode(bom, pretty),
        BomFormat::Xml => xml::encode(bom, pretty),
    }
}

fn check_document(bom: &Bom) -> Result<(), CodecError> {
    if let Some(marker) = bom.bom_format.as_deref() {
        if !marker.eq_ignore_ascii_case(crate::model::BOM_FORMAT) {
            return Err(CodecError::UnknownFormat(format!(
                "bomFormat is '{marker}', expected 'CycloneDX'"
            )));
        }
    }
    if let Some(version) = bom.spec_version.as_deref() {
        if !SUPPORTED_SPEC_VERSIONS.contains(&version) {
            return Err(CodecError::UnsupportedVersion(version.to_string()));
        }
    }
    Ok(())
}
