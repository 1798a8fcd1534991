//! Unified error types for sbom-merge.
//!
//! The merge engine itself is infallible; everything here concerns getting
//! documents in and out of it.

use crate::codec::{CodecError, SUPPORTED_SPEC_VERSIONS};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-merge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomMergeError {
    /// Errors while decoding an input document
    #[error("Failed to parse SBOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while encoding an output document
    #[error("Failed to encode SBOM: {context}")]
    Encode {
        context: String,
        #[source]
        source: EncodeErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Unknown SBOM format: {0}")]
    UnknownFormat(String),

    #[error("Unsupported CycloneDX version: {version} (supported: {supported})")]
    UnsupportedVersion { version: String, supported: String },

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid XML structure: {0}")]
    InvalidXml(String),
}

/// Specific encode error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EncodeErrorKind {
    #[error("JSON serialization failed: {0}")]
    Json(String),

    #[error("XML serialization failed: {0}")]
    Xml(String),

    #[error("Output format not supported: {0}")]
    UnsupportedFormat(String),
}

/// Convenient Result type for sbom-merge operations
pub type Result<T> = std::result::Result<T, SbomMergeError>;

impl SbomMergeError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an encode error with context
    pub fn encode(context: impl Into<String>, source: EncodeErrorKind) -> Self {
        Self::Encode {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Map a decode failure onto the parse taxonomy.
    pub fn from_decode(context: impl Into<String>, err: CodecError) -> Self {
        let kind = match err {
            CodecError::UnknownFormat(msg) => ParseErrorKind::UnknownFormat(msg),
            CodecError::Json(e) => ParseErrorKind::InvalidJson(e.to_string()),
            CodecError::Xml(msg) => ParseErrorKind::InvalidXml(msg),
            CodecError::UnsupportedVersion(version) => ParseErrorKind::UnsupportedVersion {
                version,
                supported: SUPPORTED_SPEC_VERSIONS.join(", "),
            },
        };
        Self::parse(context, kind)
    }

    /// Map an encode failure onto the encode taxonomy.
    pub fn from_encode(context: impl Into<String>, err: CodecError) -> Self {
        let kind = match err {
            CodecError::Json(e) => EncodeErrorKind::Json(e.to_string()),
            CodecError::Xml(msg) => EncodeErrorKind::Xml(msg),
            other => EncodeErrorKind::UnsupportedFormat(other.to_string()),
        };
        Self::encode(context, kind)
    }
}

impl From<std::io::Error> for SbomMergeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SbomMergeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<CodecError> for SbomMergeError {
    fn from(err: CodecError) -> Self {
        Self::from_decode("", err)
    }
}

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost-first, so a failure deep in a decode reads
/// `"reading a.cdx.json: JSON deserialization"`.
///
/// ```
/// use sbom_merge::error::{ErrorContext, Result};
///
/// fn load(content: &str) -> Result<serde_json::Value> {
///     serde_json::from_str::<serde_json::Value>(content).context("loading input")
/// }
///
/// let err = load("{").unwrap_err();
/// assert!(err.to_string().contains("loading input"));
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SbomMergeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: SbomMergeError, new_ctx: &str) -> SbomMergeError {
    match err {
        SbomMergeError::Parse {
            context: existing,
            source,
        } => SbomMergeError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SbomMergeError::Encode {
            context: existing,
            source,
        } => SbomMergeError::Encode {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SbomMergeError::Io {
            path,
            message,
            source,
        } => SbomMergeError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SbomMergeError::Config(msg) => SbomMergeError::Config(chain_context(new_ctx, &msg)),
    }
}

/// `"new: existing"`, or just `new` when there is nothing to chain onto.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SbomMergeError::io("/path/to/bom.cdx.json", io_err);
        assert!(err.to_string().contains("/path/to/bom.cdx.json"));
    }

    #[test]
    fn test_codec_errors_map_to_kinds() {
        let err = SbomMergeError::from_decode(
            "a.cdx.xml",
            CodecError::UnsupportedVersion("2.0".to_string()),
        );
        match err {
            SbomMergeError::Parse {
                context,
                source: ParseErrorKind::UnsupportedVersion { version, supported },
            } => {
                assert_eq!(context, "a.cdx.xml");
                assert_eq!(version, "2.0");
                assert!(supported.contains("1.6"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = SbomMergeError::from_encode("out.xml", CodecError::Xml("boom".to_string()));
        assert!(matches!(
            err,
            SbomMergeError::Encode {
                source: EncodeErrorKind::Xml(_),
                ..
            }
        ));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(SbomMergeError::parse(
                "base",
                ParseErrorKind::InvalidJson("eof".to_string()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(SbomMergeError::Parse { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(SbomMergeError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
