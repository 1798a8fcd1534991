//! **Non-destructive merging of CycloneDX software bills of materials.**
//!
//! `sbom-merge` combines two or more CycloneDX BOMs (JSON or XML, spec
//! 1.2 to 1.6) into one, without losing information from any input. Entities
//! are matched by identity (BOM reference, else name/version/purl), colliding
//! entities are merged field by field with the earlier input taking
//! precedence, and the dependency graph is reconciled so the result has a
//! single root.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The in-memory CycloneDX document tree, [`Bom`].
//! - **[`merge`]**: The merge engine. Pure and infallible: it borrows its
//!   inputs and returns a new document.
//! - **[`codec`]**: JSON and XML decoding/encoding with format detection.
//! - **[`diff`]**: Identity-keyed structural diff of two documents.
//! - **[`pipeline`]**: Reading and writing files with path context.
//! - **[`config`]**: Typed configuration and YAML config-file discovery.
//!
//! ## Merging Two Documents
//!
//! ```
//! use sbom_merge::{codec, merge_documents, BomFormat};
//!
//! let a = codec::decode(
//!     r#"{"bomFormat":"CycloneDX","specVersion":"1.5",
//!         "components":[{"type":"library","bom-ref":"pkg:cargo/serde@1.0.0","name":"serde"}]}"#,
//!     BomFormat::Json,
//! ).unwrap();
//! let b = codec::decode(
//!     r#"{"bomFormat":"CycloneDX","specVersion":"1.5",
//!         "components":[{"type":"library","bom-ref":"pkg:cargo/serde@1.0.0","name":"serde",
//!                        "licenses":[{"license":{"id":"MIT"}}]}]}"#,
//!     BomFormat::Json,
//! ).unwrap();
//!
//! let merged = merge_documents(&a, &b);
//! let serde = &merged.components.as_ref().unwrap()[0];
//! assert!(serde.licenses.is_some());
//! assert_eq!(merged.component_count(), 1);
//! ```
//!
//! ## Merging Files
//!
//! ```no_run
//! use sbom_merge::{MergeEngine, MergeMode};
//! use sbom_merge::pipeline::{parse_boms_parallel, write_bom, OutputTarget};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let paths = vec![PathBuf::from("app.cdx.json"), PathBuf::from("lib.cdx.xml")];
//!     let parsed = parse_boms_parallel(&paths, false)?;
//!     let boms: Vec<_> = parsed.iter().map(|p| p.bom.clone()).collect();
//!
//!     let engine = MergeEngine::new(MergeMode::Dependency);
//!     if let Some(merged) = engine.merge_all(&boms) {
//!         write_bom(&merged, parsed[0].format, true, &OutputTarget::Stdout, false)?;
//!     }
//!     Ok(())
//! }
//! ```

// Discourage unwrap() in production code
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    // `old`/`new`, `a`/`b` pairs are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod diff;
pub mod error;
pub mod merge;
pub mod model;
pub mod pipeline;

pub use codec::{BomFormat, FormatPreference};
pub use diff::{diff_boms, DiffResult};
pub use error::{ErrorContext, Result, SbomMergeError};
pub use merge::{
    merge_all, merge_as_dependency, merge_documents, Identify, IdentityKey, Merge, MergeEngine,
    MergeMode,
};
pub use model::Bom;
