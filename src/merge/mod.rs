//! Non-destructive CycloneDX merge engine.
//!
//! The engine is a pure in-memory transform: it borrows its inputs, never
//! mutates them, and returns a freshly owned [`Bom`]. It has no failure
//! modes; any two decoded documents merge.
//!
//! # Policies
//!
//! - Scalars: first non-empty / non-zero value wins, field by field.
//! - Arrays: concatenation, set union by value, or set union by
//!   [`identity`](identity::Identify) with recursive merge of colliding
//!   entries. Empty results are always emitted as absent.
//! - Opaque singletons (triggers, targets, signatures, ...) are copied
//!   whole from the first input that has them.
//!
//! # Modes
//!
//! [`MergeMode::Merge`] folds documents header into header, reparenting
//! the dependency edges of later roots onto the first root.
//! [`MergeMode::Dependency`] instead links each later root component as a
//! dependency of the first root.
//!
//! # Example
//!
//! ```
//! use sbom_merge::merge::{MergeEngine, MergeMode};
//! use sbom_merge::model::{Bom, Component};
//!
//! let mut a = Bom::new("1.5");
//! a.components = Some(vec![Component::new("library", "serde").with_version("1.0")]);
//! let mut b = Bom::new("1.5");
//! b.components = Some(vec![Component::new("library", "serde").with_version("1.0")]);
//!
//! let merged = MergeEngine::new(MergeMode::Merge).merge_all(&[a, b]).unwrap();
//! assert_eq!(merged.component_count(), 1);
//! ```

mod component;
mod declarations;
mod document;
mod formulation;
pub mod identity;
mod metadata;
pub mod primitives;
mod records;
mod service;

pub use document::{
    fold, merge_all, merge_all_as_dependencies, merge_as_dependency, merge_documents,
    merge_optional,
};
pub use identity::{identity_of, same_component, Identify, IdentityKey};
pub use primitives::Merge;

use crate::model::Bom;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How documents are combined.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
    /// Merge headers and collections; reparent later roots' edges
    #[default]
    Merge,
    /// Attach each later root component as a dependency of the first root
    Dependency,
}

impl MergeMode {
    /// The pairwise merge function for this mode.
    pub fn merge_fn(self) -> fn(&Bom, &Bom) -> Bom {
        match self {
            Self::Merge => merge_documents,
            Self::Dependency => merge_as_dependency,
        }
    }
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeMode::Merge => write!(f, "merge"),
            MergeMode::Dependency => write!(f, "dependency"),
        }
    }
}

/// Entry point for merging with a fixed [`MergeMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeEngine {
    mode: MergeMode,
}

impl MergeEngine {
    pub fn new(mode: MergeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    /// Merge two documents; `a` takes precedence.
    #[must_use]
    pub fn merge(&self, a: &Bom, b: &Bom) -> Bom {
        (self.mode.merge_fn())(a, b)
    }

    /// Left-to-right fold of `boms`. `None` for an empty slice.
    pub fn merge_all(&self, boms: &[Bom]) -> Option<Bom> {
        tracing::debug!(mode = %self.mode, documents = boms.len(), "folding documents");
        fold(boms, self.mode.merge_fn())
    }
}
