//! Structural diff between two BOMs.
//!
//! Entities are matched with the same identity model the merge engine uses
//! ([`crate::merge::identity`]); matched entities whose content hashes
//! differ are reported as modified, with the top-level fields that changed.
//!
//! # Example
//!
//! ```
//! use sbom_merge::diff::diff_boms;
//! use sbom_merge::model::{Bom, Component};
//!
//! let old = Bom::new("1.5");
//! let mut new = Bom::new("1.5");
//! new.components = Some(vec![Component::new("library", "serde").with_bom_ref("serde")]);
//!
//! let result = diff_boms(&old, &new);
//! assert_eq!(result.summary.components_added, 1);
//! ```

mod engine;
mod report;
mod result;

pub use engine::{diff_boms, diff_dependencies, diff_entities, Diffable};
pub use report::{render_diff, DiffFormat};
pub use result::{ChangeSet, DependencyChange, DiffResult, DiffSummary, EntityChange};
