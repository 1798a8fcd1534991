//! In-memory CycloneDX document tree.
//!
//! These types mirror the CycloneDX 1.2–1.6 JSON schema closely enough that
//! a decoded document survives a merge and re-encode without losing the
//! sections the merge engine does not look into. Every optional collection
//! is an `Option<Vec<_>>`: the merge engine treats "absent" and "empty" as
//! the same thing and always emits `None` for an empty result.

mod annotation;
mod bom;
mod common;
mod component;
mod declarations;
mod formulation;
mod service;
mod vulnerability;

pub use annotation::*;
pub use bom::*;
pub use common::*;
pub use component::*;
pub use declarations::*;
pub use formulation::*;
pub use service::*;
pub use vulnerability::*;
