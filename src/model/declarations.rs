//! Attestation declarations and standards definitions (1.6+).

use super::{ExternalReference, Opaque};
use serde::{Deserialize, Serialize};

/// Conformance claims about the described artifacts.
///
/// `targets`, `affirmation` and `signature` are kept opaque: a merge takes
/// them whole from the first document that has them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Declarations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessors: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestations: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affirmation: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Opaque>,
}

impl Declarations {
    pub fn is_empty(&self) -> bool {
        [&self.assessors, &self.attestations, &self.claims, &self.evidence]
            .iter()
            .all(|section| section.as_ref().map_or(true, Vec::is_empty))
            && self.targets.is_none()
            && self.affirmation.is_none()
            && self.signature.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definitions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standards: Option<Vec<StandardDefinition>>,
}

impl Definitions {
    pub fn is_empty(&self) -> bool {
        self.standards.as_ref().map_or(true, Vec::is_empty)
    }
}

/// A standard (e.g. a security framework) that claims can refer to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StandardDefinition {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_references: Option<Vec<ExternalReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Opaque>,
}

impl StandardDefinition {
    pub fn new(bom_ref: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bom_ref: Some(bom_ref.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
