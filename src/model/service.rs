//! CycloneDX services and dependency graph entries.

use super::{ExternalReference, LicenseChoice, Opaque, OrganizationalEntity, Property};
use serde::{Deserialize, Serialize};

/// An external or internal service the described system talks to.
///
/// Like components, services may nest further services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<OrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated: Option<bool>,
    #[serde(rename = "x-trust-boundary", skip_serializing_if = "Option::is_none")]
    pub trust_boundary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<DataClassification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<LicenseChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_references: Option<Vec<ExternalReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Opaque>,
}

impl Service {
    pub fn new(bom_ref: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bom_ref: Some(bom_ref.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Depth-first iterator over this service and all nested services.
    pub fn walk(&self) -> impl Iterator<Item = &Service> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            if let Some(children) = &next.services {
                stack.extend(children.iter().rev());
            }
            Some(next)
        })
    }
}

/// Direction and classification of data flowing through a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DataClassification {
    pub flow: String,
    pub classification: String,
}

/// One node of the dependency graph: `ref` depends on every entry of `dependsOn`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dependency {
    #[serde(rename = "ref")]
    pub dep_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provides: Option<Vec<String>>,
}

impl Dependency {
    pub fn new(dep_ref: impl Into<String>) -> Self {
        Self {
            dep_ref: dep_ref.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn depends_on<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let refs: Vec<String> = refs.into_iter().map(Into::into).collect();
        self.depends_on = if refs.is_empty() { None } else { Some(refs) };
        self
    }

    /// Outgoing edges, empty when absent.
    pub fn edges(&self) -> &[String] {
        self.depends_on.as_deref().unwrap_or_default()
    }
}
