//! CycloneDX component and its nested descriptive sections.

use super::{
    AttachedText, ExternalReference, Hash as HashEntry, LicenseChoice, Opaque,
    OrganizationalContact, OrganizationalEntity, Property,
};
use serde::{Deserialize, Serialize};

/// A library, application, container, file, ... described by the BOM.
///
/// Components form a tree: `components` holds nested children that follow
/// the same rules as top-level ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Component {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(rename = "mime-type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<OrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<OrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<OrganizationalContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashes: Option<Vec<HashEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<LicenseChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omnibor_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swhid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swid: Option<Swid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pedigree: Option<Pedigree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_references: Option<Vec<ExternalReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_card: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crypto_properties: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Opaque>,
}

impl Component {
    /// Create a component of the given CycloneDX type.
    pub fn new(component_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            component_type: Some(component_type.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bom_ref(mut self, bom_ref: impl Into<String>) -> Self {
        self.bom_ref = Some(bom_ref.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    /// The component's BOM reference, if set and non-empty.
    pub fn bom_ref(&self) -> Option<&str> {
        self.bom_ref.as_deref().filter(|r| !r.is_empty())
    }

    /// Depth-first iterator over this component and all nested children.
    pub fn walk(&self) -> impl Iterator<Item = &Component> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            if let Some(children) = &next.components {
                stack.extend(children.iter().rev());
            }
            Some(next)
        })
    }
}

/// ISO/IEC 19770-2 software identification tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Swid {
    pub tag_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<AttachedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Ancestry and modification history of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pedigree {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descendants: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<Commit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patches: Option<Vec<Patch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Who performed an action and when (commit author/committer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifiableAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<IdentifiableAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<IdentifiableAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A patch applied to a component, with the diff and resolved issues kept opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patch {
    #[serde(rename = "type")]
    pub patch_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolves: Option<Vec<Opaque>>,
}

/// How the presence and identity of a component was established.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evidence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callstack: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<LicenseChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<Vec<Copyright>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Copyright {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_visits_nested_children_in_order() {
        let mut parent = Component::new("application", "app");
        let mut child = Component::new("library", "child");
        child.components = Some(vec![Component::new("library", "grandchild")]);
        parent.components = Some(vec![child, Component::new("library", "sibling")]);

        let names: Vec<_> = parent.walk().filter_map(|c| c.name.as_deref()).collect();
        assert_eq!(names, vec!["app", "child", "grandchild", "sibling"]);
    }

    #[test]
    fn test_empty_bom_ref_is_ignored() {
        let comp = Component::new("library", "lib").with_bom_ref("");
        assert_eq!(comp.bom_ref(), None);
    }

    #[test]
    fn test_component_json_field_names() {
        let comp = Component::new("library", "lib")
            .with_bom_ref("pkg:npm/lib@1.0")
            .with_version("1.0");
        let json = serde_json::to_value(&comp).expect("serialize");
        assert_eq!(json["type"], "library");
        assert_eq!(json["bom-ref"], "pkg:npm/lib@1.0");
        assert!(json.get("purl").is_none());
    }
}
