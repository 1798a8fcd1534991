//! Top-level CycloneDX document and its metadata header.

use super::{
    Annotation, Component, Composition, Declarations, Definitions, Dependency, ExternalReference,
    Formula, Hash as HashEntry, LicenseChoice, Lifecycle, Opaque, OrganizationalContact,
    OrganizationalEntity, Property, Service, Vulnerability,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default `bomFormat` marker.
pub const BOM_FORMAT: &str = "CycloneDX";

/// Spec version assumed when a document does not declare one.
pub const DEFAULT_SPEC_VERSION: &str = "1.5";

/// A CycloneDX bill of materials, decoded from JSON or XML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bom {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_references: Option<Vec<ExternalReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<Dependency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compositions: Option<Vec<Composition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<Vec<Vulnerability>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Annotation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formulation: Option<Vec<Formula>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declarations: Option<Declarations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Definitions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Opaque>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(v: &i32) -> bool {
    *v == 0
}

impl Bom {
    /// Create an empty document for the given spec version.
    pub fn new(spec_version: impl Into<String>) -> Self {
        Self {
            bom_format: Some(BOM_FORMAT.to_string()),
            spec_version: Some(spec_version.into()),
            version: 1,
            ..Self::default()
        }
    }

    /// The component this BOM describes (`metadata.component`).
    pub fn root_component(&self) -> Option<&Component> {
        self.metadata.as_ref().and_then(|m| m.component.as_ref())
    }

    /// BOM reference of the root component, if it has a non-empty one.
    pub fn root_ref(&self) -> Option<&str> {
        self.root_component().and_then(Component::bom_ref)
    }

    /// Iterate all components, nested children included. The root component is not part of it.
    pub fn all_components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.components
            .iter()
            .flatten()
            .flat_map(Component::walk)
    }

    /// Iterate all services, nested children included.
    pub fn all_services(&self) -> impl Iterator<Item = &Service> + '_ {
        self.services.iter().flatten().flat_map(Service::walk)
    }

    /// Number of components, nested children included.
    pub fn component_count(&self) -> usize {
        self.all_components().count()
    }

    /// Dependency graph entry for `dep_ref`, if present.
    pub fn dependency(&self, dep_ref: &str) -> Option<&Dependency> {
        self.dependencies
            .as_ref()?
            .iter()
            .find(|d| d.dep_ref == dep_ref)
    }
}

/// Descriptive header of a BOM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycles: Option<Vec<Lifecycle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Tools>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<OrganizationalContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture: Option<OrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<OrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<OrganizationalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<LicenseChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
}

/// Legacy (1.4) tool entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashes: Option<Vec<HashEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_references: Option<Vec<ExternalReference>>,
}

impl Tool {
    /// Express a legacy tool as a 1.5+ tool component.
    pub fn to_component(&self) -> Component {
        Component {
            component_type: Some("application".to_string()),
            group: self.vendor.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            hashes: self.hashes.clone(),
            external_references: self.external_references.clone(),
            ..Component::default()
        }
    }
}

/// Tools that produced the BOM.
///
/// CycloneDX 1.4 encodes tools as a flat array, 1.5+ as an object holding
/// `components` and `services`. Both shapes decode into the three parallel
/// collections here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tools {
    pub tools: Option<Vec<Tool>>,
    pub components: Option<Vec<Component>>,
    pub services: Option<Vec<Service>>,
}

impl Tools {
    pub fn is_empty(&self) -> bool {
        self.tools.as_ref().map_or(true, Vec::is_empty)
            && self.components.as_ref().map_or(true, Vec::is_empty)
            && self.services.as_ref().map_or(true, Vec::is_empty)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToolsRepr {
    Legacy(Vec<Tool>),
    Object {
        #[serde(default)]
        components: Option<Vec<Component>>,
        #[serde(default)]
        services: Option<Vec<Service>>,
    },
}

#[derive(Serialize)]
struct ToolsObject<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<&'a [Component]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<&'a [Service]>,
}

impl<'de> Deserialize<'de> for Tools {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match ToolsRepr::deserialize(deserializer)? {
            ToolsRepr::Legacy(tools) => Self {
                tools: Some(tools),
                ..Self::default()
            },
            ToolsRepr::Object {
                components,
                services,
            } => Self {
                tools: None,
                components,
                services,
            },
        })
    }
}

impl Serialize for Tools {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let has_modern = self.components.as_ref().is_some_and(|c| !c.is_empty())
            || self.services.as_ref().is_some_and(|s| !s.is_empty());

        if !has_modern {
            return self
                .tools
                .as_deref()
                .unwrap_or_default()
                .serialize(serializer);
        }

        // Mixed legacy and modern entries only fit the object form.
        let mut components: Vec<Component> = self.components.clone().unwrap_or_default();
        components.extend(self.tools.iter().flatten().map(Tool::to_component));

        ToolsObject {
            components: (!components.is_empty()).then_some(components.as_slice()),
            services: self.services.as_deref(),
        }
        .serialize(serializer)
    }
}
