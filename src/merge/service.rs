//! Service and dependency-entry mergers.

use super::primitives::{
    first_nonempty, first_present, merge_nested, union, union_by_identity, Merge,
};
use crate::model::{Dependency, Service};

impl Merge for Service {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            provider: merge_nested(&self.provider, &other.provider),
            group: first_nonempty(&self.group, &other.group),
            name: first_nonempty(&self.name, &other.name),
            version: first_nonempty(&self.version, &other.version),
            description: first_nonempty(&self.description, &other.description),
            endpoints: union(&self.endpoints, &other.endpoints),
            authenticated: first_nonempty(&self.authenticated, &other.authenticated),
            trust_boundary: first_nonempty(&self.trust_boundary, &other.trust_boundary),
            trust_zone: first_nonempty(&self.trust_zone, &other.trust_zone),
            data: union(&self.data, &other.data),
            licenses: union(&self.licenses, &other.licenses),
            external_references: union(&self.external_references, &other.external_references),
            properties: union_by_identity(&self.properties, &other.properties),
            services: union_by_identity(&self.services, &other.services),
            release_notes: first_present(&self.release_notes, &other.release_notes),
            tags: union(&self.tags, &other.tags),
            signature: first_present(&self.signature, &other.signature),
        }
    }
}

/// Dependency entries share a `ref`; their edge sets are unioned.
impl Merge for Dependency {
    fn merge(&self, other: &Self) -> Self {
        Self {
            dep_ref: first_nonempty(&self.dep_ref, &other.dep_ref),
            depends_on: union(&self.depends_on, &other.depends_on),
            provides: union(&self.provides, &other.provides),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DataClassification, OrganizationalEntity};

    #[test]
    fn test_dependency_edges_union() {
        let a = Dependency::new("A").depends_on(["X", "Y"]);
        let b = Dependency::new("A").depends_on(["Y", "Z"]);
        let merged = a.merge(&b);
        assert_eq!(merged.dep_ref, "A");
        assert_eq!(merged.edges(), ["X", "Y", "Z"]);
    }

    #[test]
    fn test_service_endpoints_dedup() {
        let mut a = Service::new("svc", "api");
        a.endpoints = Some(vec!["https://a/v1".to_string()]);
        let mut b = Service::new("svc", "api-renamed");
        b.endpoints = Some(vec!["https://a/v1".to_string(), "https://a/v2".to_string()]);
        b.trust_zone = Some("dmz".to_string());

        let merged = a.merge(&b);
        assert_eq!(merged.name.as_deref(), Some("api"));
        assert_eq!(merged.endpoints.map(|e| e.len()), Some(2));
        assert_eq!(merged.trust_zone.as_deref(), Some("dmz"));
    }

    #[test]
    fn test_service_provider_and_data() {
        let flow = DataClassification {
            flow: "inbound".to_string(),
            classification: "PII".to_string(),
        };
        let mut a = Service::new("svc", "api");
        a.data = Some(vec![flow.clone()]);
        let mut b = Service::new("svc", "api");
        b.data = Some(vec![flow]);
        b.provider = Some(OrganizationalEntity::named("Acme"));

        let merged = a.merge(&b);
        assert_eq!(merged.data.map(|d| d.len()), Some(1));
        assert_eq!(
            merged.provider.and_then(|p| p.name).as_deref(),
            Some("Acme")
        );
    }

    #[test]
    fn test_nested_services_by_identity() {
        let mut a = Service::new("parent", "parent");
        a.services = Some(vec![Service::new("child", "child")]);
        let mut b = Service::new("parent", "parent");
        b.services = Some(vec![Service::new("child", "child"), Service::new("other", "other")]);

        let merged = a.merge(&b);
        assert_eq!(merged.services.map(|s| s.len()), Some(2));
    }
}
