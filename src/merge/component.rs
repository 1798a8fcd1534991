//! Component merger and the sub-objects it owns.

use super::primitives::{
    concat, first_nonempty, first_present, merge_nested, union, union_by_identity, Merge,
};
use crate::model::{
    Component, Evidence, OrganizationalEntity, Pedigree, PostalAddress, Property, Swid,
};

impl Merge for Component {
    fn merge(&self, other: &Self) -> Self {
        Self {
            component_type: first_nonempty(&self.component_type, &other.component_type),
            mime_type: first_nonempty(&self.mime_type, &other.mime_type),
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            supplier: merge_nested(&self.supplier, &other.supplier),
            manufacturer: merge_nested(&self.manufacturer, &other.manufacturer),
            authors: concat(&self.authors, &other.authors),
            author: first_nonempty(&self.author, &other.author),
            publisher: first_nonempty(&self.publisher, &other.publisher),
            group: first_nonempty(&self.group, &other.group),
            name: first_nonempty(&self.name, &other.name),
            version: first_nonempty(&self.version, &other.version),
            description: first_nonempty(&self.description, &other.description),
            scope: first_nonempty(&self.scope, &other.scope),
            hashes: concat(&self.hashes, &other.hashes),
            licenses: union(&self.licenses, &other.licenses),
            copyright: first_nonempty(&self.copyright, &other.copyright),
            cpe: first_nonempty(&self.cpe, &other.cpe),
            purl: first_nonempty(&self.purl, &other.purl),
            omnibor_id: union(&self.omnibor_id, &other.omnibor_id),
            swhid: union(&self.swhid, &other.swhid),
            swid: merge_nested(&self.swid, &other.swid),
            modified: first_nonempty(&self.modified, &other.modified),
            pedigree: merge_nested(&self.pedigree, &other.pedigree),
            external_references: union(&self.external_references, &other.external_references),
            properties: union_by_identity(&self.properties, &other.properties),
            components: union_by_identity(&self.components, &other.components),
            evidence: merge_nested(&self.evidence, &other.evidence),
            release_notes: first_present(&self.release_notes, &other.release_notes),
            model_card: first_present(&self.model_card, &other.model_card),
            data: concat(&self.data, &other.data),
            crypto_properties: first_present(&self.crypto_properties, &other.crypto_properties),
            tags: union(&self.tags, &other.tags),
            signature: first_present(&self.signature, &other.signature),
        }
    }
}

impl Merge for Swid {
    fn merge(&self, other: &Self) -> Self {
        Self {
            tag_id: first_nonempty(&self.tag_id, &other.tag_id),
            name: first_nonempty(&self.name, &other.name),
            version: first_nonempty(&self.version, &other.version),
            tag_version: first_nonempty(&self.tag_version, &other.tag_version),
            patch: first_nonempty(&self.patch, &other.patch),
            text: first_present(&self.text, &other.text),
            url: first_nonempty(&self.url, &other.url),
        }
    }
}

impl Merge for Pedigree {
    fn merge(&self, other: &Self) -> Self {
        Self {
            ancestors: union_by_identity(&self.ancestors, &other.ancestors),
            descendants: union_by_identity(&self.descendants, &other.descendants),
            variants: union_by_identity(&self.variants, &other.variants),
            commits: concat(&self.commits, &other.commits),
            patches: concat(&self.patches, &other.patches),
            notes: first_nonempty(&self.notes, &other.notes),
        }
    }
}

impl Merge for Evidence {
    fn merge(&self, other: &Self) -> Self {
        Self {
            identity: concat(&self.identity, &other.identity),
            occurrences: concat(&self.occurrences, &other.occurrences),
            callstack: first_present(&self.callstack, &other.callstack),
            licenses: union(&self.licenses, &other.licenses),
            copyright: concat(&self.copyright, &other.copyright),
        }
    }
}

impl Merge for OrganizationalEntity {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            name: first_nonempty(&self.name, &other.name),
            address: merge_nested(&self.address, &other.address),
            url: union(&self.url, &other.url),
            contact: concat(&self.contact, &other.contact),
        }
    }
}

impl Merge for PostalAddress {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            country: first_nonempty(&self.country, &other.country),
            region: first_nonempty(&self.region, &other.region),
            locality: first_nonempty(&self.locality, &other.locality),
            post_office_box_number: first_nonempty(
                &self.post_office_box_number,
                &other.post_office_box_number,
            ),
            postal_code: first_nonempty(&self.postal_code, &other.postal_code),
            street_address: first_nonempty(&self.street_address, &other.street_address),
        }
    }
}

/// Properties are keyed by name; the first input's value wins.
impl Merge for Property {
    fn merge(&self, other: &Self) -> Self {
        Self {
            name: self.name.clone(),
            value: first_nonempty(&self.value, &other.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Commit, ExternalReference, LicenseChoice};

    fn lib(copyright: Option<&str>) -> Component {
        let mut c = Component::new("library", "lib")
            .with_version("1.0")
            .with_purl("pkg:x/lib@1.0");
        c.copyright = copyright.map(str::to_string);
        c
    }

    #[test]
    fn test_scalars_first_nonempty_per_field() {
        let mut a = lib(None);
        a.description = Some("from a".to_string());
        let mut b = lib(Some("(c) b"));
        b.description = Some("from b".to_string());
        b.publisher = Some("b-pub".to_string());

        let merged = a.merge(&b);
        assert_eq!(merged.description.as_deref(), Some("from a"));
        assert_eq!(merged.copyright.as_deref(), Some("(c) b"));
        assert_eq!(merged.publisher.as_deref(), Some("b-pub"));
    }

    #[test]
    fn test_licenses_and_references_union() {
        let mut a = lib(None);
        a.licenses = Some(vec![LicenseChoice::spdx("MIT")]);
        a.external_references = Some(vec![ExternalReference::new("website", "https://a")]);
        let mut b = lib(None);
        b.licenses = Some(vec![LicenseChoice::spdx("MIT"), LicenseChoice::spdx("Apache-2.0")]);
        b.external_references = Some(vec![ExternalReference::new("website", "https://a")]);

        let merged = a.merge(&b);
        assert_eq!(merged.licenses.map(|l| l.len()), Some(2));
        assert_eq!(merged.external_references.map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_nested_components_merge_by_identity() {
        let mut a = lib(None);
        a.components = Some(vec![Component::new("file", "inner").with_bom_ref("inner")]);
        let mut b = lib(None);
        let mut inner_b = Component::new("file", "inner").with_bom_ref("inner");
        inner_b.version = Some("2".to_string());
        b.components = Some(vec![inner_b, Component::new("file", "other").with_bom_ref("other")]);

        let merged = a.merge(&b);
        let children = merged.components.expect("children");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].version.as_deref(), Some("2"));
    }

    #[test]
    fn test_supplier_merged_recursively() {
        let mut a = lib(None);
        a.supplier = Some(OrganizationalEntity::named("Acme"));
        let mut b = lib(None);
        let mut supplier = OrganizationalEntity::named("Other");
        supplier.url = Some(vec!["https://acme.example".to_string()]);
        b.supplier = Some(supplier);

        let merged = a.merge(&b).supplier.expect("supplier");
        assert_eq!(merged.name.as_deref(), Some("Acme"));
        assert_eq!(merged.url, Some(vec!["https://acme.example".to_string()]));
    }

    #[test]
    fn test_pedigree_commits_concat() {
        let commit = Commit {
            uid: Some("abc".to_string()),
            ..Commit::default()
        };
        let mut a = lib(None);
        a.pedigree = Some(Pedigree {
            commits: Some(vec![commit.clone()]),
            ..Pedigree::default()
        });
        let mut b = lib(None);
        b.pedigree = Some(Pedigree {
            commits: Some(vec![commit]),
            notes: Some("patched".to_string()),
            ..Pedigree::default()
        });

        let pedigree = a.merge(&b).pedigree.expect("pedigree");
        assert_eq!(pedigree.commits.map(|c| c.len()), Some(2));
        assert_eq!(pedigree.notes.as_deref(), Some("patched"));
    }

    #[test]
    fn test_opaque_singletons_first_wins() {
        let mut a = lib(None);
        let mut b = lib(None);
        b.release_notes = Some(serde_json::json!({"type": "major"}));
        a.model_card = Some(serde_json::json!({"a": 1}));
        b.model_card = Some(serde_json::json!({"b": 2}));

        let merged = a.merge(&b);
        assert_eq!(merged.release_notes, b.release_notes);
        assert_eq!(merged.model_card, a.model_card);
    }
}
