//! Declarations, definitions and standard mergers.

use super::primitives::{
    concat, first_nonempty, first_present, merge_nested, union, union_by_identity, Merge,
};
use crate::model::{Declarations, Definitions, StandardDefinition};

/// Array sections concatenate; targets, affirmation and signature are taken
/// whole from the first document that has them.
impl Merge for Declarations {
    fn merge(&self, other: &Self) -> Self {
        Self {
            assessors: concat(&self.assessors, &other.assessors),
            attestations: concat(&self.attestations, &other.attestations),
            claims: concat(&self.claims, &other.claims),
            evidence: concat(&self.evidence, &other.evidence),
            targets: first_present(&self.targets, &other.targets),
            affirmation: first_present(&self.affirmation, &other.affirmation),
            signature: first_present(&self.signature, &other.signature),
        }
    }
}

impl Merge for Definitions {
    fn merge(&self, other: &Self) -> Self {
        Self {
            standards: union_by_identity(&self.standards, &other.standards),
        }
    }
}

/// Declarations merge, normalizing an all-empty section to `None`.
pub(crate) fn merge_declarations(
    a: &Option<Declarations>,
    b: &Option<Declarations>,
) -> Option<Declarations> {
    merge_nested(a, b).filter(|d| !d.is_empty())
}

/// Definitions merge, normalizing an all-empty section to `None`.
pub(crate) fn merge_definitions(
    a: &Option<Definitions>,
    b: &Option<Definitions>,
) -> Option<Definitions> {
    merge_nested(a, b).filter(|d| !d.is_empty())
}

impl Merge for StandardDefinition {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            name: first_nonempty(&self.name, &other.name),
            version: first_nonempty(&self.version, &other.version),
            description: first_nonempty(&self.description, &other.description),
            owner: first_nonempty(&self.owner, &other.owner),
            requirements: concat(&self.requirements, &other.requirements),
            levels: concat(&self.levels, &other.levels),
            external_references: union(&self.external_references, &other.external_references),
            signature: first_present(&self.signature, &other.signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_declarations_targets_first_wins() {
        let a = Declarations {
            claims: Some(vec![json!({"bom-ref": "c1"})]),
            targets: Some(json!({"organizations": [{"name": "A"}]})),
            ..Declarations::default()
        };
        let b = Declarations {
            claims: Some(vec![json!({"bom-ref": "c2"})]),
            targets: Some(json!({"components": [{"name": "B"}]})),
            affirmation: Some(json!({"statement": "ok"})),
            ..Declarations::default()
        };

        let merged = a.merge(&b);
        assert_eq!(merged.claims.map(|c| c.len()), Some(2));
        assert_eq!(merged.targets, a.targets);
        assert_eq!(merged.affirmation, b.affirmation);
    }

    #[test]
    fn test_standards_merge_by_identity() {
        let mut s1 = StandardDefinition::new("asvs", "ASVS");
        s1.requirements = Some(vec![json!({"identifier": "V1"})]);
        let mut s2 = StandardDefinition::new("asvs", "");
        s2.version = Some("4.0.3".to_string());
        s2.requirements = Some(vec![json!({"identifier": "V2"})]);

        let a = Definitions {
            standards: Some(vec![s1]),
        };
        let b = Definitions {
            standards: Some(vec![s2, StandardDefinition::new("ssdf", "SSDF")]),
        };

        let standards = a.merge(&b).standards.expect("standards");
        assert_eq!(standards.len(), 2);
        assert_eq!(standards[0].name.as_deref(), Some("ASVS"));
        assert_eq!(standards[0].version.as_deref(), Some("4.0.3"));
        assert_eq!(standards[0].requirements.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_empty_sections_normalized_away() {
        let empty_definitions = Some(Definitions::default());
        assert!(merge_definitions(&empty_definitions, &empty_definitions).is_none());
        assert!(merge_definitions(&empty_definitions, &None).is_none());

        let empty_declarations = Some(Declarations {
            claims: Some(Vec::new()),
            ..Declarations::default()
        });
        assert!(merge_declarations(&empty_declarations, &Some(Declarations::default())).is_none());

        let signed = Some(Declarations {
            signature: Some(json!({"algorithm": "ES256"})),
            ..Declarations::default()
        });
        assert_eq!(merge_declarations(&empty_declarations, &signed), signed);
    }
}
