//! Mergers for the BOM-ref keyed records: compositions, vulnerabilities and
//! annotations.

use super::primitives::{
    concat, first_nonempty, first_present, union, union_by_identity, Merge,
};
use crate::model::{Annotation, Composition, Vulnerability};

impl Merge for Composition {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            aggregate: first_nonempty(&self.aggregate, &other.aggregate),
            assemblies: union(&self.assemblies, &other.assemblies),
            dependencies: union(&self.dependencies, &other.dependencies),
            vulnerabilities: union(&self.vulnerabilities, &other.vulnerabilities),
            signature: first_present(&self.signature, &other.signature),
        }
    }
}

impl Merge for Vulnerability {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            id: first_nonempty(&self.id, &other.id),
            source: first_present(&self.source, &other.source),
            references: union(&self.references, &other.references),
            ratings: concat(&self.ratings, &other.ratings),
            cwes: union(&self.cwes, &other.cwes),
            description: first_nonempty(&self.description, &other.description),
            detail: first_nonempty(&self.detail, &other.detail),
            recommendation: first_nonempty(&self.recommendation, &other.recommendation),
            workaround: first_nonempty(&self.workaround, &other.workaround),
            proof_of_concept: first_present(&self.proof_of_concept, &other.proof_of_concept),
            advisories: union(&self.advisories, &other.advisories),
            created: first_nonempty(&self.created, &other.created),
            published: first_nonempty(&self.published, &other.published),
            updated: first_nonempty(&self.updated, &other.updated),
            rejected: first_nonempty(&self.rejected, &other.rejected),
            credits: first_present(&self.credits, &other.credits),
            tools: super::metadata::merge_tools(&self.tools, &other.tools),
            analysis: first_present(&self.analysis, &other.analysis),
            affects: union(&self.affects, &other.affects),
            properties: union_by_identity(&self.properties, &other.properties),
        }
    }
}

impl Merge for Annotation {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            subjects: union(&self.subjects, &other.subjects),
            annotator: first_present(&self.annotator, &other.annotator),
            timestamp: first_nonempty(&self.timestamp, &other.timestamp),
            text: first_nonempty(&self.text, &other.text),
            signature: first_present(&self.signature, &other.signature),
        }
    }
}
