//! Metadata header merger.

use super::primitives::{concat, first_nonempty, merge_nested, union, union_by_identity, Merge};
use crate::model::{Metadata, Tools};

impl Merge for Metadata {
    fn merge(&self, other: &Self) -> Self {
        Self {
            timestamp: first_nonempty(&self.timestamp, &other.timestamp),
            lifecycles: union(&self.lifecycles, &other.lifecycles),
            tools: merge_tools(&self.tools, &other.tools),
            authors: concat(&self.authors, &other.authors),
            component: merge_nested(&self.component, &other.component),
            manufacture: merge_nested(&self.manufacture, &other.manufacture),
            manufacturer: merge_nested(&self.manufacturer, &other.manufacturer),
            supplier: merge_nested(&self.supplier, &other.supplier),
            licenses: union(&self.licenses, &other.licenses),
            properties: union_by_identity(&self.properties, &other.properties),
        }
    }
}

impl Merge for Tools {
    fn merge(&self, other: &Self) -> Self {
        Self {
            tools: concat(&self.tools, &other.tools),
            components: concat(&self.components, &other.components),
            services: concat(&self.services, &other.services),
        }
    }
}

/// Tools merge, normalizing an all-empty result to `None`.
pub(crate) fn merge_tools(a: &Option<Tools>, b: &Option<Tools>) -> Option<Tools> {
    merge_nested(a, b).filter(|tools| !tools.is_empty())
}
