//! Formula and workflow mergers.

use super::primitives::{concat, first_nonempty, first_present, union_by_identity, Merge};
use crate::model::{Formula, Workflow};

/// Formulas keep their member collections side by side; only workflows are
/// reconciled by identity.
impl Merge for Formula {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            components: concat(&self.components, &other.components),
            services: concat(&self.services, &other.services),
            workflows: union_by_identity(&self.workflows, &other.workflows),
            properties: concat(&self.properties, &other.properties),
        }
    }
}

impl Merge for Workflow {
    fn merge(&self, other: &Self) -> Self {
        Self {
            bom_ref: first_nonempty(&self.bom_ref, &other.bom_ref),
            uid: first_nonempty(&self.uid, &other.uid),
            name: first_nonempty(&self.name, &other.name),
            description: first_nonempty(&self.description, &other.description),
            resource_references: concat(&self.resource_references, &other.resource_references),
            tasks: concat(&self.tasks, &other.tasks),
            task_dependencies: union_by_identity(&self.task_dependencies, &other.task_dependencies),
            task_types: concat(&self.task_types, &other.task_types),
            trigger: first_present(&self.trigger, &other.trigger),
            steps: concat(&self.steps, &other.steps),
            inputs: concat(&self.inputs, &other.inputs),
            outputs: concat(&self.outputs, &other.outputs),
            time_start: first_nonempty(&self.time_start, &other.time_start),
            time_end: first_nonempty(&self.time_end, &other.time_end),
            workspaces: concat(&self.workspaces, &other.workspaces),
            runtime_topology: union_by_identity(&self.runtime_topology, &other.runtime_topology),
            properties: union_by_identity(&self.properties, &other.properties),
        }
    }
}
