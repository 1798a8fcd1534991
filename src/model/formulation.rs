//! Formulation: how the described artifacts were built (1.5+).
//!
//! Only `Formula` and `Workflow` are modeled field by field. Tasks, steps,
//! triggers, inputs/outputs and workspaces are carried as opaque payloads
//! because they are only ever concatenated or copied wholesale.

use super::{Component, Dependency, Opaque, Property, Service};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formula {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflows: Option<Vec<Workflow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Workflow {
    #[serde(rename = "bom-ref", skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_references: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_dependencies: Option<Vec<Dependency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<Opaque>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_topology: Option<Vec<Dependency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
}
