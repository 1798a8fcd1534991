//! Identity-keyed structural diff.

use super::result::{ChangeSet, DependencyChange, DiffResult, EntityChange};
use crate::merge::identity_of;
use crate::model::{Bom, Component, Service, Vulnerability};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use xxhash_rust::xxh3::xxh3_64;

/// An entity that can be matched across two documents and compared.
pub trait Diffable: Serialize {
    /// Key the entity is matched by; `None` means it cannot be matched.
    fn diff_key(&self) -> Option<String>;

    fn display_name(&self) -> Option<&str>;

    fn display_version(&self) -> Option<&str> {
        None
    }

    /// Content compared for modification. Nested children are excluded so a
    /// change deep in a tree is reported once, on the child.
    fn content(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Diffable for Component {
    fn diff_key(&self) -> Option<String> {
        identity_of(self).map(|key| key.to_string())
    }

    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn display_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn content(&self) -> Value {
        without_field(serde_json::to_value(self).unwrap_or_default(), "components")
    }
}

impl Diffable for Service {
    fn diff_key(&self) -> Option<String> {
        identity_of(self).map(|key| key.to_string()).or_else(|| {
            self.name
                .as_deref()
                .filter(|n| !n.is_empty())
                .map(|n| format!("name:{n}"))
        })
    }

    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn display_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn content(&self) -> Value {
        without_field(serde_json::to_value(self).unwrap_or_default(), "services")
    }
}

impl Diffable for Vulnerability {
    fn diff_key(&self) -> Option<String> {
        identity_of(self).map(|key| key.to_string()).or_else(|| {
            self.id
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(|id| format!("id:{id}"))
        })
    }

    fn display_name(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

fn without_field(mut value: Value, field: &str) -> Value {
    if let Value::Object(map) = &mut value {
        map.shift_remove(field);
    }
    value
}

fn content_hash(value: &Value) -> u64 {
    xxh3_64(value.to_string().as_bytes())
}

fn document_hash(bom: &Bom) -> Option<u64> {
    serde_json::to_vec(bom).ok().map(|bytes| xxh3_64(&bytes))
}

/// Top-level fields that are present on one side only or differ.
fn changed_fields(before: &Value, after: &Value) -> Vec<String> {
    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut fields: Vec<String> = old
                .iter()
                .filter(|(k, v)| new.get(k.as_str()) != Some(v))
                .map(|(k, _)| k.clone())
                .collect();
            fields.extend(
                new.keys()
                    .filter(|k| !old.contains_key(k.as_str()))
                    .cloned(),
            );
            fields
        }
        _ => Vec::new(),
    }
}

/// First occurrence of each key wins; unkeyed entities are skipped.
fn index_by_key<'a, T: Diffable + 'a>(
    items: impl Iterator<Item = &'a T>,
) -> IndexMap<String, &'a T> {
    let mut index = IndexMap::new();
    let mut skipped = 0usize;
    for item in items {
        match item.diff_key() {
            Some(key) => {
                index.entry(key).or_insert(item);
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!("{skipped} entities without identity skipped in diff");
    }
    index
}

fn change_entry<T: Diffable>(key: &str, old: Option<&T>, new: Option<&T>) -> EntityChange {
    EntityChange {
        id: key.to_string(),
        name: new
            .or(old)
            .and_then(Diffable::display_name)
            .map(str::to_string),
        old_version: old.and_then(Diffable::display_version).map(str::to_string),
        new_version: new.and_then(Diffable::display_version).map(str::to_string),
        changed_fields: Vec::new(),
    }
}

/// Added, removed and modified entities between two sequences.
pub fn diff_entities<'a, T: Diffable + 'a>(
    old: impl Iterator<Item = &'a T>,
    new: impl Iterator<Item = &'a T>,
) -> ChangeSet<EntityChange> {
    let old = index_by_key(old);
    let new = index_by_key(new);
    let mut changes = ChangeSet::new();

    for (key, &item) in &new {
        match old.get(key) {
            None => changes.added.push(change_entry(key, None, Some(item))),
            Some(&prev) => {
                let before = prev.content();
                let after = item.content();
                if content_hash(&before) != content_hash(&after) {
                    let mut change = change_entry(key, Some(prev), Some(item));
                    change.changed_fields = changed_fields(&before, &after);
                    changes.modified.push(change);
                }
            }
        }
    }

    for (key, &item) in &old {
        if !new.contains_key(key) {
            changes.removed.push(change_entry(key, Some(item), None));
        }
    }

    changes
}

fn dependency_edges(bom: &Bom) -> IndexSet<DependencyChange> {
    bom.dependencies
        .iter()
        .flatten()
        .flat_map(|dep| {
            dep.depends_on
                .iter()
                .flatten()
                .map(move |target| DependencyChange::new(dep.dep_ref.as_str(), target.as_str()))
        })
        .collect()
}

/// Added and removed `ref -> dependsOn` edges.
pub fn diff_dependencies(old: &Bom, new: &Bom) -> ChangeSet<DependencyChange> {
    let old_edges = dependency_edges(old);
    let new_edges = dependency_edges(new);

    ChangeSet {
        added: new_edges.difference(&old_edges).cloned().collect(),
        removed: old_edges.difference(&new_edges).cloned().collect(),
        modified: Vec::new(),
    }
}

/// Compare two documents.
///
/// Components are compared across the whole tree (nested included) and
/// matched by the same identity the merge engine uses, so a diff of a merge
/// input against the merge output lists exactly what the merge contributed.
pub fn diff_boms(old: &Bom, new: &Bom) -> DiffResult {
    if let (Some(a), Some(b)) = (document_hash(old), document_hash(new)) {
        if a == b {
            tracing::debug!("Documents are identical (hash {a:016x})");
            return DiffResult::identical();
        }
    }

    let mut result = DiffResult::new();
    result.components = diff_entities(old.all_components(), new.all_components());
    result.services = diff_entities(old.all_services(), new.all_services());
    result.dependencies = diff_dependencies(old, new);
    result.vulnerabilities = diff_entities(
        old.vulnerabilities.iter().flatten(),
        new.vulnerabilities.iter().flatten(),
    );
    result.calculate_summary();

    tracing::debug!(
        "Diff complete: {} component, {} dependency changes",
        result.components.total(),
        result.dependencies.total()
    );
    result
}
