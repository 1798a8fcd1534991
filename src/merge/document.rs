//! Whole-document merges and the N-way fold.

use super::declarations::{merge_declarations, merge_definitions};
use super::identity::same_component;
use super::primitives::{
    first_nonempty, first_present, merge_nested, union, union_by_identity, IdentityMerger,
};
use crate::model::{Bom, Dependency};

/// Merge `b` into a copy of `a`.
///
/// Header scalars are first-non-empty, metadata is merged recursively, and
/// every collection is merged with its own policy. Dependencies go through
/// root reconciliation: when the two documents have different roots, the
/// edges of `b`'s root are moved onto `a`'s root and `b`'s root entry is
/// dropped.
pub fn merge_documents(a: &Bom, b: &Bom) -> Bom {
    let mut result = a.clone();

    result.schema = first_nonempty(&a.schema, &b.schema);
    result.bom_format = first_nonempty(&a.bom_format, &b.bom_format);
    result.spec_version = first_nonempty(&a.spec_version, &b.spec_version);
    result.serial_number = first_nonempty(&a.serial_number, &b.serial_number);
    result.version = first_nonempty(&a.version, &b.version);
    result.metadata = merge_nested(&a.metadata, &b.metadata);
    result.signature = first_present(&a.signature, &b.signature);

    merge_collections(&mut result, b);
    result.dependencies = reconcile_dependencies(a, b);

    tracing::debug!(
        components = result.components.as_ref().map_or(0, Vec::len),
        dependencies = result.dependencies.as_ref().map_or(0, Vec::len),
        "merged documents"
    );
    result
}

/// Attach `b`'s root component as a dependency of `a`'s root.
///
/// `a`'s header is kept as-is. If both documents describe the same root
/// this falls back to [`merge_documents`], so a component never ends up
/// depending on itself.
pub fn merge_as_dependency(a: &Bom, b: &Bom) -> Bom {
    if let (Some(root_a), Some(root_b)) = (a.root_component(), b.root_component()) {
        if same_component(root_a, root_b) {
            tracing::debug!("same root component on both sides, merging documents instead");
            return merge_documents(a, b);
        }
    }

    let mut result = a.clone();
    let mut components = IdentityMerger::from_items(&a.components);
    let mut dependencies = IdentityMerger::from_items(&a.dependencies);

    if let Some(root_b) = b.root_component() {
        components.push(root_b);

        if let Some(rb) = root_b.bom_ref() {
            if let Some(ra) = a.root_ref() {
                tracing::debug!(parent = ra, child = rb, "linking root as dependency");
                dependencies.push(&Dependency::new(ra).depends_on([rb]));
            }
            dependencies.push(&Dependency::new(rb));
        }
    }

    for dep in b.dependencies.iter().flatten() {
        dependencies.push(dep);
    }

    result.components = components.finish();
    result.dependencies = dependencies.finish();
    merge_collections(&mut result, b);
    result
}

/// Absence-aware wrapper around a two-document merge.
///
/// Returns a copy of whichever side is present, or `None` if both are absent.
pub fn merge_optional<F>(a: Option<&Bom>, b: Option<&Bom>, merge_fn: F) -> Option<Bom>
where
    F: Fn(&Bom, &Bom) -> Bom,
{
    match (a, b) {
        (Some(a), Some(b)) => Some(merge_fn(a, b)),
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (None, None) => None,
    }
}

/// Left fold of `boms` with `merge_fn`.
///
/// `boms[0]` is the most precedent base; later documents only fill gaps or
/// get appended. Empty input yields `None`, a single document a copy of it.
pub fn fold<F>(boms: &[Bom], merge_fn: F) -> Option<Bom>
where
    F: Fn(&Bom, &Bom) -> Bom,
{
    let (first, rest) = boms.split_first()?;
    Some(
        rest.iter()
            .fold(first.clone(), |acc, next| merge_fn(&acc, next)),
    )
}

/// Fold with [`merge_documents`].
pub fn merge_all(boms: &[Bom]) -> Option<Bom> {
    fold(boms, merge_documents)
}

/// Fold with [`merge_as_dependency`].
pub fn merge_all_as_dependencies(boms: &[Bom]) -> Option<Bom> {
    fold(boms, merge_as_dependency)
}

/// Collections shared by both merge modes. Dependencies are handled by the
/// caller because each mode treats them differently.
fn merge_collections(result: &mut Bom, b: &Bom) {
    result.components = union_by_identity(&result.components, &b.components);
    result.properties = union_by_identity(&result.properties, &b.properties);
    result.external_references = union(&result.external_references, &b.external_references);
    result.services = union_by_identity(&result.services, &b.services);
    result.compositions = union_by_identity(&result.compositions, &b.compositions);
    result.vulnerabilities = union_by_identity(&result.vulnerabilities, &b.vulnerabilities);
    result.annotations = union_by_identity(&result.annotations, &b.annotations);
    result.formulation = union_by_identity(&result.formulation, &b.formulation);
    result.declarations = merge_declarations(&result.declarations, &b.declarations);
    result.definitions = merge_definitions(&result.definitions, &b.definitions);
}

/// Dependency merge with root reparenting.
fn reconcile_dependencies(a: &Bom, b: &Bom) -> Option<Vec<Dependency>> {
    let (ra, rb) = match (a.root_ref(), b.root_ref()) {
        (Some(ra), Some(rb)) if ra != rb => (ra, rb),
        _ => return union_by_identity(&a.dependencies, &b.dependencies),
    };

    let mut merger = IdentityMerger::from_items(&a.dependencies);

    if let Some(root_entry) = b.dependency(rb) {
        // b's root may itself point at a's root; that edge would become a self-loop.
        let transferred: Vec<&String> = root_entry
            .edges()
            .iter()
            .filter(|edge| edge.as_str() != ra)
            .collect();
        if !transferred.is_empty() {
            tracing::debug!(
                from = rb,
                to = ra,
                edges = transferred.len(),
                "reparenting root dependency edges"
            );
            merger.push(&Dependency::new(ra).depends_on(transferred));
        }
    }

    for dep in b.dependencies.iter().flatten() {
        if dep.dep_ref != rb {
            merger.push(dep);
        }
    }

    tracing::debug!(entries = merger.len(), "reconciled dependency graph");
    merger.finish()
}
