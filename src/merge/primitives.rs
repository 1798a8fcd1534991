//! Reusable merge policies.
//!
//! Each policy is written once over `Option<_>` / `Option<Vec<_>>` and reused
//! by every entity merger. All array policies normalize an empty result to
//! `None`, so "absent" and "empty" are indistinguishable on output.

use super::identity::{Identify, IdentityKey};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::hash::Hash;

/// Two-way merge of entities that share an identity.
///
/// `self` is the more precedent input. Implementations never mutate either
/// side and always return a freshly owned value.
pub trait Merge {
    #[must_use]
    fn merge(&self, other: &Self) -> Self;
}

/// Values that count as "not set" for first-non-empty-wins.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for i32 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

// An explicit `false` is a value, only `None` is unset.
impl Blank for bool {
    fn is_blank(&self) -> bool {
        false
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

/// `a` if it is non-empty / non-zero, otherwise `b`.
pub fn first_nonempty<T: Blank + Clone>(a: &T, b: &T) -> T {
    if a.is_blank() {
        b.clone()
    } else {
        a.clone()
    }
}

/// Whole-object first-wins for singletons that are never field-merged.
pub fn first_present<T: Clone>(a: &Option<T>, b: &Option<T>) -> Option<T> {
    a.as_ref().or(b.as_ref()).cloned()
}

/// Recursive merge of an optional singleton sub-object.
pub fn merge_nested<T: Merge + Clone>(a: &Option<T>, b: &Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(b)),
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (None, None) => None,
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

/// `a ++ b`, no deduplication.
pub fn concat<T: Clone>(a: &Option<Vec<T>>, b: &Option<Vec<T>>) -> Option<Vec<T>> {
    non_empty(a.iter().chain(b.iter()).flatten().cloned().collect())
}

/// Order-preserving set union by full value equality.
pub fn union<T: Clone + Eq + Hash>(a: &Option<Vec<T>>, b: &Option<Vec<T>>) -> Option<Vec<T>> {
    let set: IndexSet<T> = a.iter().chain(b.iter()).flatten().cloned().collect();
    non_empty(set.into_iter().collect())
}

/// Set union keyed by [`Identify`], merging entries that share a key.
///
/// Entries without an identity are carried through untouched.
pub fn union_by_identity<T>(a: &Option<Vec<T>>, b: &Option<Vec<T>>) -> Option<Vec<T>>
where
    T: Identify + Merge + Clone,
{
    let mut merger = IdentityMerger::default();
    for item in a.iter().chain(b.iter()).flatten() {
        merger.push(item);
    }
    merger.finish()
}

/// Incremental form of [`union_by_identity`].
///
/// Keeps first-seen order. Later entries with a known key are merged into
/// the earlier one, so the earliest input stays most precedent.
#[derive(Debug)]
pub(crate) struct IdentityMerger<T> {
    items: Vec<T>,
    index: HashMap<IdentityKey, usize>,
}

impl<T> Default for IdentityMerger<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Identify + Merge + Clone> IdentityMerger<T> {
    pub(crate) fn from_items(items: &Option<Vec<T>>) -> Self {
        let mut merger = Self::default();
        for item in items.iter().flatten() {
            merger.push(item);
        }
        merger
    }

    pub(crate) fn push(&mut self, item: &T) {
        let Some(key) = item.identity() else {
            self.items.push(item.clone());
            return;
        };

        if let Some(&pos) = self.index.get(&key) {
            let merged = self.items[pos].merge(item);
            self.items[pos] = merged;
        } else {
            self.index.insert(key, self.items.len());
            self.items.push(item.clone());
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn finish(self) -> Option<Vec<T>> {
        non_empty(self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dependency, Property};

    #[test]
    fn test_first_nonempty_strings() {
        let a = Some("left".to_string());
        let b = Some("right".to_string());
        assert_eq!(first_nonempty(&a, &b), a);
        assert_eq!(first_nonempty(&Some(String::new()), &b), b);
        assert_eq!(first_nonempty(&None, &b), b);
    }

    #[test]
    fn test_first_nonempty_numbers_and_flags() {
        assert_eq!(first_nonempty(&0, &3), 3);
        assert_eq!(first_nonempty(&2, &3), 2);
        assert_eq!(first_nonempty(&Some(false), &Some(true)), Some(false));
        assert_eq!(first_nonempty(&None, &Some(true)), Some(true));
    }

    #[test]
    fn test_concat_keeps_duplicates() {
        let a = Some(vec![1, 2]);
        let b = Some(vec![2, 3]);
        assert_eq!(concat(&a, &b), Some(vec![1, 2, 2, 3]));
    }

    #[test]
    fn test_union_dedups_preserving_order() {
        let a = Some(vec!["x".to_string(), "y".to_string()]);
        let b = Some(vec!["y".to_string(), "z".to_string()]);
        assert_eq!(
            union(&a, &b),
            Some(vec!["x".to_string(), "y".to_string(), "z".to_string()])
        );
    }

    #[test]
    fn test_empty_results_are_absent() {
        let none: Option<Vec<i32>> = None;
        let empty: Option<Vec<i32>> = Some(Vec::new());
        assert_eq!(concat(&none, &empty), None);
        assert_eq!(union(&empty, &empty), None);
        let deps: Option<Vec<Dependency>> = Some(Vec::new());
        assert_eq!(union_by_identity(&deps, &None), None);
    }

    #[test]
    fn test_union_by_identity_merges_shared_keys() {
        let a = Some(vec![Property::new("env", "prod")]);
        let b = Some(vec![
            Property::new("env", "staging"),
            Property::new("owner", "team-b"),
        ]);
        let merged = union_by_identity(&a, &b).expect("merged");
        assert_eq!(
            merged,
            vec![Property::new("env", "prod"), Property::new("owner", "team-b")]
        );
    }

    #[test]
    fn test_union_by_identity_keeps_unkeyed_entries() {
        let a = Some(vec![Dependency::new("")]);
        let b = Some(vec![Dependency::new("")]);
        assert_eq!(union_by_identity(&a, &b).map(|d| d.len()), Some(2));
    }

    #[test]
    fn test_first_present_is_wholesale() {
        let a = Some(serde_json::json!({"kind": "a"}));
        let b = Some(serde_json::json!({"kind": "b", "extra": 1}));
        assert_eq!(first_present(&a, &b), a);
        assert_eq!(first_present(&None, &b), b);
    }
}
