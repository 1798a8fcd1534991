//! Identity resolution: when are two entities "the same thing"?
//!
//! Every collection merged by identity goes through [`Identify`]. The key is
//! an explicit value rather than an ad hoc string so the fallback rules are
//! visible and testable:
//!
//! - BOM-ref bearing entities are keyed by their non-empty `bom-ref`.
//! - Components without a `bom-ref` fall back to `(name, version, purl)`,
//!   even when some of those are empty. Two components that share only a
//!   name therefore collide and are merged. This is intentional and matches
//!   what existing callers rely on.
//! - An entity with no usable key has no identity and is never deduplicated.

use crate::model::{
    Annotation, Component, Composition, Dependency, Formula, Property, Service,
    StandardDefinition, Vulnerability, Workflow,
};
use std::fmt;

/// Key under which entities are grouped before merging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentityKey {
    /// A non-empty `bom-ref` (or dependency `ref`).
    Ref(String),
    /// Component fallback when no `bom-ref` is present.
    Coordinates {
        name: String,
        version: String,
        purl: String,
    },
    /// Property name.
    Name(String),
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(r) => write!(f, "ref:{r}"),
            Self::Coordinates {
                name,
                version,
                purl,
            } => write!(f, "coords:{name}@{version}|{purl}"),
            Self::Name(n) => write!(f, "name:{n}"),
        }
    }
}

/// Something that can be grouped by identity.
pub trait Identify {
    /// The merge identity of this entity, or `None` if it has none.
    fn identity(&self) -> Option<IdentityKey>;
}

/// Free-function form of [`Identify::identity`].
pub fn identity_of<T: Identify + ?Sized>(entity: &T) -> Option<IdentityKey> {
    entity.identity()
}

fn ref_key(bom_ref: Option<&str>) -> Option<IdentityKey> {
    bom_ref
        .filter(|r| !r.is_empty())
        .map(|r| IdentityKey::Ref(r.to_string()))
}

impl Identify for Component {
    fn identity(&self) -> Option<IdentityKey> {
        if let Some(key) = ref_key(self.bom_ref.as_deref()) {
            return Some(key);
        }

        let name = self.name.clone().unwrap_or_default();
        let version = self.version.clone().unwrap_or_default();
        let purl = self.purl.clone().unwrap_or_default();
        if name.is_empty() && version.is_empty() && purl.is_empty() {
            return None;
        }
        Some(IdentityKey::Coordinates {
            name,
            version,
            purl,
        })
    }
}

impl Identify for Dependency {
    fn identity(&self) -> Option<IdentityKey> {
        ref_key(Some(&self.dep_ref))
    }
}

impl Identify for Property {
    fn identity(&self) -> Option<IdentityKey> {
        (!self.name.is_empty()).then(|| IdentityKey::Name(self.name.clone()))
    }
}

macro_rules! identify_by_bom_ref {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identify for $ty {
                fn identity(&self) -> Option<IdentityKey> {
                    ref_key(self.bom_ref.as_deref())
                }
            }
        )+
    };
}

identify_by_bom_ref!(
    Service,
    Composition,
    Vulnerability,
    Annotation,
    Formula,
    Workflow,
    StandardDefinition,
);

/// Whether two root components describe the same logical artifact.
///
/// True if both `bom-ref`s are non-empty and equal, or if name, version and
/// purl are all non-empty on both sides and pairwise equal. Stricter than
/// [`Identify`] on purpose: a missing field never counts as a match here.
pub fn same_component(a: &Component, b: &Component) -> bool {
    if let (Some(ra), Some(rb)) = (a.bom_ref(), b.bom_ref()) {
        if ra == rb {
            return true;
        }
    }

    let triple = |c: &Component| {
        let name = c.name.as_deref().filter(|s| !s.is_empty())?;
        let version = c.version.as_deref().filter(|s| !s.is_empty())?;
        let purl = c.purl.as_deref().filter(|s| !s.is_empty())?;
        Some((name.to_string(), version.to_string(), purl.to_string()))
    };

    match (triple(a), triple(b)) {
        (Some(ta), Some(tb)) => ta == tb,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_ref_wins_over_coordinates() {
        let comp = Component::new("library", "lib")
            .with_bom_ref("lib-ref")
            .with_version("1.0");
        assert_eq!(
            identity_of(&comp),
            Some(IdentityKey::Ref("lib-ref".to_string()))
        );
    }

    #[test]
    fn test_component_falls_back_to_coordinates() {
        let comp = Component::new("library", "lib")
            .with_version("1.0")
            .with_purl("pkg:x/lib@1.0");
        assert_eq!(
            identity_of(&comp),
            Some(IdentityKey::Coordinates {
                name: "lib".to_string(),
                version: "1.0".to_string(),
                purl: "pkg:x/lib@1.0".to_string(),
            })
        );
    }

    #[test]
    fn test_name_only_components_collide() {
        let a = Component::new("library", "lib");
        let mut b = Component::new("framework", "lib");
        b.description = Some("unrelated".to_string());
        assert_eq!(identity_of(&a), identity_of(&b));
    }

    #[test]
    fn test_anonymous_component_has_no_identity() {
        let comp = Component::default();
        assert_eq!(identity_of(&comp), None);
    }

    #[test]
    fn test_empty_bom_ref_has_no_identity() {
        let svc = Service {
            bom_ref: Some(String::new()),
            ..Service::default()
        };
        assert_eq!(identity_of(&svc), None);
        assert_eq!(identity_of(&Dependency::new("")), None);
    }

    #[test]
    fn test_property_keyed_by_name() {
        let prop = Property::new("env", "prod");
        assert_eq!(
            identity_of(&prop),
            Some(IdentityKey::Name("env".to_string()))
        );
    }

    #[test]
    fn test_same_component_by_ref() {
        let a = Component::new("application", "app").with_bom_ref("app");
        let b = Component::new("application", "other-name").with_bom_ref("app");
        assert!(same_component(&a, &b));
    }

    #[test]
    fn test_same_component_requires_full_triple() {
        let a = Component::new("application", "app").with_version("1.0");
        let b = Component::new("application", "app").with_version("1.0");
        // Missing purl on both sides: not considered the same root.
        assert!(!same_component(&a, &b));

        let a = a.with_purl("pkg:x/app@1.0");
        let b = b.with_purl("pkg:x/app@1.0");
        assert!(same_component(&a, &b));
    }

    #[test]
    fn test_identity_key_display() {
        let key = IdentityKey::Coordinates {
            name: "lib".to_string(),
            version: "1.0".to_string(),
            purl: String::new(),
        };
        assert_eq!(key.to_string(), "coords:lib@1.0|");
    }
}
