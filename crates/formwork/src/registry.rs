// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Registry of declared forms, keyed by page route and form name.
//!
//! The registry is rebuilt incrementally as pages are processed and can be
//! snapshotted into a [`Cache`](crate::cache::Cache) so later requests skip
//! page processing. Both levels keep insertion order: the first form
//! registered for a route is the page's default form.

use crate::declaration::FormDeclaration;
use crate::error::Result;
use crate::form::FormInstance;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Forms of one page, by name.
pub type RouteForms = IndexMap<String, FormInstance>;

/// Serialized registry state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Route → form name → instance.
    pub routes: IndexMap<String, RouteForms>,
}

impl RegistrySnapshot {
    /// Encodes the snapshot for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a stored snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// All forms declared across pages.
///
/// Invariant: every instance's `route` equals the key of the bucket holding
/// it.
#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    routes: IndexMap<String, RouteForms>,
    dirty: bool,
}

impl FormRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the forms a page declares, merging with forms already known
    /// under `route`.
    ///
    /// A name that is already registered is replaced in place; new names are
    /// appended. Registering at least one form marks the registry dirty.
    pub fn register<I>(&mut self, route: &str, declarations: I)
    where
        I: IntoIterator<Item = (String, FormDeclaration)>,
    {
        let mut count = 0;
        for (name, declaration) in declarations {
            let instance = FormInstance::new(route, name.clone(), declaration);
            self.routes
                .entry(route.to_string())
                .or_default()
                .insert(name, instance);
            count += 1;
        }

        if count > 0 {
            debug!(route, count, "registered page forms");
            self.dirty = true;
        }
    }

    /// Replaces the registry wholesale with a snapshot.
    pub fn restore(&mut self, snapshot: RegistrySnapshot) {
        self.routes = snapshot.routes;
        for (route, forms) in self.routes.iter_mut() {
            for form in forms.values_mut() {
                form.route.clone_from(route);
            }
        }
        self.dirty = false;
    }

    /// Builds a snapshot of the current state and clears the dirty flag.
    pub fn persist(&mut self) -> RegistrySnapshot {
        self.dirty = false;
        RegistrySnapshot {
            routes: self.routes.clone(),
        }
    }

    /// Returns true if the registry changed since the last restore/persist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Looks up a form. Without a name, returns the route's first form.
    pub fn lookup(&self, route: &str, name: Option<&str>) -> Option<&FormInstance> {
        let forms = self.routes.get(route)?;
        match name {
            Some(name) => forms.get(name),
            None => forms.first().map(|(_, form)| form),
        }
    }

    /// Mutable variant of [`FormRegistry::lookup`].
    pub fn lookup_mut(&mut self, route: &str, name: Option<&str>) -> Option<&mut FormInstance> {
        let forms = self.routes.get_mut(route)?;
        match name {
            Some(name) => forms.get_mut(name),
            None => forms.first_mut().map(|(_, form)| form),
        }
    }

    /// Indexes every form by name alone, across routes.
    ///
    /// Submissions carry only the form name. When two routes declare the
    /// same name, the route registered later wins.
    pub fn flatten(&self) -> IndexMap<String, &FormInstance> {
        let mut flat = IndexMap::new();
        for forms in self.routes.values() {
            for (name, form) in forms {
                flat.insert(name.clone(), form);
            }
        }
        flat
    }

    /// Finds the form [`FormRegistry::flatten`] would yield for `name`.
    pub fn find_flat_mut(&mut self, name: &str) -> Option<&mut FormInstance> {
        self.routes
            .values_mut()
            .rev()
            .find_map(|forms| forms.get_mut(name))
    }

    /// Iterates over routes and their forms in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&String, &RouteForms)> {
        self.routes.iter()
    }

    /// Total number of registered forms.
    pub fn len(&self) -> usize {
        self.routes.values().map(IndexMap::len).sum()
    }

    /// Returns true if no form is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::FieldDeclaration;

    fn decl(field: &str) -> FormDeclaration {
        FormDeclaration::new().with_field(FieldDeclaration::new(field))
    }

    #[test]
    fn test_register_counts_per_route() {
        let mut registry = FormRegistry::new();
        registry.register(
            "/contact",
            vec![("a".to_string(), decl("x")), ("b".to_string(), decl("y"))],
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.is_dirty());
        assert_eq!(registry.lookup("/contact", Some("b")).unwrap().route, "/contact");
    }

    #[test]
    fn test_reregistration_merges() {
        let mut registry = FormRegistry::new();
        registry.register("/p", vec![("a".to_string(), decl("x"))]);
        registry.register(
            "/p",
            vec![("a".to_string(), decl("changed")), ("c".to_string(), decl("z"))],
        );

        assert_eq!(registry.len(), 2);
        let first = registry.lookup("/p", None).unwrap();
        assert_eq!(first.name, "a");
        assert_eq!(first.fields[0].name, "changed");
    }

    #[test]
    fn test_empty_registration_stays_clean() {
        let mut registry = FormRegistry::new();
        registry.register("/p", Vec::new());
        assert!(!registry.is_dirty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_flatten_later_route_wins() {
        let mut registry = FormRegistry::new();
        registry.register("/one", vec![("contact".to_string(), decl("x"))]);
        registry.register("/two", vec![("contact".to_string(), decl("y"))]);
        registry.register("/two", vec![("other".to_string(), decl("z"))]);

        let flat = registry.flatten();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat["contact"].route, "/two");
        assert_eq!(registry.find_flat_mut("contact").unwrap().route, "/two");
        assert!(registry.find_flat_mut("missing").is_none());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut registry = FormRegistry::new();
        registry.register("/p", vec![("a".to_string(), decl("x"))]);
        registry
            .lookup_mut("/p", Some("a"))
            .unwrap()
            .set_value("x", "hello");

        let bytes = registry.persist().to_bytes().unwrap();
        assert!(!registry.is_dirty());

        let mut restored = FormRegistry::new();
        restored.restore(RegistrySnapshot::from_bytes(&bytes).unwrap());
        let form = restored.lookup("/p", Some("a")).unwrap();
        assert_eq!(form.value("x"), Some(&serde_json::json!("hello")));
        assert_eq!(form.route, "/p");
        assert!(!restored.is_dirty());
    }
}
