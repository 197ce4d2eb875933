//! Substance lookup.
//!
//! The `PropertySource` trait is the seam to whatever supplies critical
//! constants. Callers build a `ComponentRegistry`, optionally extend it, and
//! pass it to the code that assembles a calculation.

use crate::component::{Component, CriticalProperties};
use crate::error::{EosError, EosResult};
use crate::formula;
use crate::species::{Species, normalize};
use std::collections::BTreeMap;

/// Source of component data by identifier (name, formula or alias).
pub trait PropertySource {
    /// Resolve an identifier to a component.
    fn component(&self, id: &str) -> EosResult<Component>;

    /// Resolve several identifiers, failing on the first unknown one.
    fn components(&self, ids: &[&str]) -> EosResult<Vec<Component>> {
        ids.iter().map(|id| self.component(id)).collect()
    }
}

/// The static built-in species table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProperties;

impl PropertySource for BuiltinProperties {
    fn component(&self, id: &str) -> EosResult<Component> {
        id.parse::<Species>().map(Component::from_species)
    }
}

/// Owned registry of named components.
///
/// Names are stored upper-cased without separators, so `"Oxygen"`,
/// `"OXYGEN"` and `"oxygen"` address the same entry. Lookups that miss the
/// registered entries fall back to the built-in table.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: BTreeMap<String, Component>,
}

impl ComponentRegistry {
    /// Empty registry (still falls back to built-ins on lookup).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in species under its display name.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for species in Species::ALL {
            registry
                .entries
                .insert(normalize(species.display_name()), Component::from_species(species));
        }
        registry
    }

    /// Register a component under `name`. Duplicate names are rejected.
    pub fn register(&mut self, name: &str, component: Component) -> EosResult<()> {
        let key = normalize(name);
        if key.is_empty() {
            return Err(EosError::invalid("component name must not be empty"));
        }
        if self.entries.contains_key(&key) {
            return Err(EosError::DuplicateComponent {
                name: name.trim().to_string(),
            });
        }
        tracing::debug!(name = %key, "registered component");
        self.entries.insert(key, component);
        Ok(())
    }

    /// Register a component from a formula; molar mass is computed from it.
    pub fn register_formula(
        &mut self,
        name: &str,
        formula_text: &str,
        critical: CriticalProperties,
    ) -> EosResult<()> {
        let molar_mass = formula::molar_mass(formula_text)?;
        let component = Component::new(
            name.trim(),
            Some(formula_text.trim().to_string()),
            molar_mass,
            critical,
        )?;
        self.register(name, component)
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.entries.get(&normalize(name))
    }

    /// Registered keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PropertySource for ComponentRegistry {
    fn component(&self, id: &str) -> EosResult<Component> {
        if let Some(component) = self.get(id) {
            return Ok(component.clone());
        }
        BuiltinProperties.component(id)
    }
}
