use crate::Species;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    #[serde(skip)]
    pub species: Species,
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub tc_k: f64,
    pub pc_bar: f64,
    pub omega: f64,
    pub molar_mass: f64,
}

impl CatalogEntry {
    pub fn from_species(species: Species) -> Self {
        Self {
            species,
            canonical_id: species.key(),
            display_name: species.display_name(),
            aliases: species.aliases(),
            tc_k: species.tc_k(),
            pc_bar: species.pc_bar(),
            omega: species.omega(),
            molar_mass: species.molar_mass(),
        }
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

pub fn builtin_catalog() -> Vec<CatalogEntry> {
    Species::ALL
        .iter()
        .copied()
        .map(CatalogEntry::from_species)
        .collect()
}

pub fn filter_catalog(query: &str) -> Vec<CatalogEntry> {
    builtin_catalog()
        .into_iter()
        .filter(|entry| entry.matches_query(query))
        .collect()
}
