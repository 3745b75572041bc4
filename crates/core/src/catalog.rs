//! In-memory symptom and disease catalogs.
//!
//! A catalog is loaded once per session and replaced wholesale on reload. Lookups and filters
//! never mutate it.

use crate::model::{Disease, Symptom};
use pex_types::Code;

/// An entry addressable by code and searchable by text.
pub trait CatalogEntry {
    fn code(&self) -> &Code;

    /// Human-readable text searched alongside the code.
    fn text(&self) -> &str;
}

impl CatalogEntry for Symptom {
    fn code(&self) -> &Code {
        &self.code
    }

    fn text(&self) -> &str {
        &self.description
    }
}

impl CatalogEntry for Disease {
    fn code(&self) -> &Code {
        &self.code
    }

    fn text(&self) -> &str {
        &self.name
    }
}

/// Ordered collection of entries as served by the API.
#[derive(Clone, Debug)]
pub struct Catalog<T> {
    entries: Vec<T>,
}

pub type SymptomCatalog = Catalog<Symptom>;
pub type DiseaseCatalog = Catalog<Disease>;

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    /// Swap in a freshly loaded set of entries.
    pub fn replace(&mut self, entries: Vec<T>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, code: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.code().as_str() == code)
    }

    /// Entries whose code or text contains `query`, ignoring case, in catalog order.
    ///
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&T> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.text().to_lowercase().contains(&needle)
                    || e.code().as_str().to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl SymptomCatalog {
    /// Description for `code`, or the raw code when it is not in the catalog.
    pub fn describe<'a>(&'a self, code: &'a Code) -> &'a str {
        match self.find(code.as_str()) {
            Some(symptom) => &symptom.description,
            None => code.as_str(),
        }
    }
}
