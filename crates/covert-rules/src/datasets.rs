//! Named word lists the codeword pool is drawn from.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::CatalogError;

/// The word lists shipped with the crate.
pub const BUILTIN_DATASETS: &str = include_str!("../data/datasets.json");

/// A set of named word lists, keyed by dataset ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetCatalog {
    datasets: BTreeMap<String, Vec<String>>,
}

impl DatasetCatalog {
    /// Load the built-in catalog (`adjectives`, `verbs`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the embedded data is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_DATASETS)
    }

    /// Parse a catalog from a JSON object of `id -> [word, ...]`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the document is not such an object.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let datasets: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self { datasets })
    }

    /// Read a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] or [`CatalogError::Json`].
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Add or replace a dataset.
    pub fn insert(&mut self, id: impl Into<String>, words: Vec<String>) {
        self.datasets.insert(id.into(), words);
    }

    /// Look up a dataset by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownDataset`] if no dataset has that ID.
    pub fn get(&self, id: &str) -> Result<&[String], CatalogError> {
        self.datasets
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::UnknownDataset(id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_codeword_lists() {
        let catalog = DatasetCatalog::builtin();
        assert!(catalog.is_ok());
        let catalog = catalog.unwrap_or_default();
        assert!(catalog.get("adjectives").is_ok_and(|w| !w.is_empty()));
        assert!(catalog.get("verbs").is_ok_and(|w| !w.is_empty()));
    }

    #[test]
    fn unknown_dataset_is_an_error() {
        let catalog = DatasetCatalog::default();
        assert!(matches!(
            catalog.get("nouns"),
            Err(CatalogError::UnknownDataset(id)) if id == "nouns"
        ));
    }

    #[test]
    fn insert_replaces_dataset() {
        let mut catalog = DatasetCatalog::default();
        catalog.insert("colors", vec![String::from("Red")]);
        catalog.insert("colors", vec![String::from("Blue")]);
        assert_eq!(catalog.get("colors").ok(), Some(&[String::from("Blue")][..]));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            DatasetCatalog::from_json("[1, 2]"),
            Err(CatalogError::Json(_))
        ));
    }
}
