//! Catalog configuration
//!
//! Paths to the dilemma catalog and value-profile documents. When a path is
//! not set, the documents compiled into the binary are used.

use serde::Deserialize;

/// Catalog and profile data configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Path to a dilemmas JSON document overriding the built-in catalog
    #[serde(default)]
    pub dilemmas_path: Option<String>,

    /// Path to a value-profiles JSON document overriding the built-in tables
    #[serde(default)]
    pub profiles_path: Option<String>,
}

impl CatalogConfig {
    /// Check whether any override is configured
    pub fn has_overrides(&self) -> bool {
        self.dilemmas_path.is_some() || self.profiles_path.is_some()
    }
}
