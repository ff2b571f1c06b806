//! Taxonomy seed loading from config.toml
//!
//! The categories, dietary restrictions and cuisine types the marketplace starts
//! with are listed in a TOML file. They are inserted on startup when missing;
//! rows already present (matched by name) are left alone.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Food categories to seed
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Dietary restrictions to seed
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestrictionConfig>,
    /// Cuisine types to seed
    #[serde(default)]
    pub cuisine_types: Vec<CuisineTypeConfig>,
}

/// Configuration for a single category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Display name, matched exactly when seeding
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Hex colour, defaults to the category default when absent
    pub color: Option<String>,
}

/// Configuration for a single dietary restriction
#[derive(Debug, Deserialize, Clone)]
pub struct DietaryRestrictionConfig {
    /// Display name, matched exactly when seeding
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Icon class or emoji
    pub icon: Option<String>,
}

/// Configuration for a single cuisine type
#[derive(Debug, Deserialize, Clone)]
pub struct CuisineTypeConfig {
    /// Display name, matched exactly when seeding
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Where the cuisine comes from
    pub country_of_origin: Option<String>,
    /// Icon class or emoji
    pub icon: Option<String>,
}

/// Loads the taxonomy seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read (`Error::Io`)
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref)
        .inspect_err(|e| tracing::debug!("Failed to read {}: {}", path_ref.display(), e))?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Path of the seed configuration: `CONFIG_PATH`, or ./config.toml by default
#[must_use]
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Loads the seed configuration from [`config_path`]
///
/// # Errors
/// See [`load_config`].
pub fn load_default_config() -> Result<Config> {
    load_config(config_path())
}
