/// Database configuration and connection management
pub mod database;

/// Taxonomy seed configuration from config.toml
pub mod taxonomy;
