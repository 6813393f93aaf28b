//! Server configuration
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. optional `catalog.{toml,yaml,json}` in the working directory
//! 3. `CATALOG_*` environment variables (e.g. `CATALOG_BIND_ADDRESS`)

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: String,
    pub max_connections: u32,
    /// Start the book catalog with the sample books
    pub seed_books: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name("catalog").required(false))
            .add_source(Self::environment());
        Self::build(builder)
    }

    /// `CATALOG_*` variables; numbers and booleans are parsed from their text
    fn environment() -> Environment {
        Environment::with_prefix("CATALOG").try_parsing(true)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Config::builder()
            .set_default("bind_address", "0.0.0.0:8000")?
            .set_default("database_path", "data/todos.db")?
            .set_default("max_connections", 5)?
            .set_default("seed_books", true)
            .context("Invalid default configuration")
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
