use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MunchConfig {
    /// Where the recipe catalog lives
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Defaults applied to recommendation requests
    #[serde(default)]
    pub recommend: RecommendConfig,
    /// Rating store settings
    #[serde(default)]
    pub ratings: RatingsConfig,
}

/// Catalog source configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Path to the CSV catalog
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Request defaults
#[derive(Debug, Deserialize, Clone)]
pub struct RecommendConfig {
    /// Number of recipes returned when the caller does not say
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Diet key used when the caller does not pick one
    #[serde(default = "default_diet")]
    pub default_diet: String,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            default_diet: default_diet(),
        }
    }
}

/// Rating store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RatingsConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

// Default value functions
fn default_catalog_path() -> String {
    "recipes.csv".to_string()
}

fn default_top_n() -> usize {
    3
}

fn default_diet() -> String {
    "none".to_string()
}

fn default_database_path() -> String {
    "faves.db".to_string()
}

impl MunchConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MOODMUNCH__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MOODMUNCH__CATALOG__PATH
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`MunchConfig::load`] for the source priority.
pub fn load_config() -> Result<MunchConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: MOODMUNCH__RECOMMEND__TOP_N
        .add_source(
            Environment::with_prefix("MOODMUNCH")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
