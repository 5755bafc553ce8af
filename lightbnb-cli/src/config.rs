use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lightbnb_db::config::DEFAULT_MAX_CONNECTIONS;
use lightbnb_db::models::{Limit, DEFAULT_LIMIT};
use lightbnb_db::DatabaseConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.lightbnb/.env
///
/// dotenvy never overwrites a variable that is already set, so loading
/// the local file first gives it precedence over the global one.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}

/// Get the lightbnb config directory path (~/.lightbnb)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lightbnb"))
}

// ============================================================================
// TOML Configuration
// ============================================================================

/// `~/.lightbnb/config.toml` / `./lightbnb.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LightbnbConfig {
    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseSection {
    /// Connection string; DATABASE_URL and --database-url take precedence
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryConfig {
    #[serde(default = "default_query_limit")]
    pub default_limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_query_limit(),
        }
    }
}

// Default value functions for serde
fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_query_limit() -> u32 {
    DEFAULT_LIMIT
}

impl LightbnbConfig {
    /// Load config from TOML files
    ///
    /// Priority order (highest to lowest):
    /// 1. ./lightbnb.toml (project-specific)
    /// 2. ~/.lightbnb/config.toml (user defaults)
    /// 3. Built-in defaults
    ///
    /// Unreadable or malformed files are logged and skipped.
    pub fn load() -> Self {
        let mut config = LightbnbConfig::default();

        if let Some(global) = config_dir().map(|d| d.join("config.toml")) {
            if let Some(global_config) = Self::read(&global) {
                config = global_config;
            }
        }

        if let Some(local_config) = Self::read(Path::new("lightbnb.toml")) {
            config = Self::merge(config, local_config);
        }

        config
    }

    fn read(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        match toml::from_str::<LightbnbConfig>(&contents) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge two configs (overlay wins, except an unset url keeps the base one)
    fn merge(mut base: Self, overlay: Self) -> Self {
        if overlay.database.url.is_some() {
            base.database.url = overlay.database.url;
        }
        base.database.max_connections = overlay.database.max_connections;
        base.query = overlay.query;
        base
    }

    /// Resolve the connection settings.
    ///
    /// `url_override` is the `--database-url` flag, which clap already
    /// falls back to `DATABASE_URL` for.
    pub fn database_config(&self, url_override: Option<&str>) -> Result<DatabaseConfig> {
        let url = url_override
            .map(str::to_owned)
            .or_else(|| self.database.url.clone())
            .context(
                "No database configured. Set --database-url, DATABASE_URL, \
                 or [database] url in ~/.lightbnb/config.toml",
            )?;

        Ok(DatabaseConfig::new(url).with_max_connections(self.database.max_connections))
    }

    /// Limit to use when a command doesn't pass `--limit`
    pub fn limit(&self, requested: Option<u32>) -> Limit {
        Limit::new(requested.unwrap_or(self.query.default_limit))
    }
}
