//! Layered configuration.
//!
//! Resolution order, lowest to highest precedence:
//!
//! 1. Built-in defaults ([`StocktakeConfig::default`])
//! 2. TOML config file (explicit path, `STOCKTAKE_CONFIG`, or the platform
//!    config dir)
//! 3. Environment variables (`MONGODB_URI`, `JWT_SECRET`, `PORT`, ...)
//! 4. Command-line flags, applied by the binary

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Project name, used for the config directory.
pub const PROJECT_NAME: &str = "stocktake";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "STOCKTAKE_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StocktakeConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Document store settings.
    pub database: DatabaseConfig,
    /// Token settings.
    pub auth: AuthSettings,
    /// Log filter settings.
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Directory holding a built single-page frontend, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Document store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub uri: String,
    /// Database name.
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "inventory_db".to_string(),
        }
    }
}

/// Token settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// HMAC secret used to sign tokens.
    pub jwt_secret: String,
    /// `iss` claim written into and required from tokens.
    pub issuer: String,
    /// Token lifetime in hours.
    pub token_ttl_hours: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: PROJECT_NAME.to_string(),
            token_ttl_hours: 24,
        }
    }
}

impl AuthSettings {
    /// Token lifetime.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_hours.saturating_mul(3600))
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &REDACTED)
            .field("issuer", &self.issuer)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

/// Log filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,stocktake=debug".to_string(),
        }
    }
}

const REDACTED: &str = "<redacted>";

impl StocktakeConfig {
    /// Platform default config file: `<config_dir>/stocktake/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve which config file to read.
    ///
    /// An explicit path wins, then `STOCKTAKE_CONFIG`, then the platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Load defaults, the config file, and environment overrides.
    ///
    /// A missing file is only an error when the path was given explicitly.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::debug!("Loaded config from {}", path.display());
        toml::from_str(&content).map_err(|source| Error::TomlParse {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::TomlParse {
            origin: "config text".to_string(),
            source,
        })
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply environment overrides using the given lookup.
    ///
    /// Recognized keys: `MONGODB_URI`, `MONGODB_DB`, `JWT_SECRET`, `HOST`,
    /// `PORT`, `CORS_ORIGINS` (comma-separated).
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("MONGODB_URI") {
            self.database.uri = uri;
        }
        if let Some(name) = lookup("MONGODB_DB") {
            self.database.name = name;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid PORT '{port}': {e}")))?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    /// Check settings the server cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(Error::config(
                "auth.jwt_secret is empty; set it in the config file or via JWT_SECRET",
            ));
        }
        if self.auth.token_ttl_hours == 0 {
            return Err(Error::config("auth.token_ttl_hours must be at least 1"));
        }
        if self.database.name.trim().is_empty() {
            return Err(Error::config("database.name must not be empty"));
        }
        Ok(())
    }

    /// A copy safe to print: the JWT secret is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth.jwt_secret.is_empty() {
            copy.auth.jwt_secret = REDACTED.to_string();
        }
        copy
    }
}
