//! gridcal configuration.
//!
//! Read from ~/.config/gridcal/config.toml, with `GRIDCAL_*` environment
//! variables layered on top (`GRIDCAL_BACKEND__API_KEY=...`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{GridcalError, GridcalResult};

static DEFAULT_DATA_PATH: &str = "~/.gridcal";
static DEFAULT_TABLE: &str = "bookings";
static DEFAULT_ADMIN_USER: &str = "admin";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_admin_user() -> String {
    DEFAULT_ADMIN_USER.to_string()
}

/// Hosted backend connection settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    /// Project URL, e.g. https://xyz.supabase.co
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

/// Login gate settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// Whether commands require a session. Defaults to on when a backend is configured.
    pub required: Option<bool>,

    #[serde(default = "default_admin_user")]
    pub admin_user: String,

    /// No admin login is possible unless this is set.
    pub admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            required: None,
            admin_user: default_admin_user(),
            admin_password: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GridcalConfig {
    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub backend: Option<BackendConfig>,

    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for GridcalConfig {
    fn default() -> Self {
        GridcalConfig {
            data_dir: default_data_path(),
            backend: None,
            auth: AuthConfig::default(),
        }
    }
}

impl GridcalConfig {
    pub fn config_path() -> GridcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GridcalError::Config("Could not determine config directory".into()))?
            .join("gridcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, creating a commented default file on first run.
    pub fn load() -> GridcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> GridcalResult<Self> {
        let config: GridcalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("GRIDCAL").separator("__"))
            .build()
            .map_err(|e| GridcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GridcalError::Config(e.to_string()))?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn login_required(&self) -> bool {
        self.auth.required.unwrap_or(self.backend.is_some())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> GridcalResult<()> {
        let contents = format!(
            "\
# gridcal configuration

# Where events and the login session are stored:
# data_dir = \"{}\"

# Hosted backend. Without it, events stay on this machine.
# [backend]
# url = \"https://your-project.supabase.co\"
# api_key = \"...\"
# table = \"{}\"

# [auth]
# required = true
# admin_user = \"{}\"
# admin_password = \"...\"
",
            DEFAULT_DATA_PATH, DEFAULT_TABLE, DEFAULT_ADMIN_USER
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GridcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| GridcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
