//! TOML configuration file loading
//!
//! Supports `~/.config/tutor-assist/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Env var pointing at an alternative config file
pub const CONFIG_PATH_ENV: &str = "TUTOR_ASSIST_CONFIG";

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct TutorConfigFile {
    /// Knowledge base and rule table sources
    #[serde(default)]
    pub knowledge: KnowledgeFileConfig,

    /// Fallback pool and thinking delay
    #[serde(default)]
    pub responder: ResponderFileConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerFileConfig,
}

/// Data file overrides
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeFileConfig {
    /// JSON file replacing the embedded knowledge base
    pub entries_path: Option<PathBuf>,

    /// JSON file replacing the embedded keyword rules
    pub rules_path: Option<PathBuf>,
}

/// Response behaviour
#[derive(Debug, Default, Deserialize)]
pub struct ResponderFileConfig {
    /// Replacement fallback pool
    pub fallback_responses: Option<Vec<String>>,

    /// Lower bound of the thinking delay
    pub min_delay_ms: Option<u64>,

    /// Upper bound of the thinking delay
    pub max_delay_ms: Option<u64>,

    /// Seed for reproducible fallback picks and delays
    pub seed: Option<u64>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// API server port
    pub port: Option<u16>,
}

/// Load the TOML config file from the standard path
///
/// Returns `TutorConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> TutorConfigFile {
    config_file_path().map_or_else(TutorConfigFile::default, |path| load_config_file_from(&path))
}

/// Load a TOML config file from `path`, falling back to defaults
pub fn load_config_file_from(path: &Path) -> TutorConfigFile {
    if !path.exists() {
        return TutorConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                TutorConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            TutorConfigFile::default()
        }
    }
}

/// Return the config file path
///
/// `TUTOR_ASSIST_CONFIG` when set, otherwise `~/.config/tutor-assist/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    directories::BaseDirs::new().map(|d| d.config_dir().join("tutor-assist").join("config.toml"))
}
