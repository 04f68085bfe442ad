//! Global configuration loader for hiveplan.
//!
//! Reads `config.toml` from the data directory (`~/.hiveplan/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use hiveplan_types::config::GlobalConfig;

pub const CONFIG_FILE: &str = "config.toml";

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Write a `config.toml` with default values unless one already exists.
///
/// Returns `true` if a file was written.
pub async fn write_default_config(data_dir: &Path) -> std::io::Result<bool> {
    let config_path = data_dir.join(CONFIG_FILE);
    if tokio::fs::try_exists(&config_path).await? {
        return Ok(false);
    }

    let content = toml::to_string_pretty(&GlobalConfig::default())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    tokio::fs::create_dir_all(data_dir).await?;
    tokio::fs::write(&config_path, content).await?;
    tracing::info!(path = %config_path.display(), "default config written");
    Ok(true)
}

/// Catalog directory: the configured one, else `{data_dir}/catalog`.
pub fn resolve_catalog_dir(config: &GlobalConfig, data_dir: &Path) -> PathBuf {
    config
        .catalog_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("catalog"))
}

/// Export directory: the configured one, else the working directory.
pub fn resolve_export_dir(config: &GlobalConfig) -> PathBuf {
    config
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}
