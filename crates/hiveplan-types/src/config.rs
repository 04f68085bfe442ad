//! Global configuration types for hiveplan.
//!
//! `GlobalConfig` represents the top-level `config.toml` in the data directory.

use serde::{Deserialize, Serialize};

use std::path::PathBuf;

/// Top-level configuration. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Highest level the slot editor accepts (the lowest is always 1).
    #[serde(default = "default_max_level")]
    pub max_level: u32,

    /// Sort key used by `builds list` when none is given (`-` prefix = descending).
    #[serde(default = "default_build_sort")]
    pub default_build_sort: String,

    /// Directory holding `bees.json` and `beequips.json`. Defaults to `{data_dir}/catalog`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,

    /// Directory export files are written to. Defaults to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_max_level() -> u32 {
    25
}

fn default_build_sort() -> String {
    "-created_date".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            max_level: default_max_level(),
            default_build_sort: default_build_sort(),
            catalog_dir: None,
            export_dir: None,
        }
    }
}
