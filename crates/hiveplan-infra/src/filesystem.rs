//! Data-directory layout.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HIVEPLAN_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `HIVEPLAN_DATA_DIR` environment variable
/// 2. `~/.hiveplan`
/// 3. `./.hiveplan` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".hiveplan");
    }

    PathBuf::from(".hiveplan")
}

/// Create the data directory if needed.
pub async fn ensure_data_dir(dir: &std::path::Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}
