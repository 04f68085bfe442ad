//! Export file writing and session import.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use hiveplan_types::export::BuildExport;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("export json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `document` as pretty JSON into `dir/file_name`.
///
/// The directory is created if needed and an existing file is replaced.
pub async fn write_export<T: Serialize>(
    dir: &Path,
    file_name: &str,
    document: &T,
) -> Result<PathBuf, ExportError> {
    let json = serde_json::to_string_pretty(document)?;
    let path = dir.join(file_name);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io {
            path: dir.display().to_string(),
            source,
        })?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;

    tracing::info!(path = %path.display(), "export written");
    Ok(path)
}

/// Read a session export back, e.g. to seed a new planning session.
pub async fn read_session_export(path: &Path) -> Result<BuildExport, ExportError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
    Ok(serde_json::from_str(&content)?)
}
