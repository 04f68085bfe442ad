//! File-backed catalog providers.
//!
//! `JsonCatalog` reads `bees.json` and `beequips.json` from a directory.
//! `BundledCatalog` serves the default catalog compiled into the binary, and
//! `seed_catalog` writes that default into a directory for local editing.

use std::path::{Path, PathBuf};

use serde_json::Value;

use hiveplan_core::repository::catalog::CatalogProvider;
use hiveplan_types::bee::Bee;
use hiveplan_types::beequip::Beequip;
use hiveplan_types::error::CatalogError;

pub const BEES_FILE: &str = "bees.json";
pub const BEEQUIPS_FILE: &str = "beequips.json";

const BUNDLED_BEES: &str = include_str!("../../catalog/bees.json");
const BUNDLED_BEEQUIPS: &str = include_str!("../../catalog/beequips.json");

/// Catalog read from JSON files in a directory.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    dir: PathBuf,
}

impl JsonCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// True when both catalog files exist.
    pub async fn is_present(&self) -> bool {
        let bees = tokio::fs::try_exists(self.dir.join(BEES_FILE)).await;
        let beequips = tokio::fs::try_exists(self.dir.join(BEEQUIPS_FILE)).await;
        matches!((bees, beequips), (Ok(true), Ok(true)))
    }

    async fn read(&self, file: &str) -> Result<String, CatalogError> {
        let path = self.dir.join(file);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| CatalogError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}

impl CatalogProvider for JsonCatalog {
    async fn list_bees(&self) -> Result<Vec<Bee>, CatalogError> {
        let content = self.read(BEES_FILE).await?;
        parse_list(&content, &self.dir.join(BEES_FILE).display().to_string())
    }

    async fn list_beequips(&self) -> Result<Vec<Beequip>, CatalogError> {
        let content = self.read(BEEQUIPS_FILE).await?;
        parse_list(&content, &self.dir.join(BEEQUIPS_FILE).display().to_string())
    }
}

/// The default catalog shipped with hiveplan.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalog;

impl CatalogProvider for BundledCatalog {
    async fn list_bees(&self) -> Result<Vec<Bee>, CatalogError> {
        parse_list(BUNDLED_BEES, "<bundled bees>")
    }

    async fn list_beequips(&self) -> Result<Vec<Beequip>, CatalogError> {
        parse_list(BUNDLED_BEEQUIPS, "<bundled beequips>")
    }
}

/// Parse a JSON array, skipping entries that do not deserialize.
///
/// A file that is not an array at all is an error.
fn parse_list<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> Result<Vec<T>, CatalogError> {
    let entries: Vec<Value> = serde_json::from_str(content).map_err(|e| CatalogError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let total = entries.len();
    let mut items = Vec::with_capacity(total);
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!(path, position, "skipping catalog entry: {e}"),
        }
    }

    tracing::debug!(path, loaded = items.len(), total, "catalog file parsed");
    Ok(items)
}

/// Write the bundled catalog into `dir`, leaving existing files untouched.
///
/// Returns the paths that were written.
pub async fn seed_catalog(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| CatalogError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

    let mut written = Vec::new();
    for (file, content) in [(BEES_FILE, BUNDLED_BEES), (BEEQUIPS_FILE, BUNDLED_BEEQUIPS)] {
        let path = dir.join(file);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(path = %path.display(), "catalog file exists, not overwriting");
            continue;
        }
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| CatalogError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        tracing::info!(path = %path.display(), "catalog file written");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiveplan_types::bee::Rarity;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bundled_catalog_parses_completely() {
        let bees = BundledCatalog.list_bees().await.unwrap();
        let raw: Vec<Value> = serde_json::from_str(BUNDLED_BEES).unwrap();
        assert_eq!(bees.len(), raw.len());
        assert!(bees.iter().any(|b| b.rarity == Rarity::Mythic));

        let beequips = BundledCatalog.list_beequips().await.unwrap();
        let raw: Vec<Value> = serde_json::from_str(BUNDLED_BEEQUIPS).unwrap();
        assert_eq!(beequips.len(), raw.len());
    }

    #[tokio::test]
    async fn test_seed_then_read() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("catalog");

        let written = seed_catalog(&dir).await.unwrap();
        assert_eq!(written.len(), 2);

        let catalog = JsonCatalog::new(&dir);
        assert!(catalog.is_present().await);
        assert_eq!(
            catalog.list_bees().await.unwrap(),
            BundledCatalog.list_bees().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_seed_does_not_overwrite() {
        let tmp = TempDir::new().unwrap();
        let custom = r#"[{"id": "mine", "name": "My Bee", "rarity": "Epic"}]"#;
        tokio::fs::write(tmp.path().join(BEES_FILE), custom).await.unwrap();

        let written = seed_catalog(tmp.path()).await.unwrap();
        assert_eq!(written, vec![tmp.path().join(BEEQUIPS_FILE)]);

        let bees = JsonCatalog::new(tmp.path()).list_bees().await.unwrap();
        assert_eq!(bees.len(), 1);
        assert_eq!(bees[0].name, "My Bee");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let catalog = JsonCatalog::new(tmp.path());
        assert!(!catalog.is_present().await);
        assert!(matches!(
            catalog.list_bees().await,
            Err(CatalogError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join(BEES_FILE), "{not json").await.unwrap();
        assert!(matches!(
            JsonCatalog::new(tmp.path()).list_bees().await,
            Err(CatalogError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_bad_entries_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let content = r#"[
            {"id": "ok", "name": "Fine Bee", "rarity": "Rare"},
            {"id": "bad", "name": "Odd Bee", "rarity": "Ultra"}
        ]"#;
        tokio::fs::write(tmp.path().join(BEES_FILE), content).await.unwrap();

        let bees = JsonCatalog::new(tmp.path()).list_bees().await.unwrap();
        assert_eq!(bees.len(), 1);
        assert_eq!(bees[0].id.as_str(), "ok");
    }
}
