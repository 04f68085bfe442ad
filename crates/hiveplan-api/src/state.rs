//! Application state wiring the services together.
//!
//! `AppState` holds the concrete service instances used by the CLI commands.
//! `BuildService` is generic over its repository; here it is pinned to the
//! SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use hiveplan_core::catalog::Catalog;
use hiveplan_core::editor::LevelRange;
use hiveplan_core::service::build::BuildService;
use hiveplan_infra::catalog::{BundledCatalog, JsonCatalog};
use hiveplan_infra::config::{load_global_config, resolve_catalog_dir, resolve_export_dir};
use hiveplan_infra::filesystem::{ensure_data_dir, resolve_data_dir};
use hiveplan_infra::sqlite::build::SqliteBuildRepository;
use hiveplan_infra::sqlite::pool::{DatabasePool, database_url};
use hiveplan_types::config::GlobalConfig;

/// Concrete type alias for the build service pinned to the SQLite repository.
pub type ConcreteBuildService = BuildService<SqliteBuildRepository>;

#[derive(Clone)]
pub struct AppState {
    pub build_service: Arc<ConcreteBuildService>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    pub catalog_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: read config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        ensure_data_dir(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let catalog_dir = resolve_catalog_dir(&config, &data_dir);
        let export_dir = resolve_export_dir(&config);

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        let build_service = BuildService::new(SqliteBuildRepository::new(db_pool));

        tracing::debug!(data_dir = %data_dir.display(), "application state ready");

        Ok(Self {
            build_service: Arc::new(build_service),
            config,
            data_dir,
            catalog_dir,
            export_dir,
        })
    }

    pub fn levels(&self) -> LevelRange {
        LevelRange::new(self.config.max_level)
    }

    /// Load the catalog from the catalog directory, or the bundled default
    /// when `hiveplan init` has not been run.
    pub async fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let files = JsonCatalog::new(&self.catalog_dir);
        if files.is_present().await {
            Ok(Catalog::load(&files).await?)
        } else {
            tracing::info!(
                dir = %self.catalog_dir.display(),
                "no catalog files found, using the bundled catalog"
            );
            Ok(Catalog::load(&BundledCatalog).await?)
        }
    }
}
