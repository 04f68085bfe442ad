//! Saved-build repository trait definition.

use std::fmt;

use hiveplan_types::build::{BuildId, HiveBuild};
use hiveplan_types::error::RepositoryError;

use super::SortOrder;

/// Columns saved builds can be listed by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
    TotalAttack,
    TotalGatherRate,
    TotalConvertRate,
    BeeCount,
}

impl BuildSortField {
    /// Column name in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            BuildSortField::CreatedAt => "created_at",
            BuildSortField::UpdatedAt => "updated_at",
            BuildSortField::Name => "name",
            BuildSortField::TotalAttack => "total_attack",
            BuildSortField::TotalGatherRate => "total_gather_rate",
            BuildSortField::TotalConvertRate => "total_convert_rate",
            BuildSortField::BeeCount => "bee_count",
        }
    }

    /// Accepts column names plus the `created_date`/`updated_date` aliases.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "created_at" | "created_date" => Some(BuildSortField::CreatedAt),
            "updated_at" | "updated_date" => Some(BuildSortField::UpdatedAt),
            "name" => Some(BuildSortField::Name),
            "total_attack" => Some(BuildSortField::TotalAttack),
            "total_gather_rate" => Some(BuildSortField::TotalGatherRate),
            "total_convert_rate" => Some(BuildSortField::TotalConvertRate),
            "bee_count" => Some(BuildSortField::BeeCount),
            _ => None,
        }
    }
}

impl fmt::Display for BuildSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort field and direction for listing builds. Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSort {
    pub field: BuildSortField,
    pub order: SortOrder,
}

impl BuildSort {
    /// Parse a sort key such as `"-created_date"` or `"name"`.
    ///
    /// A leading `-` means descending. Unknown fields fall back to
    /// `created_at` and keep the requested direction.
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        let (order, field) = match key.strip_prefix('-') {
            Some(rest) => (SortOrder::Desc, rest),
            None => (SortOrder::Asc, key),
        };
        let field = BuildSortField::from_key(field).unwrap_or_else(|| {
            tracing::debug!(key, "unknown build sort field, using created_at");
            BuildSortField::CreatedAt
        });
        Self { field, order }
    }
}

/// Filter criteria for listing saved builds.
#[derive(Debug, Clone, Default)]
pub struct BuildFilter {
    pub sort: BuildSort,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for saved-build persistence.
///
/// Implementations live in hiveplan-infra (e.g., SqliteBuildRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait BuildRepository: Send + Sync {
    /// Persist a new build. Returns the stored build.
    fn create(
        &self,
        build: &HiveBuild,
    ) -> impl std::future::Future<Output = Result<HiveBuild, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &BuildId,
    ) -> impl std::future::Future<Output = Result<Option<HiveBuild>, RepositoryError>> + Send;

    /// List builds with sorting and pagination.
    fn list(
        &self,
        filter: BuildFilter,
    ) -> impl std::future::Future<Output = Result<Vec<HiveBuild>, RepositoryError>> + Send;

    /// Permanently delete a build. `NotFound` if the id is unknown.
    fn delete(
        &self,
        id: &BuildId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
