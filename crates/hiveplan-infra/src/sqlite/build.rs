//! SQLite saved-build repository implementation.
//!
//! Implements `BuildRepository` from `hiveplan-core` using sqlx with split read/write pools.

use hiveplan_core::repository::SortOrder;
use hiveplan_core::repository::build::{BuildFilter, BuildRepository, BuildSortField};
use hiveplan_types::build::{BuildId, BuildState, HiveBuild};
use hiveplan_types::error::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `BuildRepository`.
pub struct SqliteBuildRepository {
    pool: DatabasePool,
}

impl SqliteBuildRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to a domain `HiveBuild`.
struct BuildRow {
    id: String,
    name: String,
    description: String,
    build_data: String,
    total_attack: i64,
    total_gather_rate: f64,
    total_convert_rate: f64,
    bee_count: i64,
    tags: String,
    is_public: bool,
    created_at: String,
    updated_at: String,
}

impl BuildRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            build_data: row.try_get("build_data")?,
            total_attack: row.try_get("total_attack")?,
            total_gather_rate: row.try_get("total_gather_rate")?,
            total_convert_rate: row.try_get("total_convert_rate")?,
            bee_count: row.try_get("bee_count")?,
            tags: row.try_get("tags")?,
            is_public: row.try_get("is_public")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_build(self) -> Result<HiveBuild, RepositoryError> {
        let id = self
            .id
            .parse::<BuildId>()
            .map_err(|e| RepositoryError::Query(format!("invalid build id: {e}")))?;

        let build_data: BuildState = serde_json::from_str(&self.build_data)
            .map_err(|e| RepositoryError::Query(format!("invalid build_data JSON: {e}")))?;

        let tags: Vec<String> = serde_json::from_str(&self.tags)
            .map_err(|e| RepositoryError::Query(format!("invalid tags JSON: {e}")))?;

        let bee_count = u32::try_from(self.bee_count)
            .map_err(|e| RepositoryError::Query(format!("invalid bee_count: {e}")))?;

        Ok(HiveBuild {
            id,
            name: self.name,
            description: self.description,
            build_data,
            total_attack: self.total_attack,
            total_gather_rate: self.total_gather_rate,
            total_convert_rate: self.total_convert_rate,
            bee_count,
            tags,
            is_public: self.is_public,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// ORDER BY clause for a filter. Column names come from a closed enum.
fn order_clause(filter: &BuildFilter) -> String {
    let order = match filter.sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    let column = match filter.sort.field {
        BuildSortField::Name => "name COLLATE NOCASE".to_string(),
        other => other.as_str().to_string(),
    };
    format!(" ORDER BY {column} {order}, id {order}")
}

impl BuildRepository for SqliteBuildRepository {
    async fn create(&self, build: &HiveBuild) -> Result<HiveBuild, RepositoryError> {
        let build_json = serde_json::to_string(&build.build_data)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let tags_json =
            serde_json::to_string(&build.tags).map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO builds (id, name, description, build_data, total_attack, total_gather_rate, total_convert_rate, bee_count, tags, is_public, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(build.id.to_string())
        .bind(&build.name)
        .bind(&build.description)
        .bind(&build_json)
        .bind(build.total_attack)
        .bind(build.total_gather_rate)
        .bind(build.total_convert_rate)
        .bind(i64::from(build.bee_count))
        .bind(&tags_json)
        .bind(build.is_public)
        .bind(format_datetime(&build.created_at))
        .bind(format_datetime(&build.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(build.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("build '{}' already exists", build.id)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &BuildId) -> Result<Option<HiveBuild>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM builds WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let build_row =
                    BuildRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(build_row.into_build()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: BuildFilter) -> Result<Vec<HiveBuild>, RepositoryError> {
        let mut sql = String::from("SELECT * FROM builds");
        sql.push_str(&order_clause(&filter));

        // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded
        match (filter.limit, filter.offset) {
            (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            (None, None) => {}
        }

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut builds = Vec::with_capacity(rows.len());
        for row in &rows {
            let build_row =
                BuildRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            builds.push(build_row.into_build()?);
        }

        Ok(builds)
    }

    async fn delete(&self, id: &BuildId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM builds WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
