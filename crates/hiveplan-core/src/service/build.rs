//! Saved-build library service.
//!
//! Validates and assembles build records from the session's hive, then hands
//! them to a `BuildRepository`. A failed save never touches the caller's
//! `BuildState`, so the user can fix the problem and retry.

use chrono::{DateTime, Utc};

use hiveplan_types::build::{BuildId, BuildState, HiveBuild, LibrarySummary, SaveBuildRequest};
use hiveplan_types::error::{HiveError, RepositoryError};
use hiveplan_types::export::SavedBuildExport;

use crate::export::saved_export;
use crate::repository::build::{BuildFilter, BuildRepository, BuildSort};
use crate::stats::aggregate;

/// Service for saving and managing named builds.
///
/// Generic over the repository so hiveplan-core never depends on
/// hiveplan-infra.
pub struct BuildService<R: BuildRepository> {
    repo: R,
}

impl<R: BuildRepository> BuildService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Save the hive as a new named build.
    ///
    /// The name must be non-blank and at least one slot must be occupied;
    /// both are checked before the repository is called. Tags default to the
    /// colours present and the description to a short generated summary.
    pub async fn save_build(
        &self,
        request: SaveBuildRequest,
        state: &BuildState,
    ) -> Result<HiveBuild, HiveError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(HiveError::Validation("build name cannot be empty".to_string()));
        }
        if state.is_empty() {
            return Err(HiveError::Validation(
                "cannot save a build with no bees".to_string(),
            ));
        }

        let totals = aggregate(state);
        let tags = request.tags.unwrap_or_else(|| {
            totals.color_tags.iter().map(ToString::to_string).collect()
        });
        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| default_description(totals.bee_count, &tags));

        let now = Utc::now();
        let build = HiveBuild {
            id: BuildId::new(),
            name,
            description,
            build_data: state.clone(),
            total_attack: totals.total_attack,
            total_gather_rate: totals.total_gather_rate,
            total_convert_rate: totals.total_convert_rate,
            bee_count: totals.bee_count,
            tags,
            is_public: request.is_public,
            created_at: now,
            updated_at: now,
        };

        let saved = self.repo.create(&build).await.map_err(persistence)?;
        tracing::info!(build_id = %saved.id, name = %saved.name, bees = saved.bee_count, "build saved");
        Ok(saved)
    }

    /// List builds by a sort key such as `"-created_date"`.
    pub async fn list_builds(&self, sort_key: &str) -> Result<Vec<HiveBuild>, HiveError> {
        self.list_filtered(BuildFilter {
            sort: BuildSort::parse(sort_key),
            ..Default::default()
        })
        .await
    }

    pub async fn list_filtered(&self, filter: BuildFilter) -> Result<Vec<HiveBuild>, HiveError> {
        self.repo.list(filter).await.map_err(persistence)
    }

    pub async fn get_build(&self, id: &BuildId) -> Result<HiveBuild, HiveError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(persistence)?
            .ok_or(HiveError::NotFound)
    }

    pub async fn delete_build(&self, id: &BuildId) -> Result<(), HiveError> {
        self.repo.delete(id).await.map_err(persistence)?;
        tracing::info!(build_id = %id, "build deleted");
        Ok(())
    }

    /// Save a private copy named `"{name} (Copy)"` with the same slots and stats.
    pub async fn duplicate_build(&self, id: &BuildId) -> Result<HiveBuild, HiveError> {
        let source = self.get_build(id).await?;
        let now = Utc::now();
        let copy = HiveBuild {
            id: BuildId::new(),
            name: format!("{} (Copy)", source.name),
            is_public: false,
            created_at: now,
            updated_at: now,
            ..source
        };

        let saved = self.repo.create(&copy).await.map_err(persistence)?;
        tracing::info!(source = %id, build_id = %saved.id, "build duplicated");
        Ok(saved)
    }

    pub async fn export_build(
        &self,
        id: &BuildId,
        exported_at: DateTime<Utc>,
    ) -> Result<SavedBuildExport, HiveError> {
        let build = self.get_build(id).await?;
        Ok(saved_export(&build, exported_at))
    }
}

/// `"A {n}-bee build focusing on {tags} strategies"`, with "mixed" for no tags.
pub fn default_description(bee_count: u32, tags: &[String]) -> String {
    let focus = if tags.is_empty() {
        "mixed".to_string()
    } else {
        tags.join(", ")
    };
    format!("A {bee_count}-bee build focusing on {focus} strategies")
}

/// Build count and total bees across a library listing.
pub fn summarize(builds: &[HiveBuild]) -> LibrarySummary {
    LibrarySummary {
        build_count: builds.len(),
        total_bees_used: builds.iter().map(|b| u64::from(b.bee_count)).sum(),
    }
}

fn persistence(err: RepositoryError) -> HiveError {
    match err {
        RepositoryError::NotFound => HiveError::NotFound,
        other => HiveError::Persistence(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::fixtures::{bee, colored_bee};
    use crate::hive::BuildStateExt;
    use crate::repository::build::BuildSortField;
    use hiveplan_types::bee::{BeeColor, Rarity};

    // --- Mock repository for testing ---

    /// Keeps builds in memory and counts `create` calls.
    #[derive(Default)]
    struct MockBuildRepository {
        builds: Mutex<Vec<HiveBuild>>,
        creates: AtomicUsize,
        fail_writes: bool,
    }

    impl MockBuildRepository {
        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Default::default()
            }
        }

        fn create_calls(&self) -> usize {
            self.creates.load(Ordering::SeqCst)
        }
    }

    impl BuildRepository for MockBuildRepository {
        async fn create(&self, build: &HiveBuild) -> Result<HiveBuild, RepositoryError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(RepositoryError::Query("disk full".to_string()));
            }
            self.builds.lock().unwrap().push(build.clone());
            Ok(build.clone())
        }

        async fn get_by_id(&self, id: &BuildId) -> Result<Option<HiveBuild>, RepositoryError> {
            Ok(self
                .builds
                .lock()
                .unwrap()
                .iter()
                .find(|b| &b.id == id)
                .cloned())
        }

        async fn list(&self, filter: BuildFilter) -> Result<Vec<HiveBuild>, RepositoryError> {
            let mut builds = self.builds.lock().unwrap().clone();
            if filter.sort.field == BuildSortField::Name {
                builds.sort_by(|a, b| a.name.cmp(&b.name));
            }
            Ok(builds)
        }

        async fn delete(&self, id: &BuildId) -> Result<(), RepositoryError> {
            let mut builds = self.builds.lock().unwrap();
            let before = builds.len();
            builds.retain(|b| &b.id != id);
            if builds.len() == before {
                Err(RepositoryError::NotFound)
            } else {
                Ok(())
            }
        }
    }

    fn hive() -> BuildState {
        let mut state = BuildState::new();
        state
            .place_bee(0, &colored_bee("rad", BeeColor::Red, 1.0, 12.0, 80.0))
            .unwrap();
        state
            .place_bee(1, &colored_bee("bubble", BeeColor::Blue, 3.0, 20.0, 80.0))
            .unwrap();
        state.place_bee(2, &bee("brave", Rarity::Rare, 5.0)).unwrap();
        state
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_save_empty_build_never_calls_repository() {
        let service = BuildService::new(MockBuildRepository::default());
        let err = service
            .save_build(SaveBuildRequest::named("Empty"), &BuildState::new())
            .await
            .unwrap_err();

        assert!(matches!(err, HiveError::Validation(_)));
        assert_eq!(service.repo.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_save_blank_name_never_calls_repository() {
        let service = BuildService::new(MockBuildRepository::default());
        let err = service
            .save_build(SaveBuildRequest::named("   "), &hive())
            .await
            .unwrap_err();

        assert!(matches!(err, HiveError::Validation(_)));
        assert_eq!(service.repo.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_save_fills_defaults() {
        let service = BuildService::new(MockBuildRepository::default());
        let state = hive();
        let saved = service
            .save_build(SaveBuildRequest::named("  Mixed Hive "), &state)
            .await
            .unwrap();

        assert_eq!(saved.name, "Mixed Hive");
        assert_eq!(saved.bee_count, 3);
        assert_eq!(saved.tags, vec!["Red", "Blue"]);
        assert_eq!(
            saved.description,
            "A 3-bee build focusing on Red, Blue strategies"
        );
        assert!(!saved.is_public);
        assert_eq!(saved.build_data, state);
        // 1.8 + 5.4 + 9.0 = 16.2
        assert_eq!(saved.total_attack, 16);
        assert_eq!(saved.total_gather_rate, 32.0);
        assert_eq!(saved.total_convert_rate, 160.0);
        assert_eq!(service.repo.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_save_keeps_explicit_fields() {
        let service = BuildService::new(MockBuildRepository::default());
        let request = SaveBuildRequest {
            name: "Tagged".to_string(),
            description: Some("my notes".to_string()),
            tags: Some(vec![]),
            is_public: true,
        };
        let saved = service.save_build(request, &hive()).await.unwrap();

        assert_eq!(saved.description, "my notes");
        assert!(saved.tags.is_empty());
        assert!(saved.is_public);
    }

    #[tokio::test]
    async fn test_save_failure_is_persistence_error() {
        let service = BuildService::new(MockBuildRepository::failing());
        let state = hive();
        let err = service
            .save_build(SaveBuildRequest::named("Doomed"), &state)
            .await
            .unwrap_err();

        assert!(matches!(err, HiveError::Persistence(_)));
        assert_eq!(state.len(), 3);
        assert_eq!(service.repo.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let service = BuildService::new(MockBuildRepository::default());
        let saved = service
            .save_build(SaveBuildRequest::named("Keep"), &hive())
            .await
            .unwrap();

        assert_eq!(service.get_build(&saved.id).await.unwrap().name, "Keep");
        service.delete_build(&saved.id).await.unwrap();
        assert!(matches!(
            service.get_build(&saved.id).await,
            Err(HiveError::NotFound)
        ));
        assert!(matches!(
            service.delete_build(&saved.id).await,
            Err(HiveError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_is_private_copy() {
        let service = BuildService::new(MockBuildRepository::default());
        let request = SaveBuildRequest {
            is_public: true,
            ..SaveBuildRequest::named("Original")
        };
        let original = service.save_build(request, &hive()).await.unwrap();
        let copy = service.duplicate_build(&original.id).await.unwrap();

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.name, "Original (Copy)");
        assert!(!copy.is_public);
        assert_eq!(copy.build_data, original.build_data);
        assert_eq!(copy.total_attack, original.total_attack);
        assert_eq!(copy.tags, original.tags);
    }

    #[tokio::test]
    async fn test_list_and_summary() {
        let service = BuildService::new(MockBuildRepository::default());
        service
            .save_build(SaveBuildRequest::named("b"), &hive())
            .await
            .unwrap();
        service
            .save_build(SaveBuildRequest::named("a"), &hive())
            .await
            .unwrap();

        let builds = service.list_builds("name").await.unwrap();
        assert_eq!(builds[0].name, "a");

        let summary = summarize(&builds);
        assert_eq!(summary.build_count, 2);
        assert_eq!(summary.total_bees_used, 6);
    }

    #[tokio::test]
    async fn test_export_build() {
        let service = BuildService::new(MockBuildRepository::default());
        let saved = service
            .save_build(SaveBuildRequest::named("Export Me"), &hive())
            .await
            .unwrap();
        let now = Utc::now();
        let export = service.export_build(&saved.id, now).await.unwrap();

        assert_eq!(export.name, "Export Me");
        assert_eq!(export.stats.bee_count, 3);
        assert_eq!(export.exported_at, now);
    }

    #[test]
    fn test_default_description_without_tags() {
        assert_eq!(
            default_description(1, &[]),
            "A 1-bee build focusing on mixed strategies"
        );
    }
}
