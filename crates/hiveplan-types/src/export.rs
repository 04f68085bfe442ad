//! Exported build documents.
//!
//! Field presence and shape are what compatible tools rely on for re-import;
//! field order is not significant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::build::{BuildState, HiveBuild};
use crate::stats::{BuildTotals, HeadlineStats};

/// Name used when a session is exported before it was given one.
pub const UNTITLED_BUILD: &str = "Untitled Build";

/// Export of an in-progress planning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildExport {
    pub name: String,
    pub slots: BuildState,
    pub stats: BuildTotals,
    pub timestamp: DateTime<Utc>,
}

/// Export of a build from the saved library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBuildExport {
    pub name: String,
    pub description: String,
    pub build_data: BuildState,
    pub stats: HeadlineStats,
    pub tags: Vec<String>,
    pub exported_at: DateTime<Utc>,
}

impl SavedBuildExport {
    pub fn from_build(build: &HiveBuild, exported_at: DateTime<Utc>) -> Self {
        Self {
            name: build.name.clone(),
            description: build.description.clone(),
            build_data: build.build_data.clone(),
            stats: HeadlineStats {
                total_attack: build.total_attack,
                total_gather_rate: build.total_gather_rate,
                total_convert_rate: build.total_convert_rate,
                bee_count: build.bee_count,
            },
            tags: build.tags.clone(),
            exported_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_export_field_presence() {
        let export = BuildExport {
            name: UNTITLED_BUILD.to_string(),
            slots: BuildState::new(),
            stats: BuildTotals::default(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&export).unwrap();
        for key in ["name", "slots", "stats", "timestamp"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["slots"].is_object());
        assert_eq!(json["stats"]["bee_count"], 0);
    }

    #[test]
    fn test_saved_export_copies_headline_numbers() {
        let now = Utc::now();
        let build = HiveBuild {
            id: crate::build::BuildId::new(),
            name: "Blue Hive".to_string(),
            description: "desc".to_string(),
            build_data: BuildState::new(),
            total_attack: 500,
            total_gather_rate: 42.0,
            total_convert_rate: 80.0,
            bee_count: 7,
            tags: vec!["Blue".to_string()],
            is_public: false,
            created_at: now,
            updated_at: now,
        };
        let export = SavedBuildExport::from_build(&build, now);
        assert_eq!(export.stats.total_attack, 500);
        assert_eq!(export.stats.bee_count, 7);
        assert_eq!(export.tags, vec!["Blue"]);
    }
}
