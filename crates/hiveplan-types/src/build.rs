use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::slot::{SlotConfig, SlotIndex};

/// The hive being planned: slot index -> configuration of the bee placed there.
///
/// A slot missing from the map is empty. Mutations live in
/// `hiveplan_core::hive::BuildStateExt`; this type only offers reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildState {
    pub slots: BTreeMap<SlotIndex, SlotConfig>,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: SlotIndex) -> Option<&SlotConfig> {
        self.slots.get(&index)
    }

    pub fn is_occupied(&self, index: SlotIndex) -> bool {
        self.slots.contains_key(&index)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied slots in hive order.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotIndex, &SlotConfig)> {
        self.slots.iter().map(|(index, config)| (*index, config))
    }
}

/// Unique identifier for a saved build, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildId(pub Uuid);

impl BuildId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for BuildId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BuildId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A named, persisted hive build.
///
/// The four aggregate numbers are computed at save time and stored next to
/// the full slot snapshot so listings do not need to recompute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiveBuild {
    pub id: BuildId,
    pub name: String,
    pub description: String,
    pub build_data: BuildState,
    pub total_attack: i64,
    pub total_gather_rate: f64,
    pub total_convert_rate: f64,
    pub bee_count: u32,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to save the current hive. Only `name` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveBuildRequest {
    pub name: String,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: bool,
}

impl SaveBuildRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Aggregate view over the saved-build library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibrarySummary {
    pub build_count: usize,
    pub total_bees_used: u64,
}
