use std::fmt;

use thiserror::Error;

/// Why a slot index was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSlotReason {
    /// Index is not inside `0..HIVE_SIZE`.
    OutOfRange,
    /// The operation needs an existing placement but the slot is empty.
    Unoccupied,
    /// The operation needs an empty slot but a bee is already there.
    Occupied,
}

impl fmt::Display for InvalidSlotReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSlotReason::OutOfRange => write!(f, "outside the hive"),
            InvalidSlotReason::Unoccupied => write!(f, "slot is empty"),
            InvalidSlotReason::Occupied => write!(f, "slot is already occupied"),
        }
    }
}

/// Errors surfaced by build-state, editor and build-service operations.
#[derive(Debug, Error)]
pub enum HiveError {
    #[error("invalid slot {index}: {reason}")]
    InvalidSlot {
        index: usize,
        reason: InvalidSlotReason,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("build not found")]
    NotFound,
}

impl HiveError {
    pub fn invalid_slot(index: usize, reason: InvalidSlotReason) -> Self {
        HiveError::InvalidSlot { index, reason }
    }
}

/// Errors from repository operations (used by trait definitions in hiveplan-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors raised while loading the bee and beequip catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("catalog parse error in {path}: {message}")]
    Parse { path: String, message: String },
}
