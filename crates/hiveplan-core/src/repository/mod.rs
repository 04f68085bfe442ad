//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (hiveplan-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod build;
pub mod catalog;

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}
