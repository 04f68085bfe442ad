//! Shared domain types for hiveplan.
//!
//! This crate contains the data model used across the workspace: catalog
//! entries (Bee, Beequip), per-slot configuration, the 50-slot build state,
//! aggregate totals, persisted build records, export documents and the
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod bee;
pub mod beequip;
pub mod build;
pub mod config;
pub mod error;
pub mod export;
pub mod slot;
pub mod stats;
