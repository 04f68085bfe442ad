//! Hive planning logic and repository trait definitions for hiveplan.
//!
//! This crate defines the "ports" (catalog and build repository traits) that
//! the infrastructure layer implements, along with the pure planning core:
//! build-state mutations, stat aggregation, the slot editor, the clipboard
//! and the session state machine. It depends only on `hiveplan-types` --
//! never on `hiveplan-infra` or any database/IO crate.

pub mod catalog;
pub mod clipboard;
pub mod editor;
pub mod export;
pub mod hive;
pub mod palette;
pub mod repository;
pub mod service;
pub mod session;
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures;
