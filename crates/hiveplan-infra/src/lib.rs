//! Infrastructure layer for hiveplan.
//!
//! Contains implementations of the ports defined in `hiveplan-core`: SQLite
//! build storage, the JSON-file catalog, export writing, `config.toml`
//! loading and data-directory resolution.

pub mod catalog;
pub mod config;
pub mod export;
pub mod filesystem;
pub mod sqlite;
