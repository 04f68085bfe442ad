//! Export document assembly and file naming.
//!
//! Serialization and writing happen in the infra layer; this module only
//! decides what goes into the document and what the file is called.

use chrono::{DateTime, Utc};

use hiveplan_types::build::{BuildState, HiveBuild};
use hiveplan_types::export::{BuildExport, SavedBuildExport, UNTITLED_BUILD};

use crate::stats::aggregate;

const SESSION_FILE_STEM: &str = "hive-build";

/// Export of the current planning session. A blank name becomes "Untitled Build".
pub fn session_export(name: Option<&str>, state: &BuildState, timestamp: DateTime<Utc>) -> BuildExport {
    let name = non_blank(name).unwrap_or(UNTITLED_BUILD);
    BuildExport {
        name: name.to_string(),
        slots: state.clone(),
        stats: aggregate(state),
        timestamp,
    }
}

/// `"{name}.json"`, or `"hive-build.json"` for an unnamed session.
///
/// Path separators in the name are replaced so the file lands where asked.
pub fn session_export_file_name(name: Option<&str>) -> String {
    let stem = non_blank(name).unwrap_or(SESSION_FILE_STEM);
    format!("{}.json", stem.replace(['/', '\\'], "-"))
}

pub fn saved_export(build: &HiveBuild, exported_at: DateTime<Utc>) -> SavedBuildExport {
    SavedBuildExport::from_build(build, exported_at)
}

/// Lowercased build name with each whitespace run replaced by `-`.
pub fn saved_export_file_name(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(|part| part.replace(['/', '\\'], "-"))
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    if slug.is_empty() {
        format!("{SESSION_FILE_STEM}.json")
    } else {
        format!("{slug}.json")
    }
}

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}
