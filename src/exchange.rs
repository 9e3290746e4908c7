//! Bulk import/export: JSON both ways, CSV out.
//!
//! JSON export carries the raw record map (not the flattened view) so a
//! re-import through [`Action::LoadData`](crate::state::Action) is lossless.
//! CSV export always emits the full unfiltered flatten — one row per
//! catalogue entry per project — regardless of active filters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::derive::flatten;
use crate::models::{DeliverableRecord, DeliverableStatus, Project, RecordKey};
use crate::state::{LoadPayload, State};
use crate::store::SCHEMA_VERSION;

/// Shape of a JSON export file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    pub schema_version: u32,
    pub export_date: DateTime<Utc>,
    pub projects: Vec<Project>,
    pub deliverables: BTreeMap<RecordKey, DeliverableRecord>,
}

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// A parsed import: the load payload plus an optional non-fatal warning.
#[derive(Debug)]
pub struct Import {
    pub payload: LoadPayload,
    /// Set when the file's schema version differs from ours. Import still
    /// proceeds; the caller decides whether to surface or abort.
    pub warning: Option<String>,
}

/// Serialize the domain state to the JSON exchange format.
pub fn export_json(state: &State) -> String {
    let export = JsonExport {
        schema_version: SCHEMA_VERSION,
        export_date: Utc::now(),
        projects: state.projects.clone(),
        deliverables: state.deliverables.clone(),
    };
    // A BTreeMap of serializable values cannot fail to serialize.
    serde_json::to_string_pretty(&export).unwrap_or_default()
}

/// Parse a JSON exchange file.
///
/// Structure is validated before anything is handed to the reducer: both
/// `projects` and `deliverables` must be present, or the import fails without
/// touching state. A schema-version difference is reported as a warning, not
/// an error.
pub fn import_json(raw: &str) -> Result<Import, ExchangeError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.get("projects").is_none() {
        return Err(ExchangeError::MissingField("projects"));
    }
    if value.get("deliverables").is_none() {
        return Err(ExchangeError::MissingField("deliverables"));
    }

    let warning = match value.get("schemaVersion").and_then(|v| v.as_u64()) {
        Some(found) if found as u32 != SCHEMA_VERSION => Some(format!(
            "file has schema version {found}, expected {SCHEMA_VERSION}; importing anyway"
        )),
        _ => None,
    };

    let payload: LoadPayload = serde_json::from_value(value)?;
    Ok(Import { payload, warning })
}

pub const CSV_HEADER: &str =
    "Project,Group,Fuel Type,Stage,Area,Deliverable,Owner,Start Date,End Date,Status,Completed,Comments";

/// Render the full unfiltered flatten as CSV.
///
/// Text fields are double-quoted with internal quotes doubled; dates are
/// bare ISO; `Completed` mirrors `status == DONE` as `Yes`/`No`.
pub fn export_csv(state: &State) -> String {
    let mut out = String::from(CSV_HEADER);
    for item in flatten(state) {
        let row = [
            quote(&item.project_name),
            quote(&item.project_group),
            quote(item.fuel_type.as_str()),
            quote(item.stage.as_str()),
            quote(item.area.as_str()),
            quote(item.label),
            quote(&item.owner),
            item.start_date.map(|d| d.to_string()).unwrap_or_default(),
            item.end_date.map(|d| d.to_string()).unwrap_or_default(),
            quote(item.status.label()),
            if item.status == DeliverableStatus::Done {
                "Yes".to_string()
            } else {
                "No".to_string()
            },
            quote(&item.comments),
        ];
        out.push('\n');
        out.push_str(&row.join(","));
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
