use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Area, DeliverableRecord, Project, ProjectPatch, RecordKey, RecordPatch, Stage};
use crate::state::{FilterPatch, Panel};

/// The complete action vocabulary accepted by [`reduce`](crate::state::reduce).
///
/// Presentation code never touches [`State`](crate::state::State) directly —
/// it emits these and reads derived views.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Wholesale replacement of domain data (import / startup load).
    /// Selection, filters and UI reset to defaults; stale session state never
    /// carries over.
    LoadData(LoadPayload),
    /// Append a project. The caller guarantees a fresh unique id
    /// (see [`Project::new`]).
    ProjectAdd(Project),
    /// Remove a project, clear a matching selection, and cascade-delete every
    /// deliverable record keyed by it.
    ProjectDelete(String),
    /// Shallow-merge updates into the matching project; no-op if absent.
    ProjectUpdate { id: String, patch: ProjectPatch },
    /// Set the selection without validating existence.
    ProjectSelect(Option<String>),
    /// Merge into the record at `key`, creating it from
    /// [`DeliverableRecord::EMPTY`] if absent.
    DeliverableUpdate { key: RecordKey, patch: RecordPatch },
    /// Binary completion toggle: `DONE` resets to `NOT_STARTED`; anything
    /// else (including `IN_PROGRESS`) becomes `DONE`.
    DeliverableToggle(RecordKey),
    FiltersSet(FilterPatch),
    FiltersClear,
    /// Flip expansion for one stage panel.
    UiToggleStage(Stage),
    /// Flip expansion for one (stage, area) panel.
    UiToggleArea(Stage, Area),
    UiTogglePanel(Panel),
    UiSetEditing(Option<RecordKey>),
    /// Return to the default state.
    ResetAll,
}

/// Domain payload for [`Action::LoadData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPayload {
    pub projects: Vec<Project>,
    pub deliverables: BTreeMap<RecordKey, DeliverableRecord>,
}
