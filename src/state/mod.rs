//! Application state and the single mutation path into it.
//!
//! [`State`] is a plain value owned by whoever drives the engine — no statics,
//! no ambient storage. Every change goes through [`reduce`] with an [`Action`];
//! nothing else mutates domain data. This keeps replay deterministic and lets
//! tests build arbitrary states from action sequences.

mod action;
mod reducer;

pub use action::*;
pub use reducer::reduce;

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Area, DeliverableRecord, Project, RecordKey, Stage};

/// The aggregate root. Mutated only via [`reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub projects: Vec<Project>,
    /// `None`, or the id of a project currently in `projects`. Selection is
    /// assigned without validation; unknown ids resolve to "no project" in
    /// the derivation layer.
    pub selected_project_id: Option<String>,
    pub deliverables: BTreeMap<RecordKey, DeliverableRecord>,
    pub filters: Filters,
    pub ui: UiState,
}

impl State {
    /// Look up the currently selected project, if any.
    pub fn selected_project(&self) -> Option<&Project> {
        let id = self.selected_project_id.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }
}

/// View-side predicate set. Inactive fields (empty / `None` / `false`)
/// impose no constraint; active fields combine conjunctively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    /// Case-insensitive substring match against the item owner.
    pub owner: String,
    pub stage: Option<Stage>,
    /// Exact match against the resolved group label.
    pub group: String,
    pub in_progress_only: bool,
    pub completed_only: bool,
    /// Inclusive lower/upper bounds on an item's day span. Items without a
    /// valid span pass these bounds unfiltered.
    pub min_duration: Option<i64>,
    pub max_duration: Option<i64>,
}

impl Filters {
    /// Shallow-merge a partial update.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(stage) = patch.stage {
            self.stage = stage;
        }
        if let Some(group) = patch.group {
            self.group = group;
        }
        if let Some(in_progress_only) = patch.in_progress_only {
            self.in_progress_only = in_progress_only;
        }
        if let Some(completed_only) = patch.completed_only {
            self.completed_only = completed_only;
        }
        if let Some(min_duration) = patch.min_duration {
            self.min_duration = min_duration;
        }
        if let Some(max_duration) = patch.max_duration {
            self.max_duration = max_duration;
        }
    }
}

/// Partial update for [`Filters`]. Outer `None` leaves a field unchanged;
/// optional fields use a nested option so they can be actively cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub owner: Option<String>,
    pub stage: Option<Option<Stage>>,
    pub group: Option<String>,
    pub in_progress_only: Option<bool>,
    pub completed_only: Option<bool>,
    pub min_duration: Option<Option<i64>>,
    pub max_duration: Option<Option<i64>>,
}

/// Presentation-side state: panel visibility and per-item expansion.
///
/// Carried in [`State`] so panel toggles replay like any other action, but
/// never persisted as domain truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub expanded_stages: BTreeSet<Stage>,
    pub expanded_areas: BTreeSet<(Stage, Area)>,
    pub editing_item: Option<RecordKey>,
    pub show_filters: bool,
    pub show_analytics: bool,
}

/// A collapsible top-level panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Filters,
    Analytics,
}
