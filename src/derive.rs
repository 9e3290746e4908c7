//! Derived read-only views over [`State`] and the catalogue.
//!
//! Everything here is a pure function: flattening the projects × catalogue
//! cross-product, filtering it, and folding it into completion and analytics
//! summaries. Ordering is deterministic — projects in insertion order,
//! catalogue entries in declaration order — which CSV export relies on.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::catalogue;
use crate::models::{Area, DeliverableRecord, DeliverableStatus, FuelType, RecordKey, Stage};
use crate::state::{Filters, State};

/// One project × deliverable pairing with its resolved record.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub project_id: String,
    pub project_name: String,
    /// Resolved group label (blank group already mapped to `"Ungrouped"`).
    pub project_group: String,
    pub fuel_type: FuelType,
    pub deliverable_id: &'static str,
    pub stage: Stage,
    pub area: Area,
    pub label: &'static str,
    pub owner: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration: SpanDays,
    pub status: DeliverableStatus,
    pub comments: String,
}

/// Day span between an item's start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanDays {
    /// Start or end date missing.
    Unknown,
    /// End date precedes start date.
    Invalid,
    /// Inclusive day count.
    Days(i64),
}

/// Inclusive day span between two optional dates.
pub fn span_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> SpanDays {
    match (start, end) {
        (Some(start), Some(end)) if end < start => SpanDays::Invalid,
        (Some(start), Some(end)) => SpanDays::Days((end - start).num_days() + 1),
        _ => SpanDays::Unknown,
    }
}

/// Cross-product of projects and catalogue entries, defaults applied.
pub fn flatten(state: &State) -> Vec<Item> {
    let mut items = Vec::with_capacity(state.projects.len() * catalogue::len());
    for project in &state.projects {
        for def in catalogue::all() {
            let key = RecordKey::new(project.id.clone(), def.id);
            let record = state
                .deliverables
                .get(&key)
                .unwrap_or(&DeliverableRecord::EMPTY);
            items.push(Item {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                project_group: project.group_label().to_string(),
                fuel_type: project.fuel_type,
                deliverable_id: def.id,
                stage: def.stage,
                area: def.area,
                label: def.label,
                owner: record.owner.clone().unwrap_or_default(),
                start_date: record.start_date,
                end_date: record.end_date,
                duration: span_days(record.start_date, record.end_date),
                status: record.status,
                comments: record.comments.clone().unwrap_or_default(),
            });
        }
    }
    items
}

/// Conjunctive filter: an item passes only if every active field matches.
pub fn filter_items(items: &[Item], filters: &Filters) -> Vec<Item> {
    items
        .iter()
        .filter(|item| matches(item, filters))
        .cloned()
        .collect()
}

fn matches(item: &Item, filters: &Filters) -> bool {
    if !filters.owner.is_empty()
        && !item
            .owner
            .to_lowercase()
            .contains(&filters.owner.to_lowercase())
    {
        return false;
    }
    if let Some(stage) = filters.stage {
        if item.stage != stage {
            return false;
        }
    }
    if !filters.group.is_empty() && item.project_group != filters.group {
        return false;
    }
    if filters.in_progress_only && item.status != DeliverableStatus::InProgress {
        return false;
    }
    if filters.completed_only && item.status != DeliverableStatus::Done {
        return false;
    }
    // Duration bounds only constrain items with a valid span.
    if let SpanDays::Days(days) = item.duration {
        if filters.min_duration.is_some_and(|min| days < min) {
            return false;
        }
        if filters.max_duration.is_some_and(|max| days > max) {
            return false;
        }
    }
    true
}

/// Completion counts for one project, optionally restricted to a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    /// Rounded percentage; `0` when `total` is zero.
    pub percentage: u32,
}

pub fn completion(state: &State, project_id: &str, stage: Option<Stage>) -> CompletionStats {
    let mut total = 0;
    let mut completed = 0;
    for def in catalogue::all() {
        if stage.is_some_and(|s| def.stage != s) {
            continue;
        }
        total += 1;
        let key = RecordKey::new(project_id, def.id);
        if state
            .deliverables
            .get(&key)
            .is_some_and(|r| r.status == DeliverableStatus::Done)
        {
            completed += 1;
        }
    }
    let percentage = if total > 0 {
        (completed as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };
    CompletionStats {
        total,
        completed,
        percentage,
    }
}

/// Aggregate counts over a (usually filtered) item slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analytics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Derived by subtraction so the three status counts always sum to
    /// `total` exactly.
    pub not_started: usize,
    pub by_stage: BTreeMap<Stage, usize>,
    /// Ownerless items are not counted here.
    pub by_owner: BTreeMap<String, usize>,
    pub by_group: BTreeMap<String, usize>,
    pub by_area: BTreeMap<Area, usize>,
}

/// Single-pass fold of an item slice into aggregate counts.
pub fn analytics(items: &[Item]) -> Analytics {
    let mut out = Analytics {
        total: items.len(),
        ..Analytics::default()
    };
    for item in items {
        match item.status {
            DeliverableStatus::Done => out.completed += 1,
            DeliverableStatus::InProgress => out.in_progress += 1,
            DeliverableStatus::NotStarted => {}
        }
        *out.by_stage.entry(item.stage).or_default() += 1;
        if !item.owner.is_empty() {
            *out.by_owner.entry(item.owner.clone()).or_default() += 1;
        }
        *out.by_group.entry(item.project_group.clone()).or_default() += 1;
        *out.by_area.entry(item.area).or_default() += 1;
    }
    out.not_started = out.total - out.completed - out.in_progress;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_days_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1);
        let end = NaiveDate::from_ymd_opt(2025, 1, 3);
        assert_eq!(span_days(start, end), SpanDays::Days(3));
        assert_eq!(span_days(start, start), SpanDays::Days(1));
    }

    #[test]
    fn test_span_days_flags_reversed_and_missing_dates() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 3);
        let end = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert_eq!(span_days(start, end), SpanDays::Invalid);
        assert_eq!(span_days(start, None), SpanDays::Unknown);
        assert_eq!(span_days(None, None), SpanDays::Unknown);
    }
}
