use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalogue;

/// Progress metadata for one (project, deliverable) pair.
///
/// Records are created lazily on first update; a missing record is equivalent
/// to [`DeliverableRecord::EMPTY`]. Records never outlive their project —
/// project deletion cascades.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverableRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_as_none"
    )]
    pub owner: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_date_as_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_date_as_none"
    )]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: DeliverableStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_as_none"
    )]
    pub comments: Option<String>,
}

impl DeliverableRecord {
    /// The record every absent entry resolves to.
    pub const EMPTY: DeliverableRecord = DeliverableRecord {
        owner: None,
        start_date: None,
        end_date: None,
        status: DeliverableStatus::NotStarted,
        comments: None,
    };

    /// Shallow-merge a partial update into this record.
    ///
    /// Text fields treat an empty string as "clear the value".
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(owner) = patch.owner {
            self.owner = non_blank(owner);
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(comments) = patch.comments {
            self.comments = non_blank(comments);
        }
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Partial update for a deliverable record.
///
/// Outer `None` leaves a field unchanged. Dates use a nested option so a
/// present-but-empty value clears the stored date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub owner: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub status: Option<DeliverableStatus>,
    pub comments: Option<String>,
}

/// Completion status of a deliverable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliverableStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl DeliverableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NOT_STARTED" => Some(Self::NotStarted),
            "IN_PROGRESS" => Some(Self::InProgress),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }

    /// Human-readable label used in reports and CSV output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Process",
            Self::Done => "Completed",
        }
    }
}

/// Composite key addressing one deliverable record.
///
/// Kept structured in memory; the legacy `"{project_id}-{deliverable_id}"`
/// string form appears only where the key crosses a serialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub project_id: String,
    pub deliverable_id: String,
}

impl RecordKey {
    pub fn new(project_id: impl Into<String>, deliverable_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            deliverable_id: deliverable_id.into(),
        }
    }

    /// Parse the serialized form.
    ///
    /// Project ids may themselves contain the dash delimiter, so the
    /// deliverable part is recovered by matching the longest catalogue id
    /// suffix (catalogue ids are never dash-suffixes of each other). Keys
    /// referencing no known deliverable split at the last dash instead, so
    /// foreign records still round-trip.
    pub fn parse(s: &str) -> Option<Self> {
        let mut best: Option<&'static str> = None;
        for def in catalogue::all() {
            if s.len() > def.id.len() + 1
                && s.ends_with(def.id)
                && s.as_bytes()[s.len() - def.id.len() - 1] == b'-'
                && best.map_or(true, |b| def.id.len() > b.len())
            {
                best = Some(def.id);
            }
        }
        if let Some(id) = best {
            let project_id = &s[..s.len() - id.len() - 1];
            return Some(Self::new(project_id, id));
        }
        let (project_id, deliverable_id) = s.rsplit_once('-')?;
        if project_id.is_empty() || deliverable_id.is_empty() {
            return None;
        }
        Some(Self::new(project_id, deliverable_id))
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.project_id, self.deliverable_id)
    }
}

impl Serialize for RecordKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid record key `{raw}`")))
    }
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

fn blank_date_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
