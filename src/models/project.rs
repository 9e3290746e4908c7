use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked project in the portfolio.
///
/// Projects are the top-level organizational unit. Each project works through
/// the same fixed catalogue of deliverables; per-deliverable progress lives in
/// separate records keyed by (project, deliverable). Deleting a project
/// cascades to those records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub fuel_type: FuelType,
    pub stage: Stage,
    /// Free-form grouping label. Blank means `"Ungrouped"`.
    #[serde(default)]
    pub group: String,
    pub date_created: NaiveDate,
}

impl Project {
    /// Build a new project with a fresh unique id and today's creation date.
    pub fn new(
        name: impl Into<String>,
        fuel_type: FuelType,
        stage: Stage,
        group: impl Into<String>,
    ) -> Self {
        let group = group.into();
        Self {
            id: format!("proj-{}", Uuid::new_v4()),
            name: name.into(),
            fuel_type,
            stage,
            group: if group.is_empty() { "Ungrouped".to_string() } else { group },
            date_created: Utc::now().date_naive(),
        }
    }

    /// Group label with the blank-group default applied.
    pub fn group_label(&self) -> &str {
        if self.group.is_empty() {
            "Ungrouped"
        } else {
            &self.group
        }
    }

    /// Shallow-merge a partial update into this project.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(fuel_type) = patch.fuel_type {
            self.fuel_type = fuel_type;
        }
        if let Some(stage) = patch.stage {
            self.stage = stage;
        }
        if let Some(group) = patch.group {
            self.group = group;
        }
    }
}

/// Partial update for a project. All fields are optional; `None` leaves the
/// existing value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub stage: Option<Stage>,
    pub group: Option<String>,
}

/// A lifecycle stage a project (and each catalogue deliverable) belongs to.
///
/// Declaration order is the lifecycle order and drives ordered reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Feasibility,
    #[serde(rename = "Pre-Construction")]
    PreConstruction,
    Construction,
    Commissioning,
    Operations,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Self::Feasibility,
        Self::PreConstruction,
        Self::Construction,
        Self::Commissioning,
        Self::Operations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feasibility => "Feasibility",
            Self::PreConstruction => "Pre-Construction",
            Self::Construction => "Construction",
            Self::Commissioning => "Commissioning",
            Self::Operations => "Operations",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Feasibility" => Some(Self::Feasibility),
            "Pre-Construction" => Some(Self::PreConstruction),
            "Construction" => Some(Self::Construction),
            "Commissioning" => Some(Self::Commissioning),
            "Operations" => Some(Self::Operations),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The alternative fuel a project produces or handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Hydrogen,
    Methanol,
    Ammonia,
    #[serde(rename = "RNG")]
    Rng,
    #[serde(rename = "LNG")]
    Lng,
    Geothermal,
}

impl FuelType {
    pub const ALL: [FuelType; 6] = [
        Self::Hydrogen,
        Self::Methanol,
        Self::Ammonia,
        Self::Rng,
        Self::Lng,
        Self::Geothermal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hydrogen => "Hydrogen",
            Self::Methanol => "Methanol",
            Self::Ammonia => "Ammonia",
            Self::Rng => "RNG",
            Self::Lng => "LNG",
            Self::Geothermal => "Geothermal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Hydrogen" => Some(Self::Hydrogen),
            "Methanol" => Some(Self::Methanol),
            "Ammonia" => Some(Self::Ammonia),
            "RNG" => Some(Self::Rng),
            "LNG" => Some(Self::Lng),
            "Geothermal" => Some(Self::Geothermal),
            _ => None,
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_defaults_blank_group() {
        let project = Project::new("Plant A", FuelType::Hydrogen, Stage::Feasibility, "");
        assert_eq!(project.group, "Ungrouped");
        assert!(project.id.starts_with("proj-"));
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut project = Project::new("Plant A", FuelType::Hydrogen, Stage::Feasibility, "North");
        project.apply(ProjectPatch {
            stage: Some(Stage::Construction),
            ..ProjectPatch::default()
        });
        assert_eq!(project.stage, Stage::Construction);
        assert_eq!(project.name, "Plant A");
        assert_eq!(project.group, "North");
    }

    #[test]
    fn test_stage_serializes_as_display_string() {
        let json = serde_json::to_string(&Stage::PreConstruction).unwrap();
        assert_eq!(json, "\"Pre-Construction\"");
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stage::PreConstruction);
    }

    #[test]
    fn test_fuel_type_round_trips_through_strings() {
        for fuel in FuelType::ALL {
            assert_eq!(FuelType::from_str(fuel.as_str()), Some(fuel));
        }
    }
}
