use chrono::NaiveDate;
use fuelfolio::models::*;
use fuelfolio::state::{reduce, Action, FilterPatch, LoadPayload, Panel, State};
use speculate2::speculate;
use std::collections::BTreeMap;

fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        fuel_type: FuelType::Hydrogen,
        stage: Stage::Feasibility,
        group: String::new(),
        date_created: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
    }
}

fn key(project: &str, deliverable: &str) -> RecordKey {
    RecordKey::new(project, deliverable)
}

fn owner_patch(owner: &str) -> RecordPatch {
    RecordPatch {
        owner: Some(owner.to_string()),
        ..RecordPatch::default()
    }
}

speculate! {
    before {
        let base = reduce(State::default(), Action::ProjectAdd(project("p1", "Alpha")));
    }

    describe "projects" {
        it "appends added projects in insertion order" {
            let state = reduce(base, Action::ProjectAdd(project("p2", "Beta")));
            assert_eq!(state.projects.len(), 2);
            assert_eq!(state.projects[0].id, "p1");
            assert_eq!(state.projects[1].id, "p2");
        }

        it "merges only the provided fields on update" {
            let state = reduce(base, Action::ProjectUpdate {
                id: "p1".to_string(),
                patch: ProjectPatch {
                    stage: Some(Stage::Construction),
                    group: Some("North".to_string()),
                    ..ProjectPatch::default()
                },
            });
            assert_eq!(state.projects[0].stage, Stage::Construction);
            assert_eq!(state.projects[0].group, "North");
            assert_eq!(state.projects[0].name, "Alpha");
            assert_eq!(state.projects[0].fuel_type, FuelType::Hydrogen);
        }

        it "treats an update of an unknown id as a no-op" {
            let state = reduce(base.clone(), Action::ProjectUpdate {
                id: "missing".to_string(),
                patch: ProjectPatch { name: Some("X".to_string()), ..ProjectPatch::default() },
            });
            assert_eq!(state, base);
        }

        it "sets selection without validating existence" {
            let state = reduce(base, Action::ProjectSelect(Some("ghost".to_string())));
            assert_eq!(state.selected_project_id.as_deref(), Some("ghost"));
            assert!(state.selected_project().is_none());
        }

        it "deletes a project, its selection and every record it owns" {
            let mut state = reduce(base, Action::ProjectAdd(project("p2", "Beta")));
            state = reduce(state, Action::ProjectSelect(Some("p1".to_string())));
            state = reduce(state, Action::DeliverableToggle(key("p1", "chg-feas-1")));
            state = reduce(state, Action::DeliverableUpdate {
                key: key("p1", "risk-con-1"),
                patch: owner_patch("Dana"),
            });
            state = reduce(state, Action::DeliverableToggle(key("p2", "chg-feas-1")));

            state = reduce(state, Action::ProjectDelete("p1".to_string()));

            assert_eq!(state.projects.len(), 1);
            assert_eq!(state.projects[0].id, "p2");
            assert_eq!(state.selected_project_id, None);
            assert!(state.deliverables.keys().all(|k| k.project_id != "p1"));
            assert_eq!(state.deliverables.len(), 1);
        }

        it "keeps an unrelated selection when deleting another project" {
            let mut state = reduce(base, Action::ProjectAdd(project("p2", "Beta")));
            state = reduce(state, Action::ProjectSelect(Some("p2".to_string())));
            state = reduce(state, Action::ProjectDelete("p1".to_string()));
            assert_eq!(state.selected_project_id.as_deref(), Some("p2"));
        }
    }

    describe "deliverable records" {
        it "creates a record lazily on first update" {
            assert!(base.deliverables.is_empty());
            let state = reduce(base, Action::DeliverableUpdate {
                key: key("p1", "fin-pre-1"),
                patch: owner_patch("Sam"),
            });
            let record = state.deliverables.get(&key("p1", "fin-pre-1")).expect("record created");
            assert_eq!(record.owner.as_deref(), Some("Sam"));
            assert_eq!(record.status, DeliverableStatus::NotStarted);
        }

        it "merges updates into an existing record" {
            let mut state = reduce(base, Action::DeliverableUpdate {
                key: key("p1", "fin-pre-1"),
                patch: owner_patch("Sam"),
            });
            state = reduce(state, Action::DeliverableUpdate {
                key: key("p1", "fin-pre-1"),
                patch: RecordPatch {
                    status: Some(DeliverableStatus::InProgress),
                    start_date: Some(NaiveDate::from_ymd_opt(2025, 3, 1)),
                    ..RecordPatch::default()
                },
            });
            let record = &state.deliverables[&key("p1", "fin-pre-1")];
            assert_eq!(record.owner.as_deref(), Some("Sam"));
            assert_eq!(record.status, DeliverableStatus::InProgress);
            assert_eq!(record.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        }

        it "clears a text field when given an empty string" {
            let mut state = reduce(base, Action::DeliverableUpdate {
                key: key("p1", "fin-pre-1"),
                patch: owner_patch("Sam"),
            });
            state = reduce(state, Action::DeliverableUpdate {
                key: key("p1", "fin-pre-1"),
                patch: owner_patch(""),
            });
            assert_eq!(state.deliverables[&key("p1", "fin-pre-1")].owner, None);
        }
    }

    describe "deliverable toggle" {
        it "round-trips from not started" {
            let once = reduce(base, Action::DeliverableToggle(key("p1", "chg-feas-1")));
            assert_eq!(once.deliverables[&key("p1", "chg-feas-1")].status, DeliverableStatus::Done);

            let twice = reduce(once, Action::DeliverableToggle(key("p1", "chg-feas-1")));
            assert_eq!(twice.deliverables[&key("p1", "chg-feas-1")].status, DeliverableStatus::NotStarted);
        }

        it "completes an in-progress item and never returns to in-progress" {
            let mut state = reduce(base, Action::DeliverableUpdate {
                key: key("p1", "chg-feas-1"),
                patch: RecordPatch {
                    status: Some(DeliverableStatus::InProgress),
                    ..RecordPatch::default()
                },
            });

            state = reduce(state, Action::DeliverableToggle(key("p1", "chg-feas-1")));
            assert_eq!(state.deliverables[&key("p1", "chg-feas-1")].status, DeliverableStatus::Done);

            state = reduce(state, Action::DeliverableToggle(key("p1", "chg-feas-1")));
            assert_eq!(state.deliverables[&key("p1", "chg-feas-1")].status, DeliverableStatus::NotStarted);
        }

        it "preserves the other record fields" {
            let mut state = reduce(base, Action::DeliverableUpdate {
                key: key("p1", "chg-feas-1"),
                patch: owner_patch("Dana"),
            });
            state = reduce(state, Action::DeliverableToggle(key("p1", "chg-feas-1")));
            let record = &state.deliverables[&key("p1", "chg-feas-1")];
            assert_eq!(record.owner.as_deref(), Some("Dana"));
            assert_eq!(record.status, DeliverableStatus::Done);
        }
    }

    describe "load data" {
        it "replaces domain data wholesale and resets session state" {
            let mut state = reduce(base, Action::ProjectSelect(Some("p1".to_string())));
            state = reduce(state, Action::FiltersSet(FilterPatch {
                owner: Some("dana".to_string()),
                ..FilterPatch::default()
            }));
            state = reduce(state, Action::UiTogglePanel(Panel::Analytics));
            state = reduce(state, Action::UiToggleStage(Stage::Construction));

            let mut deliverables = BTreeMap::new();
            deliverables.insert(key("p9", "chg-feas-1"), DeliverableRecord {
                status: DeliverableStatus::Done,
                ..DeliverableRecord::EMPTY
            });
            state = reduce(state, Action::LoadData(LoadPayload {
                projects: vec![project("p9", "Gamma")],
                deliverables,
            }));

            assert_eq!(state.projects.len(), 1);
            assert_eq!(state.projects[0].id, "p9");
            assert_eq!(state.deliverables.len(), 1);
            assert_eq!(state.selected_project_id, None);
            assert_eq!(state.filters, Default::default());
            assert_eq!(state.ui, Default::default());
        }

        it "drops projects with a blank id or name" {
            let state = reduce(base, Action::LoadData(LoadPayload {
                projects: vec![
                    project("", "Nameless Id"),
                    project("p2", ""),
                    project("p3", "Kept"),
                ],
                deliverables: BTreeMap::new(),
            }));
            assert_eq!(state.projects.len(), 1);
            assert_eq!(state.projects[0].id, "p3");
        }
    }

    describe "filters" {
        it "merges partial updates" {
            let mut state = reduce(base, Action::FiltersSet(FilterPatch {
                owner: Some("dana".to_string()),
                stage: Some(Some(Stage::Construction)),
                ..FilterPatch::default()
            }));
            state = reduce(state, Action::FiltersSet(FilterPatch {
                completed_only: Some(true),
                ..FilterPatch::default()
            }));
            assert_eq!(state.filters.owner, "dana");
            assert_eq!(state.filters.stage, Some(Stage::Construction));
            assert!(state.filters.completed_only);
        }

        it "clears back to defaults" {
            let mut state = reduce(base, Action::FiltersSet(FilterPatch {
                owner: Some("dana".to_string()),
                in_progress_only: Some(true),
                min_duration: Some(Some(5)),
                ..FilterPatch::default()
            }));
            state = reduce(state, Action::FiltersClear);
            assert_eq!(state.filters, Default::default());
        }
    }

    describe "ui state" {
        it "toggles stage panels independently" {
            let mut state = reduce(base, Action::UiToggleStage(Stage::Feasibility));
            state = reduce(state, Action::UiToggleStage(Stage::Construction));
            state = reduce(state, Action::UiToggleStage(Stage::Feasibility));
            assert!(!state.ui.expanded_stages.contains(&Stage::Feasibility));
            assert!(state.ui.expanded_stages.contains(&Stage::Construction));
        }

        it "keys area expansion by stage and area together" {
            let state = reduce(base, Action::UiToggleArea(Stage::Construction, Area::RiskManagement));
            assert!(state.ui.expanded_areas.contains(&(Stage::Construction, Area::RiskManagement)));
            assert!(!state.ui.expanded_areas.contains(&(Stage::Feasibility, Area::RiskManagement)));
        }

        it "flips panels and tracks the edited item" {
            let mut state = reduce(base, Action::UiTogglePanel(Panel::Filters));
            assert!(state.ui.show_filters);
            state = reduce(state, Action::UiTogglePanel(Panel::Filters));
            assert!(!state.ui.show_filters);

            state = reduce(state, Action::UiSetEditing(Some(key("p1", "chg-feas-1"))));
            assert_eq!(state.ui.editing_item, Some(key("p1", "chg-feas-1")));
        }
    }

    describe "reset" {
        it "returns the default state" {
            let mut state = reduce(base, Action::DeliverableToggle(key("p1", "chg-feas-1")));
            state = reduce(state, Action::ResetAll);
            assert_eq!(state, State::default());
        }
    }
}
