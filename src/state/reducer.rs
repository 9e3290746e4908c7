use crate::models::{DeliverableRecord, DeliverableStatus};
use crate::state::{Action, Panel, State};

/// The single mutation path: apply one action to the state.
///
/// Total and pure — never panics, never performs I/O. Actions naming an id
/// that does not exist are no-ops rather than errors.
pub fn reduce(mut state: State, action: Action) -> State {
    match action {
        Action::LoadData(payload) => {
            let projects = payload
                .projects
                .into_iter()
                .filter(|p| !p.id.is_empty() && !p.name.is_empty())
                .collect();
            State {
                projects,
                deliverables: payload.deliverables,
                ..State::default()
            }
        }

        Action::ProjectAdd(project) => {
            state.projects.push(project);
            state
        }

        Action::ProjectDelete(project_id) => {
            state.projects.retain(|p| p.id != project_id);
            if state.selected_project_id.as_deref() == Some(project_id.as_str()) {
                state.selected_project_id = None;
            }
            state
                .deliverables
                .retain(|key, _| key.project_id != project_id);
            state
        }

        Action::ProjectUpdate { id, patch } => {
            if let Some(project) = state.projects.iter_mut().find(|p| p.id == id) {
                project.apply(patch);
            }
            state
        }

        Action::ProjectSelect(selection) => {
            state.selected_project_id = selection;
            state
        }

        Action::DeliverableUpdate { key, patch } => {
            let mut record = state
                .deliverables
                .get(&key)
                .cloned()
                .unwrap_or(DeliverableRecord::EMPTY);
            record.apply(patch);
            state.deliverables.insert(key, record);
            state
        }

        Action::DeliverableToggle(key) => {
            let mut record = state
                .deliverables
                .get(&key)
                .cloned()
                .unwrap_or(DeliverableRecord::EMPTY);
            // Toggling never routes through IN_PROGRESS: an in-progress item
            // completes, and un-completing resets straight to NOT_STARTED.
            record.status = match record.status {
                DeliverableStatus::Done => DeliverableStatus::NotStarted,
                DeliverableStatus::NotStarted | DeliverableStatus::InProgress => {
                    DeliverableStatus::Done
                }
            };
            state.deliverables.insert(key, record);
            state
        }

        Action::FiltersSet(patch) => {
            state.filters.apply(patch);
            state
        }

        Action::FiltersClear => {
            state.filters = Default::default();
            state
        }

        Action::UiToggleStage(stage) => {
            if !state.ui.expanded_stages.remove(&stage) {
                state.ui.expanded_stages.insert(stage);
            }
            state
        }

        Action::UiToggleArea(stage, area) => {
            if !state.ui.expanded_areas.remove(&(stage, area)) {
                state.ui.expanded_areas.insert((stage, area));
            }
            state
        }

        Action::UiTogglePanel(panel) => {
            match panel {
                Panel::Filters => state.ui.show_filters = !state.ui.show_filters,
                Panel::Analytics => state.ui.show_analytics = !state.ui.show_analytics,
            }
            state
        }

        Action::UiSetEditing(item) => {
            state.ui.editing_item = item;
            state
        }

        Action::ResetAll => State::default(),
    }
}
