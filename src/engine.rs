//! The engine: one state value, memoized derivations, debounced persistence.
//!
//! Single-threaded by construction — actions apply one at a time to
//! completion, and the only asynchronous element is the debounced save task.
//! Multiple independent engines can coexist; nothing here is static.

use std::sync::Arc;

use crate::derive::{self, Analytics, CompletionStats, Item};
use crate::models::Stage;
use crate::state::{reduce, Action, State};
use crate::store::{DebouncedSaver, PersistedState, StateStore, StoreError};

pub struct Engine {
    state: State,
    saver: Option<DebouncedSaver>,
    flat: Option<Vec<Item>>,
    filtered: Option<Vec<Item>>,
}

impl Engine {
    /// Engine over an in-memory state with no persistence.
    pub fn new(state: State) -> Self {
        Self {
            state,
            saver: None,
            flat: None,
            filtered: None,
        }
    }

    /// Load from a store (or start from defaults) and keep saving to it.
    ///
    /// Recoverable load conditions — nothing stored, schema drift, a payload
    /// that no longer parses — fall back to the default state with a warning;
    /// refusing the load outright beats reinterpreting an incompatible shape.
    /// I/O and database failures propagate.
    pub fn boot(store: Arc<dyn StateStore>) -> Result<Self, StoreError> {
        let state = match store.load() {
            Ok(Some(persisted)) => {
                tracing::info!(
                    projects = persisted.projects.len(),
                    records = persisted.deliverables.len(),
                    "loaded stored state"
                );
                persisted.into_state()
            }
            Ok(None) => State::default(),
            Err(err @ StoreError::SchemaMismatch { .. }) => {
                tracing::warn!("ignoring stored state: {err}");
                State::default()
            }
            Err(err @ StoreError::Malformed(_)) => {
                tracing::warn!("ignoring stored state: {err}");
                State::default()
            }
            Err(err) => return Err(err),
        };
        Ok(Self {
            state,
            saver: Some(DebouncedSaver::with_default_delay(store)),
            flat: None,
            filtered: None,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Apply one action: reduce, invalidate exactly the affected caches, and
    /// (for domain or selection changes) schedule a debounced save.
    ///
    /// Save scheduling requires a Tokio runtime when a store is attached.
    pub fn dispatch(&mut self, action: Action) {
        let effects = effects(&action);
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        if effects.domain {
            self.flat = None;
        }
        if effects.domain || effects.filters {
            self.filtered = None;
        }
        if effects.persist {
            if let Some(saver) = &mut self.saver {
                saver.schedule(PersistedState::snapshot(&self.state));
            }
        }
    }

    /// Flattened projects × catalogue items, memoized until a domain change.
    pub fn items(&mut self) -> &[Item] {
        let state = &self.state;
        self.flat.get_or_insert_with(|| derive::flatten(state))
    }

    /// Filtered items, memoized until a domain or filter change.
    pub fn filtered(&mut self) -> &[Item] {
        if self.flat.is_none() {
            self.flat = Some(derive::flatten(&self.state));
        }
        if self.filtered.is_none() {
            let flat = self.flat.as_deref().unwrap_or_default();
            self.filtered = Some(derive::filter_items(flat, &self.state.filters));
        }
        self.filtered.as_deref().unwrap_or_default()
    }

    pub fn analytics(&mut self) -> Analytics {
        derive::analytics(self.filtered())
    }

    pub fn completion(&self, project_id: &str, stage: Option<Stage>) -> CompletionStats {
        derive::completion(&self.state, project_id, stage)
    }

    /// Cancel any pending debounced write and persist the current state now.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(saver) = &mut self.saver {
            saver.flush(&PersistedState::snapshot(&self.state))?;
        }
        Ok(())
    }

    /// Release the debounce timer without writing.
    pub fn shutdown(&mut self) {
        if let Some(saver) = &mut self.saver {
            saver.shutdown();
        }
    }
}

struct ActionEffects {
    /// Projects or deliverable records changed: flatten cache is stale and
    /// the change must be persisted.
    domain: bool,
    /// Filter fields changed: only the filtered cache is stale.
    filters: bool,
    /// The persisted subset (domain + selection) changed.
    persist: bool,
}

fn effects(action: &Action) -> ActionEffects {
    match action {
        Action::LoadData(_)
        | Action::ProjectAdd(_)
        | Action::ProjectDelete(_)
        | Action::ProjectUpdate { .. }
        | Action::DeliverableUpdate { .. }
        | Action::DeliverableToggle(_)
        | Action::ResetAll => ActionEffects {
            domain: true,
            filters: false,
            persist: true,
        },
        Action::ProjectSelect(_) => ActionEffects {
            domain: false,
            filters: false,
            persist: true,
        },
        Action::FiltersSet(_) | Action::FiltersClear => ActionEffects {
            domain: false,
            filters: true,
            persist: false,
        },
        Action::UiToggleStage(_)
        | Action::UiToggleArea(..)
        | Action::UiTogglePanel(_)
        | Action::UiSetEditing(_) => ActionEffects {
            domain: false,
            filters: false,
            persist: false,
        },
    }
}
