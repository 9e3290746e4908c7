//! Durable persistence for the portfolio state.
//!
//! The engine only talks to the [`StateStore`] trait, so the medium is
//! swappable: a JSON file, an embedded SQLite database, or memory. All media
//! hold one versioned [`PersistedState`] payload; writes replace it wholesale
//! (last write wins, including across processes — accepted limitation).

mod debounce;

pub use debounce::DebouncedSaver;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DeliverableRecord, Project, RecordKey};
use crate::state::State;

/// Version stamped into every persisted payload and export.
pub const SCHEMA_VERSION: u32 = 1;

/// The durable snapshot of domain state.
///
/// Filters and UI state are deliberately absent — they are view-side
/// convenience, not domain truth. Selection is kept so a session reopens
/// where it left off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub schema_version: u32,
    pub projects: Vec<Project>,
    pub deliverables: BTreeMap<RecordKey, DeliverableRecord>,
    pub selected_project_id: Option<String>,
    pub last_saved: DateTime<Utc>,
}

impl PersistedState {
    /// Capture the persistable subset of a state, stamped with the current
    /// schema version and time.
    pub fn snapshot(state: &State) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            projects: state.projects.clone(),
            deliverables: state.deliverables.clone(),
            selected_project_id: state.selected_project_id.clone(),
            last_saved: Utc::now(),
        }
    }

    /// Rebuild a live state. Filters and UI start at defaults; a selection
    /// that no longer names an existing project is dropped.
    pub fn into_state(self) -> State {
        let selected_project_id = self
            .selected_project_id
            .filter(|id| self.projects.iter().any(|p| &p.id == id));
        State {
            projects: self.projects,
            deliverables: self.deliverables,
            selected_project_id,
            ..State::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access state store: {0}")]
    Io(#[from] std::io::Error),
    #[error("state database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored state is not valid: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored schema version {found} does not match expected {expected}")]
    SchemaMismatch { found: u32, expected: u32 },
    #[error("could not determine data directory")]
    NoDataDir,
}

/// A durable slot holding at most one [`PersistedState`].
pub trait StateStore: Send + Sync {
    /// Read the stored payload. `Ok(None)` means nothing stored yet;
    /// a schema mismatch or malformed payload is an error for the caller
    /// to decide on.
    fn load(&self) -> Result<Option<PersistedState>, StoreError>;

    /// Replace the stored payload.
    fn save(&self, snapshot: &PersistedState) -> Result<(), StoreError>;
}

/// Decode a payload, rejecting schema drift before interpreting the shape.
fn decode(raw: &str) -> Result<PersistedState, StoreError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let found = value
        .get("schemaVersion")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;
    if found != SCHEMA_VERSION {
        return Err(StoreError::SchemaMismatch {
            found,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// JSON file on disk, one payload per file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs =
            directories::ProjectDirs::from("", "", "fuelfolio").ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("portfolio.json")))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<PersistedState>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode(&raw).map(Some)
    }

    fn save(&self, snapshot: &PersistedState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(snapshot)?;
        // Write-then-rename so a crash mid-write never truncates the slot.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Embedded SQLite key-value slot.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

const STATE_SLOT: &str = "current";

impl SqliteStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let parent = path.parent().ok_or_else(|| {
            StoreError::Io(std::io::Error::other("store path has no parent directory"))
        })?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn)
    }

    pub fn open_default() -> Result<Self, StoreError> {
        let dirs =
            directories::ProjectDirs::from("", "", "fuelfolio").ok_or(StoreError::NoDataDir)?;
        Self::open(dirs.data_dir().join("portfolio.db"))
    }

    pub fn open_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS portfolio_state (
                slot TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                saved_at TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl StateStore for SqliteStore {
    fn load(&self) -> Result<Option<PersistedState>, StoreError> {
        let conn = self.conn.lock().expect("state store lock poisoned");
        let mut stmt = conn.prepare("SELECT payload FROM portfolio_state WHERE slot = ?")?;
        let mut rows = stmt.query([STATE_SLOT])?;
        match rows.next()? {
            Some(row) => {
                let raw: String = row.get(0)?;
                decode(&raw).map(Some)
            }
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &PersistedState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(snapshot)?;
        let conn = self.conn.lock().expect("state store lock poisoned");
        conn.execute(
            "INSERT INTO portfolio_state (slot, payload, saved_at) VALUES (?, ?, ?)
             ON CONFLICT(slot) DO UPDATE SET payload = excluded.payload, saved_at = excluded.saved_at",
            (STATE_SLOT, &raw, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }
}

/// In-memory slot for tests and ephemeral sessions. Records every save so
/// tests can assert on write coalescing.
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Vec<PersistedState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().expect("state store lock poisoned").len()
    }

    pub fn last(&self) -> Option<PersistedState> {
        self.saved
            .lock()
            .expect("state store lock poisoned")
            .last()
            .cloned()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedState>, StoreError> {
        Ok(self.last())
    }

    fn save(&self, snapshot: &PersistedState) -> Result<(), StoreError> {
        self.saved
            .lock()
            .expect("state store lock poisoned")
            .push(snapshot.clone());
        Ok(())
    }
}
