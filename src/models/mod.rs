//! Domain models for the portfolio tracker.
//!
//! # Core Concepts
//!
//! - [`Project`]: A tracked project, owned by the top-level state. Carries its
//!   own lifecycle [`Stage`], [`FuelType`] and grouping label.
//! - [`DeliverableRecord`]: Per-(project, deliverable) progress — owner,
//!   dates, status, comments. Created lazily; absence means
//!   [`DeliverableRecord::EMPTY`].
//! - [`RecordKey`]: Structured composite key for deliverable records. The
//!   legacy `"{project}-{deliverable}"` string appears only at serialization
//!   boundaries.
//! - [`Area`]: The management discipline a catalogue deliverable belongs to.
//!
//! Patch types ([`ProjectPatch`], [`RecordPatch`]) express shallow partial
//! updates; `None` fields leave the target unchanged.

mod area;
mod deliverable;
mod project;

pub use area::*;
pub use deliverable::*;
pub use project::*;
