//! Deliverable tracking for alternative-fuels project portfolios.
//!
//! Every project works through the same fixed [`catalogue`] of deliverables
//! across five lifecycle stages. The crate is built around a small state
//! engine:
//!
//! - [`state`]: the [`State`](state::State) value, the [`Action`](state::Action)
//!   vocabulary and the pure reducer — the single mutation path.
//! - [`derive`]: pure derived views (flatten, filter, completion, analytics).
//! - [`store`]: swappable durable stores behind one trait, with debounced
//!   writes.
//! - [`exchange`]: JSON import/export and CSV export.
//! - [`engine`]: ties the above together with memoized derivations.
//!
//! Presentation layers (the `ffl` CLI here, or anything else) consume derived
//! views and emit actions; they never mutate state directly.

pub mod catalogue;
pub mod derive;
pub mod engine;
pub mod exchange;
pub mod models;
pub mod state;
pub mod store;
