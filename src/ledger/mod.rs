//! Ledger core: data model, state transitions, import merge, persistence

pub(crate) mod engine;
pub(crate) mod import;
pub(crate) mod store;
pub(crate) mod types;

pub(crate) use engine::{RecordOutcome, UndoOutcome};
pub(crate) use import::ImportOutcome;
pub(crate) use store::Store;
pub(crate) use types::{Group, UserAccount};
