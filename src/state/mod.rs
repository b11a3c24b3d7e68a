//! Trigger state
//!
//! Persists one watermark per trigger id between polling cycles.
//!
//! # Overview
//!
//! - `State` - serialized `{ "triggers": { "<id>": {...} } }` document
//! - `StateManager` - file-backed persistence with atomic saves

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{State, TriggerState};
