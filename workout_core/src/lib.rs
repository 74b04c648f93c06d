#![forbid(unsafe_code)]

//! Core domain model and business logic for the Liftwave workout tracker.
//!
//! This crate provides:
//! - Domain types (cycle positions, sets, sessions, cardio records)
//! - The wave-loading cycle clock and set evaluator
//! - Automatic weight progression ("level up")
//! - Cardio adherence tracking (zone 2 minutes, interval cadence)
//! - Persistence (WAL, CSV, state) and the session store

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod cycle;
pub mod sets;
pub mod progression;
pub mod cardio;
pub mod engine;
pub mod wal;
pub mod csv_rollup;
pub mod state;
pub mod history;
pub mod sessions;
pub mod weights;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use cycle::{advance, reps_for_week, round_quarter, target_weight, weight_multiplier};
pub use sets::evaluate;
pub use progression::{check_level_up, is_level_up_eligible, is_level_up_window, SessionProgress};
pub use cardio::{cardio_adherence, CardioAdherence};
pub use engine::{
    start_session, targets_for, weekly_session_count, ActiveSession, LevelUp, PlannedSet,
};
pub use wal::{JsonlSink, RecordSink};
pub use history::load_recent_cardio;
pub use sessions::{DeleteTicket, SessionStore};
pub use weights::WeightWriter;
