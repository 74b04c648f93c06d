//! Core domain types for the Liftwave workout tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - The wave-loading cycle position (week / day-type / cycle number)
//! - Logged sets and their outcomes
//! - Workout and cardio sessions
//! - Per-user training state (position + prescribed baselines)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Cycle Types
// ============================================================================

/// Day type within the wave-loading cycle, determining the fraction of the
/// prescribed baseline lifted that day.
///
/// The training order is Heavy → Medium → Light; the week advances when
/// Light wraps back around to Heavy.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Heavy,
    Medium,
    Light,
}

impl DayType {
    /// Next day type in the fixed cyclic order
    pub fn next(self) -> DayType {
        match self {
            DayType::Heavy => DayType::Medium,
            DayType::Medium => DayType::Light,
            DayType::Light => DayType::Heavy,
        }
    }

    /// Position within one week, used for total ordering of positions
    pub fn index(self) -> u8 {
        match self {
            DayType::Heavy => 0,
            DayType::Medium => 1,
            DayType::Light => 2,
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Heavy => write!(f, "Heavy"),
            DayType::Medium => write!(f, "Medium"),
            DayType::Light => write!(f, "Light"),
        }
    }
}

/// Position within the 5-week wave-loading cycle.
///
/// Invariant: `week` is always in 1..=5. Mutated only through
/// [`crate::cycle::advance`]; at most one position exists per user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CyclePosition {
    pub week: u8,
    pub day: DayType,
    pub cycle: u32,
}

impl Default for CyclePosition {
    /// Onboarding position: week 1, Heavy day, first cycle
    fn default() -> Self {
        Self {
            week: 1,
            day: DayType::Heavy,
            cycle: 1,
        }
    }
}

impl std::fmt::Display for CyclePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Week {} • {} Day • Cycle {}", self.week, self.day, self.cycle)
    }
}

/// Derived target for one exercise on one day. Computed on demand from the
/// prescribed baseline and the cycle position; never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExerciseTarget {
    pub weight: f64,
    pub reps: u32,
}

// ============================================================================
// Set and Session Types
// ============================================================================

/// Classification of a logged set against its prescription
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Incomplete,
    Complete,
    Exceeded,
}

impl Outcome {
    /// Whether this outcome counts toward a level-up (met or beat target)
    pub fn met_target(self) -> bool {
        matches!(self, Outcome::Complete | Outcome::Exceeded)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Incomplete => write!(f, "Incomplete"),
            Outcome::Complete => write!(f, "Complete"),
            Outcome::Exceeded => write!(f, "Exceeded"),
        }
    }
}

/// One logged attempt at a prescribed set.
///
/// Immutable once created except for corrective edits, which rewrite the
/// actuals and recompute the outcome.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedSet {
    pub exercise_id: String,
    pub session_id: Uuid,
    pub set_number: u32,
    pub prescribed_weight: f64,
    pub prescribed_reps: u32,
    pub actual_weight: f64,
    pub actual_reps: u32,
    pub outcome: Outcome,
}

/// A workout session: one visit to the gym at a fixed cycle position.
///
/// Owns its sets, ordered by (exercise_id, set_number). Becomes history once
/// finished, but may be reopened for corrective edits; the week/day/cycle
/// identity never changes after creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub week: u8,
    pub day: DayType,
    pub cycle: u32,
    pub date: NaiveDate,
    pub sets: Vec<LoggedSet>,
}

impl WorkoutSession {
    /// Restore the canonical (exercise, set number) ordering after an edit
    pub fn sort_sets(&mut self) {
        self.sets
            .sort_by(|a, b| (&a.exercise_id, a.set_number).cmp(&(&b.exercise_id, b.set_number)));
    }

    /// Next set number for an exercise within this session.
    ///
    /// One past the highest recorded number, not a count: corrective
    /// removals leave gaps, and `(exercise_id, set_number)` must stay
    /// unique so edits address exactly one set.
    pub fn next_set_number(&self, exercise_id: &str) -> u32 {
        self.sets
            .iter()
            .filter(|s| s.exercise_id == exercise_id)
            .map(|s| s.set_number)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// A recorded cardio session. Immutable history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardioSession {
    pub id: Uuid,
    pub date: NaiveDate,
    pub activity: String,
    pub duration_minutes: u32,
    /// True for the weekly 4x4 interval protocol; excluded from the
    /// rolling zone-2 total and tracked on its own cadence.
    pub is_interval: bool,
}

// ============================================================================
// Training State
// ============================================================================

/// Per-user persistent state: the single current cycle position plus the
/// prescribed baseline weight for each exercise.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TrainingState {
    pub position: CyclePosition,
    /// Prescribed baseline per exercise id, in kg. Mutated by manual edits
    /// and by automatic progression.
    pub weights: HashMap<String, f64>,
}

impl TrainingState {
    /// Baseline for an exercise; a never-weighed exercise is 0 kg
    pub fn weight_for(&self, exercise_id: &str) -> f64 {
        self.weights.get(exercise_id).copied().unwrap_or(0.0)
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// An exercise definition (e.g. "Back Squat")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
}

/// The catalog of exercises prescribed each workout
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
}
