//! Automatic weight progression ("level up").
//!
//! On the last Heavy day of a cycle (week 5), meeting or exceeding the
//! target on both working sets of an exercise raises its prescribed
//! baseline by 10%, rounded to the nearest 0.25 kg. The raise fires at
//! most once per exercise per session.

use crate::{cycle, CyclePosition, DayType, Outcome};
use std::collections::{HashMap, HashSet};

/// Number of met-or-exceeded sets required to trigger a level up
const SETS_REQUIRED: usize = 2;

/// Factor applied to the baseline when a level up fires
const LEVEL_UP_FACTOR: f64 = 1.10;

/// Whether progression is evaluated at this position at all.
///
/// Outside the window (week 5, Heavy day) logging sets never changes a
/// prescribed weight.
pub fn is_level_up_window(position: &CyclePosition) -> bool {
    position.week == 5 && position.day == DayType::Heavy
}

/// Read-only eligibility check for the same rule `check_level_up` fires on.
/// Usable for highlighting without touching progression state.
pub fn is_level_up_eligible(outcomes: &[Outcome]) -> bool {
    outcomes.iter().filter(|o| o.met_target()).count() >= SETS_REQUIRED
}

/// Per-session progression tracker.
///
/// Accumulates the outcomes logged for each exercise this session and
/// remembers which exercises have already leveled, so a re-check after the
/// raise cannot fire a second time. The caller must serialize concurrent
/// set submissions for the same exercise (the check-and-set here reads the
/// outcome list it is handed).
#[derive(Clone, Debug, Default)]
pub struct SessionProgress {
    outcomes: HashMap<String, Vec<Outcome>>,
    leveled: HashSet<String>,
}

impl SessionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one logged outcome for an exercise
    pub fn record(&mut self, exercise_id: &str, outcome: Outcome) {
        self.outcomes
            .entry(exercise_id.to_string())
            .or_default()
            .push(outcome);
    }

    /// Replace the outcomes for an exercise after a corrective edit
    pub fn reset(&mut self, exercise_id: &str, outcomes: Vec<Outcome>) {
        self.outcomes.insert(exercise_id.to_string(), outcomes);
    }

    /// Outcomes logged so far for an exercise
    pub fn outcomes_for(&self, exercise_id: &str) -> &[Outcome] {
        self.outcomes
            .get(exercise_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether this exercise has already leveled up this session
    pub fn has_leveled(&self, exercise_id: &str) -> bool {
        self.leveled.contains(exercise_id)
    }

    /// Exercises that already leveled this session, for persisting an
    /// in-progress session across invocations
    pub fn leveled_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.leveled.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub(crate) fn mark_leveled(&mut self, exercise_id: &str) {
        self.leveled.insert(exercise_id.to_string());
    }
}

/// Decide whether an automatic weight increase fires for an exercise.
///
/// Counts the outcomes recorded this session; at `SETS_REQUIRED` or more
/// met-or-exceeded sets, returns the new baseline
/// (`round_quarter(current × 1.10)`) and marks the exercise leveled so a
/// repeat call is a no-op. A missing baseline is 0 kg, which progresses to
/// 0 kg; that is a legitimate new-exercise case, not an error.
pub fn check_level_up(
    exercise_id: &str,
    current_weight: f64,
    progress: &mut SessionProgress,
) -> Option<f64> {
    if progress.has_leveled(exercise_id) {
        return None;
    }

    if !is_level_up_eligible(progress.outcomes_for(exercise_id)) {
        return None;
    }

    progress.mark_leveled(exercise_id);
    let new_weight = cycle::round_quarter(current_weight * LEVEL_UP_FACTOR);

    tracing::info!(
        "Level up for {}: {} kg → {} kg",
        exercise_id,
        current_weight,
        new_weight
    );

    Some(new_weight)
}
