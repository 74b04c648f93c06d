//! Session orchestration.
//!
//! The caller owns the single current [`TrainingState`] and, while a
//! workout is underway, one [`ActiveSession`]. Both are explicit values
//! threaded through these calls; the engine holds no hidden state and
//! performs no I/O. Within one session the caller must serialize set
//! submissions for the same exercise so the at-most-one level-up guarantee
//! holds.

use crate::{
    cycle, progression, sets, Catalog, CyclePosition, ExerciseTarget, LoggedSet, Outcome, Result,
    SessionProgress, TrainingState, WorkoutSession,
};
use chrono::NaiveDate;
use uuid::Uuid;

/// An automatic baseline increase that fired while logging a set
#[derive(Clone, Debug, PartialEq)]
pub struct LevelUp {
    pub exercise_id: String,
    pub new_weight: f64,
}

/// Targets for one exercise at a cycle position
pub fn targets_for(position: &CyclePosition, prescribed_weight: f64) -> Result<ExerciseTarget> {
    Ok(ExerciseTarget {
        weight: cycle::target_weight(prescribed_weight, position.day),
        reps: cycle::reps_for_week(position.week)?,
    })
}

/// A planned set: prescription shown to the user before anything is logged
#[derive(Clone, Debug)]
pub struct PlannedSet {
    pub exercise_id: String,
    pub exercise_name: String,
    pub set_number: u32,
    pub target: ExerciseTarget,
}

/// Number of prescribed working sets per exercise per session
pub const SETS_PER_EXERCISE: u32 = 2;

/// A workout in progress: the session record plus the per-session
/// progression tracker.
#[derive(Clone, Debug)]
pub struct ActiveSession {
    pub session: WorkoutSession,
    progress: SessionProgress,
    plan: Vec<PlannedSet>,
}

/// Begin a workout at the given position, planning two working sets per
/// catalog exercise at today's targets.
pub fn start_session(
    catalog: &Catalog,
    state: &TrainingState,
    position: &CyclePosition,
    date: NaiveDate,
) -> Result<ActiveSession> {
    let mut plan = Vec::new();
    for exercise in &catalog.exercises {
        let target = targets_for(position, state.weight_for(&exercise.id))?;
        for set_number in 1..=SETS_PER_EXERCISE {
            plan.push(PlannedSet {
                exercise_id: exercise.id.clone(),
                exercise_name: exercise.name.clone(),
                set_number,
                target,
            });
        }
    }

    let session = WorkoutSession {
        id: Uuid::new_v4(),
        week: position.week,
        day: position.day,
        cycle: position.cycle,
        date,
        sets: Vec::new(),
    };

    tracing::info!("Started session {} at {}", session.id, position);

    Ok(ActiveSession {
        session,
        progress: SessionProgress::new(),
        plan,
    })
}

impl ActiveSession {
    /// Reopen a finished session for corrective editing.
    ///
    /// The session keeps its week/day/cycle identity; the progression
    /// tracker is rebuilt from the recorded outcomes, with already-raised
    /// exercises left to the caller's stored weights (re-logging during an
    /// edit can still level up an exercise that never fired).
    pub fn reopen(catalog: &Catalog, state: &TrainingState, session: WorkoutSession) -> Result<Self> {
        let position = CyclePosition {
            week: session.week,
            day: session.day,
            cycle: session.cycle,
        };

        let mut plan = Vec::new();
        for exercise in &catalog.exercises {
            let target = targets_for(&position, state.weight_for(&exercise.id))?;
            for set_number in 1..=SETS_PER_EXERCISE {
                plan.push(PlannedSet {
                    exercise_id: exercise.id.clone(),
                    exercise_name: exercise.name.clone(),
                    set_number,
                    target,
                });
            }
        }

        let mut progress = SessionProgress::new();
        for set in &session.sets {
            progress.record(&set.exercise_id, set.outcome);
        }

        Ok(ActiveSession {
            session,
            progress,
            plan,
        })
    }

    /// The prescription for this session
    pub fn plan(&self) -> &[PlannedSet] {
        &self.plan
    }

    fn position(&self) -> CyclePosition {
        CyclePosition {
            week: self.session.week,
            day: self.session.day,
            cycle: self.session.cycle,
        }
    }

    /// Log one set against its prescription.
    ///
    /// Evaluates the attempt, appends it to the session, and (inside the
    /// level-up window only) runs the progression check, applying any
    /// baseline raise to `state` in the same call so the check-and-set is
    /// atomic with the outcomes it read.
    pub fn log_set(
        &mut self,
        state: &mut TrainingState,
        exercise_id: &str,
        actual_weight: f64,
        actual_reps: u32,
    ) -> Result<(Outcome, Option<LevelUp>)> {
        let position = self.position();
        let target = targets_for(&position, state.weight_for(exercise_id))?;
        let outcome = sets::evaluate(actual_weight, actual_reps, target.weight, target.reps);

        let set = LoggedSet {
            exercise_id: exercise_id.to_string(),
            session_id: self.session.id,
            set_number: self.session.next_set_number(exercise_id),
            prescribed_weight: target.weight,
            prescribed_reps: target.reps,
            actual_weight,
            actual_reps,
            outcome,
        };
        self.session.sets.push(set);
        self.session.sort_sets();
        self.progress.record(exercise_id, outcome);

        tracing::debug!(
            "Logged {} set: {} kg × {} → {}",
            exercise_id,
            actual_weight,
            actual_reps,
            outcome
        );

        let level_up = if progression::is_level_up_window(&position) {
            progression::check_level_up(
                exercise_id,
                state.weight_for(exercise_id),
                &mut self.progress,
            )
            .map(|new_weight| {
                state.weights.insert(exercise_id.to_string(), new_weight);
                LevelUp {
                    exercise_id: exercise_id.to_string(),
                    new_weight,
                }
            })
        } else {
            None
        };

        Ok((outcome, level_up))
    }

    /// Exercises already raised this session, for persisting an
    /// in-progress session across invocations
    pub fn leveled_exercises(&self) -> Vec<String> {
        self.progress.leveled_ids()
    }

    /// Re-arm the at-most-once guard when resuming a persisted session
    pub fn restore_leveled(&mut self, exercise_ids: &[String]) {
        for id in exercise_ids {
            self.progress.mark_leveled(id);
        }
    }

    /// Whether an exercise currently qualifies for a level up (display only)
    pub fn is_level_up_eligible(&self, exercise_id: &str) -> bool {
        progression::is_level_up_window(&self.position())
            && progression::is_level_up_eligible(self.progress.outcomes_for(exercise_id))
    }

    /// Corrective edit: rewrite the actuals of a recorded set and recompute
    /// its outcome. The per-exercise outcome list is rebuilt so eligibility
    /// reflects the corrected record.
    pub fn edit_set(
        &mut self,
        exercise_id: &str,
        set_number: u32,
        actual_weight: f64,
        actual_reps: u32,
    ) -> Result<Outcome> {
        let set = self
            .session
            .sets
            .iter_mut()
            .find(|s| s.exercise_id == exercise_id && s.set_number == set_number)
            .ok_or_else(|| {
                crate::Error::Session(format!("no set {} for {}", set_number, exercise_id))
            })?;

        set.actual_weight = actual_weight;
        set.actual_reps = actual_reps;
        set.outcome =
            sets::evaluate(actual_weight, actual_reps, set.prescribed_weight, set.prescribed_reps);
        let outcome = set.outcome;

        self.rebuild_progress_for(exercise_id);
        Ok(outcome)
    }

    /// Corrective edit: remove a recorded set
    pub fn remove_set(&mut self, exercise_id: &str, set_number: u32) -> Result<()> {
        let before = self.session.sets.len();
        self.session
            .sets
            .retain(|s| !(s.exercise_id == exercise_id && s.set_number == set_number));

        if self.session.sets.len() == before {
            return Err(crate::Error::Session(format!(
                "no set {} for {}",
                set_number, exercise_id
            )));
        }

        self.rebuild_progress_for(exercise_id);
        Ok(())
    }

    fn rebuild_progress_for(&mut self, exercise_id: &str) {
        let outcomes: Vec<Outcome> = self
            .session
            .sets
            .iter()
            .filter(|s| s.exercise_id == exercise_id)
            .map(|s| s.outcome)
            .collect();
        self.progress.reset(exercise_id, outcomes);
    }

    /// Finish the workout: advance the cycle position in `state` and hand
    /// the completed session back for persistence. Reopened sessions do
    /// not advance the clock a second time.
    pub fn finish(self, state: &mut TrainingState, advance_clock: bool) -> Result<WorkoutSession> {
        if advance_clock {
            state.position = cycle::advance(state.position)?;
            tracing::info!("Session finished; next workout is {}", state.position);
        }
        Ok(self.session)
    }
}

/// Strength sessions recorded in the calendar week containing `now`
/// (Sunday-anchored, matching the cardio cadence).
pub fn weekly_session_count(now: NaiveDate, sessions: &[WorkoutSession]) -> usize {
    use chrono::{Datelike, Duration};
    let week_start = now - Duration::days(now.weekday().num_days_from_sunday() as i64);
    sessions
        .iter()
        .filter(|s| s.date >= week_start && s.date <= now)
        .count()
}
