//! The cycle clock: pure mapping between a cycle position and training
//! targets, plus the step function that drives the 5-week wave.
//!
//! The rep table and day-type multipliers are fixed domain rules. They are
//! deliberately constants here, not configuration.

use crate::{CyclePosition, DayType, Error, Result};

/// Rep target per week of the wave, weeks 1..=5
const REPS_BY_WEEK: [u32; 5] = [8, 6, 4, 3, 2];

/// Number of weeks in one full cycle
pub const WEEKS_PER_CYCLE: u8 = 5;

fn check_week(week: u8) -> Result<()> {
    if (1..=WEEKS_PER_CYCLE).contains(&week) {
        Ok(())
    } else {
        Err(Error::InvalidState(format!(
            "week {} outside 1..={}",
            week, WEEKS_PER_CYCLE
        )))
    }
}

/// Rep target for a given week of the wave.
///
/// A week outside 1..=5 is a caller bug and fails fast.
pub fn reps_for_week(week: u8) -> Result<u32> {
    check_week(week)?;
    Ok(REPS_BY_WEEK[(week - 1) as usize])
}

/// Fraction of the prescribed baseline lifted on a given day type
pub fn weight_multiplier(day: DayType) -> f64 {
    match day {
        DayType::Heavy => 1.0,
        DayType::Medium => 0.85,
        DayType::Light => 0.70,
    }
}

/// Round a weight to the nearest quarter unit (0.25 kg), half up.
///
/// Idempotent: rounding an already-rounded value is a no-op.
pub fn round_quarter(x: f64) -> f64 {
    (x * 4.0 + 0.5).floor() / 4.0
}

/// Working weight for a day: baseline × day multiplier, rounded to 0.25
pub fn target_weight(prescribed_weight: f64, day: DayType) -> f64 {
    round_quarter(prescribed_weight * weight_multiplier(day))
}

/// Step the cycle position to the next workout.
///
/// Day types cycle Heavy → Medium → Light; when Light wraps back to Heavy
/// the week increments, and past week 5 the week resets and the cycle
/// number increments. The total order over (cycle, week, day) strictly
/// increases under repeated advancement.
pub fn advance(position: CyclePosition) -> Result<CyclePosition> {
    check_week(position.week)?;

    let day = position.day.next();
    let mut week = position.week;
    let mut cycle = position.cycle;

    if day == DayType::Heavy {
        // Completed a Light day: the week is done
        week += 1;
        if week > WEEKS_PER_CYCLE {
            week = 1;
            cycle += 1;
            tracing::info!("Cycle {} complete, starting cycle {}", position.cycle, cycle);
        }
    }

    Ok(CyclePosition { week, day, cycle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reps_strictly_decrease_across_wave() {
        // Heavier weeks prescribe fewer reps
        let reps: Vec<u32> = (1..=5).map(|w| reps_for_week(w).unwrap()).collect();
        assert_eq!(reps, vec![8, 6, 4, 3, 2]);
        for pair in reps.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_reps_for_week_rejects_out_of_range() {
        assert!(matches!(reps_for_week(0), Err(Error::InvalidState(_))));
        assert!(matches!(reps_for_week(6), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(weight_multiplier(DayType::Heavy), 1.0);
        assert_eq!(weight_multiplier(DayType::Medium), 0.85);
        assert_eq!(weight_multiplier(DayType::Light), 0.70);
    }

    #[test]
    fn test_target_weight_rounds_to_quarter() {
        assert_eq!(target_weight(100.0, DayType::Heavy), 100.0);
        assert_eq!(target_weight(100.0, DayType::Medium), 85.0);
        assert_eq!(target_weight(100.0, DayType::Light), 70.0);
        // 102.5 * 0.85 = 87.125 → 87.25 (half rounds up)
        assert_eq!(target_weight(102.5, DayType::Medium), 87.25);
    }

    #[test]
    fn test_round_quarter_idempotent() {
        for i in 0..2000 {
            let x = i as f64 * 0.137;
            let once = round_quarter(x);
            assert_eq!(round_quarter(once), once, "not idempotent at {}", x);
        }
    }

    #[test]
    fn test_round_quarter_half_up() {
        assert_eq!(round_quarter(87.125), 87.25);
        assert_eq!(round_quarter(87.124), 87.0);
    }

    #[test]
    fn test_advance_steps_days_then_weeks() {
        let pos = CyclePosition::default();
        let pos = advance(pos).unwrap();
        assert_eq!((pos.week, pos.day), (1, DayType::Medium));
        let pos = advance(pos).unwrap();
        assert_eq!((pos.week, pos.day), (1, DayType::Light));
        let pos = advance(pos).unwrap();
        assert_eq!((pos.week, pos.day), (2, DayType::Heavy));
        assert_eq!(pos.cycle, 1);
    }

    #[test]
    fn test_fifteen_advances_complete_one_cycle() {
        let mut pos = CyclePosition::default();
        for _ in 0..15 {
            pos = advance(pos).unwrap();
        }
        assert_eq!(
            pos,
            CyclePosition {
                week: 1,
                day: DayType::Heavy,
                cycle: 2
            }
        );
    }

    #[test]
    fn test_advance_strictly_increases() {
        let mut pos = CyclePosition::default();
        let mut last = (pos.cycle, pos.week, pos.day.index());
        for _ in 0..45 {
            pos = advance(pos).unwrap();
            let key = (pos.cycle, pos.week, pos.day.index());
            assert!(key > last, "order violated: {:?} !> {:?}", key, last);
            last = key;
        }
    }

    #[test]
    fn test_advance_rejects_corrupt_week() {
        let pos = CyclePosition {
            week: 9,
            day: DayType::Heavy,
            cycle: 1,
        };
        assert!(matches!(advance(pos), Err(Error::InvalidState(_))));
    }
}
