//! Set evaluation: classify one logged attempt against its prescription.

use crate::Outcome;

/// Classify a logged (weight, reps) pair against its target.
///
/// Total over all inputs, no failure modes:
/// - below target on either axis → [`Outcome::Incomplete`]
/// - meets both exactly → [`Outcome::Complete`]
/// - meets both and strictly beats at least one → [`Outcome::Exceeded`]
///
/// Meeting both targets exactly is Complete, not Exceeded; exceedance
/// requires strict inequality on at least one axis.
pub fn evaluate(
    actual_weight: f64,
    actual_reps: u32,
    target_weight: f64,
    target_reps: u32,
) -> Outcome {
    if actual_reps < target_reps || actual_weight < target_weight {
        return Outcome::Incomplete;
    }

    if actual_reps > target_reps || actual_weight > target_weight {
        Outcome::Exceeded
    } else {
        Outcome::Complete
    }
}
