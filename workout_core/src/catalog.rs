//! Default catalog of exercises prescribed each workout.

use crate::types::{Catalog, Exercise};
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog of barbell lifts.
///
/// For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> Catalog {
    let exercise = |id: &str, name: &str| Exercise {
        id: id.into(),
        name: name.into(),
    };

    Catalog {
        exercises: vec![
            exercise("squat", "Back Squat"),
            exercise("bench_press", "Bench Press"),
            exercise("deadlift", "Deadlift"),
            exercise("overhead_press", "Overhead Press"),
            exercise("barbell_row", "Barbell Row"),
        ],
    }
}

impl Catalog {
    /// Validate the catalog, returning human-readable problems.
    ///
    /// An empty result means the catalog is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = std::collections::HashSet::new();

        if self.exercises.is_empty() {
            errors.push("catalog contains no exercises".to_string());
        }

        for exercise in &self.exercises {
            if exercise.id.is_empty() {
                errors.push(format!("exercise '{}' has an empty id", exercise.name));
            }
            if exercise.name.is_empty() {
                errors.push(format!("exercise '{}' has an empty name", exercise.id));
            }
            if !seen.insert(&exercise.id) {
                errors.push(format!("duplicate exercise id '{}'", exercise.id));
            }
        }

        errors
    }

    /// Look up an exercise by id
    pub fn get(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }
}
