//! Write-coalescing for prescribed-weight edits.
//!
//! Rapid edits to baseline weights (a user scrubbing a number field) are
//! coalesced in memory and written to the state file once the debounce
//! window closes, last write wins. The window comes from
//! `[storage] weight_debounce_ms` in the config. Callers must `flush`
//! before exiting; pending edits are plain values, nothing is lost on an
//! early flush.

use crate::{Result, TrainingState};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Coalescing writer for baseline-weight updates
pub struct WeightWriter {
    state_path: PathBuf,
    debounce: Duration,
    pending: HashMap<String, f64>,
    window_opened_at: Option<Instant>,
}

impl WeightWriter {
    pub fn new(state_path: impl Into<PathBuf>, debounce_ms: u64) -> Self {
        Self {
            state_path: state_path.into(),
            debounce: Duration::from_millis(debounce_ms),
            pending: HashMap::new(),
            window_opened_at: None,
        }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Stage a weight edit. Repeated edits to the same exercise within the
    /// window collapse to the latest value.
    pub fn set(&mut self, exercise_id: &str, weight: f64) {
        self.pending.insert(exercise_id.to_string(), weight);
        if self.window_opened_at.is_none() {
            self.window_opened_at = Some(Instant::now());
        }
        tracing::debug!("Staged weight {} kg for {}", weight, exercise_id);
    }

    /// Number of staged, unwritten edits
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Flush if the debounce window has elapsed. Returns whether a write
    /// happened.
    pub fn tick(&mut self) -> Result<bool> {
        match self.window_opened_at {
            Some(opened) if opened.elapsed() >= self.debounce => {
                self.flush()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Write all staged edits to the state file now
    pub fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let pending = std::mem::take(&mut self.pending);
        self.window_opened_at = None;

        let count = pending.len();
        TrainingState::update(&self.state_path, |state| {
            for (exercise_id, weight) in pending {
                state.weights.insert(exercise_id, weight);
            }
            Ok(())
        })?;

        tracing::debug!("Flushed {} coalesced weight edits", count);
        Ok(())
    }
}
