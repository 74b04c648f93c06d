//! Cardio history loading with a date window.
//!
//! This module loads cardio session history from both the WAL and the CSV
//! archive to feed the adherence tracker.

use crate::{CardioSession, Result};
use chrono::{Duration, NaiveDate};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// CSV row format for reading archived sessions
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    date: String,
    activity: String,
    duration_minutes: u32,
    is_interval: bool,
}

impl TryFrom<CsvRow> for CardioSession {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let date = row
            .date
            .parse::<NaiveDate>()
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?;

        Ok(CardioSession {
            id,
            date,
            activity: row.activity,
            duration_minutes: row.duration_minutes,
            is_interval: row.is_interval,
        })
    }
}

/// Load cardio sessions from the last N days from both WAL and CSV
///
/// Returns sessions sorted by date (newest first).
/// Automatically deduplicates sessions that appear in both WAL and CSV.
pub fn load_recent_cardio(
    wal_path: &Path,
    csv_path: &Path,
    now: NaiveDate,
    days: i64,
) -> Result<Vec<CardioSession>> {
    let cutoff = now - Duration::days(days);
    let mut sessions = Vec::new();
    let mut seen_ids = HashSet::new();

    // Load from WAL first (most recent)
    if wal_path.exists() {
        let wal_sessions: Vec<CardioSession> = crate::wal::read_records(wal_path)?;
        for session in wal_sessions {
            if session.date >= cutoff {
                seen_ids.insert(session.id);
                sessions.push(session);
            }
        }
        tracing::debug!("Loaded {} sessions from WAL", sessions.len());
    }

    // Load from CSV (archived)
    if csv_path.exists() {
        let csv_sessions = load_sessions_from_csv(csv_path)?;
        let mut csv_count = 0;
        for session in csv_sessions {
            if session.date >= cutoff && !seen_ids.contains(&session.id) {
                seen_ids.insert(session.id);
                sessions.push(session);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} sessions from CSV", csv_count);
    }

    // Sort by date, newest first
    sessions.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::info!(
        "Loaded {} total cardio sessions from last {} days",
        sessions.len(),
        days
    );

    Ok(sessions)
}

/// Load all sessions from a CSV file
fn load_sessions_from_csv(path: &Path) -> Result<Vec<CardioSession>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut sessions = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match CardioSession::try_from(row) {
                Ok(session) => sessions.push(session),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    // Continue processing other rows
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(sessions)
}
