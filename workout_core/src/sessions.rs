//! Workout session store.
//!
//! Finished sessions live in a JSONL log. Corrective edits replace a
//! session wholesale (its week/day/cycle identity never changes), and
//! destructive removal is a two-phase command: `request_delete` hands back
//! a ticket naming the target, and only `confirm_delete` with that ticket
//! performs it. Rewrites go through a temp file and atomic rename.

use crate::wal::{JsonlSink, RecordSink};
use crate::{Error, Result, WorkoutSession};
use fs2::FileExt;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Confirmation handle for a pending session deletion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteTicket {
    pub token: Uuid,
    pub session_id: Uuid,
}

/// JSONL-backed store for finished workout sessions
pub struct SessionStore {
    path: PathBuf,
    pending_deletes: HashMap<Uuid, Uuid>, // token → session id
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending_deletes: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a finished session to the log.
    ///
    /// Appending an id that is already stored is a no-op, so a finish
    /// interrupted between the append and the state save can be retried
    /// without duplicating the session in history.
    pub fn append(&self, session: &WorkoutSession) -> Result<()> {
        let existing: Vec<WorkoutSession> = crate::wal::read_records(&self.path)?;
        if existing.iter().any(|s| s.id == session.id) {
            tracing::debug!("Session {} already stored, skipping append", session.id);
            return Ok(());
        }

        let mut sink = JsonlSink::new(&self.path);
        sink.append(session)?;
        tracing::debug!("Appended workout session {} to store", session.id);
        Ok(())
    }

    /// All stored sessions, newest first
    pub fn load_all(&self) -> Result<Vec<WorkoutSession>> {
        let mut sessions: Vec<WorkoutSession> = crate::wal::read_records(&self.path)?;
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }

    /// Look up one session by id
    pub fn get(&self, session_id: Uuid) -> Result<WorkoutSession> {
        self.load_all()?
            .into_iter()
            .find(|s| s.id == session_id)
            .ok_or_else(|| Error::Session(format!("no session with id {}", session_id)))
    }

    /// Replace an edited session, keeping its position in history
    pub fn replace(&self, session: &WorkoutSession) -> Result<()> {
        let mut sessions: Vec<WorkoutSession> = crate::wal::read_records(&self.path)?;
        let slot = sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or_else(|| Error::Session(format!("no session with id {}", session.id)))?;
        *slot = session.clone();
        self.rewrite(&sessions)
    }

    /// First phase of deletion: verify the target exists and hand back a
    /// confirmation ticket. Nothing is removed yet.
    pub fn request_delete(&mut self, session_id: Uuid) -> Result<DeleteTicket> {
        // Existence check up front so the ticket cannot name a ghost
        let _ = self.get(session_id)?;

        let token = Uuid::new_v4();
        self.pending_deletes.insert(token, session_id);

        tracing::info!("Delete requested for session {} (token {})", session_id, token);
        Ok(DeleteTicket { token, session_id })
    }

    /// Second phase: perform the deletion named by the ticket. The ticket
    /// is single-use; an unknown or reused token is rejected.
    pub fn confirm_delete(&mut self, ticket: DeleteTicket) -> Result<()> {
        let session_id = self
            .pending_deletes
            .remove(&ticket.token)
            .ok_or_else(|| Error::Session("unknown or already-used delete ticket".into()))?;

        if session_id != ticket.session_id {
            return Err(Error::Session("delete ticket does not match target".into()));
        }

        let mut sessions: Vec<WorkoutSession> = crate::wal::read_records(&self.path)?;
        let before = sessions.len();
        sessions.retain(|s| s.id != session_id);

        if sessions.len() == before {
            return Err(Error::Session(format!("no session with id {}", session_id)));
        }

        self.rewrite(&sessions)?;
        tracing::info!("Deleted workout session {}", session_id);
        Ok(())
    }

    /// Drop a pending delete without performing it
    pub fn cancel_delete(&mut self, ticket: DeleteTicket) {
        self.pending_deletes.remove(&ticket.token);
    }

    /// Re-arm a ticket issued by an earlier process (the CLI persists
    /// pending tickets between the request and the confirmation)
    pub fn restore_pending(&mut self, ticket: DeleteTicket) {
        self.pending_deletes.insert(ticket.token, ticket.session_id);
    }

    /// Rewrite the whole log atomically (temp file + rename)
    fn rewrite(&self, sessions: &[WorkoutSession]) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            for session in sessions {
                let line = serde_json::to_string(session)?;
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}
