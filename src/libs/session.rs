//! Reading session data types.
//!
//! An [`ActiveSession`] is the in-flight session the user is timing. Stopping
//! it produces a [`PendingCompletion`], an immutable candidate log entry that
//! stays unresolved until the user confirms or discards it.

use crate::libs::duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identifier of a book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        BookId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        BookId::new(id)
    }
}

/// The single in-progress, possibly paused, reading session.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub book_id: BookId,
    /// Title captured when the session started; never re-fetched.
    pub book_title: String,
    pub started_at: DateTime<Utc>,
    /// Start of the currently open segment.
    pub last_resumed_at: DateTime<Utc>,
    /// Seconds banked from segments closed by a pause or stop.
    pub accumulated_seconds: i64,
    pub is_paused: bool,
    /// Present iff `is_paused`.
    pub paused_at: Option<DateTime<Utc>>,
}

impl ActiveSession {
    pub fn new(book_id: BookId, book_title: impl Into<String>, now: DateTime<Utc>) -> Self {
        ActiveSession {
            book_id,
            book_title: book_title.into(),
            started_at: now,
            last_resumed_at: now,
            accumulated_seconds: 0,
            is_paused: false,
            paused_at: None,
        }
    }

    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        let open_segment = if self.is_paused { None } else { Some(self.last_resumed_at) };
        duration::elapsed_seconds(self.accumulated_seconds, open_segment, now)
    }

    /// Closes the open segment into the bank. Returns `false` if already paused.
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_paused {
            return false;
        }
        self.accumulated_seconds += duration::clamped_seconds(self.last_resumed_at, now);
        self.is_paused = true;
        self.paused_at = Some(now);
        true
    }

    /// Opens a new segment at `now`. Returns `false` if not paused.
    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_paused {
            return false;
        }
        self.is_paused = false;
        self.paused_at = None;
        self.last_resumed_at = now;
        true
    }

    /// The instant a stop requested at `now` actually ends the session.
    ///
    /// A paused session ends where it was paused, so time between the pause
    /// and the stop request is not counted.
    pub fn end_instant(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match (self.is_paused, self.paused_at) {
            (true, Some(paused_at)) => paused_at,
            _ => now,
        }
    }

    /// Consumes the session into the snapshot awaiting confirmation.
    pub fn complete(self, now: DateTime<Utc>, was_auto_stopped: bool, auto_stop_minutes: Option<i64>) -> PendingCompletion {
        let ended_at = self.end_instant(now);
        let duration_seconds = self.elapsed_seconds(ended_at);
        PendingCompletion {
            id: Uuid::new_v4(),
            book_id: self.book_id,
            book_title: self.book_title,
            started_at: self.started_at,
            ended_at,
            duration_seconds,
            was_auto_stopped,
            auto_stop_minutes: if was_auto_stopped { auto_stop_minutes } else { None },
        }
    }
}

/// An unconfirmed candidate log entry produced by exactly one stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCompletion {
    /// Distinguishes this confirmation dialog from stale ones.
    pub id: Uuid,
    pub book_id: BookId,
    pub book_title: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: i64,
    pub was_auto_stopped: bool,
    /// Threshold in effect when auto-stopped; `None` for manual stops.
    pub auto_stop_minutes: Option<i64>,
}

/// Snapshot delivered to observers after every committed transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Running { elapsed_seconds: i64 },
    Paused { elapsed_seconds: i64 },
    PendingResolution(PendingCompletion),
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }
}
