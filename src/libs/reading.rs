//! Permanent reading records built from confirmed completions.

use crate::libs::session::{BookId, PendingCompletion};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Page numbers cannot be negative (got {0})")]
    NegativePage(i64),
    #[error("End page {end} is before start page {start}")]
    PageRange { start: i64, end: i64 },
}

/// Checks page annotations before they are attached to a record.
pub fn validate_pages(start_page: Option<i64>, end_page: Option<i64>) -> Result<(), RecordError> {
    for page in [start_page, end_page].into_iter().flatten() {
        if page < 0 {
            return Err(RecordError::NegativePage(page));
        }
    }
    if let (Some(start), Some(end)) = (start_page, end_page) {
        if end < start {
            return Err(RecordError::PageRange { start, end });
        }
    }
    Ok(())
}

/// A reading session the user chose to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRecord {
    pub id: Option<i64>,
    /// Id of the completion this record was confirmed from.
    pub completion_id: Uuid,
    pub book_id: BookId,
    pub book_title: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: i64,
    pub was_auto_stopped: bool,
    pub start_page: Option<i64>,
    pub end_page: Option<i64>,
    pub note: Option<String>,
}

impl ReadingRecord {
    /// Builds a record from a completion plus the annotations the user supplied.
    pub fn from_completion(
        completion: &PendingCompletion,
        start_page: Option<i64>,
        end_page: Option<i64>,
        note: Option<String>,
    ) -> Result<Self, RecordError> {
        validate_pages(start_page, end_page)?;

        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Ok(ReadingRecord {
            id: None,
            completion_id: completion.id,
            book_id: completion.book_id.clone(),
            book_title: completion.book_title.clone(),
            started_at: completion.started_at,
            ended_at: completion.ended_at.max(completion.started_at),
            duration_seconds: completion.duration_seconds.max(0),
            was_auto_stopped: completion.was_auto_stopped,
            start_page,
            end_page,
            note,
        })
    }

    /// Pages covered, when both ends are known.
    pub fn pages_read(&self) -> Option<i64> {
        match (self.start_page, self.end_page) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
