//! Resolution of finished sessions into the reading log.
//!
//! A stop leaves a [`PendingCompletion`](crate::libs::session::PendingCompletion)
//! in the session manager. Keeping it means building a [`ReadingRecord`] from
//! it, saving that record, and only then confirming the completion. If the
//! record is invalid or cannot be saved the completion stays pending so the
//! user can try again or discard it.

use crate::db::readings::ReadingLog;
use crate::libs::reading::ReadingRecord;
use crate::libs::session::PendingCompletion;
use crate::libs::tracker::SessionManager;
use anyhow::Result;

/// Optional details the user adds to a finished session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub start_page: Option<i64>,
    pub end_page: Option<i64>,
    pub note: Option<String>,
}

/// Saves the pending completion to the log and confirms it.
///
/// Returns `Ok(None)` when nothing is pending.
pub fn keep(manager: &mut SessionManager, log: &ReadingLog, annotations: Annotations) -> Result<Option<ReadingRecord>> {
    let Some(pending) = manager.pending().cloned() else {
        return Ok(None);
    };

    let mut record = ReadingRecord::from_completion(&pending, annotations.start_page, annotations.end_page, annotations.note)?;
    record.id = Some(log.insert(&record)?);
    manager.confirm_id(pending.id);
    Ok(Some(record))
}

/// Drops the pending completion without recording it.
pub fn discard(manager: &mut SessionManager) -> Option<PendingCompletion> {
    manager.discard()
}
