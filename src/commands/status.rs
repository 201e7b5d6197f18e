use crate::{
    commands::open_manager,
    libs::{formatter::format_seconds, messages::Message, session::SessionState, tracker::SessionManager},
    msg_info,
};
use anyhow::Result;
use chrono::{DateTime, Utc};

pub fn cmd() -> Result<()> {
    let manager = open_manager()?;
    msg_info!(status_message(&manager, Utc::now()));
    Ok(())
}

/// Describes what the manager is doing at `now`.
pub fn status_message(manager: &SessionManager, now: DateTime<Utc>) -> Message {
    let title = manager.active().map(|session| session.book_title.clone()).unwrap_or_default();
    match manager.state(now) {
        SessionState::Idle => Message::StatusIdle,
        SessionState::Running { elapsed_seconds } => Message::StatusRunning {
            title,
            elapsed: format_seconds(elapsed_seconds),
        },
        SessionState::Paused { elapsed_seconds } => Message::StatusPaused {
            title,
            elapsed: format_seconds(elapsed_seconds),
        },
        SessionState::PendingResolution(pending) => Message::StatusPending {
            title: pending.book_title,
            duration: format_seconds(pending.duration_seconds),
        },
    }
}
