//! Long-running session host.
//!
//! Keeps one session manager in memory and feeds it one command per input
//! line: session actions typed by the user, and lifecycle phases pushed by
//! whatever embeds readlog (`active`, `inactive`, `background`). Finished
//! sessions stay pending here until `confirm` or `discard` arrives, exactly
//! as they would behind a confirmation dialog.

use crate::{
    commands::{open_manager, status::status_message, stop::print_summary},
    db::readings::ReadingLog,
    libs::{
        config::StoredSettings,
        formatter::format_seconds,
        handoff::{self, Annotations},
        lifecycle::{LifecyclePhase, SettingsProvider},
        messages::Message,
        session::{BookId, PendingCompletion, SessionState},
        tracker::SessionManager,
    },
    msg_debug, msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::{self, BufRead};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Start { book_id: BookId, title: String },
    Pause,
    Resume,
    Stop,
    Confirm,
    Discard,
    Status,
    Phase(LifecyclePhase),
    Help,
    Quit,
}

impl FromStr for WatchCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(line.to_string());
        };
        let command = match head.to_ascii_lowercase().as_str() {
            "start" => {
                let book_id = parts.next().ok_or_else(|| line.to_string())?;
                let title = parts.collect::<Vec<_>>().join(" ");
                if title.is_empty() {
                    return Err(line.to_string());
                }
                WatchCommand::Start {
                    book_id: BookId::new(book_id),
                    title,
                }
            }
            "pause" => WatchCommand::Pause,
            "resume" => WatchCommand::Resume,
            "stop" => WatchCommand::Stop,
            "confirm" => WatchCommand::Confirm,
            "discard" => WatchCommand::Discard,
            "status" => WatchCommand::Status,
            "help" => WatchCommand::Help,
            "quit" | "exit" => WatchCommand::Quit,
            phase => WatchCommand::Phase(LifecyclePhase::from_str(phase).map_err(|_| line.to_string())?),
        };
        Ok(command)
    }
}

pub fn cmd() -> Result<()> {
    let mut manager = open_manager()?;
    manager.subscribe(|state: &SessionState| msg_debug!(format!("{:?}", state)));
    let log = ReadingLog::new()?;

    msg_info!(Message::WatchStarted);
    run(&mut manager, &log, io::stdin().lock(), &StoredSettings, Utc::now)?;
    msg_info!(Message::WatchStopped);
    Ok(())
}

/// Processes input lines until `quit` or end of input.
pub fn run<R, C>(manager: &mut SessionManager, log: &ReadingLog, input: R, settings: &dyn SettingsProvider, mut clock: C) -> Result<()>
where
    R: BufRead,
    C: FnMut() -> DateTime<Utc>,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<WatchCommand>() {
            Ok(WatchCommand::Quit) => break,
            Ok(command) => execute(manager, log, command, settings, clock())?,
            Err(unknown) => msg_warning!(Message::WatchUnknownCommand(unknown)),
        }
    }
    Ok(())
}

fn execute(
    manager: &mut SessionManager,
    log: &ReadingLog,
    command: WatchCommand,
    settings: &dyn SettingsProvider,
    now: DateTime<Utc>,
) -> Result<()> {
    match command {
        WatchCommand::Start { book_id, title } => match manager.start(book_id, title, now) {
            Ok(()) => {
                if let Some(session) = manager.active() {
                    msg_success!(Message::SessionStarted(session.book_title.clone()));
                }
            }
            Err(e) => msg_error!(Message::StartRejected(e.to_string())),
        },
        WatchCommand::Pause => {
            manager.pause(now);
            msg_info!(status_message(manager, now));
        }
        WatchCommand::Resume => {
            manager.resume(now);
            msg_info!(status_message(manager, now));
        }
        WatchCommand::Stop => match manager.stop(now, false, None) {
            Some(pending) => announce_pending(&pending),
            None => msg_warning!(Message::SessionNotActive),
        },
        WatchCommand::Confirm => match handoff::keep(manager, log, Annotations::default()) {
            Ok(Some(record)) => msg_success!(Message::CompletionConfirmed(record.book_title)),
            Ok(None) => msg_warning!(Message::NoPendingCompletion),
            Err(e) => msg_error!(Message::InvalidRecord(e.to_string())),
        },
        WatchCommand::Discard => match handoff::discard(manager) {
            Some(discarded) => msg_success!(Message::CompletionDiscarded(discarded.book_title)),
            None => msg_warning!(Message::NoPendingCompletion),
        },
        WatchCommand::Status => msg_info!(status_message(manager, now)),
        WatchCommand::Phase(phase) => {
            msg_debug!(Message::LifecyclePhaseReceived(phase.to_string()));
            if let Some(pending) = manager.handle_lifecycle_phase(phase, now, settings) {
                msg_warning!(Message::SessionAutoStopped {
                    title: pending.book_title.clone(),
                    minutes: pending.auto_stop_minutes.unwrap_or_default(),
                });
                announce_pending(&pending);
            }
        }
        WatchCommand::Help => msg_print!(Message::WatchUsage),
        WatchCommand::Quit => {}
    }
    Ok(())
}

fn announce_pending(pending: &PendingCompletion) {
    msg_success!(Message::SessionStopped {
        title: pending.book_title.clone(),
        duration: format_seconds(pending.duration_seconds),
    });
    print_summary(pending);
    msg_info!(Message::CompletionPending(pending.book_title.clone()));
}
