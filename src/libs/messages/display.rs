//! Text for every [`Message`] variant.
//!
//! All user-facing strings are defined here so wording stays consistent
//! across commands.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::SessionStarted(title) => format!("Started reading \"{}\"", title),
            Message::SessionAlreadyRunning(title) => format!("Already reading \"{}\"", title),
            Message::SessionPaused(elapsed) => format!("Session paused at {}", elapsed),
            Message::SessionResumed(elapsed) => format!("Session resumed at {}", elapsed),
            Message::SessionNotActive => "No reading session is in progress".to_string(),
            Message::SessionNotRunning => "The reading session is already paused".to_string(),
            Message::SessionNotPaused => "The reading session is not paused".to_string(),
            Message::SessionStopped { title, duration } => format!("Stopped reading \"{}\" after {}", title, duration),
            Message::SessionAutoStopped { title, minutes } => format!(
                "\"{}\" was stopped automatically after {} minutes in the background",
                title, minutes
            ),
            Message::StartRejected(reason) => format!("Cannot start a session: {}", reason),

            // === COMPLETION MESSAGES ===
            Message::CompletionSummary {
                title,
                started,
                ended,
                duration,
            } => format!("{}\n  {} - {} ({})", title, started, ended, duration),
            Message::CompletionConfirmed(title) => format!("Reading session for \"{}\" saved to the log", title),
            Message::CompletionDiscarded(title) => format!("Reading session for \"{}\" discarded", title),
            Message::CompletionPending(title) => format!(
                "Session for \"{}\" is waiting: type 'confirm' or 'discard'",
                title
            ),
            Message::NoPendingCompletion => "There is no finished session to resolve".to_string(),
            Message::InvalidRecord(reason) => format!("Invalid reading record: {}", reason),
            Message::PromptKeepSession => "Save this session to your reading log?".to_string(),
            Message::PromptStartPage => "Start page (leave empty to skip)".to_string(),
            Message::PromptEndPage => "End page (leave empty to skip)".to_string(),
            Message::PromptNote => "Note (leave empty to skip)".to_string(),
            Message::PageNumberRequired => "Enter a page number or leave it empty".to_string(),

            // === STATUS MESSAGES ===
            Message::StatusIdle => "Not reading anything right now".to_string(),
            Message::StatusRunning { title, elapsed } => format!("Reading \"{}\": {}", title, elapsed),
            Message::StatusPaused { title, elapsed } => format!("Paused \"{}\": {}", title, elapsed),
            Message::StatusPending { title, duration } => {
                format!("Finished \"{}\" ({}), waiting for confirmation", title, duration)
            }

            // === READING LOG MESSAGES ===
            Message::ReadingLogHeader => "Reading log".to_string(),
            Message::ReadingLogEmpty => "No reading sessions logged yet".to_string(),
            Message::ReadingLogTotal(duration) => format!("Total reading time: {}", duration),

            // === WATCH MESSAGES ===
            Message::WatchStarted => "Watching for commands and lifecycle phases. Type 'help' for a list".to_string(),
            Message::WatchStopped => "Watch stopped".to_string(),
            Message::WatchUnknownCommand(line) => format!("Unknown command '{}'", line),
            Message::WatchUsage => "Commands: start <book-id> <title>, pause, resume, stop, confirm, discard, status, \
                 active, inactive, background, quit"
                .to_string(),
            Message::LifecyclePhaseReceived(phase) => format!("Lifecycle phase: {}", phase),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleSession => "Reading session settings".to_string(),
            Message::PromptAutoStopEnabled => "Stop sessions left in the background automatically?".to_string(),
            Message::PromptAutoStopMinutes => "Minutes in the background before auto-stop".to_string(),
            Message::AutoStopMinutesRange => "Enter a number of minutes greater than zero".to_string(),
        };
        write!(f, "{}", text)
    }
}
