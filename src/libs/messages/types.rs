//! Every message readlog shows to the user.
//!
//! Variants carry the values interpolated into their text; the text itself
//! lives in [`display`](super::display).

#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    SessionStarted(String),        // title
    SessionAlreadyRunning(String), // title
    SessionPaused(String),         // elapsed
    SessionResumed(String),        // elapsed
    SessionNotActive,
    SessionNotRunning,
    SessionNotPaused,
    SessionStopped {
        title: String,
        duration: String,
    },
    SessionAutoStopped {
        title: String,
        minutes: i64,
    },
    StartRejected(String), // reason

    // === COMPLETION MESSAGES ===
    CompletionSummary {
        title: String,
        started: String,
        ended: String,
        duration: String,
    },
    CompletionConfirmed(String), // title
    CompletionDiscarded(String), // title
    CompletionPending(String),   // title
    NoPendingCompletion,
    InvalidRecord(String),
    PromptKeepSession,
    PromptStartPage,
    PromptEndPage,
    PromptNote,
    PageNumberRequired,

    // === STATUS MESSAGES ===
    StatusIdle,
    StatusRunning {
        title: String,
        elapsed: String,
    },
    StatusPaused {
        title: String,
        elapsed: String,
    },
    StatusPending {
        title: String,
        duration: String,
    },

    // === READING LOG MESSAGES ===
    ReadingLogHeader,
    ReadingLogEmpty,
    ReadingLogTotal(String), // duration

    // === WATCH MESSAGES ===
    WatchStarted,
    WatchStopped,
    WatchUnknownCommand(String),
    WatchUsage,
    LifecyclePhaseReceived(String), // phase

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleSession,
    PromptAutoStopEnabled,
    PromptAutoStopMinutes,
    AutoStopMinutesRange,
}
