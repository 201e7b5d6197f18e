//! Auto-stop of forgotten sessions driven by host lifecycle phases.
//!
//! The host pushes a coarse phase on every change. Leaving the foreground
//! while a session is running records when that happened; coming back
//! evaluates how long the host was away. If that exceeds the configured
//! threshold the session is stopped at `backgrounded + threshold`, so a
//! session left in the background for hours logs only the threshold's worth
//! of extra time. Shorter absences count as ordinary reading time.
//!
//! Nothing here runs on a timer: evaluation happens only when the
//! [`LifecyclePhase::Active`] signal arrives.

use crate::libs::duration;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_AUTO_STOP_ENABLED: bool = true;
pub const DEFAULT_AUTO_STOP_MINUTES: i64 = 45;

/// Host execution phase. Inactive and background are handled identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Active,
    Inactive,
    Background,
}

impl LifecyclePhase {
    pub fn is_foreground(self) -> bool {
        matches!(self, LifecyclePhase::Active)
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Active => "active",
            LifecyclePhase::Inactive => "inactive",
            LifecyclePhase::Background => "background",
        };
        f.write_str(name)
    }
}

impl FromStr for LifecyclePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(LifecyclePhase::Active),
            "inactive" => Ok(LifecyclePhase::Inactive),
            "background" => Ok(LifecyclePhase::Background),
            other => Err(format!("unknown lifecycle phase '{}'", other)),
        }
    }
}

/// Auto-stop settings as read from the settings collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoStopSettings {
    pub enabled: bool,
    pub minutes: i64,
}

impl Default for AutoStopSettings {
    fn default() -> Self {
        AutoStopSettings {
            enabled: DEFAULT_AUTO_STOP_ENABLED,
            minutes: DEFAULT_AUTO_STOP_MINUTES,
        }
    }
}

impl AutoStopSettings {
    /// The threshold in minutes, or `None` when auto-stop is off.
    pub fn threshold_minutes(&self) -> Option<i64> {
        (self.enabled && self.minutes > 0).then_some(self.minutes)
    }
}

/// Source of auto-stop settings, read at evaluation time.
pub trait SettingsProvider {
    fn auto_stop_settings(&self) -> AutoStopSettings;
}

impl SettingsProvider for AutoStopSettings {
    fn auto_stop_settings(&self) -> AutoStopSettings {
        *self
    }
}

/// Outcome of evaluating a lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoStopDecision {
    Continue,
    /// Stop the running session, ending it at `ended_at`.
    Stop { ended_at: DateTime<Utc>, minutes: i64 },
}

/// Tracks when the host left the foreground while a session was running.
#[derive(Debug, Default, Clone)]
pub struct AutoStopController {
    background_entered_at: Option<DateTime<Utc>>,
}

impl AutoStopController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background_entered_at(&self) -> Option<DateTime<Utc>> {
        self.background_entered_at
    }

    /// Forgets any recorded background entry.
    pub fn reset(&mut self) {
        self.background_entered_at = None;
    }

    /// Evaluates a phase change. `is_running` must be true only for an
    /// active session that is not paused.
    pub fn on_phase(&mut self, phase: LifecyclePhase, is_running: bool, now: DateTime<Utc>, settings: &dyn SettingsProvider) -> AutoStopDecision {
        if !phase.is_foreground() {
            // Repeated delivery keeps the first instant; paused sessions record nothing.
            if is_running && self.background_entered_at.is_none() {
                tracing::debug!(%now, "host left foreground with a running session");
                self.background_entered_at = Some(now);
            }
            return AutoStopDecision::Continue;
        }

        let Some(entered_at) = self.background_entered_at.take() else {
            return AutoStopDecision::Continue;
        };
        if !is_running {
            return AutoStopDecision::Continue;
        }
        let Some(minutes) = settings.auto_stop_settings().threshold_minutes() else {
            return AutoStopDecision::Continue;
        };

        // A threshold past the end of representable time is never reached.
        let Some(deadline) = duration::minutes_after(entered_at, minutes) else {
            return AutoStopDecision::Continue;
        };
        if now >= deadline {
            let away_seconds = duration::clamped_seconds(entered_at, now);
            tracing::info!(away_seconds, minutes, "background threshold exceeded");
            AutoStopDecision::Stop {
                ended_at: deadline,
                minutes,
            }
        } else {
            AutoStopDecision::Continue
        }
    }
}
