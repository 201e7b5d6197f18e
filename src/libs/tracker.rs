//! The reading-session state machine.
//!
//! [`SessionManager`] owns the one active session and the one pending
//! completion of the process. It is constructed once by the host, restored
//! from the persisted snapshot, and driven by UI actions and lifecycle phases.
//!
//! ```text
//!            start                 pause
//!   Idle ───────────▶ Running ◀──────────▶ Paused
//!    ▲                   │       resume      │
//!    │ confirm/discard   │ stop              │ stop
//!    │                   ▼                   │
//!    └────────── PendingResolution ◀─────────┘
//! ```
//!
//! Every committed transition is persisted (start, pause, resume write the
//! snapshot; stop removes it) and then announced once to every observer
//! before the call returns. Calls that do not apply to the current state
//! are no-ops and notify nobody.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use readlog::libs::store::{MemoryStore, SessionStore};
//! use readlog::libs::tracker::SessionManager;
//!
//! let mut manager = SessionManager::restore(SessionStore::new(MemoryStore::new()));
//! let t0 = Utc::now();
//! manager.start("dune".into(), "Dune", t0).unwrap();
//! manager.pause(t0 + Duration::seconds(10));
//! assert_eq!(manager.elapsed_seconds(t0 + Duration::minutes(5)), 10);
//!
//! let pending = manager.stop(t0 + Duration::minutes(5), false, None).unwrap();
//! assert_eq!(pending.duration_seconds, 10);
//! manager.confirm();
//! ```

use crate::libs::lifecycle::{AutoStopController, AutoStopDecision, LifecyclePhase, SettingsProvider};
use crate::libs::session::{ActiveSession, BookId, PendingCompletion, SessionState};
use crate::libs::store::SessionStore;
use chrono::{DateTime, Utc};
use std::mem;
use thiserror::Error;
use uuid::Uuid;

/// Why a session could not be started. The state machine is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("Already reading \"{active_title}\". Stop that session first")]
    Conflict { active_title: String },
    #[error("A finished session is waiting to be confirmed or discarded")]
    PendingUnresolved,
}

/// Receives the new state after every committed transition.
pub trait SessionObserver {
    fn on_transition(&mut self, state: &SessionState);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionState),
{
    fn on_transition(&mut self, state: &SessionState) {
        self(state)
    }
}

/// What the manager currently holds. Active and pending are mutually
/// exclusive, so a stop swaps one for the other in a single assignment.
#[derive(Debug, Default)]
enum Slot {
    #[default]
    Idle,
    Active(ActiveSession),
    Pending(PendingCompletion),
}

pub struct SessionManager {
    slot: Slot,
    store: SessionStore,
    auto_stop: AutoStopController,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl SessionManager {
    /// Builds the manager from whatever session the store still holds.
    pub fn restore(store: SessionStore) -> Self {
        let slot = match store.load() {
            Some(session) => Slot::Active(session),
            None => Slot::Idle,
        };
        SessionManager {
            slot,
            store,
            auto_stop: AutoStopController::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match &self.slot {
            Slot::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingCompletion> {
        match &self.slot {
            Slot::Pending(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active().is_some_and(|session| !session.is_paused)
    }

    pub fn state(&self, now: DateTime<Utc>) -> SessionState {
        match &self.slot {
            Slot::Idle => SessionState::Idle,
            Slot::Active(session) if session.is_paused => SessionState::Paused {
                elapsed_seconds: session.elapsed_seconds(now),
            },
            Slot::Active(session) => SessionState::Running {
                elapsed_seconds: session.elapsed_seconds(now),
            },
            Slot::Pending(pending) => SessionState::PendingResolution(pending.clone()),
        }
    }

    /// Elapsed reading seconds of the active session, or 0 when there is none.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.active().map_or(0, |session| session.elapsed_seconds(now))
    }

    pub fn start(&mut self, book_id: BookId, book_title: impl Into<String>, now: DateTime<Utc>) -> Result<(), StartError> {
        match &self.slot {
            Slot::Pending(_) => return Err(StartError::PendingUnresolved),
            Slot::Active(session) if session.book_id == book_id => return Ok(()),
            Slot::Active(session) => {
                return Err(StartError::Conflict {
                    active_title: session.book_title.clone(),
                })
            }
            Slot::Idle => {}
        }

        let session = ActiveSession::new(book_id, book_title, now);
        tracing::debug!(book_id = %session.book_id, title = %session.book_title, "reading session started");
        self.store.save(&session);
        self.slot = Slot::Active(session);
        self.notify(now);
        Ok(())
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        let Slot::Active(session) = &mut self.slot else {
            return;
        };
        if !session.pause(now) {
            return;
        }
        tracing::debug!(banked = session.accumulated_seconds, "reading session paused");
        self.store.save(session);
        // Time away before the pause is already banked; a later resume starts fresh.
        self.auto_stop.reset();
        self.notify(now);
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        let Slot::Active(session) = &mut self.slot else {
            return;
        };
        if !session.resume(now) {
            return;
        }
        tracing::debug!(banked = session.accumulated_seconds, "reading session resumed");
        self.store.save(session);
        self.notify(now);
    }

    /// Ends the active session and returns the completion awaiting resolution.
    ///
    /// A paused session ends at its pause instant rather than at `now`.
    /// Returns `None` without side effects when nothing is active.
    pub fn stop(&mut self, now: DateTime<Utc>, was_auto_stopped: bool, auto_stop_minutes: Option<i64>) -> Option<PendingCompletion> {
        let session = match mem::take(&mut self.slot) {
            Slot::Active(session) => session,
            other => {
                self.slot = other;
                return None;
            }
        };

        let pending = session.complete(now, was_auto_stopped, auto_stop_minutes);
        tracing::info!(
            book_id = %pending.book_id,
            duration_seconds = pending.duration_seconds,
            auto_stopped = pending.was_auto_stopped,
            "reading session stopped"
        );
        self.slot = Slot::Pending(pending.clone());
        self.auto_stop.reset();
        self.store.clear();
        self.notify(now);
        Some(pending)
    }

    /// Resolves the pending completion as kept. The caller saves the record.
    pub fn confirm(&mut self) -> Option<PendingCompletion> {
        self.resolve(None, "confirmed")
    }

    pub fn discard(&mut self) -> Option<PendingCompletion> {
        self.resolve(None, "discarded")
    }

    /// Like [`confirm`](Self::confirm), but ignored unless `id` names the current completion.
    pub fn confirm_id(&mut self, id: Uuid) -> Option<PendingCompletion> {
        self.resolve(Some(id), "confirmed")
    }

    pub fn discard_id(&mut self, id: Uuid) -> Option<PendingCompletion> {
        self.resolve(Some(id), "discarded")
    }

    /// Feeds a host lifecycle phase to the auto-stop controller, stopping the
    /// session if it was left in the background past the threshold.
    pub fn handle_lifecycle_phase(&mut self, phase: LifecyclePhase, now: DateTime<Utc>, settings: &dyn SettingsProvider) -> Option<PendingCompletion> {
        let is_running = self.is_running();
        match self.auto_stop.on_phase(phase, is_running, now, settings) {
            AutoStopDecision::Continue => None,
            AutoStopDecision::Stop { ended_at, minutes } => self.stop(ended_at, true, Some(minutes)),
        }
    }

    /// When the host left the foreground with a running session, if it has not returned yet.
    pub fn background_entered_at(&self) -> Option<DateTime<Utc>> {
        self.auto_stop.background_entered_at()
    }

    fn resolve(&mut self, id: Option<Uuid>, outcome: &str) -> Option<PendingCompletion> {
        let matches = match &self.slot {
            Slot::Pending(pending) => id.map_or(true, |id| id == pending.id),
            _ => false,
        };
        if !matches {
            if id.is_some() {
                tracing::debug!(outcome, "ignoring resolution of a stale completion");
            }
            return None;
        }

        let Slot::Pending(pending) = mem::take(&mut self.slot) else {
            return None;
        };
        tracing::info!(completion_id = %pending.id, outcome, "pending completion resolved");
        self.notify_state(&SessionState::Idle);
        Some(pending)
    }

    fn notify(&mut self, now: DateTime<Utc>) {
        let state = self.state(now);
        self.notify_state(&state);
    }

    fn notify_state(&mut self, state: &SessionState) {
        for observer in self.observers.iter_mut() {
            observer.on_transition(state);
        }
    }
}
