//! Interval engine implementation.
//!
//! The engine is a second-granular state machine. It does not use
//! internal threads or timers - the caller is responsible for calling
//! `tick()` once per second and for delivering the returned effects.
//!
//! ## State Transitions
//!
//! ```text
//! Working -> Resting   remaining reaches zero, or manual rest-now
//! Resting -> Working   manual reset, or screen unlock
//! Resting -> Resting   repeated rest-now restarts the countdown
//! ```
//!
//! No terminal state: the engine runs for the lifetime of the process.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = IntervalEngine::new(&config.intervals());
//! // Once per second:
//! for effect in engine.tick(&config.intervals()) {
//!     // deliver to the notifier / overlay
//! }
//! ```
//!
//! Durations are passed into every operation rather than stored, so a
//! configuration change between ticks takes effect immediately.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::intervals::IntervalConfig;
use crate::events::{Effect, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Working,
    Resting,
}

/// Core interval engine.
///
/// Owns the current phase, the elapsed/remaining counters and the
/// one-shot reminder flag for the current Working phase. Every operation
/// is a deterministic, total function: there is nothing here that can
/// fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalEngine {
    phase: Phase,
    /// Seconds since the current phase began.
    elapsed_seconds: u64,
    /// Seconds left in the current phase, floored at zero.
    remaining_seconds: u64,
    /// True once the pre-break reminder has fired for the current
    /// Working phase.
    reminder_fired: bool,
}

impl IntervalEngine {
    /// Create a fresh engine at the start of a Working phase.
    pub fn new(cfg: &IntervalConfig) -> Self {
        Self {
            phase: Phase::Working,
            elapsed_seconds: 0,
            remaining_seconds: cfg.work_secs,
            reminder_fired: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn reminder_fired(&self) -> bool {
        self.reminder_fired
    }

    /// Build a read-only state snapshot for display.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            elapsed_seconds: self.elapsed_seconds,
            remaining_seconds: self.remaining_seconds,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance time by exactly one second.
    ///
    /// While Working, the pre-break reminder fires on the tick where
    /// remaining lands exactly on the configured lead - an edge-triggered
    /// equality check, once per Working phase, never a `<=` threshold.
    /// A lead at or above the work duration therefore never fires.
    ///
    /// While Resting, remaining is only recomputed while it is still
    /// above zero, so `RestComplete` fires exactly once and the counter
    /// stays at zero until the phase changes.
    pub fn tick(&mut self, cfg: &IntervalConfig) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.elapsed_seconds += 1;

        match self.phase {
            Phase::Working => {
                self.remaining_seconds = cfg.work_secs.saturating_sub(self.elapsed_seconds);

                if self.remaining_seconds == cfg.reminder_lead_secs && !self.reminder_fired {
                    effects.push(Effect::send_reminder(cfg.reminder_lead_secs / 60));
                    self.reminder_fired = true;
                }

                if self.remaining_seconds == 0 {
                    effects.push(self.start_rest(cfg));
                }
            }
            Phase::Resting => {
                if self.remaining_seconds > 0 {
                    self.remaining_seconds = cfg.rest_secs.saturating_sub(self.elapsed_seconds);
                    if self.remaining_seconds == 0 {
                        effects.push(Effect::rest_complete());
                    }
                }
            }
        }

        effects
    }

    /// Transition into Resting, manually or when the work countdown
    /// runs out. Calling while already Resting restarts the countdown.
    pub fn start_rest(&mut self, cfg: &IntervalConfig) -> Effect {
        self.phase = Phase::Resting;
        self.elapsed_seconds = 0;
        self.remaining_seconds = cfg.rest_secs;
        self.reminder_fired = false;
        Effect::enter_rest()
    }

    /// Return to a fresh Working phase, manually or on screen unlock.
    pub fn reset(&mut self, cfg: &IntervalConfig) -> Effect {
        self.phase = Phase::Working;
        self.elapsed_seconds = 0;
        self.remaining_seconds = cfg.work_secs;
        self.reminder_fired = false;
        Effect::exit_rest()
    }

    /// Hook point for the host's lock signal. Locking does NOT pause or
    /// reset the timer.
    pub fn on_screen_locked(&self) {}

    /// An unlocked machine means the elapsed work time is stale: any
    /// unlock starts a fresh work session regardless of current phase.
    pub fn on_screen_unlocked(&mut self, cfg: &IntervalConfig) -> Effect {
        self.reset(cfg)
    }
}
