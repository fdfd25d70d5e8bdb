use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// A side-effecting instruction emitted by the engine.
///
/// The engine never performs effects itself; the host dispatches each
/// one to the collaborator that owns it (notifier, overlay, enforcement)
/// and the next tick proceeds regardless of whether delivery succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    /// One-shot pre-break reminder for the current Working phase.
    SendReminder {
        minutes_left: u64,
        at: DateTime<Utc>,
    },
    /// A Resting phase began; the host should acquire its full-screen
    /// break display.
    EnterRest {
        at: DateTime<Utc>,
    },
    /// Back to a fresh Working phase; the host should tear down any
    /// rest display.
    ExitRest {
        at: DateTime<Utc>,
    },
    /// The rest countdown reached zero; the host should run its break
    /// enforcement action. Fires once per Resting phase.
    RestComplete {
        at: DateTime<Utc>,
    },
}

impl Effect {
    pub fn send_reminder(minutes_left: u64) -> Self {
        Effect::SendReminder {
            minutes_left,
            at: Utc::now(),
        }
    }

    pub fn enter_rest() -> Self {
        Effect::EnterRest { at: Utc::now() }
    }

    pub fn exit_rest() -> Self {
        Effect::ExitRest { at: Utc::now() }
    }

    pub fn rest_complete() -> Self {
        Effect::RestComplete { at: Utc::now() }
    }
}

/// Read-only state snapshot for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub elapsed_seconds: u64,
    pub remaining_seconds: u64,
    pub at: DateTime<Utc>,
}
