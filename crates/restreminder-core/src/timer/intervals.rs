use serde::{Deserialize, Serialize};

/// Interval durations the engine reads on every tick.
///
/// The configuration layer owns validation: [`IntervalConfig::clamped`]
/// keeps every duration positive and the reminder lead below the work
/// duration. The engine additionally tolerates an unclamped lead (a lead
/// at or above the work duration simply never fires the reminder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalConfig {
    /// Length of a Working phase, in seconds.
    pub work_secs: u64,
    /// Length of a Resting phase, in seconds.
    pub rest_secs: u64,
    /// Seconds before the end of a Working phase at which the one-shot
    /// pre-break reminder fires.
    pub reminder_lead_secs: u64,
}

impl IntervalConfig {
    pub fn new(work_secs: u64, rest_secs: u64, reminder_lead_secs: u64) -> Self {
        Self {
            work_secs,
            rest_secs,
            reminder_lead_secs,
        }
    }

    /// Build a validated config: durations floored at one second, lead
    /// capped below the work duration.
    pub fn clamped(work_secs: u64, rest_secs: u64, reminder_lead_secs: u64) -> Self {
        let work_secs = work_secs.max(1);
        Self {
            work_secs,
            rest_secs: rest_secs.max(1),
            reminder_lead_secs: reminder_lead_secs.min(work_secs - 1),
        }
    }
}

impl Default for IntervalConfig {
    /// 25 minutes work, 5 minutes rest, reminder 5 minutes out.
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            rest_secs: 5 * 60,
            reminder_lead_secs: 5 * 60,
        }
    }
}
