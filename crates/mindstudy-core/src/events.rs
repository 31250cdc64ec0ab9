use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every timer state change produces an Event.
/// The CLI renders them; a GUI shell would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A preset was selected; the countdown restarts in study mode.
    PresetSelected {
        name: String,
        study_minutes: u64,
        break_minutes: u64,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero. Names the phase that finished; the next
    /// phase is loaded but not started.
    PhaseEnded {
        ended: Mode,
        next: Mode,
        next_secs: u64,
        at: DateTime<Utc>,
    },
}
