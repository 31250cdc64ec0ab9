//! Session timer engine.
//!
//! The engine is a caller-driven state machine: it owns no clock and never
//! schedules anything. The embedding loop calls `tick()` once per second
//! while the timer runs, and must drop its tick source on every path that
//! leaves `Running`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//!   start      pause / reset / phase end
//! ```
//!
//! A countdown that reaches zero flips the mode (study <-> break), reloads
//! the new mode's configured duration and lands back in `Idle`; the next
//! phase never starts on its own.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(25, 5);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::PhaseEnded) when a phase finishes
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::preset::Preset;
use crate::events::Event;

/// Which phase of the study cycle the countdown belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Study,
    Break,
}

impl Mode {
    pub fn flipped(self) -> Self {
        match self {
            Mode::Study => Mode::Break,
            Mode::Break => Mode::Study,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Study => "study",
            Mode::Break => "break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
}

/// Core timer state machine.
///
/// `remaining_secs` only decreases while Running, one whole second per
/// `tick()`. Pausing preserves it exactly; reset restores the configured
/// duration of the *current* mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    mode: Mode,
    phase: Phase,
    /// Whole seconds left in the current phase.
    remaining_secs: u64,
    study_minutes: u64,
    break_minutes: u64,
}

impl TimerEngine {
    /// Create an idle engine in study mode with the full study duration
    /// loaded.
    pub fn new(study_minutes: u64, break_minutes: u64) -> Self {
        Self {
            mode: Mode::Study,
            phase: Phase::Idle,
            remaining_secs: study_minutes * 60,
            study_minutes,
            break_minutes,
        }
    }

    pub fn from_preset(preset: &Preset) -> Self {
        Self::new(preset.study_minutes, preset.break_minutes)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn study_minutes(&self) -> u64 {
        self.study_minutes
    }

    pub fn break_minutes(&self) -> u64 {
        self.break_minutes
    }

    /// `M:SS` with zero-padded seconds, e.g. `25:00`, `0:09`.
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    fn configured_secs(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Study => self.study_minutes * 60,
            Mode::Break => self.break_minutes * 60,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op while already running.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Running;
                Some(Event::TimerStarted {
                    mode: self.mode,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            Phase::Running => None,
        }
    }

    /// Halt the countdown, preserving the remaining time exactly.
    pub fn pause(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Idle;
                Some(Event::TimerPaused {
                    mode: self.mode,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            Phase::Idle => None,
        }
    }

    /// Stop and restore the current mode's configured duration.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Idle;
        self.remaining_secs = self.configured_secs(self.mode);
        Some(Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Adopt a preset: stop ticking, force study mode, discard any
    /// in-progress countdown and update both configured durations.
    pub fn select_preset(&mut self, preset: &Preset) -> Option<Event> {
        self.study_minutes = preset.study_minutes;
        self.break_minutes = preset.break_minutes;
        self.mode = Mode::Study;
        self.phase = Phase::Idle;
        self.remaining_secs = self.configured_secs(Mode::Study);
        Some(Event::PresetSelected {
            name: preset.name.clone(),
            study_minutes: preset.study_minutes,
            break_minutes: preset.break_minutes,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second. Call once per second while
    /// Running; no-op otherwise.
    ///
    /// When the countdown reaches zero the mode flips, the new mode's full
    /// duration is loaded and the engine drops to `Idle`. The returned
    /// `PhaseEnded` event names the phase that finished; the caller shows
    /// it to the user and drops its tick source.
    pub fn tick(&mut self) -> Option<Event> {
        if self.phase != Phase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        let ended = self.mode;
        self.mode = ended.flipped();
        self.remaining_secs = self.configured_secs(self.mode);
        self.phase = Phase::Idle;
        Some(Event::PhaseEnded {
            ended,
            next: self.mode,
            next_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_out(engine: &mut TimerEngine) -> Event {
        loop {
            if let Some(event) = engine.tick() {
                return event;
            }
        }
    }

    #[test]
    fn starts_idle_in_study_mode() {
        let engine = TimerEngine::new(25, 5);
        assert_eq!(engine.mode(), Mode::Study);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.remaining_secs(), 25 * 60);
    }

    #[test]
    fn start_is_noop_while_running() {
        let mut engine = TimerEngine::new(25, 5);
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        assert!(engine.is_running());
    }

    #[test]
    fn tick_only_decrements_while_running() {
        let mut engine = TimerEngine::new(25, 5);
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 25 * 60);

        engine.start();
        engine.tick();
        assert_eq!(engine.remaining_secs(), 25 * 60 - 1);
    }

    #[test]
    fn pause_preserves_remaining_and_start_resumes_it() {
        let mut engine = TimerEngine::new(25, 5);
        engine.start();
        for _ in 0..90 {
            engine.tick();
        }
        assert!(engine.pause().is_some());
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 25 * 60 - 90);

        // Ticks while paused change nothing.
        engine.tick();
        assert_eq!(engine.remaining_secs(), 25 * 60 - 90);

        engine.start();
        engine.tick();
        assert_eq!(engine.remaining_secs(), 25 * 60 - 91);
    }

    #[test]
    fn pause_is_noop_while_idle() {
        let mut engine = TimerEngine::new(25, 5);
        assert!(engine.pause().is_none());
    }

    #[test]
    fn reset_restores_current_mode_duration() {
        let mut engine = TimerEngine::new(25, 5);
        engine.start();
        run_out(&mut engine); // now break mode
        engine.start();
        for _ in 0..30 {
            engine.tick();
        }
        engine.reset();
        assert_eq!(engine.mode(), Mode::Break);
        assert!(!engine.is_running());
        // Break duration, never the study duration.
        assert_eq!(engine.remaining_secs(), 5 * 60);
    }

    #[test]
    fn expiry_flips_study_to_break_and_back() {
        let mut engine = TimerEngine::new(1, 2);
        engine.start();
        let event = run_out(&mut engine);
        match event {
            Event::PhaseEnded { ended, next, next_secs, .. } => {
                assert_eq!(ended, Mode::Study);
                assert_eq!(next, Mode::Break);
                assert_eq!(next_secs, 2 * 60);
            }
            other => panic!("expected PhaseEnded, got {other:?}"),
        }
        assert_eq!(engine.mode(), Mode::Break);
        assert!(!engine.is_running());

        engine.start();
        let event = run_out(&mut engine);
        match event {
            Event::PhaseEnded { ended, next, next_secs, .. } => {
                assert_eq!(ended, Mode::Break);
                assert_eq!(next, Mode::Study);
                assert_eq!(next_secs, 60);
            }
            other => panic!("expected PhaseEnded, got {other:?}"),
        }
    }

    #[test]
    fn preset_forces_study_mode_and_halts_ticking() {
        let mut engine = TimerEngine::new(25, 5);
        engine.start();
        run_out(&mut engine); // land in break mode
        engine.start();
        engine.tick();

        engine.select_preset(&Preset::new("Deep Work", 45, 10));
        assert_eq!(engine.mode(), Mode::Study);
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 45 * 60);
        assert_eq!(engine.break_minutes(), 10);
    }

    #[test]
    fn preset_mid_cycle_discards_countdown() {
        // Running at 0:10 in study mode, then Deep Work is selected.
        let mut engine = TimerEngine::new(25, 5);
        engine.start();
        for _ in 0..(25 * 60 - 10) {
            engine.tick();
        }
        assert_eq!(engine.display(), "0:10");

        engine.select_preset(&Preset::new("Deep Work", 45, 10));
        assert_eq!(engine.display(), "45:00");
        assert_eq!(engine.mode(), Mode::Study);
        assert!(!engine.is_running());
    }

    #[test]
    fn display_zero_pads_seconds() {
        let mut engine = TimerEngine::new(25, 5);
        assert_eq!(engine.display(), "25:00");
        engine.start();
        engine.tick();
        assert_eq!(engine.display(), "24:59");
        for _ in 0..(24 * 60 + 50) {
            engine.tick();
        }
        assert_eq!(engine.display(), "0:09");
    }

    proptest! {
        /// For any configured durations, a full study countdown lands idle
        /// in break mode with exactly the break duration loaded, and the
        /// following break countdown lands back in study mode.
        #[test]
        fn full_cycle_is_exact(study in 1u64..=90, brk in 1u64..=30) {
            let mut engine = TimerEngine::new(study, brk);
            engine.start();
            for _ in 0..study * 60 - 1 {
                prop_assert!(engine.tick().is_none());
            }
            let event = engine.tick();
            prop_assert!(matches!(event, Some(Event::PhaseEnded { .. })), "expected PhaseEnded event");
            prop_assert_eq!(engine.mode(), Mode::Break);
            prop_assert_eq!(engine.remaining_secs(), brk * 60);
            prop_assert!(!engine.is_running());

            engine.start();
            for _ in 0..brk * 60 - 1 {
                prop_assert!(engine.tick().is_none());
            }
            prop_assert!(engine.tick().is_some());
            prop_assert_eq!(engine.mode(), Mode::Study);
            prop_assert_eq!(engine.remaining_secs(), study * 60);
        }
    }
}
