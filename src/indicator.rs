//! Status indicator — one LED, three blink patterns.
//!
//! Aggregates the fault latch and every loop's heating state into a
//! single observable signal. Pattern priority, highest first:
//!
//! | Pattern   | Condition                  | Half-period |
//! |-----------|----------------------------|-------------|
//! | `Fault`   | fault latch triggered      | 50 ms       |
//! | `Heating` | at least one loop heating  | 1000 ms     |
//! | `Idle`    | all loops idle/cooling     | 10 000 ms   |
//!
//! The engine is updated every scheduler tick — far more often than the
//! temperature sampling — and keeps its own toggle timing, so the blink
//! rate is independent of how often the underlying state is polled.

use crate::config::SystemConfig;

/// Aggregate display pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPattern {
    Fault,
    Heating,
    Idle,
}

/// Blink-pattern engine driving the on-board status LED.
pub struct StatusIndicator {
    fault_half_ms: u32,
    heating_half_ms: u32,
    idle_half_ms: u32,
    /// `None` until the first update; guarantees the very first computed
    /// pattern starts in the "on" phase.
    active: Option<BlinkPattern>,
    phase_on: bool,
    last_toggle_ms: u32,
}

impl StatusIndicator {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            fault_half_ms: config.fault_blink_ms,
            heating_half_ms: config.heating_blink_ms,
            idle_half_ms: config.idle_blink_ms,
            active: None,
            phase_on: false,
            last_toggle_ms: 0,
        }
    }

    fn half_period_ms(&self, pattern: BlinkPattern) -> u32 {
        match pattern {
            BlinkPattern::Fault => self.fault_half_ms,
            BlinkPattern::Heating => self.heating_half_ms,
            BlinkPattern::Idle => self.idle_half_ms,
        }
    }

    /// The currently displayed pattern, once the first update has run.
    pub fn pattern(&self) -> Option<BlinkPattern> {
        self.active
    }

    /// Recompute the aggregate pattern and advance the blink phase.
    /// Returns the logical LED level for this tick.
    ///
    /// A pattern change resets the phase to "on" and restarts the toggle
    /// timer mid-cycle; otherwise the phase flips whenever the pattern's
    /// half-period has elapsed since the last toggle (wraparound-safe).
    pub fn update(&mut self, now_ms: u32, fault: bool, any_heating: bool) -> bool {
        let next = if fault {
            BlinkPattern::Fault
        } else if any_heating {
            BlinkPattern::Heating
        } else {
            BlinkPattern::Idle
        };

        if self.active != Some(next) {
            self.active = Some(next);
            self.phase_on = true;
            self.last_toggle_ms = now_ms;
        } else if now_ms.wrapping_sub(self.last_toggle_ms) >= self.half_period_ms(next) {
            self.phase_on = !self.phase_on;
            self.last_toggle_ms = now_ms;
        }

        self.phase_on
    }
}
