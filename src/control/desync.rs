//! Heating-desync watchdog.
//!
//! Catches a heater that is commanded on but whose probe shows no
//! meaningful temperature rise — a disconnected heating element, a failed
//! relay, or a probe that fell out of the water. The detector is re-armed
//! every time its loop transitions into HEATING, so the grace window
//! always measures a single continuous heating stretch.

/// Watchdog over one heating stretch.
///
/// While unarmed the window is uninitialised and the detector always
/// reports "no desync"; the first `update` after a reset records the
/// baseline. A positive detection does not auto-reset — the owning loop
/// raises a fault, after which heating is never commanded again.
#[derive(Debug, Clone)]
pub struct DesyncDetector {
    grace_ms: u32,
    min_rise_c: f32,
    start_ms: u32,
    start_temp_c: f32,
    armed: bool,
}

impl DesyncDetector {
    pub fn new(grace_ms: u32, min_rise_c: f32) -> Self {
        Self {
            grace_ms,
            min_rise_c,
            start_ms: 0,
            start_temp_c: 0.0,
            armed: false,
        }
    }

    /// Clear the armed state; the next `update` re-establishes the baseline.
    pub fn reset(&mut self) {
        self.armed = false;
    }

    /// Feed one sample. Returns `true` iff the grace window has fully
    /// elapsed since the baseline and the temperature has risen by less
    /// than the minimum expected rise.
    pub fn update(&mut self, now_ms: u32, temp_c: f32) -> bool {
        if !self.armed {
            self.start_ms = now_ms;
            self.start_temp_c = temp_c;
            self.armed = true;
            return false;
        }
        // Wrapping subtraction: the millisecond counter rolls over.
        now_ms.wrapping_sub(self.start_ms) >= self.grace_ms
            && temp_c - self.start_temp_c < self.min_rise_c
    }
}
