//! Heater relay driver (opto-isolated relay module, active LOW).
//!
//! A dumb actuator: the loop controller and the fault latch decide when
//! the heater runs; this driver only maps logical "active" onto the
//! inverted electrical level.
//!
//! Handles are `Clone` so the same physical relay can be held by its loop
//! controller and captured by a latch shutdown action. Both paths write
//! the same register; repeated writes of the same level are harmless.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the relay GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::app::ports::RelayPort;
use crate::drivers::hw_init;

#[derive(Debug, Clone)]
pub struct RelayDriver {
    gpio: i32,
    active: bool,
}

impl RelayDriver {
    /// The pin must already be configured as an output, resting HIGH.
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            active: false,
        }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Last level commanded through this handle.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl RelayPort for RelayDriver {
    fn set_active(&mut self, on: bool) {
        // Active LOW: LOW closes the relay and powers the heater.
        hw_init::gpio_write(self.gpio, !on);
        self.active = on;
    }
}
