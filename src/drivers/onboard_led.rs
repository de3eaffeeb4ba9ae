//! On-board status LED driver (single colour, active HIGH).
//!
//! The supervisor pushes the blink phase here every scheduler tick.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LED GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::app::ports::IndicatorPort;
use crate::drivers::hw_init;

pub struct OnboardLed {
    gpio: i32,
    lit: bool,
}

impl OnboardLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, lit: false }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl IndicatorPort for OnboardLed {
    fn set_on(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.lit = on;
    }
}
