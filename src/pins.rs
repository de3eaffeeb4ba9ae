//! GPIO pin assignments for the thermoguard relay board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers. Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// Heater relays (opto-isolated relay modules, active LOW)
// ---------------------------------------------------------------------------

/// Relay for loop 1 (aquarium heater). Driving the pin LOW closes the
/// relay and powers the heater.
pub const RELAY_LOOP1_GPIO: i32 = 4;
/// Relay for loop 2 (terrarium heat mat).
pub const RELAY_LOOP2_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// DS18B20 one-wire buses (one probe per bus, 4.7 kOhm pull-up to 3V3)
// ---------------------------------------------------------------------------

pub const ONEWIRE_LOOP1_GPIO: i32 = 6;
pub const ONEWIRE_LOOP2_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// On-board indicator LED, active HIGH.
pub const STATUS_LED_GPIO: i32 = 2;
