//! Per-loop control logic: the thermostat state machine and its
//! heating-desync watchdog.

pub mod desync;
pub mod thermostat;
