//! Thermoguard firmware library.
//!
//! Fail-safe relay controller for independent heating loops. Each loop
//! pairs one DS18B20 probe with one relay; any detected anomaly latches
//! a process-wide fault and shuts every relay down until power cycle.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fault;
pub mod indicator;

// Hardware-facing modules; the actual peripheral implementations are
// guarded by cfg attributes inside, host builds get the simulators.
pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;
