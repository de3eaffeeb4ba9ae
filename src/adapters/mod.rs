//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to              |
//! |------------|------------|--------------------------|
//! | `log_sink` | EventSink  | Serial log output        |
//! | `time`     | Clock      | ESP32 system timer       |
//!
//! The probe, relay, and LED adapters live in `sensors/` and `drivers/`
//! because they carry real driver logic of their own.

pub mod log_sink;
pub mod time;

pub use log_sink::LogEventSink;
pub use time::Esp32Clock;
