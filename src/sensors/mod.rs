//! Sensor drivers. One probe instance per heating loop; the supervisor
//! consumes them through the [`TemperatureProbe`] port.
//!
//! [`TemperatureProbe`]: crate::app::ports::TemperatureProbe

pub mod ds18b20;

pub use ds18b20::Ds18b20Probe;
