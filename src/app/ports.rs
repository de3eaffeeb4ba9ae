//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ HeaterSupervisor (domain)
//! ```
//!
//! Driven adapters (probes, relays, the indicator LED, event sinks, the
//! clock) implement these traits. The domain consumes them via generics,
//! so the control core never touches hardware directly.

use crate::error::SensorError;

use super::events::StatusEvent;

// ───────────────────────────────────────────────────────────────
// Temperature probe port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one probe per loop.
///
/// Disconnection is a first-class outcome: a missing probe returns
/// `Err(SensorError::Disconnected)`, never a sentinel temperature.
/// The read is synchronous and must complete within the sampling tick.
pub trait TemperatureProbe {
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: one relay per loop.
///
/// The core only calls this on state-relevant edges; the mapping from
/// "active" to an electrical level (active-LOW modules are common) is
/// the implementor's concern. A repeated write of the same level must
/// be harmless.
pub trait RelayPort {
    fn set_active(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LED)
// ───────────────────────────────────────────────────────────────

/// The aggregate blink phase is pushed here every scheduler tick.
pub trait IndicatorPort {
    fn set_on(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`StatusEvent`]s through this port.
/// Delivery failures must be swallowed by the adapter; they are never
/// propagated back as control errors.
pub trait EventSink {
    fn emit(&mut self, event: &StatusEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: monotonic time → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
///
/// The raw counter wraps at `u32::MAX`; all elapsed-time comparisons in
/// the domain use `wrapping_sub` so a rollover never produces a
/// spuriously huge interval.
pub trait Clock {
    fn now_ms(&self) -> u32;
}
