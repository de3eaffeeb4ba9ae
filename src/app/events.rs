//! Outbound application events.
//!
//! The [`HeaterSupervisor`](super::service::HeaterSupervisor) and the
//! fault latch emit these through the [`EventSink`](super::ports::EventSink)
//! port. Adapters on the other side decide what to do with them — today
//! that is the serial log; no core logic depends on delivery.

use crate::control::thermostat::LoopState;
use crate::fault::FaultRecord;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// The supervisor finished startup wiring (carries the loop count).
    Started { loop_count: usize },

    /// Periodic per-loop status, emitted after each sampling tick.
    LoopStatus {
        loop_id: u8,
        temperature_c: f32,
        state: LoopState,
    },

    /// The fault latch tripped; carries the authoritative first-fault record.
    Fault(FaultRecord),
}
