//! Process-wide fault latch.
//!
//! The latch is the safety anchor of the whole controller: the first
//! detected anomaly trips it, runs every registered shutdown action once,
//! and records the fault context. There is no reset path — once latched,
//! every loop stays down until power cycle.
//!
//! ## Fault lifecycle
//!
//! 1. A loop detects an anomaly (probe lost, over-max, desync).
//! 2. It calls [`FaultLatch::start_fault`]; the latch flips to triggered,
//!    stores the first-fault record, and fires the shutdown actions in
//!    registration order.
//! 3. Every loop observes `is_triggered()` at the top of its tick and
//!    forces itself off; the transition table is never evaluated again.
//! 4. Later `start_fault` calls are absorbed: the first record is
//!    authoritative, callbacks never re-fire.

use core::fmt;

use heapless::Vec;
use log::{debug, error};

use crate::app::events::StatusEvent;
use crate::app::ports::EventSink;
use crate::error::{Error, FaultCause, Result};

/// Fixed capacity of the shutdown-action list (one action per loop).
pub const MAX_SHUTDOWN_ACTIONS: usize = 4;

/// A shutdown action: infallible and idempotent, typically a cloned relay
/// handle driving its output inactive. An action must not call back into
/// the latch. Single logical thread of execution, so no `Send` bound.
pub type ShutdownAction = Box<dyn FnMut()>;

/// Context of the first fault of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultRecord {
    pub cause: FaultCause,
    /// Loop that raised the fault (0 for startup/wiring faults).
    pub origin_id: u8,
    /// Diagnostic marker naming the raising site (e.g. the transition rule).
    pub location: &'static str,
    /// Monotonic millisecond timestamp at which the latch tripped.
    pub at_ms: u32,
}

impl fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (loop {}, at {}, t={}ms)",
            self.cause, self.origin_id, self.location, self.at_ms
        )
    }
}

/// Write-once-per-run fault latch with a bounded shutdown-action registry.
pub struct FaultLatch {
    triggered: bool,
    record: Option<FaultRecord>,
    actions: Vec<ShutdownAction, MAX_SHUTDOWN_ACTIONS>,
}

impl FaultLatch {
    pub fn new() -> Self {
        Self {
            triggered: false,
            record: None,
            actions: Vec::new(),
        }
    }

    /// Register the shutdown actions, one per loop, in the order their
    /// loops were wired. Called once at startup, before any loop operates.
    ///
    /// Fails with [`FaultCause::RegistrationOverflow`] if more actions are
    /// supplied than the latch can hold; startup must abort on that error
    /// rather than run with a partially covered shutdown path.
    pub fn register_shutdown_actions(
        &mut self,
        actions: impl IntoIterator<Item = ShutdownAction>,
    ) -> Result<()> {
        for action in actions {
            self.actions
                .push(action)
                .map_err(|_| Error::Fault(FaultCause::RegistrationOverflow))?;
        }
        Ok(())
    }

    /// Pure query; no side effects.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// The remembered first-fault record, if the latch has tripped.
    pub fn record(&self) -> Option<&FaultRecord> {
        self.record.as_ref()
    }

    /// Trip the latch.
    ///
    /// On the first call: records the fault context, runs every registered
    /// shutdown action in registration order, and emits a structured fault
    /// event. Actions are infallible by contract, so one action can never
    /// prevent the rest from running.
    ///
    /// On any later call the latch is already on and this is a no-op; the
    /// duplicate is logged at debug level only.
    pub fn start_fault(
        &mut self,
        cause: FaultCause,
        origin_id: u8,
        location: &'static str,
        now_ms: u32,
        sink: &mut impl EventSink,
    ) {
        if self.triggered {
            debug!(
                "fault latch already on; absorbed {} from loop {} at {}",
                cause, origin_id, location
            );
            return;
        }
        self.triggered = true;

        let record = FaultRecord {
            cause,
            origin_id,
            location,
            at_ms: now_ms,
        };
        self.record = Some(record);
        error!("FAULT LATCHED: {record}");

        for action in &mut self.actions {
            action();
        }

        sink.emit(&StatusEvent::Fault(record));
    }
}

impl Default for FaultLatch {
    fn default() -> Self {
        Self::new()
    }
}
