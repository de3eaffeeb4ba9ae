//! Per-loop thermostat state machine.
//!
//! Each [`LoopController`] owns one temperature probe and one relay and
//! runs a three-state on/off machine with a symmetric hysteresis band:
//!
//! ```text
//!            temp <= target - allowance
//!  COOLING ────────────────────────────▶ HEATING
//!     ▲                                     │
//!     └─────────────────────────────────────┘
//!            temp >= target + allowance
//!
//!  any state ──(temp >= max | desync | probe lost)──▶ OFF  (terminal)
//! ```
//!
//! The over-temperature cutoff is evaluated before the hysteresis rules
//! in every state, so a fault always outranks a normal transition. OFF is
//! reachable only through the fault path and is terminal for the run.
//!
//! Loops are mutually independent: no loop ever observes another loop's
//! temperature or state. The only shared object is the fault latch.

use core::fmt;

use log::{debug, warn};

use crate::app::events::StatusEvent;
use crate::app::ports::{EventSink, RelayPort, TemperatureProbe};
use crate::config::{LoopConfig, SystemConfig};
use crate::error::FaultCause;
use crate::fault::FaultLatch;

use super::desync::DesyncDetector;

/// Thermostat loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Fault-latched shutdown; terminal until power cycle.
    Off,
    /// Relay active, element heating towards `target + allowance`.
    Heating,
    /// Relay inactive, drifting down towards `target - allowance`.
    Cooling,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::Heating => write!(f, "HEATING"),
            Self::Cooling => write!(f, "COOLING"),
        }
    }
}

/// One independent heating loop: probe + relay + state machine.
///
/// Created once at startup with a fixed target/max and never destroyed
/// during normal operation. The `output_active` flag is the single source
/// of truth for the relay's commanded state; relay writes happen only on
/// real edges, so a redundant activate or deactivate is a no-op.
pub struct LoopController<S, R> {
    id: u8,
    target_c: f32,
    max_c: f32,
    allowance_c: f32,
    state: LoopState,
    output_active: bool,
    probe: S,
    relay: R,
    desync: DesyncDetector,
}

impl<S, R> LoopController<S, R> {
    /// Build a loop from its wiring-table entry. The loop starts in
    /// COOLING: it will not heat until a sample proves the water is below
    /// `target - allowance`.
    pub fn new(cfg: &LoopConfig, system: &SystemConfig, probe: S, relay: R) -> Self {
        Self {
            id: cfg.id,
            target_c: cfg.target_c,
            max_c: cfg.max_c,
            allowance_c: system.temp_allowance_c,
            state: LoopState::Cooling,
            output_active: false,
            probe,
            relay,
            desync: DesyncDetector::new(system.desync_grace_ms, system.desync_min_rise_c),
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// True iff the relay output is currently commanded active. Consumed
    /// by the status indicator only; loops never query each other.
    pub fn is_heating(&self) -> bool {
        self.output_active
    }

    /// Access to the underlying probe.
    pub fn probe(&self) -> &S {
        &self.probe
    }

    /// Access to the underlying relay.
    pub fn relay(&self) -> &R {
        &self.relay
    }
}

impl<S, R: RelayPort> LoopController<S, R> {
    /// Drive the relay to its inactive power-on level. Called once at
    /// startup before the first control tick.
    pub fn begin(&mut self) {
        self.relay.set_active(false);
        self.output_active = false;
    }

    /// Force the output inactive and the state to OFF.
    ///
    /// Anything may turn a loop off; only the hysteresis rule in COOLING
    /// may ever turn one on. Idempotent: calling this on an already-off
    /// loop performs no relay write.
    pub fn force_off(&mut self) {
        self.deactivate_output();
        self.state = LoopState::Off;
    }

    fn activate_output(&mut self) {
        if self.output_active {
            return;
        }
        self.relay.set_active(true);
        self.output_active = true;
    }

    fn deactivate_output(&mut self) {
        if !self.output_active {
            return;
        }
        self.relay.set_active(false);
        self.output_active = false;
    }
}

impl<S: TemperatureProbe, R: RelayPort> LoopController<S, R> {
    /// Run one full sampling tick: read the probe, evaluate the
    /// transition table once, report the resulting (state, temperature)
    /// pair. Skipped entirely when this loop is already OFF or the global
    /// latch has tripped.
    pub fn poll(&mut self, now_ms: u32, latch: &mut FaultLatch, sink: &mut impl EventSink) {
        if self.state == LoopState::Off {
            return;
        }
        if latch.is_triggered() {
            // Another loop tripped the latch since our last tick;
            // converge to OFF without sampling.
            self.force_off();
            return;
        }

        let temp_c = match self.probe.read_celsius() {
            Ok(t) => t,
            Err(e) => {
                warn!("loop {}: probe read failed ({e}) — fail-safe off", self.id);
                latch.start_fault(
                    FaultCause::SensorDisconnected,
                    self.id,
                    "probe-read",
                    now_ms,
                    sink,
                );
                self.force_off();
                return;
            }
        };

        self.step(now_ms, temp_c, latch, sink);
        sink.emit(&StatusEvent::LoopStatus {
            loop_id: self.id,
            temperature_c: temp_c,
            state: self.state,
        });
    }

    /// The transition table, evaluated exactly once per sampling tick.
    fn step(&mut self, now_ms: u32, temp_c: f32, latch: &mut FaultLatch, sink: &mut impl EventSink) {
        // Over-temperature cutoff outranks every hysteresis rule.
        if temp_c >= self.max_c {
            latch.start_fault(FaultCause::OverMax, self.id, "over-max-cutoff", now_ms, sink);
            self.force_off();
            return;
        }

        match self.state {
            LoopState::Off => {}
            LoopState::Heating => {
                if self.desync.update(now_ms, temp_c) {
                    latch.start_fault(
                        FaultCause::DesyncNoRise,
                        self.id,
                        "desync-watchdog",
                        now_ms,
                        sink,
                    );
                    self.force_off();
                } else if temp_c >= self.target_c + self.allowance_c {
                    self.deactivate_output();
                    self.state = LoopState::Cooling;
                    debug!("loop {}: HEATING -> COOLING at {temp_c:.2}C", self.id);
                }
            }
            LoopState::Cooling => {
                if temp_c <= self.target_c - self.allowance_c {
                    self.desync.reset();
                    self.activate_output();
                    self.state = LoopState::Heating;
                    debug!("loop {}: COOLING -> HEATING at {temp_c:.2}C", self.id);
                }
            }
        }
    }
}
