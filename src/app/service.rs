//! Heater supervisor — the hexagonal core.
//!
//! [`HeaterSupervisor`] owns the fault latch, the loop registry, and the
//! status indicator engine, and exposes a clean hardware-agnostic API.
//! All I/O flows through port traits injected at call sites, making the
//! whole control core testable with mock adapters.
//!
//! ```text
//!  TemperatureProbe ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                       │     HeaterSupervisor      │
//!        RelayPort ◀────│  Loops · Latch · Blinker  │──▶ IndicatorPort
//!                       └──────────────────────────┘
//! ```
//!
//! Scheduling is cooperative and single-threaded: the run loop calls
//! [`tick`](HeaterSupervisor::tick) as fast as it likes; the indicator is
//! refreshed on every call while the loops sample only when the fixed
//! interval has elapsed on the monotonic millisecond clock.

use heapless::Vec;
use log::info;

use crate::config::{LoopConfig, SystemConfig};
use crate::control::thermostat::{LoopController, LoopState};
use crate::error::{Error, FaultCause, Result};
use crate::fault::{FaultLatch, FaultRecord, ShutdownAction};
use crate::indicator::StatusIndicator;

use super::events::StatusEvent;
use super::ports::{EventSink, IndicatorPort, RelayPort, TemperatureProbe};

/// Fixed capacity of the loop registry.
pub const MAX_LOOPS: usize = 4;

/// Orchestrates every heating loop plus the shared latch and indicator.
pub struct HeaterSupervisor<S, R> {
    config: SystemConfig,
    latch: FaultLatch,
    loops: Vec<LoopController<S, R>, MAX_LOOPS>,
    indicator: StatusIndicator,
    last_sample_ms: u32,
}

impl<S, R> HeaterSupervisor<S, R> {
    /// Build an empty supervisor. Loops and shutdown actions are wired
    /// afterwards, before the first tick.
    pub fn new(config: SystemConfig) -> Result<Self> {
        config.validate()?;
        let indicator = StatusIndicator::new(&config);
        Ok(Self {
            config,
            latch: FaultLatch::new(),
            loops: Vec::new(),
            indicator,
            last_sample_ms: 0,
        })
    }

    /// Register the per-loop shutdown actions with the latch, in loop
    /// order. Fatal on overflow — abort startup, never run partially
    /// covered.
    pub fn register_shutdown_actions(
        &mut self,
        actions: impl IntoIterator<Item = ShutdownAction>,
    ) -> Result<()> {
        self.latch.register_shutdown_actions(actions)
    }

    /// Pure query on the shared latch.
    pub fn is_faulted(&self) -> bool {
        self.latch.is_triggered()
    }

    /// The authoritative first-fault record, once latched.
    pub fn fault_record(&self) -> Option<&FaultRecord> {
        self.latch.record()
    }

    /// Read-only view of the registered loops (for status displays).
    pub fn loops(&self) -> &[LoopController<S, R>] {
        &self.loops
    }

    /// True iff any registered loop currently drives its relay.
    pub fn any_heating(&self) -> bool {
        self.loops.iter().any(LoopController::is_heating)
    }

    /// Current (id, state) pairs, in registration order.
    pub fn loop_states(&self) -> Vec<(u8, LoopState), MAX_LOOPS> {
        self.loops.iter().map(|c| (c.id(), c.state())).collect()
    }
}

impl<S, R: RelayPort> HeaterSupervisor<S, R> {
    /// Validate a wiring-table entry, build its loop controller, drive the
    /// relay to its inactive level, and add it to the registry.
    ///
    /// Fails with [`FaultCause::RegistrationOverflow`] beyond capacity.
    pub fn add_loop(&mut self, cfg: &LoopConfig, probe: S, relay: R) -> Result<()> {
        cfg.validate(&self.config)?;
        let mut ctrl = LoopController::new(cfg, &self.config, probe, relay);
        ctrl.begin();
        self.loops
            .push(ctrl)
            .map_err(|_| Error::Fault(FaultCause::RegistrationOverflow))?;
        info!(
            "loop {} registered: target {:.2}C (+/-{:.2}), max {:.2}C",
            cfg.id, cfg.target_c, self.config.temp_allowance_c, cfg.max_c
        );
        Ok(())
    }
}

impl<S: TemperatureProbe, R: RelayPort> HeaterSupervisor<S, R> {
    /// Announce startup once all wiring is done.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!(
            "thermoguard supervising {} loop(s), sampling every {}ms",
            self.loops.len(),
            self.config.sample_interval_ms
        );
        sink.emit(&StatusEvent::Started {
            loop_count: self.loops.len(),
        });
    }

    /// One cooperative scheduler iteration.
    ///
    /// The indicator is refreshed every call. The loops run their full
    /// sample-and-step sequence only when the sampling interval has
    /// elapsed (wraparound-safe); a triggered latch short-circuits the
    /// whole sampling pass and instead re-reports the latched record.
    pub fn tick(
        &mut self,
        now_ms: u32,
        indicator: &mut impl IndicatorPort,
        sink: &mut impl EventSink,
    ) {
        if now_ms.wrapping_sub(self.last_sample_ms) >= self.config.sample_interval_ms {
            self.last_sample_ms = now_ms;

            if self.latch.is_triggered() {
                // Loops that have not run since the latch tripped still
                // converge here; force_off is a no-op for the rest.
                for ctrl in &mut self.loops {
                    ctrl.force_off();
                }
                if let Some(rec) = self.latch.record() {
                    info!("fault latched: {rec}");
                }
            } else {
                for ctrl in &mut self.loops {
                    ctrl.poll(now_ms, &mut self.latch, sink);
                }
            }
        }

        let any_heating = self.loops.iter().any(LoopController::is_heating);
        let phase = self
            .indicator
            .update(now_ms, self.latch.is_triggered(), any_heating);
        indicator.set_on(phase);
    }
}
