//! End-to-end control scenarios: supervisor + loops + latch + mocks.
//!
//! Timelines tick in 2000 ms steps to line up with the default sampling
//! interval; the supervisor is free-run between samples where blink
//! behaviour matters (see `indicator_tests`).

use crate::mock_hw::{MockPanel, MockProbe, MockRelay, RecordingSink};
use thermoguard::app::events::StatusEvent;
use thermoguard::app::ports::RelayPort;
use thermoguard::app::service::HeaterSupervisor;
use thermoguard::config::{LoopConfig, SystemConfig};
use thermoguard::control::thermostat::LoopState;
use thermoguard::error::{FaultCause, SensorError};
use thermoguard::fault::ShutdownAction;

const INTERVAL: u32 = 2000;

struct Rig {
    sup: HeaterSupervisor<MockProbe, MockRelay>,
    probes: Vec<MockProbe>,
    relays: Vec<MockRelay>,
    panel: MockPanel,
    sink: RecordingSink,
}

impl Rig {
    /// Build a supervisor over the given wiring table, with shutdown
    /// actions that kill every relay, the way `main()` wires it.
    fn new(loops: &[LoopConfig]) -> Self {
        let mut sup = HeaterSupervisor::new(SystemConfig::default()).unwrap();
        let mut probes = Vec::new();
        let mut relays = Vec::new();
        let mut actions: Vec<ShutdownAction> = Vec::new();

        for cfg in loops {
            let probe = MockProbe::new(25.0);
            let relay = MockRelay::new();
            sup.add_loop(cfg, probe.clone(), relay.clone()).unwrap();
            let mut kill = relay.clone();
            actions.push(Box::new(move || kill.set_active(false)));
            probes.push(probe);
            relays.push(relay);
        }
        sup.register_shutdown_actions(actions).unwrap();

        Self {
            sup,
            probes,
            relays,
            panel: MockPanel::default(),
            sink: RecordingSink::new(),
        }
    }

    fn tick(&mut self, now_ms: u32) {
        self.sup.tick(now_ms, &mut self.panel, &mut self.sink);
    }

    /// Sample once per interval from `from_ms` up to and including `to_ms`.
    fn run(&mut self, from_ms: u32, to_ms: u32) {
        let mut t = from_ms;
        while t <= to_ms {
            self.tick(t);
            t += INTERVAL;
        }
    }
}

fn one_loop(target_c: f32, max_c: f32) -> Vec<LoopConfig> {
    vec![LoopConfig {
        id: 1,
        target_c,
        max_c,
    }]
}

fn two_loops() -> Vec<LoopConfig> {
    vec![
        LoopConfig {
            id: 1,
            target_c: 24.0,
            max_c: 28.0,
        },
        LoopConfig {
            id: 2,
            target_c: 25.0,
            max_c: 28.0,
        },
    ]
}

#[test]
fn startup_emits_started_event() {
    let mut rig = Rig::new(&two_loops());
    rig.sup.start(&mut rig.sink);
    assert_eq!(rig.sink.events, vec![StatusEvent::Started { loop_count: 2 }]);
}

#[test]
fn hysteresis_cycle_end_to_end() {
    let mut rig = Rig::new(&one_loop(24.0, 28.0));

    // Warm water: stays cooling, relay untouched after the begin() write.
    rig.probes[0].set(25.0);
    rig.tick(2000);
    assert!(!rig.relays[0].is_active());
    assert_eq!(rig.sup.loop_states()[0].1, LoopState::Cooling);

    // Water cools through the lower band edge: heater on.
    rig.probes[0].set(23.7);
    rig.tick(4000);
    assert!(rig.relays[0].is_active());
    assert_eq!(rig.sup.loop_states()[0].1, LoopState::Heating);

    // Inside the band: no edge either way.
    rig.probes[0].set(24.1);
    rig.tick(6000);
    assert!(rig.relays[0].is_active());

    // Through the upper band edge: heater off, back to cooling.
    rig.probes[0].set(24.3);
    rig.tick(8000);
    assert!(!rig.relays[0].is_active());
    assert_eq!(rig.sup.loop_states()[0].1, LoopState::Cooling);

    // begin() off, heat on, heat off: exactly three relay edges.
    assert_eq!(rig.relays[0].writes(), vec![false, true, false]);
    assert!(!rig.sup.is_faulted());

    // Every sample produced a status line with the sampled temperature.
    let temps: Vec<f32> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            StatusEvent::LoopStatus { temperature_c, .. } => Some(*temperature_c),
            _ => None,
        })
        .collect();
    assert_eq!(temps, vec![25.0, 23.7, 24.1, 24.3]);
}

#[test]
fn over_max_latches_and_kills_every_relay() {
    let mut rig = Rig::new(&two_loops());
    rig.probes[0].set(23.0);
    rig.probes[1].set(23.0);
    rig.tick(2000);
    assert!(rig.relays[0].is_active());
    assert!(rig.relays[1].is_active());

    // Loop 2 runs away past its cutoff.
    rig.probes[1].set(28.6);
    rig.tick(4000);

    assert!(rig.sup.is_faulted());
    let record = rig.sup.fault_record().unwrap();
    assert_eq!(record.cause, FaultCause::OverMax);
    assert_eq!(record.origin_id, 2);
    assert_eq!(record.at_ms, 4000);

    // Shutdown actions covered both relays, not just the faulting loop's.
    assert!(!rig.relays[0].is_active());
    assert!(!rig.relays[1].is_active());
    assert_eq!(rig.sink.fault_count(), 1);
}

#[test]
fn disconnected_probe_faults_without_status_line() {
    let mut rig = Rig::new(&one_loop(24.0, 28.0));
    rig.probes[0].set(25.0);
    rig.tick(2000);

    rig.probes[0].fail(SensorError::Disconnected);
    rig.tick(4000);

    let record = rig.sup.fault_record().unwrap();
    assert_eq!(record.cause, FaultCause::SensorDisconnected);
    assert_eq!(record.origin_id, 1);

    // The failed sample produced a fault event but no temperature line.
    let status_lines = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, StatusEvent::LoopStatus { .. }))
        .count();
    assert_eq!(status_lines, 1); // only the first, healthy, sample
}

#[test]
fn desync_watchdog_fires_after_grace_of_flat_heating() {
    let mut rig = Rig::new(&one_loop(24.0, 28.0));

    // Heating starts at t=2000; the watchdog baseline lands on the next
    // sample. Temperature never moves.
    rig.probes[0].set(23.0);
    rig.run(2000, 182_000);
    assert!(!rig.sup.is_faulted());

    rig.tick(184_000);
    let record = rig.sup.fault_record().unwrap();
    assert_eq!(record.cause, FaultCause::DesyncNoRise);
    assert_eq!(record.at_ms, 184_000);
    assert!(!rig.relays[0].is_active());
}

#[test]
fn slow_but_real_rise_keeps_the_watchdog_quiet() {
    let mut rig = Rig::new(&one_loop(30.0, 35.0));

    // 0.02 C per sample: ~1.8 C over the grace window, well past the
    // minimum rise, but far from the 30 C target.
    let mut temp = 23.0;
    rig.probes[0].set(temp);
    let mut t = 2000;
    while t <= 200_000 {
        rig.tick(t);
        temp += 0.02;
        rig.probes[0].set(temp);
        t += INTERVAL;
    }

    assert!(!rig.sup.is_faulted());
    assert!(rig.sup.any_heating());
}

#[test]
fn latch_survives_demand_for_heat() {
    let mut rig = Rig::new(&two_loops());
    rig.probes[0].set(29.0); // over max on the very first sample
    rig.tick(2000);
    assert!(rig.sup.is_faulted());

    // Cold water everywhere afterwards: nothing may re-heat.
    rig.probes[0].set(18.0);
    rig.probes[1].set(18.0);
    rig.run(4000, 60_000);

    assert!(!rig.relays[0].is_active());
    assert!(!rig.relays[1].is_active());
    for (_, state) in rig.sup.loop_states() {
        assert_eq!(state, LoopState::Off);
    }
    // The original record is untouched and no further fault was emitted.
    assert_eq!(rig.sup.fault_record().unwrap().at_ms, 2000);
    assert_eq!(rig.sink.fault_count(), 1);
}

#[test]
fn first_fault_wins_when_both_loops_are_bad() {
    let mut rig = Rig::new(&two_loops());
    rig.probes[0].set(29.0);
    rig.probes[1].set(29.5);
    rig.tick(2000);

    // Loop 1 polls first; loop 2 is short-circuited by the latch before
    // its probe is even read.
    let record = rig.sup.fault_record().unwrap();
    assert_eq!(record.origin_id, 1);
    assert_eq!(rig.sink.fault_count(), 1);
}
