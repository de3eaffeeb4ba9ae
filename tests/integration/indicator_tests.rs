//! Status LED behaviour through the full supervisor, free-running at the
//! 10 ms scheduler cadence the firmware uses. The blink rate must track
//! the aggregate system state, not the sampling interval.

use crate::mock_hw::{MockPanel, MockProbe, MockRelay, RecordingSink};
use thermoguard::app::service::HeaterSupervisor;
use thermoguard::config::{LoopConfig, SystemConfig};

const STEP: u32 = 10;

struct Rig {
    sup: HeaterSupervisor<MockProbe, MockRelay>,
    probe: MockProbe,
    panel: MockPanel,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        let mut sup = HeaterSupervisor::new(SystemConfig::default()).unwrap();
        let probe = MockProbe::new(25.0);
        sup.add_loop(
            &LoopConfig {
                id: 1,
                target_c: 24.0,
                max_c: 28.0,
            },
            probe.clone(),
            MockRelay::new(),
        )
        .unwrap();
        Self {
            sup,
            probe,
            panel: MockPanel::default(),
            sink: RecordingSink::new(),
        }
    }

    /// Free-run at the firmware tick rate, inclusive of both ends.
    fn run(&mut self, from_ms: u32, to_ms: u32) {
        let mut t = from_ms;
        while t <= to_ms {
            self.sup.tick(t, &mut self.panel, &mut self.sink);
            t += STEP;
        }
    }
}

#[test]
fn idle_blink_holds_for_ten_seconds() {
    let mut rig = Rig::new();
    rig.run(0, 9_990);
    assert!(rig.panel.lit);
    assert_eq!(rig.panel.toggles, 1); // off -> on at t=0 only

    rig.run(10_000, 10_000);
    assert!(!rig.panel.lit);
}

#[test]
fn heating_blinks_at_one_second() {
    let mut rig = Rig::new();
    rig.probe.set(23.0);

    // Heating starts on the first sample at t=2000 and resets the phase.
    rig.run(0, 2_990);
    assert!(rig.panel.lit);

    rig.run(3_000, 3_000);
    assert!(!rig.panel.lit);
    rig.run(3_010, 4_000);
    assert!(rig.panel.lit);
}

#[test]
fn fault_blinks_fast_and_forever() {
    let mut rig = Rig::new();
    rig.probe.set(29.0); // over max on the first sample

    rig.run(0, 2_000);
    assert!(rig.sup.is_faulted());
    assert!(rig.panel.lit);

    let toggles_before = rig.panel.toggles;
    rig.run(2_010, 3_000);
    // 50 ms half-period over a 1 s window: 20 phase flips.
    assert_eq!(rig.panel.toggles - toggles_before, 20);

    // Long after the fault the LED is still strobing.
    let toggles_before = rig.panel.toggles;
    rig.run(3_010, 60_000);
    assert!(rig.panel.toggles > toggles_before);
}
