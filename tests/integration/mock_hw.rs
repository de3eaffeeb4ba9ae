//! Mock hardware adapters for integration tests.
//!
//! Records every relay write and emitted event so tests can assert on the
//! full command history without touching real GPIO registers.

use std::cell::RefCell;
use std::rc::Rc;

use thermoguard::app::events::StatusEvent;
use thermoguard::app::ports::{EventSink, IndicatorPort, RelayPort, TemperatureProbe};
use thermoguard::error::SensorError;

// ── Probe with injectable reading ─────────────────────────────

/// Probe whose reading is set from the test between ticks. Cloned handles
/// share the same reading, mirroring one physical sensor.
#[derive(Clone)]
pub struct MockProbe(Rc<RefCell<Result<f32, SensorError>>>);

#[allow(dead_code)]
impl MockProbe {
    pub fn new(temp_c: f32) -> Self {
        Self(Rc::new(RefCell::new(Ok(temp_c))))
    }

    pub fn set(&self, temp_c: f32) {
        *self.0.borrow_mut() = Ok(temp_c);
    }

    pub fn fail(&self, err: SensorError) {
        *self.0.borrow_mut() = Err(err);
    }
}

impl TemperatureProbe for MockProbe {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        *self.0.borrow()
    }
}

// ── Relay with write history ──────────────────────────────────

/// Relay that records every level write. Cloned handles share the same
/// physical state and history, like a real pin held by the loop and by a
/// latch shutdown action.
#[derive(Clone)]
pub struct MockRelay {
    state: Rc<RefCell<MockRelayState>>,
}

struct MockRelayState {
    active: bool,
    writes: Vec<bool>,
}

#[allow(dead_code)]
impl MockRelay {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockRelayState {
                active: false,
                writes: Vec::new(),
            })),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    pub fn writes(&self) -> Vec<bool> {
        self.state.borrow().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.borrow().writes.len()
    }
}

impl Default for MockRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayPort for MockRelay {
    fn set_active(&mut self, on: bool) {
        let mut s = self.state.borrow_mut();
        s.active = on;
        s.writes.push(on);
    }
}

// ── Indicator panel ───────────────────────────────────────────

#[derive(Default)]
pub struct MockPanel {
    pub lit: bool,
    pub toggles: usize,
}

impl IndicatorPort for MockPanel {
    fn set_on(&mut self, on: bool) {
        if on != self.lit {
            self.toggles += 1;
        }
        self.lit = on;
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<StatusEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fault_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, StatusEvent::Fault(_)))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &StatusEvent) {
        self.events.push(event.clone());
    }
}
