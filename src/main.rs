//! Thermoguard Firmware — Main Entry Point
//!
//! Hexagonal architecture with a cooperative single-threaded control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  Ds18b20Probe     RelayDriver     OnboardLed             │
//! │  (TemperatureProbe) (RelayPort)   (IndicatorPort)        │
//! │  LogEventSink     Esp32Clock                             │
//! │  (EventSink)      (Clock)                                │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │         HeaterSupervisor (pure logic)          │      │
//! │  │  Loops · FaultLatch · StatusIndicator          │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use thermoguard::adapters::{Esp32Clock, LogEventSink};
use thermoguard::app::ports::{Clock, RelayPort};
use thermoguard::app::service::HeaterSupervisor;
use thermoguard::config::{LoopConfig, SystemConfig};
use thermoguard::drivers::{hw_init, OnboardLed, RelayDriver};
use thermoguard::fault::ShutdownAction;
use thermoguard::pins;
use thermoguard::sensors::Ds18b20Probe;

/// How often the control loop yields back to FreeRTOS. Small enough to
/// keep the fast fault blink (50 ms half-period) visibly regular.
const TICK_SLEEP_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Thermoguard v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt with the
        // relays at their power-on (unpowered) level.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Supervisor + loop wiring table ─────────────────────
    let mut supervisor = HeaterSupervisor::new(SystemConfig::default())?;

    let wiring = [
        (
            LoopConfig {
                id: 1,
                target_c: 24.0,
                max_c: 28.0,
            },
            pins::ONEWIRE_LOOP1_GPIO,
            pins::RELAY_LOOP1_GPIO,
        ),
        (
            LoopConfig {
                id: 2,
                target_c: 25.0,
                max_c: 28.0,
            },
            pins::ONEWIRE_LOOP2_GPIO,
            pins::RELAY_LOOP2_GPIO,
        ),
    ];

    let mut shutdown_actions: Vec<ShutdownAction> = Vec::with_capacity(wiring.len());
    for (cfg, onewire_gpio, relay_gpio) in wiring {
        let relay = RelayDriver::new(relay_gpio);
        // Cloned handle for the latch: same physical pin, independent of
        // the loop controller's borrow.
        let mut kill = relay.clone();
        supervisor.add_loop(&cfg, Ds18b20Probe::new(onewire_gpio), relay)?;
        shutdown_actions.push(Box::new(move || kill.set_active(false)));
    }
    supervisor.register_shutdown_actions(shutdown_actions)?;

    // ── 4. Control loop ───────────────────────────────────────
    let clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();
    let mut led = OnboardLed::new(pins::STATUS_LED_GPIO);

    supervisor.start(&mut sink);

    loop {
        supervisor.tick(clock.now_ms(), &mut led, &mut sink);
        esp_idf_hal::delay::FreeRtos::delay_ms(TICK_SLEEP_MS);
    }
}
