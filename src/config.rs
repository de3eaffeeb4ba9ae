//! System configuration parameters
//!
//! All tunable parameters for the Thermoguard controller, plus the static
//! wiring table entries describing each heating loop. Supplied once at
//! startup; never re-read at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Hysteresis ---
    /// Temperature margin (Celsius) applied symmetrically around each
    /// loop's target; no transition occurs inside the band.
    pub temp_allowance_c: f32,

    // --- Desync watchdog ---
    /// Grace window (milliseconds) before "heating but not rising" is
    /// treated as a fault.
    pub desync_grace_ms: u32,
    /// Minimum temperature rise (Celsius) expected within the grace window.
    pub desync_min_rise_c: f32,

    // --- Timing ---
    /// Temperature sampling interval (milliseconds).
    pub sample_interval_ms: u32,

    // --- Status indicator ---
    /// Blink half-period while the fault latch is on (milliseconds).
    pub fault_blink_ms: u32,
    /// Blink half-period while at least one loop is heating.
    pub heating_blink_ms: u32,
    /// Blink half-period while all loops are idle/cooling.
    pub idle_blink_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Hysteresis
            temp_allowance_c: 0.25,

            // Desync watchdog
            desync_grace_ms: 180_000, // 3 minutes
            desync_min_rise_c: 0.25,

            // Timing
            sample_interval_ms: 2000, // 0.5 Hz

            // Indicator
            fault_blink_ms: 50,
            heating_blink_ms: 1000,
            idle_blink_ms: 10_000,
        }
    }
}

impl SystemConfig {
    /// Reject configurations that would disable a safety mechanism.
    /// Invalid values error out rather than being silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.temp_allowance_c <= 0.0 {
            return Err(Error::Config("temp_allowance_c must be positive"));
        }
        if self.desync_min_rise_c <= 0.0 {
            return Err(Error::Config("desync_min_rise_c must be positive"));
        }
        if self.sample_interval_ms == 0 {
            return Err(Error::Config("sample_interval_ms must be non-zero"));
        }
        if self.desync_grace_ms < self.sample_interval_ms {
            return Err(Error::Config(
                "desync_grace_ms shorter than one sampling interval",
            ));
        }
        if self.fault_blink_ms >= self.heating_blink_ms
            || self.heating_blink_ms >= self.idle_blink_ms
        {
            return Err(Error::Config(
                "blink half-periods must satisfy fault < heating < idle",
            ));
        }
        Ok(())
    }
}

/// One entry in the startup wiring table: a single heating loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Unique small loop identifier (appears in every log line and fault record).
    pub id: u8,
    /// Target temperature (Celsius).
    pub target_c: f32,
    /// Maximum safe temperature (Celsius); reaching it latches `OverMax`.
    pub max_c: f32,
}

impl LoopConfig {
    pub fn validate(&self, system: &SystemConfig) -> Result<()> {
        if !self.target_c.is_finite() || !self.max_c.is_finite() {
            return Err(Error::Config("loop temperatures must be finite"));
        }
        // The upper hysteresis edge must stay below the cutoff, otherwise a
        // normal heat-up would trip OverMax before the loop ever idles.
        if self.target_c + system.temp_allowance_c >= self.max_c {
            return Err(Error::Config("target plus allowance must stay below max"));
        }
        Ok(())
    }
}
