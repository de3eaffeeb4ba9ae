//! DS18B20 digital temperature probe, one probe per one-wire bus.
//!
//! Each heating loop gets its own dedicated bus pin, so device addressing
//! uses SKIP ROM throughout and the ROM search is unnecessary. The probe
//! runs at the power-on 12-bit resolution (0.0625 C steps, 750 ms
//! conversion).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the one-wire protocol on an open-drain GPIO
//! (external 4.7 kOhm pull-up) using raw sys calls.
//! On host/test: reads an injected milli-degree value per bus pin, with a
//! sentinel for a disconnected probe.

use crate::app::ports::TemperatureProbe;
use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(target_os = "espidf")]
const SKIP_ROM: u8 = 0xCC;
#[cfg(target_os = "espidf")]
const CONVERT_T: u8 = 0x44;
#[cfg(target_os = "espidf")]
const READ_SCRATCHPAD: u8 = 0xBE;

/// 12-bit conversion worst case, per datasheet.
#[cfg(target_os = "espidf")]
const CONVERSION_TIMEOUT_MS: u32 = 800;

/// Dallas CRC-8 (poly 0x8C, reflected). The scratchpad carries its CRC in
/// byte 8; a frame of all-ones from a missing device fails this check.
fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &b in data {
        let mut byte = b;
        for _ in 0..8 {
            let mix = (crc ^ byte) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            byte >>= 1;
        }
    }
    crc
}

/// Raw scratchpad LSB/MSB to degrees Celsius (1/16 C per LSB).
fn scratchpad_to_celsius(lsb: u8, msb: u8) -> f32 {
    f32::from(i16::from_le_bytes([lsb, msb])) / 16.0
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub mod sim {
    //! Per-bus-pin temperature injection for host builds.

    use core::sync::atomic::{AtomicI32, Ordering};

    /// Sentinel: the probe on this pin answers no presence pulse.
    pub const DISCONNECTED: i32 = i32::MIN;

    const SLOTS: usize = 8;
    static TEMP_MILLI_C: [AtomicI32; SLOTS] = [const { AtomicI32::new(25_000) }; SLOTS];

    fn slot(gpio: i32) -> &'static AtomicI32 {
        &TEMP_MILLI_C[gpio.unsigned_abs() as usize % SLOTS]
    }

    pub fn set_milli_c(gpio: i32, milli_c: i32) {
        slot(gpio).store(milli_c, Ordering::Relaxed);
    }

    pub fn disconnect(gpio: i32) {
        set_milli_c(gpio, DISCONNECTED);
    }

    pub(super) fn read_milli_c(gpio: i32) -> i32 {
        slot(gpio).load(Ordering::Relaxed)
    }
}

// ── Probe ─────────────────────────────────────────────────────

/// One DS18B20 on a dedicated one-wire bus pin.
pub struct Ds18b20Probe {
    gpio: i32,
}

impl Ds18b20Probe {
    /// The bus pin must already be configured open-drain by
    /// `hw_init::init_peripherals`.
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl TemperatureProbe for Ds18b20Probe {
    #[cfg(target_os = "espidf")]
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.reset()?;
        self.write_byte(SKIP_ROM);
        self.write_byte(CONVERT_T);
        self.wait_conversion()?;

        self.reset()?;
        self.write_byte(SKIP_ROM);
        self.write_byte(READ_SCRATCHPAD);

        let mut buf = [0u8; 9];
        for b in &mut buf {
            *b = self.read_byte();
        }
        if crc8(&buf[..8]) != buf[8] {
            return Err(SensorError::CrcMismatch);
        }
        Ok(scratchpad_to_celsius(buf[0], buf[1]))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        match sim::read_milli_c(self.gpio) {
            sim::DISCONNECTED => Err(SensorError::Disconnected),
            milli_c => Ok(milli_c as f32 / 1000.0),
        }
    }
}

// ── Bit-bang transport (ESP-IDF only) ─────────────────────────
//
// Standard-speed one-wire timings; slot widths follow the DS18B20
// datasheet. The pin is open-drain: "release" means input (pull-up takes
// the bus high), "pull" means drive low.

#[cfg(target_os = "espidf")]
impl Ds18b20Probe {
    /// Reset pulse + presence detect. No presence means the probe is
    /// unplugged or the bus is shorted.
    fn reset(&mut self) -> Result<(), SensorError> {
        hw_init::gpio_write(self.gpio, false);
        hw_init::delay_us(480);
        hw_init::gpio_write(self.gpio, true);
        hw_init::delay_us(70);
        let present = !hw_init::gpio_read(self.gpio);
        hw_init::delay_us(410);
        if present {
            Ok(())
        } else {
            Err(SensorError::Disconnected)
        }
    }

    fn write_bit(&mut self, bit: bool) {
        if bit {
            hw_init::gpio_write(self.gpio, false);
            hw_init::delay_us(10);
            hw_init::gpio_write(self.gpio, true);
            hw_init::delay_us(55);
        } else {
            hw_init::gpio_write(self.gpio, false);
            hw_init::delay_us(65);
            hw_init::gpio_write(self.gpio, true);
            hw_init::delay_us(5);
        }
    }

    fn read_bit(&mut self) -> bool {
        hw_init::gpio_write(self.gpio, false);
        hw_init::delay_us(3);
        hw_init::gpio_write(self.gpio, true);
        hw_init::delay_us(10);
        let bit = hw_init::gpio_read(self.gpio);
        hw_init::delay_us(53);
        bit
    }

    fn write_byte(&mut self, byte: u8) {
        for i in 0..8 {
            self.write_bit((byte >> i) & 1 == 1);
        }
    }

    fn read_byte(&mut self) -> u8 {
        let mut ret = 0u8;
        for i in 0..8 {
            if self.read_bit() {
                ret |= 1 << i;
            }
        }
        ret
    }

    /// The probe holds the bus low while converting and releases it when
    /// done. Poll at 10 ms so the FreeRTOS idle task keeps running.
    fn wait_conversion(&mut self) -> Result<(), SensorError> {
        let mut waited_ms = 0u32;
        while !self.read_bit() {
            if waited_ms >= CONVERSION_TIMEOUT_MS {
                return Err(SensorError::Disconnected);
            }
            esp_idf_hal::delay::FreeRtos::delay_ms(10);
            waited_ms += 10;
        }
        Ok(())
    }
}
