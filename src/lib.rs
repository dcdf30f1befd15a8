//! Blocking single-shot driver for the Sensirion SHT3x family (SHT30, SHT31, SHT35).
//!
//! The driver triggers a high repeatability measurement with clock stretching
//! enabled, reads the six byte response, validates both CRCs and keeps the last
//! valid sample per sensor address. Failures never panic or propagate out of
//! [`SHT3x::update`]; they are reported through [`SHT3x::status`].
//!
//! ```ignore
//! let mut sht = SHT3x::new(i2c, delay);
//! sht.update(DeviceAddr::AD0);
//! if sht.status(DeviceAddr::AD0).is_success() {
//!     log::info!("{} C {} %RH", sht.temperature(DeviceAddr::AD0), sht.humidity(DeviceAddr::AD0));
//! }
//! ```
pub mod conversion;
pub mod error;
pub mod mode;
pub mod state;

use crc::{Algorithm, Crc};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;
use error::{Result, SHTError};
use log::{debug, warn};
use mode::SingleShot;
use state::{SensorState, StatusCode};

pub mod prelude {
    pub use super::{
        mode::Sht3xReader, mode::SingleShot, state::SensorState, state::StatusCode, DeviceAddr,
        Reading, TemperatureUnit, SHT3x,
    };
}

const CRC_ALGORITHM: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

/// The temperature and humidity sensor driver, holding the state of every sensor address
#[derive(Clone, Debug)]
pub struct SHT3x<I2C, D> {
    mode: SingleShot,
    i2c: I2C,
    delay: D,
    unit: TemperatureUnit,
    sensors: [SensorState; 2],
}

/// Represents the reading gotten from the sensor
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
}

/// The two supported I2C addresses, selected with the ADDR pin
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum DeviceAddr {
    #[default]
    AD0 = 0x44,
    AD1 = 0x45,
}

impl DeviceAddr {
    /// Every address a sensor can be strapped to
    pub const ALL: [DeviceAddr; 2] = [DeviceAddr::AD0, DeviceAddr::AD1];

    /// 7-bit address as expected by `embedded-hal`
    pub fn addr(self) -> u8 {
        self as u8
    }

    /// 8-bit form with room for the read/write bit, for buses that want it pre-shifted
    pub fn shifted(self) -> u8 {
        (self as u8) << 1
    }

    fn index(self) -> usize {
        match self {
            DeviceAddr::AD0 => 0,
            DeviceAddr::AD1 => 1,
        }
    }
}

/// Influences what the reading temperature numbers are
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Merges two bytes so the result is both, ex merge_bytes(0x20, 0x33) = 0x2033
fn merge_bytes(a: u8, b: u8) -> u16 {
    u16::from_be_bytes([a, b])
}

/// CRC-8 used by the sensor on every transmitted word
pub fn checksum(data: &[u8]) -> u8 {
    let crc = Crc::<u8>::new(&CRC_ALGORITHM);
    crc.checksum(data)
}

/// Verifies the temperature word of a response against its checksum
fn verify_temperature(buffer: [u8; 6]) -> Result<u16> {
    let calculated = checksum(&buffer[0..2]);
    if calculated != buffer[2] {
        return Err(SHTError::InvalidTemperatureChecksumError {
            bytes_start: buffer[0],
            bytes_end: buffer[1],
            expected_checksum: buffer[2],
            calculated_checksum: calculated,
        });
    }
    Ok(merge_bytes(buffer[0], buffer[1]))
}

/// Verifies the humidity word of a response against its checksum
fn verify_humidity(buffer: [u8; 6]) -> Result<u16> {
    let calculated = checksum(&buffer[3..5]);
    if calculated != buffer[5] {
        return Err(SHTError::InvalidHumidityChecksumError {
            bytes_start: buffer[3],
            bytes_end: buffer[4],
            expected_checksum: buffer[5],
            calculated_checksum: calculated,
        });
    }
    Ok(merge_bytes(buffer[3], buffer[4]))
}

impl<I2C, D> SHT3x<I2C, D> {
    /// Create a new driver, no bus traffic happens until [`SHT3x::update`]
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            mode: SingleShot::new(),
            i2c,
            delay,
            unit: TemperatureUnit::default(),
            sensors: [SensorState::default(); 2],
        }
    }

    /// Changes how long a measurement may keep the bus busy
    pub fn with_mode(mut self, mode: SingleShot) -> Self {
        self.mode = mode;
        self
    }

    /// Changes how long a measurement may keep the bus busy
    pub fn set_mode(&mut self, mode: SingleShot) {
        self.mode = mode;
    }

    pub fn mode(&self) -> SingleShot {
        self.mode
    }

    /// Change the sensor's temperature unit
    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    /// Change the sensor's temperature unit
    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Snapshot of everything known about the sensor at `address`
    pub fn state(&self, address: DeviceAddr) -> SensorState {
        self.sensors[address.index()]
    }

    /// Outcome of the most recent update of `address`
    pub fn status(&self, address: DeviceAddr) -> StatusCode {
        self.sensors[address.index()].status()
    }

    /// Error behind the most recent failed update of `address`, if it failed
    pub fn last_error(&self, address: DeviceAddr) -> Option<SHTError> {
        self.sensors[address.index()].last_error()
    }

    /// Last valid temperature of `address` in the configured unit.
    ///
    /// Check [`SHT3x::status`] first: after a failed update this is the previous
    /// valid value, and before the first one it is the value of a zero raw sample.
    pub fn temperature(&self, address: DeviceAddr) -> f64 {
        self.sensors[address.index()].temperature_in(self.unit)
    }

    /// Last valid relative humidity of `address` in percent
    pub fn humidity(&self, address: DeviceAddr) -> f64 {
        self.sensors[address.index()].humidity()
    }

    /// Both values, only when the last update of `address` succeeded
    pub fn reading(&self, address: DeviceAddr) -> Option<Reading> {
        self.sensors[address.index()].reading(self.unit)
    }

    #[allow(dead_code)]
    pub(crate) fn temperature_raw(&self, address: DeviceAddr) -> u16 {
        self.sensors[address.index()].temperature_raw()
    }

    #[allow(dead_code)]
    pub(crate) fn humidity_raw(&self, address: DeviceAddr) -> u16 {
        self.sensors[address.index()].humidity_raw()
    }

    /// Forget everything stored for `address`
    pub fn reset(&mut self, address: DeviceAddr) {
        self.sensors[address.index()] = SensorState::default();
    }

    /// Forget everything stored for every address
    pub fn reset_all(&mut self) {
        self.sensors = [SensorState::default(); 2];
    }

    /// Give back the bus and the delay provider
    pub fn destroy(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> SHT3x<I2C, D>
where
    I2C: i2c::Write + i2c::Read,
    D: DelayMs<u32>,
{
    /// Triggers a measurement on `address` and stores the outcome.
    ///
    /// Only words whose checksum validated are stored, so a failed update leaves
    /// the previous valid values in place.
    pub fn update(&mut self, address: DeviceAddr) {
        let outcome = mode::single_shot_read(self, address);
        let state = &mut self.sensors[address.index()];

        match outcome {
            Ok(buffer) => {
                let status = state.record_sample(verify_temperature(buffer), verify_humidity(buffer));
                if status.is_success() {
                    debug!(
                        "SHT3x {:#x}: raw temperature {:#06x}, raw humidity {:#06x}",
                        address.addr(),
                        state.temperature_raw(),
                        state.humidity_raw()
                    );
                } else if let Some(error) = state.last_error() {
                    warn!("SHT3x {:#x}: {}", address.addr(), error);
                }
            }
            Err(error) => {
                warn!("SHT3x {:#x}: {}", address.addr(), error);
                state.record_failure(error);
            }
        }
    }

    fn i2c_write(&mut self, address: DeviceAddr, bytes: &[u8]) -> Result<()> {
        match self.i2c.write(address.addr(), bytes) {
            Ok(res) => Ok(res),
            Err(_) => Err(SHTError::WriteI2CError),
        }
    }

    fn i2c_read(&mut self, address: DeviceAddr, buffer: &mut [u8]) -> Result<()> {
        match self.i2c.read(address.addr(), buffer) {
            Ok(res) => Ok(res),
            Err(_) => Err(SHTError::ReadI2CError),
        }
    }
}
