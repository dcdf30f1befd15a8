//! Per-address record of the last captured sample and how the last update went.
use crate::conversion::{humidity_from_raw, temperature_from_raw};
use crate::error::{Result, SHTError};
use crate::{Reading, TemperatureUnit};

/// Outcome of the most recent update of a sensor.
///
/// The numeric codes of the measured outcomes are stable and can be handed to
/// callers that only speak integers.
#[repr(u8)]
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum StatusCode {
    Success = 0,
    I2CWriteFailed = 1,
    I2CReadFailed = 2,
    TemperatureChecksumInvalid = 3,
    HumidityChecksumInvalid = 4,
    /// The sensor was never updated, or was reset
    #[default]
    NoReadingYet = 0xFF,
}

impl StatusCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == StatusCode::Success
    }
}

impl From<StatusCode> for u8 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl From<&SHTError> for StatusCode {
    fn from(error: &SHTError) -> Self {
        match error {
            SHTError::WriteI2CError => StatusCode::I2CWriteFailed,
            SHTError::ReadI2CError | SHTError::ReadingTimeoutError { .. } => {
                StatusCode::I2CReadFailed
            }
            SHTError::InvalidTemperatureChecksumError { .. } => {
                StatusCode::TemperatureChecksumInvalid
            }
            SHTError::InvalidHumidityChecksumError { .. } => StatusCode::HumidityChecksumInvalid,
        }
    }
}

/// Last valid raw sample of one sensor together with the outcome of its last update.
///
/// Raw values start at zero and are only replaced by words whose checksum
/// validated, so they may be older than the last update. Look at
/// [`SensorState::status`] before trusting them.
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
pub struct SensorState {
    raw_temperature: u16,
    raw_humidity: u16,
    outcome: Option<Result<()>>,
}

impl SensorState {
    pub fn status(&self) -> StatusCode {
        match &self.outcome {
            None => StatusCode::NoReadingYet,
            Some(Ok(())) => StatusCode::Success,
            Some(Err(error)) => error.into(),
        }
    }

    pub fn last_error(&self) -> Option<SHTError> {
        match self.outcome {
            Some(Err(error)) => Some(error),
            _ => None,
        }
    }

    pub(crate) fn temperature_raw(&self) -> u16 {
        self.raw_temperature
    }

    pub(crate) fn humidity_raw(&self) -> u16 {
        self.raw_humidity
    }

    /// Last valid temperature in degrees Celsius
    pub fn temperature(&self) -> f64 {
        self.temperature_in(TemperatureUnit::Celsius)
    }

    pub fn temperature_in(&self, unit: TemperatureUnit) -> f64 {
        temperature_from_raw(self.raw_temperature, unit)
    }

    /// Last valid relative humidity in percent
    pub fn humidity(&self) -> f64 {
        humidity_from_raw(self.raw_humidity)
    }

    /// Both values, but only if the last update succeeded
    pub fn reading(&self, unit: TemperatureUnit) -> Option<Reading> {
        if self.status().is_success() {
            Some(self.sample(unit))
        } else {
            None
        }
    }

    pub(crate) fn sample(&self, unit: TemperatureUnit) -> Reading {
        Reading {
            temperature: self.temperature_in(unit),
            humidity: self.humidity(),
        }
    }

    /// Stores the words that validated. A bad temperature word is reported
    /// ahead of a bad humidity word.
    pub(crate) fn record_sample(
        &mut self,
        temperature: Result<u16>,
        humidity: Result<u16>,
    ) -> StatusCode {
        if let Ok(raw) = temperature {
            self.raw_temperature = raw;
        }
        if let Ok(raw) = humidity {
            self.raw_humidity = raw;
        }

        self.outcome = Some(temperature.and(humidity).map(|_| ()));
        self.status()
    }

    pub(crate) fn record_failure(&mut self, error: SHTError) {
        self.outcome = Some(Err(error));
    }
}
