use crate::error::{Result, SHTError};
use crate::mode::Sht3xReader;
use crate::{DeviceAddr, Reading, SHT3x};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;
use log::{debug, trace};

/// Single shot, high repeatability, clock stretching enabled
const MEASURE_HIGH_REPEATABILITY: [u8; 2] = [0x2C, 0x06];

/// Single shot measurement that blocks until the sensor releases the bus.
///
/// The sensor stretches the clock while converting, so on most buses the first
/// read simply blocks. Buses that cannot follow a stretched clock see a NACK
/// instead; the read is then polled every `poll_interval_ms` until `max_wait_ms`
/// have passed. The measurement command is only ever sent once.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SingleShot {
    max_wait_ms: u32,
    poll_interval_ms: u32,
}

impl Default for SingleShot {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleShot {
    pub fn new() -> Self {
        Self {
            max_wait_ms: 100,
            poll_interval_ms: 10,
        }
    }
    /// Sets how long to keep polling a busy sensor before giving up, 0 reads once
    pub fn set_max_wait(&mut self, max_wait_ms: u32) {
        self.max_wait_ms = max_wait_ms
    }
    /// Sets how long to keep polling a busy sensor before giving up, 0 reads once
    pub fn with_max_wait(mut self, max_wait_ms: u32) -> Self {
        self.set_max_wait(max_wait_ms);
        self
    }
    /// Sets the millisecond delay between each poll
    pub fn set_poll_interval(&mut self, poll_interval_ms: u32) {
        self.poll_interval_ms = poll_interval_ms
    }
    /// Sets the millisecond delay between each poll
    pub fn with_poll_interval(mut self, poll_interval_ms: u32) -> Self {
        self.set_poll_interval(poll_interval_ms);
        self
    }

    pub fn max_wait(&self) -> u32 {
        self.max_wait_ms
    }

    pub fn poll_interval(&self) -> u32 {
        self.poll_interval_ms
    }
}

/// Sends the measurement command and returns the raw, unverified response
pub(crate) fn single_shot_read<I2C, D>(
    sensor: &mut SHT3x<I2C, D>,
    address: DeviceAddr,
) -> Result<[u8; 6]>
where
    I2C: i2c::Write + i2c::Read,
    D: DelayMs<u32>,
{
    sensor.i2c_write(address, &MEASURE_HIGH_REPEATABILITY)?;
    debug!("SHT3x {:#x}: measurement triggered", address.addr());

    let mut buffer = [0; 6];
    let mut waited_ms: u32 = 0;

    loop {
        let error = match sensor.i2c_read(address, &mut buffer) {
            Ok(()) => return Ok(buffer),
            Err(error) => error,
        };

        let poll = sensor.mode.poll_interval_ms;
        if poll == 0 || waited_ms.saturating_add(poll) > sensor.mode.max_wait_ms {
            return Err(if waited_ms == 0 {
                error
            } else {
                SHTError::ReadingTimeoutError { waited_ms }
            });
        }

        trace!("SHT3x {:#x}: busy after {} ms", address.addr(), waited_ms);
        sensor.delay.delay_ms(poll);
        waited_ms += poll;
    }
}

impl<I2C, D> Sht3xReader for SHT3x<I2C, D>
where
    I2C: i2c::Write + i2c::Read,
    D: DelayMs<u32>,
{
    /// Runs [`SHT3x::update`] and hands back its outcome as a `Result`
    fn read(&mut self, address: DeviceAddr) -> Result<Reading> {
        self.update(address);

        let state = self.state(address);
        match state.last_error() {
            Some(error) => Err(error),
            None => Ok(state.sample(self.unit)),
        }
    }
}
