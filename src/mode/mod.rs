use crate::error::Result;
use crate::{DeviceAddr, Reading};

mod single_shot;
pub(crate) use single_shot::single_shot_read;
pub use single_shot::SingleShot;

pub trait Sht3xReader {
    /// Measure the sensor at `address` and return the reading or why there is none
    fn read(&mut self, address: DeviceAddr) -> Result<Reading>;
}
