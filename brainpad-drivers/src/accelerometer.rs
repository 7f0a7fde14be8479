//! MMA7660 3-axis accelerometer
//!
//! The MMA7660 reports each axis as a 6-bit two's complement count, about
//! 21.3 counts per g. Bit 6 of every output register is the ALERT flag: it
//! is set when the read raced an update, and the register must be read
//! again.

use brainpad_hal::RegisterBus;

use crate::error::SensorError;

/// Factory I2C address
pub const DEFAULT_ADDRESS: u8 = 0x4C;

/// MMA7660 registers
pub mod reg {
    pub const XOUT: u8 = 0x00;
    pub const YOUT: u8 = 0x01;
    pub const ZOUT: u8 = 0x02;
    pub const MODE: u8 = 0x07;
}

/// Output register flag: reading was being updated, retry
pub const ALERT: u8 = 0x40;

/// MODE register value for active (measuring) mode
pub const MODE_ACTIVE: u8 = 0x01;

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn register(self) -> u8 {
        match self {
            Axis::X => reg::XOUT,
            Axis::Y => reg::YOUT,
            Axis::Z => reg::ZOUT,
        }
    }
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelerometerConfig {
    /// Re-reads allowed while ALERT is set before giving up
    pub max_retries: u8,
}

impl Default for AccelerometerConfig {
    fn default() -> Self {
        Self { max_retries: 8 }
    }
}

/// Sign-extend a 6-bit output register value
pub fn decode_count(raw: u8) -> i8 {
    ((raw << 2) as i8) >> 2
}

/// Convert a tilt count to milli-g (3/64 g per count)
pub fn counts_to_milli_g(count: i8) -> i16 {
    i16::from(count) * 375 / 8
}

/// MMA7660 driver
pub struct Accelerometer<B> {
    bus: B,
    config: AccelerometerConfig,
}

impl<B: RegisterBus> Accelerometer<B> {
    pub fn new(bus: B, config: AccelerometerConfig) -> Self {
        Self { bus, config }
    }

    /// Switch the sensor into active mode
    pub fn init(&mut self) -> Result<(), SensorError<B::Error>> {
        self.bus
            .write_register(reg::MODE, MODE_ACTIVE)
            .map_err(SensorError::Bus)?;
        info!("MMA7660 active");
        Ok(())
    }

    /// Read one axis as a signed count in `-32..=31`
    pub fn read(&mut self, axis: Axis) -> Result<i8, SensorError<B::Error>> {
        for _ in 0..=self.config.max_retries {
            let raw = self
                .bus
                .read_register(axis.register())
                .map_err(SensorError::Bus)?;
            if raw & ALERT == 0 {
                return Ok(decode_count(raw));
            }
            trace!("MMA7660 alert, re-reading");
        }
        warn!("MMA7660 stuck in alert");
        Err(SensorError::NotReady)
    }

    pub fn read_x(&mut self) -> Result<i8, SensorError<B::Error>> {
        self.read(Axis::X)
    }

    pub fn read_y(&mut self) -> Result<i8, SensorError<B::Error>> {
        self.read(Axis::Y)
    }

    pub fn read_z(&mut self) -> Result<i8, SensorError<B::Error>> {
        self.read(Axis::Z)
    }

    /// All three axes, X first
    pub fn read_all(&mut self) -> Result<(i8, i8, i8), SensorError<B::Error>> {
        Ok((self.read_x()?, self.read_y()?, self.read_z()?))
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{Deque, Vec};

    /// Register bus that answers reads from a queue and logs writes
    #[derive(Default)]
    struct MockBus {
        replies: Deque<u8, 16>,
        writes: Vec<(u8, u8), 4>,
        reads: usize,
        fail: bool,
    }

    impl RegisterBus for MockBus {
        type Error = ();

        fn write_bytes(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push((data[0], data[1])).unwrap();
            Ok(())
        }

        fn write_then_read(&mut self, _register: u8, buf: &mut [u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.reads += 1;
            buf[0] = self.replies.pop_front().unwrap_or(0);
            Ok(())
        }
    }

    fn with_replies(replies: &[u8]) -> Accelerometer<MockBus> {
        let mut bus = MockBus::default();
        for &r in replies {
            bus.replies.push_back(r).unwrap();
        }
        Accelerometer::new(bus, AccelerometerConfig::default())
    }

    #[test]
    fn test_init_sets_active_mode() {
        let mut accel = with_replies(&[]);
        accel.init().unwrap();
        assert_eq!(accel.bus.writes.as_slice(), &[(0x07, 0x01)]);
    }

    #[test]
    fn test_decode_count_sign_extends() {
        assert_eq!(decode_count(0x00), 0);
        assert_eq!(decode_count(0x01), 1);
        assert_eq!(decode_count(0x1F), 31);
        assert_eq!(decode_count(0x20), -32);
        assert_eq!(decode_count(0x3F), -1);
    }

    #[test]
    fn test_read_axes() {
        let mut accel = with_replies(&[0x05, 0x3E, 0x15]);
        assert_eq!(accel.read_all().unwrap(), (5, -2, 21));
    }

    #[test]
    fn test_alert_triggers_reread() {
        let mut accel = with_replies(&[ALERT | 0x01, ALERT | 0x02, 0x03]);
        assert_eq!(accel.read_x().unwrap(), 3);
        assert_eq!(accel.bus.reads, 3);
    }

    #[test]
    fn test_alert_gives_up() {
        let mut accel = with_replies(&[ALERT; 16]);
        assert_eq!(accel.read_y(), Err(SensorError::NotReady));
        assert_eq!(accel.bus.reads, 9);
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut accel = with_replies(&[]);
        accel.bus.fail = true;
        assert_eq!(accel.init(), Err(SensorError::Bus(())));
        assert_eq!(accel.read_z(), Err(SensorError::Bus(())));
    }

    #[test]
    fn test_milli_g() {
        assert_eq!(counts_to_milli_g(0), 0);
        // about one g
        assert_eq!(counts_to_milli_g(21), 984);
        assert_eq!(counts_to_milli_g(-32), -1500);
    }
}
