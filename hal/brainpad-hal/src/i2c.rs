//! I2C bus abstractions
//!
//! Provides the I2C master trait plus [`I2cDevice`], which binds a bus to
//! one 7-bit address and exposes it as a [`RegisterBus`].

use crate::bus::RegisterBus;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), what the on-board OLED runs at
    pub const FAST: Self = Self { frequency: 400_000 };
}

/// A single device on an I2C bus
///
/// Owns (or borrows, via `&mut B`) the bus and remembers the device
/// address, turning the addressed [`I2cBus`] API into a [`RegisterBus`].
#[derive(Debug)]
pub struct I2cDevice<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> I2cDevice<B> {
    /// Bind `bus` to the 7-bit `address`
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> RegisterBus for I2cDevice<B> {
    type Error = B::Error;

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(self.address, data)
    }

    fn write_then_read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.write_read(self.address, &[register], buf)
    }
}
