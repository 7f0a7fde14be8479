//! Byte-stream bus abstraction
//!
//! The display and the accelerometer only ever need two kinds of
//! transaction: push a run of bytes at the device, or select a register
//! and read back a few bytes. [`RegisterBus`] captures exactly that, so the
//! drivers do not care whether the device sits on I2C, SPI or a test double.

/// Synchronous byte-stream channel bound to a single device
///
/// All calls block until the transport completes or fails. Implementations
/// must not retry on their own; failures are reported to the caller as-is.
pub trait RegisterBus {
    /// Error type for bus transactions
    type Error;

    /// Write `data` to the device in one transaction
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write `register`, then read `buf.len()` bytes back (repeated start)
    fn write_then_read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Read a single register
    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.write_then_read(register, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a single register
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write_bytes(&[register, value])
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(data)
    }

    fn write_then_read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).write_then_read(register, buf)
    }
}
