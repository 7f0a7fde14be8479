//! Adapters from `embedded-hal` 1.0 implementations
//!
//! Chip HALs such as embassy-stm32 implement the embedded-hal traits, so
//! wrapping their peripherals here is all a board needs to feed the
//! BrainPad drivers.

use embedded_hal::digital;
use embedded_hal::i2c;

use crate::gpio::{InputPin, OutputPin};
use crate::i2c::I2cBus;

/// embedded-hal I2C master as an [`I2cBus`]
#[derive(Debug)]
pub struct EhI2c<T>(pub T);

impl<T: i2c::I2c> I2cBus for EhI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, write_data, read_buf)
    }
}

/// embedded-hal input pin as an [`InputPin`]
///
/// A failed read reports a high level. The BrainPad buttons idle high
/// behind pull-ups, so a faulty pin never shows up as a press.
#[derive(Debug)]
pub struct EhInput<T>(pub T);

impl<T: digital::InputPin> InputPin for EhInput<T> {
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or(true)
    }
}

/// embedded-hal output pin as an [`OutputPin`]
#[derive(Debug)]
pub struct EhOutput<T>(pub T);

impl<T: digital::OutputPin> OutputPin for EhOutput<T> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }
}
