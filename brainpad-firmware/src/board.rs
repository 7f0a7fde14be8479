//! BrainPad board glue
//!
//! Adapters from embassy-stm32 peripherals to the `brainpad-hal` traits,
//! plus the pin assignments they are wired to.

use core::cell::RefCell;
use core::convert::Infallible;

use brainpad_hal::pwm::DUTY_FULL;
use brainpad_hal::{AnalogInput, I2cBus, PwmOutput};
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::timer::{Channel, GeneralInstance4Channel};

/// 12-bit ADC
const ADC_FULL_SCALE: u16 = 4095;

/// One I2C bus shared by several devices in the same task
///
/// The display and the accelerometer sit on I2C1; each gets its own
/// `SharedBus` and the `RefCell` hands the peripheral to whichever is
/// talking.
pub struct SharedBus<'a, B>(pub &'a RefCell<B>);

impl<B: I2cBus> I2cBus for SharedBus<'_, B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.borrow_mut().write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.borrow_mut().read(address, buf)
    }

    fn write_read(&mut self, address: u8, write_data: &[u8], read_buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.borrow_mut().write_read(address, write_data, read_buf)
    }
}

/// One channel of a timer in PWM mode
pub struct PwmChannel<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
    channel: Channel,
}

impl<'d, T: GeneralInstance4Channel> PwmChannel<'d, T> {
    pub fn new(pwm: SimplePwm<'d, T>, channel: Channel) -> Self {
        Self { pwm, channel }
    }
}

impl<T: GeneralInstance4Channel> PwmOutput for PwmChannel<'_, T> {
    type Error = Infallible;

    fn set_frequency(&mut self, hz: u32) -> Result<(), Infallible> {
        self.pwm.set_frequency(Hertz(hz));
        Ok(())
    }

    fn set_duty_per_10k(&mut self, duty: u16) -> Result<(), Infallible> {
        self.pwm
            .channel(self.channel)
            .set_duty_cycle_fraction(duty.min(DUTY_FULL), DUTY_FULL);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Infallible> {
        self.pwm.channel(self.channel).enable();
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Infallible> {
        self.pwm.channel(self.channel).disable();
        Ok(())
    }
}

/// One ADC1 input; the converter itself is shared
pub struct AdcInput<'a, 'd> {
    adc: &'a RefCell<Adc<'d, ADC1>>,
    channel: AnyAdcChannel<ADC1>,
}

impl<'a, 'd> AdcInput<'a, 'd> {
    pub fn new(adc: &'a RefCell<Adc<'d, ADC1>>, channel: AnyAdcChannel<ADC1>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for AdcInput<'_, '_> {
    type Error = Infallible;

    fn read_raw(&mut self) -> Result<u16, Infallible> {
        Ok(self.adc.borrow_mut().blocking_read(&mut self.channel))
    }

    fn full_scale(&self) -> u16 {
        ADC_FULL_SCALE
    }
}
