//! Ambient light sensor
//!
//! A photo transistor into an ADC channel: more light, higher reading.

use brainpad_hal::AnalogInput;

use crate::error::SensorError;

pub struct LightSensor<A> {
    adc: A,
}

impl<A: AnalogInput> LightSensor<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Light level as a percentage of the ADC's full scale
    pub fn read_level(&mut self) -> Result<u8, SensorError<A::Error>> {
        let raw = self.adc.read_raw().map_err(SensorError::Bus)?;
        Ok(percent_of(raw, self.adc.full_scale()))
    }
}

/// `raw` as a rounded-down percentage of `full_scale`, capped at 100
pub fn percent_of(raw: u16, full_scale: u16) -> u8 {
    if full_scale == 0 {
        return 0;
    }
    (u32::from(raw) * 100 / u32::from(full_scale)).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdc(Result<u16, ()>);

    impl AnalogInput for FixedAdc {
        type Error = ();

        fn read_raw(&mut self) -> Result<u16, ()> {
            self.0
        }

        fn full_scale(&self) -> u16 {
            4095
        }
    }

    #[test]
    fn test_level_range() {
        assert_eq!(LightSensor::new(FixedAdc(Ok(0))).read_level(), Ok(0));
        assert_eq!(LightSensor::new(FixedAdc(Ok(4095))).read_level(), Ok(100));
        assert_eq!(LightSensor::new(FixedAdc(Ok(2048))).read_level(), Ok(50));
    }

    #[test]
    fn test_adc_error() {
        let mut sensor = LightSensor::new(FixedAdc(Err(())));
        assert_eq!(sensor.read_level(), Err(SensorError::Bus(())));
    }

    #[test]
    fn test_percent_of_clamps() {
        assert_eq!(percent_of(5000, 4095), 100);
        assert_eq!(percent_of(10, 0), 0);
    }
}
