//! MCP9701 temperature sensor
//!
//! Linear active thermistor: 400 mV at 0°C, rising 19.5 mV per °C.
//! Readings are averaged over several ADC samples to settle the noise.

use brainpad_hal::AnalogInput;

use crate::error::SensorError;

/// Analog front-end parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureConfig {
    /// Output voltage at 0°C
    pub offset_mv: u16,
    /// Slope in 0.1 mV per °C
    pub slope_mv_x10: u16,
    /// ADC samples averaged per reading
    pub samples: u8,
}

impl TemperatureConfig {
    /// Microchip MCP9701
    pub const MCP9701: Self = Self {
        offset_mv: 400,
        slope_mv_x10: 195,
        samples: 10,
    };
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self::MCP9701
    }
}

pub struct TemperatureSensor<A> {
    adc: A,
    config: TemperatureConfig,
}

impl<A: AnalogInput> TemperatureSensor<A> {
    pub fn new(adc: A, config: TemperatureConfig) -> Self {
        Self { adc, config }
    }

    /// Temperature in 0.1°C units (e.g. 235 = 23.5°C)
    pub fn read_celsius_x10(&mut self) -> Result<i16, SensorError<A::Error>> {
        let samples = u32::from(self.config.samples.max(1));
        let mut sum = 0u32;
        for _ in 0..samples {
            sum += u32::from(self.adc.read_mv().map_err(SensorError::Bus)?);
        }
        let mv = (sum / samples) as u16;
        Ok(self.config.millivolts_to_celsius_x10(mv))
    }

    /// Temperature in whole degrees, truncated toward zero
    pub fn read_celsius(&mut self) -> Result<i16, SensorError<A::Error>> {
        Ok(self.read_celsius_x10()? / 10)
    }
}

impl TemperatureConfig {
    /// Transfer function from sensor output to 0.1°C units
    pub fn millivolts_to_celsius_x10(&self, mv: u16) -> i16 {
        let slope = i32::from(self.slope_mv_x10.max(1));
        let delta = i32::from(mv) - i32::from(self.offset_mv);
        // slope is in 0.1 mV/°C, result in 0.1°C
        let x10 = delta * 100 / slope;
        x10.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ADC that returns a fixed raw value on a 3300 mV, 12-bit scale
    struct FixedAdc(u16);

    impl AnalogInput for FixedAdc {
        type Error = ();

        fn read_raw(&mut self) -> Result<u16, ()> {
            Ok(self.0)
        }

        fn full_scale(&self) -> u16 {
            4095
        }
    }

    #[test]
    fn test_transfer_function() {
        let config = TemperatureConfig::MCP9701;
        assert_eq!(config.millivolts_to_celsius_x10(400), 0);
        assert_eq!(config.millivolts_to_celsius_x10(595), 100);
        assert_eq!(config.millivolts_to_celsius_x10(888), 250);
        assert_eq!(config.millivolts_to_celsius_x10(205), -100);
    }

    #[test]
    fn test_read_from_adc() {
        // 1241 raw ≈ 1000 mV → (1000 - 400) / 19.5 ≈ 30.7°C
        let mut sensor = TemperatureSensor::new(FixedAdc(1241), TemperatureConfig::default());
        let t = sensor.read_celsius_x10().unwrap();
        assert!((305..=309).contains(&t), "got {}", t);
        assert_eq!(sensor.read_celsius().unwrap(), 30);
    }

    #[test]
    fn test_zero_samples_still_reads() {
        let config = TemperatureConfig {
            samples: 0,
            ..TemperatureConfig::MCP9701
        };
        let mut sensor = TemperatureSensor::new(FixedAdc(0), config);
        assert_eq!(sensor.read_celsius_x10().unwrap(), -205);
    }
}
