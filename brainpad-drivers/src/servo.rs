//! Hobby servo
//!
//! Standard analog servo protocol: a 50 Hz frame whose high pulse, between
//! 1 ms and 2 ms, selects the horn angle.

use brainpad_hal::pwm::DUTY_FULL;
use brainpad_hal::PwmOutput;

use crate::error::ServoError;

/// Servo timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Frame rate
    pub frequency_hz: u32,
    /// Pulse width at 0°
    pub min_pulse_us: u32,
    /// Pulse width at `max_degrees`
    pub max_pulse_us: u32,
    /// Full travel
    pub max_degrees: u32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 50,
            min_pulse_us: 1_000,
            max_pulse_us: 2_000,
            max_degrees: 180,
        }
    }
}

impl ServoConfig {
    /// Pulse width for `degrees`, or `None` outside `0..=max_degrees`
    pub fn pulse_width_us(&self, degrees: i32) -> Option<u32> {
        let degrees = u32::try_from(degrees).ok().filter(|&d| d <= self.max_degrees)?;
        let span = self.max_pulse_us.saturating_sub(self.min_pulse_us);
        Some(self.min_pulse_us + span * degrees / self.max_degrees.max(1))
    }

    /// Duty cycle, in 1/10000ths, of a pulse within one frame
    pub fn duty_for_pulse(&self, pulse_us: u32) -> u16 {
        let period_us = 1_000_000 / self.frequency_hz.max(1);
        let duty = u64::from(pulse_us) * u64::from(DUTY_FULL) / u64::from(period_us.max(1));
        duty.min(u64::from(DUTY_FULL)) as u16
    }
}

/// Servo on a PWM channel
pub struct Servo<P> {
    pwm: P,
    config: ServoConfig,
    position: Option<u32>,
}

impl<P: PwmOutput> Servo<P> {
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            position: None,
        }
    }

    /// Drive the horn to `degrees`
    ///
    /// The first call starts the pulse train; out-of-range angles leave
    /// the output untouched.
    pub fn set_position(&mut self, degrees: i32) -> Result<(), ServoError<P::Error>> {
        let pulse = self
            .config
            .pulse_width_us(degrees)
            .ok_or(ServoError::InvalidPosition)?;
        if self.position.is_none() {
            self.pwm
                .set_frequency(self.config.frequency_hz)
                .map_err(ServoError::Pwm)?;
        }
        self.pwm
            .set_duty_per_10k(self.config.duty_for_pulse(pulse))
            .map_err(ServoError::Pwm)?;
        self.pwm.enable().map_err(ServoError::Pwm)?;
        self.position = Some(pulse);
        trace!("servo pulse {} us", pulse);
        Ok(())
    }

    /// Stop pulsing; the servo stops holding its position
    pub fn release(&mut self) -> Result<(), ServoError<P::Error>> {
        self.pwm.disable().map_err(ServoError::Pwm)?;
        self.position = None;
        Ok(())
    }

    /// Pulse width currently being sent
    pub fn pulse_us(&self) -> Option<u32> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct MockPwm {
        frequency_sets: u32,
        frequency: u32,
        duty: u16,
        enabled: bool,
    }

    impl PwmOutput for MockPwm {
        type Error = ();

        fn set_frequency(&mut self, hz: u32) -> Result<(), ()> {
            self.frequency_sets += 1;
            self.frequency = hz;
            Ok(())
        }

        fn set_duty_per_10k(&mut self, duty: u16) -> Result<(), ()> {
            self.duty = duty;
            Ok(())
        }

        fn enable(&mut self) -> Result<(), ()> {
            self.enabled = true;
            Ok(())
        }

        fn disable(&mut self) -> Result<(), ()> {
            self.enabled = false;
            Ok(())
        }
    }

    #[test]
    fn test_pulse_width_endpoints() {
        let config = ServoConfig::default();
        assert_eq!(config.pulse_width_us(0), Some(1_000));
        assert_eq!(config.pulse_width_us(90), Some(1_500));
        assert_eq!(config.pulse_width_us(180), Some(2_000));
        assert_eq!(config.pulse_width_us(181), None);
        assert_eq!(config.pulse_width_us(-1), None);
    }

    #[test]
    fn test_duty_for_pulse() {
        let config = ServoConfig::default();
        // 1.5 ms of a 20 ms frame
        assert_eq!(config.duty_for_pulse(1_500), 750);
        assert_eq!(config.duty_for_pulse(1_000_000), DUTY_FULL);
    }

    #[test]
    fn test_set_position_drives_pwm() {
        let mut servo = Servo::new(MockPwm::default(), ServoConfig::default());
        servo.set_position(180).unwrap();
        servo.set_position(0).unwrap();
        assert_eq!(servo.pwm.frequency, 50);
        assert_eq!(servo.pwm.frequency_sets, 1);
        assert_eq!(servo.pwm.duty, 500);
        assert!(servo.pwm.enabled);
        assert_eq!(servo.pulse_us(), Some(1_000));
    }

    #[test]
    fn test_invalid_position_leaves_output() {
        let mut servo = Servo::new(MockPwm::default(), ServoConfig::default());
        servo.set_position(45).unwrap();
        let duty = servo.pwm.duty;
        assert_eq!(servo.set_position(200), Err(ServoError::InvalidPosition));
        assert_eq!(servo.set_position(-5), Err(ServoError::InvalidPosition));
        assert_eq!(servo.pwm.duty, duty);
    }

    #[test]
    fn test_release() {
        let mut servo = Servo::new(MockPwm::default(), ServoConfig::default());
        servo.set_position(10).unwrap();
        servo.release().unwrap();
        assert!(!servo.pwm.enabled);
        assert_eq!(servo.pulse_us(), None);
        servo.set_position(10).unwrap();
        assert_eq!(servo.pwm.frequency_sets, 2);
    }

    proptest! {
        #[test]
        fn prop_pulse_is_monotonic(a in 0i32..=180, b in 0i32..=180) {
            let config = ServoConfig::default();
            let (pa, pb) = (config.pulse_width_us(a).unwrap(), config.pulse_width_us(b).unwrap());
            prop_assert!((1_000..=2_000).contains(&pa));
            prop_assert_eq!(a <= b, pa <= pb);
        }
    }
}
