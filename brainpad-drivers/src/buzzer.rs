//! Piezo buzzer
//!
//! The buzzer sits on a PWM channel; a square wave at 50% duty produces a
//! tone at the PWM frequency.

use brainpad_hal::pwm::DUTY_FULL;
use brainpad_hal::PwmOutput;
use embedded_hal::delay::DelayNs;

/// Buzzer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerConfig {
    /// Tone used by [`Buzzer::beep`]
    pub beep_frequency_hz: u32,
    /// Length of [`Buzzer::beep`]
    pub beep_duration_ms: u32,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            beep_frequency_hz: 2_000,
            beep_duration_ms: 50,
        }
    }
}

/// PWM-driven buzzer
pub struct Buzzer<P> {
    pwm: P,
    config: BuzzerConfig,
    /// Frequency currently sounding
    tone: Option<u32>,
}

impl<P: PwmOutput> Buzzer<P> {
    pub fn new(pwm: P, config: BuzzerConfig) -> Self {
        Self {
            pwm,
            config,
            tone: None,
        }
    }

    /// Sound `frequency_hz` until stopped; zero is silence
    pub fn start_buzzing(&mut self, frequency_hz: u32) -> Result<(), P::Error> {
        if frequency_hz == 0 {
            return self.stop_buzzing();
        }
        self.pwm.set_frequency(frequency_hz)?;
        self.pwm.set_duty_per_10k(DUTY_FULL / 2)?;
        self.pwm.enable()?;
        self.tone = Some(frequency_hz);
        Ok(())
    }

    pub fn stop_buzzing(&mut self) -> Result<(), P::Error> {
        self.pwm.set_duty_per_10k(0)?;
        self.pwm.disable()?;
        self.tone = None;
        Ok(())
    }

    /// Short confirmation tone; blocks for the configured duration
    pub fn beep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), P::Error> {
        self.start_buzzing(self.config.beep_frequency_hz)?;
        delay.delay_ms(self.config.beep_duration_ms);
        self.stop_buzzing()
    }

    /// Frequency currently sounding, if any
    pub fn tone(&self) -> Option<u32> {
        self.tone
    }
}
