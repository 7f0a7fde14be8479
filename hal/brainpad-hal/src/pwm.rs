//! PWM output abstraction
//!
//! The buzzer changes frequency to play tones and the servo changes duty to
//! move, so the channel exposes both knobs.

/// A single PWM channel
pub trait PwmOutput {
    /// Error type for PWM operations
    type Error;

    /// Set the carrier frequency in Hz
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;

    /// Set the duty cycle in parts per 10 000 (0 = always low, 10 000 = always high)
    fn set_duty_per_10k(&mut self, duty: u16) -> Result<(), Self::Error>;

    /// Start driving the output
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Stop driving the output (pin idles low)
    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Full duty in [`PwmOutput::set_duty_per_10k`] units
pub const DUTY_FULL: u16 = 10_000;
