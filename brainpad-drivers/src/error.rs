//! Driver error types

use core::fmt;

/// Sensor read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// Bus or ADC transaction failed
    Bus(E),
    /// Device kept reporting a reading in progress
    NotReady,
}

impl<E: fmt::Debug> fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "sensor bus error: {:?}", e),
            Self::NotReady => write!(f, "sensor not ready"),
        }
    }
}

/// Servo errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError<E> {
    /// Requested angle outside the servo's travel
    InvalidPosition,
    /// PWM peripheral rejected the update
    Pwm(E),
}

impl<E: fmt::Debug> fmt::Display for ServoError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPosition => write!(f, "servo position out of range"),
            Self::Pwm(e) => write!(f, "servo PWM error: {:?}", e),
        }
    }
}
