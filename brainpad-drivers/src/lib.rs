//! BrainPad peripheral drivers
//!
//! Each driver is generic over one of the `brainpad-hal` capability traits,
//! so the same code runs against the board's real pins and against the
//! test doubles in this crate's unit tests:
//!
//! - [`Accelerometer`]: MMA7660 3-axis tilt sensor over a register bus
//! - [`Buttons`]: the four active-low direction buttons, with edge events
//! - [`Buzzer`]: piezo buzzer on a PWM channel
//! - [`LightSensor`]: photo sensor on an ADC channel, as a percentage
//! - [`Servo`]: hobby servo on a 50 Hz PWM channel
//! - [`TemperatureSensor`]: MCP9701 thermistor IC on an ADC channel

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod accelerometer;
pub mod buttons;
pub mod buzzer;
pub mod error;
pub mod light_sensor;
pub mod servo;
pub mod temperature;

pub use accelerometer::{Accelerometer, AccelerometerConfig, Axis};
pub use buttons::{Button, ButtonEvent, ButtonId, Buttons};
pub use buzzer::{Buzzer, BuzzerConfig};
pub use error::{SensorError, ServoError};
pub use light_sensor::LightSensor;
pub use servo::{Servo, ServoConfig};
pub use temperature::{TemperatureConfig, TemperatureSensor};
