//! BrainPad Hardware Abstraction Layer
//!
//! This crate defines the capability traits the BrainPad drivers consume.
//! Chip support crates (or the `embedded` adapters in this crate) provide
//! the implementations, so the display and peripheral drivers never touch
//! a concrete MCU peripheral.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  brainpad-display / brainpad-drivers    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  brainpad-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 implementations       │
//! │  (embassy-stm32, linux-embedded-hal...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::RegisterBus`] - Byte-stream write / register read channel
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmOutput`] - PWM channel with adjustable frequency
//! - [`adc::AnalogInput`] - Single ADC channel

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod bus;
pub mod embedded;
pub mod gpio;
pub mod i2c;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use bus::RegisterBus;
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig, I2cDevice};
pub use pwm::PwmOutput;
