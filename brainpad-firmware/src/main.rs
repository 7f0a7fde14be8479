//! BrainPad demo firmware
//!
//! Brings up every on-board peripheral through the SDK drivers and shows
//! them working together on the STM32F401 BrainPad:
//!
//! - Sensor screen: accelerometer, light and temperature readings,
//!   composed with a `TextBuffer` and drawn with the built-in font
//! - Graphics screen: shapes, a bitmap in two orientations and a needle
//!   following the servo angle
//!
//! Up/Down swing the servo, Left inverts the panel, Right switches
//! screens. Every press beeps and toggles the status LED.

#![no_std]
#![no_main]

extern crate alloc;

mod board;

use alloc::string::ToString;
use core::cell::RefCell;
use core::fmt::{self, Write as _};

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::Channel;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Ticker, Timer};
use embedded_alloc::LlffHeap as Heap;
use {defmt_rtt as _, panic_probe as _};

use brainpad_display::{DisplayConfig, Image, Ssd1306, Transform};
use brainpad_drivers::accelerometer::{self, Accelerometer, AccelerometerConfig};
use brainpad_drivers::{
    ButtonEvent, ButtonId, Buttons, Buzzer, BuzzerConfig, LightSensor, Servo, ServoConfig,
    TemperatureConfig, TemperatureSensor,
};
use brainpad_hal::embedded::{EhI2c, EhInput, EhOutput};
use brainpad_hal::gpio::Level as PinLevel;
use brainpad_hal::{AnalogInput, I2cConfig, I2cDevice, OutputPin, RegisterBus};
use brainpad_text::TextBuffer;

use crate::board::{AdcInput, PwmChannel, SharedBus};

// Heap for the text buffer
#[global_allocator]
static HEAP: Heap = Heap::empty();

const HEAP_SIZE: usize = 8 * 1024;

/// Screen refresh period
const REFRESH_MS: u64 = 100;

/// Button sampling period
const BUTTON_POLL_MS: u64 = 10;

/// Servo travel per Up/Down press
const SERVO_STEP: i32 = 30;

/// Presses from the button task to the main loop
static BUTTON_PRESS: Signal<CriticalSectionRawMutex, ButtonId> = Signal::new();

#[rustfmt::skip]
static SMILEY: [u8; 64] = [
    0, 0, 1, 1, 1, 1, 0, 0,
    0, 1, 0, 0, 0, 0, 1, 0,
    1, 0, 1, 0, 0, 1, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 1, 0, 0, 1, 0, 1,
    1, 0, 0, 1, 1, 0, 0, 1,
    0, 1, 0, 0, 0, 0, 1, 0,
    0, 0, 1, 1, 1, 1, 0, 0,
];

#[derive(Clone, Copy, PartialEq, Eq, Format)]
enum Screen {
    Sensors,
    Graphics,
}

impl Screen {
    fn next(self) -> Self {
        match self {
            Screen::Sensors => Screen::Graphics,
            Screen::Graphics => Screen::Sensors,
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("BrainPad firmware starting...");

    init_heap();

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // I2C1: PB6 = SCL, PB7 = SDA. OLED and accelerometer share it.
    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PB6,
        p.PB7,
        Hertz(I2cConfig::FAST.frequency),
        Default::default(),
    );
    let i2c = RefCell::new(EhI2c(i2c));

    let mut display = Ssd1306::on_i2c(SharedBus(&i2c), DisplayConfig::default());
    match display.init() {
        Ok(()) => info!("OLED initialized"),
        Err(e) => error!("Failed to initialize display: {:?}", e),
    }

    let mut accel = Accelerometer::new(
        I2cDevice::new(SharedBus(&i2c), accelerometer::DEFAULT_ADDRESS),
        AccelerometerConfig::default(),
    );
    if let Err(e) = accel.init() {
        warn!("Accelerometer init failed: {:?}", e);
    }

    // Buttons pull to ground: Up PA15, Down PC13, Left PB10, Right PA6
    let buttons = Buttons::new(
        EhInput(Input::new(p.PA15, Pull::Up)),
        EhInput(Input::new(p.PC13, Pull::Up)),
        EhInput(Input::new(p.PB10, Pull::Up)),
        EhInput(Input::new(p.PA6, Pull::Up)),
    );
    let mut led = EhOutput(Output::new(p.PA5, Level::Low, Speed::Low));
    let mut led_on = false;

    // Buzzer on TIM4 CH3 (PB8), servo on TIM2 CH1 (PA0)
    let buzzer_pwm = SimplePwm::new(
        p.TIM4,
        None,
        None,
        Some(PwmPin::new_ch3(p.PB8, OutputType::PushPull)),
        None,
        Hertz(BuzzerConfig::default().beep_frequency_hz),
        CountingMode::EdgeAlignedUp,
    );
    let mut buzzer = Buzzer::new(PwmChannel::new(buzzer_pwm, Channel::Ch3), BuzzerConfig::default());

    let servo_config = ServoConfig::default();
    let servo_pwm = SimplePwm::new(
        p.TIM2,
        Some(PwmPin::new_ch1(p.PA0, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz(servo_config.frequency_hz),
        CountingMode::EdgeAlignedUp,
    );
    let mut servo = Servo::new(PwmChannel::new(servo_pwm, Channel::Ch1), servo_config);
    let mut angle = 90;
    if let Err(e) = servo.set_position(angle) {
        warn!("Servo error: {:?}", e);
    }

    // Light sensor PB1, temperature sensor PB0
    let adc = RefCell::new(Adc::new(p.ADC1));
    let mut light = LightSensor::new(AdcInput::new(&adc, p.PB1.degrade_adc()));
    let mut temperature = TemperatureSensor::new(
        AdcInput::new(&adc, p.PB0.degrade_adc()),
        TemperatureConfig::default(),
    );

    spawner.spawn(button_task(buttons)).unwrap();
    info!("All tasks spawned");

    let mut screen = Screen::Sensors;
    let mut inverted = false;
    let mut frame: u32 = 0;
    let mut text = TextBuffer::new();
    let mut ticker = Ticker::every(Duration::from_millis(REFRESH_MS));

    loop {
        ticker.next().await;
        frame = frame.wrapping_add(1);

        if let Some(id) = BUTTON_PRESS.try_take() {
            led_on = !led_on;
            led.set_level(PinLevel::from(led_on));
            buzzer.beep(&mut Delay).ok();
            match id {
                ButtonId::Up => angle = (angle + SERVO_STEP).min(180),
                ButtonId::Down => angle = (angle - SERVO_STEP).max(0),
                ButtonId::Left => {
                    inverted = !inverted;
                    if let Err(e) = display.invert_colors(inverted) {
                        warn!("Invert failed: {:?}", e);
                    }
                }
                ButtonId::Right => {
                    screen = screen.next();
                    debug!("Screen {:?}", screen);
                }
            }
            if let Err(e) = servo.set_position(angle) {
                warn!("Servo error: {:?}", e);
            }
        }

        let result = match screen {
            Screen::Sensors => {
                text.clear();
                if compose_readings(&mut text, &mut accel, &mut light, &mut temperature, angle).is_err() {
                    warn!("Sensor text truncated at {} chars", text.len());
                }
                display.draw_small_text(0, 0, &text.to_string())
            }
            Screen::Graphics => {
                draw_graphics(&mut display, frame, angle);
                display.show_on_screen()
            }
        };
        if let Err(e) = result {
            warn!("Display update failed: {:?}", e);
        }
    }
}

/// Write one line per sensor into `text`
///
/// Stops at the first write the buffer rejects; whatever was written so
/// far stays in `text`.
fn compose_readings<B, L, T>(
    text: &mut TextBuffer,
    accel: &mut Accelerometer<B>,
    light: &mut LightSensor<L>,
    temperature: &mut TemperatureSensor<T>,
    angle: i32,
) -> fmt::Result
where
    B: RegisterBus,
    L: AnalogInput,
    T: AnalogInput,
{
    writeln!(text, "BrainPad")?;
    match accel.read_all() {
        Ok((x, y, z)) => writeln!(text, "X {:4} Y {:4} Z {:4}", x, y, z)?,
        Err(_) => text.write_str("X -- Y -- Z --\n")?,
    }
    match light.read_level() {
        Ok(level) => writeln!(text, "Light {}%", level)?,
        Err(_) => text.write_str("Light --\n")?,
    }
    match temperature.read_celsius_x10() {
        Ok(t) => {
            let sign = if t < 0 { "-" } else { "" };
            let t = t.unsigned_abs();
            writeln!(text, "Temp {}{}.{} C", sign, t / 10, t % 10)?;
        }
        Err(_) => text.write_str("Temp --\n")?,
    }
    write!(text, "Servo {} deg", angle)
}

/// Compose the graphics screen in the framebuffer
fn draw_graphics<B: RegisterBus>(display: &mut Ssd1306<B>, frame: u32, angle: i32) {
    display.clear_screen();
    display.draw_rectangle(0, 0, 128, 64);
    display.draw_scaled_text(4, 4, "BrainPad", 1, 1);

    let radius = 4 + (frame % 20) as i32;
    display.draw_circle(96, 36, radius);

    // Needle from the bottom-left pivot, 0 deg pointing right
    let tip_x = 32 - 24 * (angle - 90) / 90;
    display.draw_line(32, 58, tip_x, 30);

    if let Ok(image) = Image::new(8, 8, &SMILEY) {
        display.draw_image(8, 20, &image, Transform::None);
        display.draw_image(52, 20, &image, Transform::Rotate180);
    }
}

/// Sample the buttons and forward presses to the main loop
#[embassy_executor::task]
async fn button_task(mut buttons: Buttons<EhInput<Input<'static>>>) {
    info!("Button task started");

    loop {
        while let Some((id, event)) = buttons.poll() {
            if event == ButtonEvent::Pressed {
                BUTTON_PRESS.signal(id);
            }
        }
        Timer::after(Duration::from_millis(BUTTON_POLL_MS)).await;
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
