//! SSD1306 OLED controller
//!
//! Drives the BrainPad's 128x64 SSD1306 panel. Commands go out one byte per
//! transaction behind a `0x00` control byte; the frame goes out in a single
//! transaction that starts with the framebuffer's own `0x40` header.
//!
//! ```text
//!   Uninitialized --init()--> Initializing --ok--> Ready
//!         ^                        |
//!         +-------bus error--------+
//! ```

use brainpad_hal::{I2cBus, I2cDevice, RegisterBus};

use crate::error::DisplayError;
use crate::framebuffer::Framebuffer;
use crate::image::{Image, Transform};

/// Control byte that marks a transaction as a command
pub const CONTROL_COMMAND: u8 = 0x00;

/// SSD1306 commands
pub mod cmd {
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const DISPLAY_RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
}

/// Power-up sequence as `(command, arguments)`
pub const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (cmd::DISPLAY_OFF, &[]),
    (cmd::SET_CLOCK_DIV, &[0x80]),
    (cmd::SET_MUX_RATIO, &[0x3F]), // 64 rows
    (cmd::SET_DISPLAY_OFFSET, &[0x00]),
    (cmd::SET_START_LINE, &[]),
    (cmd::SET_CHARGE_PUMP, &[0x14]),
    (cmd::SET_MEMORY_MODE, &[0x00]), // horizontal addressing
    (cmd::SET_SEG_REMAP, &[]),
    (cmd::SET_COM_SCAN_DEC, &[]),
    (cmd::SET_COM_PINS, &[0x12]),
    (cmd::SET_CONTRAST, &[0xCF]),
    (cmd::SET_PRECHARGE, &[0xF1]),
    (cmd::SET_VCOM_DETECT, &[0x40]),
    (cmd::DISPLAY_RESUME_RAM, &[]),
    (cmd::SET_NORMAL, &[]),
    (cmd::DEACTIVATE_SCROLL, &[]),
    (cmd::DISPLAY_ON, &[]),
    (cmd::SET_COLUMN_ADDR, &[0x00, 0x7F]),
    (cmd::SET_PAGE_ADDR, &[0x00, 0x07]),
];

/// Every byte of [`INIT_SEQUENCE`] in wire order
pub fn init_bytes() -> impl Iterator<Item = u8> {
    INIT_SEQUENCE
        .iter()
        .flat_map(|(command, args)| core::iter::once(*command).chain(args.iter().copied()))
}

/// Display wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub address: u8,
}

impl DisplayConfig {
    /// Address the BrainPad's panel is strapped to
    pub const DEFAULT_ADDRESS: u8 = 0x3C;
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: Self::DEFAULT_ADDRESS,
        }
    }
}

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    Uninitialized,
    Initializing,
    Ready,
}

/// SSD1306 driver owning its bus and a framebuffer
///
/// Drawing calls only touch the framebuffer and work in any state. Nothing
/// reaches the panel until [`show_on_screen`](Self::show_on_screen), which
/// like every other bus operation requires a completed [`init`](Self::init).
pub struct Ssd1306<B> {
    bus: B,
    config: DisplayConfig,
    framebuffer: Framebuffer,
    state: DisplayState,
}

impl<B: I2cBus> Ssd1306<I2cDevice<B>> {
    /// Bind the controller to `config.address` on a shared I2C bus
    pub fn on_i2c(i2c: B, config: DisplayConfig) -> Self {
        Self::new(I2cDevice::new(i2c, config.address), config)
    }
}

impl<B: RegisterBus> Ssd1306<B> {
    /// Create an uninitialized controller; no bus traffic
    pub fn new(bus: B, config: DisplayConfig) -> Self {
        Self {
            bus,
            config,
            framebuffer: Framebuffer::new(),
            state: DisplayState::Uninitialized,
        }
    }

    /// Create and initialize in one step
    pub fn open(bus: B, config: DisplayConfig) -> Result<Self, DisplayError<B::Error>> {
        let mut display = Self::new(bus, config);
        display.init()?;
        Ok(display)
    }

    /// Run the power-up sequence, then blank the panel
    ///
    /// On a bus failure the controller drops back to
    /// [`DisplayState::Uninitialized`] and the error is returned.
    pub fn init(&mut self) -> Result<(), DisplayError<B::Error>> {
        self.state = DisplayState::Initializing;
        debug!("SSD1306 at {:#x}: sending init sequence", self.config.address);

        let result = self.power_up();
        match result {
            Ok(()) => {
                self.state = DisplayState::Ready;
                info!("SSD1306 ready");
                Ok(())
            }
            Err(e) => {
                self.state = DisplayState::Uninitialized;
                warn!("SSD1306 init failed");
                Err(DisplayError::Bus(e))
            }
        }
    }

    fn power_up(&mut self) -> Result<(), B::Error> {
        for byte in init_bytes() {
            self.command(byte)?;
        }
        self.framebuffer.clear();
        self.flush()
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DisplayState::Ready
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }

    /// Send the framebuffer to the panel
    pub fn show_on_screen(&mut self) -> Result<(), DisplayError<B::Error>> {
        self.ensure_ready()?;
        self.flush().map_err(DisplayError::Bus)
    }

    /// Replace the screen with `text` at double size
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError<B::Error>> {
        self.show_text(x, y, text, 2)
    }

    /// Replace the screen with `text` at normal size
    pub fn draw_small_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError<B::Error>> {
        self.show_text(x, y, text, 1)
    }

    fn show_text(&mut self, x: i32, y: i32, text: &str, scale: u8) -> Result<(), DisplayError<B::Error>> {
        self.ensure_ready()?;
        self.framebuffer.clear();
        self.framebuffer.draw_text(x, y, text, scale, scale);
        self.flush().map_err(DisplayError::Bus)
    }

    /// Render text into the framebuffer without clearing or flushing
    pub fn draw_scaled_text(&mut self, x: i32, y: i32, text: &str, h_scale: u8, v_scale: u8) -> (i32, i32) {
        self.framebuffer.draw_text(x, y, text, h_scale, v_scale)
    }

    pub fn draw_point(&mut self, x: i32, y: i32) {
        self.framebuffer.draw_point(x, y);
    }

    pub fn clear_point(&mut self, x: i32, y: i32) {
        self.framebuffer.clear_point(x, y);
    }

    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.framebuffer.draw_line(x0, y0, x1, y1);
    }

    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32) {
        self.framebuffer.draw_circle(cx, cy, radius);
    }

    pub fn draw_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.framebuffer.draw_rectangle(x, y, width, height);
    }

    pub fn fill_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.framebuffer.fill_rectangle(x, y, width, height);
    }

    pub fn draw_image(&mut self, x: i32, y: i32, image: &Image<'_>, transform: Transform) {
        self.framebuffer.draw_image(x, y, image, transform);
    }

    pub fn clear_screen(&mut self) {
        self.framebuffer.clear();
    }

    pub fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.framebuffer.clear_region(x, y, width, height);
    }

    /// Swap lit and unlit pixels in hardware
    pub fn invert_colors(&mut self, invert: bool) -> Result<(), DisplayError<B::Error>> {
        self.ensure_ready()?;
        let command = if invert { cmd::SET_INVERSE } else { cmd::SET_NORMAL };
        self.command(command).map_err(DisplayError::Bus)
    }

    pub fn set_contrast(&mut self, level: u8) -> Result<(), DisplayError<B::Error>> {
        self.ensure_ready()?;
        self.command(cmd::SET_CONTRAST).map_err(DisplayError::Bus)?;
        self.command(level).map_err(DisplayError::Bus)
    }

    /// Panel power; the framebuffer and panel RAM survive an off/on cycle
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError<B::Error>> {
        self.ensure_ready()?;
        let command = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.command(command).map_err(DisplayError::Bus)
    }

    fn ensure_ready(&self) -> Result<(), DisplayError<B::Error>> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    fn command(&mut self, command: u8) -> Result<(), B::Error> {
        self.bus.write_bytes(&[CONTROL_COMMAND, command])
    }

    fn flush(&mut self) -> Result<(), B::Error> {
        trace!("SSD1306 flush");
        self.bus.write_bytes(self.framebuffer.vram())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{DATA_CONTROL, VRAM_LEN};
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    /// Splits traffic into command bytes and frames
    #[derive(Default)]
    struct RecordingBus {
        commands: Vec<u8, 64>,
        frames: usize,
        last_frame: Vec<u8, VRAM_LEN>,
        writes: usize,
        fail_at: Option<usize>,
    }

    impl RecordingBus {
        fn failing_at(write: usize) -> Self {
            Self {
                fail_at: Some(write),
                ..Self::default()
            }
        }
    }

    impl RegisterBus for RecordingBus {
        type Error = BusFault;

        fn write_bytes(&mut self, data: &[u8]) -> Result<(), BusFault> {
            self.writes += 1;
            if self.fail_at == Some(self.writes) {
                return Err(BusFault);
            }
            match data[0] {
                CONTROL_COMMAND => {
                    assert_eq!(data.len(), 2, "one command byte per transaction");
                    self.commands.push(data[1]).unwrap();
                }
                DATA_CONTROL => {
                    self.frames += 1;
                    self.last_frame.clear();
                    self.last_frame.extend_from_slice(data).unwrap();
                }
                other => panic!("unexpected control byte {:#04x}", other),
            }
            Ok(())
        }

        fn write_then_read(&mut self, _register: u8, _buf: &mut [u8]) -> Result<(), BusFault> {
            panic!("display never reads");
        }
    }

    fn ready() -> Ssd1306<RecordingBus> {
        let mut display = Ssd1306::open(RecordingBus::default(), DisplayConfig::default()).unwrap();
        display.bus.commands.clear();
        display.bus.frames = 0;
        display
    }

    #[test]
    fn test_init_sequence_exact() {
        let display = Ssd1306::open(RecordingBus::default(), DisplayConfig::default()).unwrap();
        let expected = [
            0xAE, 0xD5, 0x80, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0x8D, 0x14, 0x20, 0x00, 0xA1, 0xC8,
            0xDA, 0x12, 0x81, 0xCF, 0xD9, 0xF1, 0xDB, 0x40, 0xA4, 0xA6, 0x2E, 0xAF, 0x21, 0x00,
            0x7F, 0x22, 0x00, 0x07,
        ];
        assert_eq!(display.bus.commands.as_slice(), &expected);
        assert_eq!(display.state(), DisplayState::Ready);
        // blank frame pushed once
        assert_eq!(display.bus.frames, 1);
        assert!(display.bus.last_frame[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_is_silent() {
        let display = Ssd1306::new(RecordingBus::default(), DisplayConfig::default());
        assert_eq!(display.state(), DisplayState::Uninitialized);
        assert_eq!(display.bus.writes, 0);
        assert_eq!(display.config().address, 0x3C);
    }

    #[test]
    fn test_flush_is_one_full_frame() {
        let mut display = ready();
        display.draw_point(0, 0);
        display.show_on_screen().unwrap();
        assert_eq!(display.bus.frames, 1);
        assert_eq!(display.bus.last_frame.len(), 1025);
        assert_eq!(display.bus.last_frame[0], 0x40);
        assert_eq!(display.bus.last_frame[1], 0x01);
        assert!(display.bus.commands.is_empty());
    }

    #[test]
    fn test_invert_colors_commands() {
        let mut display = ready();
        display.invert_colors(true).unwrap();
        display.invert_colors(false).unwrap();
        assert_eq!(display.bus.commands.as_slice(), &[0xA7, 0xA6]);
    }

    #[test]
    fn test_contrast_and_power_commands() {
        let mut display = ready();
        display.set_contrast(0x10).unwrap();
        display.set_display_on(false).unwrap();
        display.set_display_on(true).unwrap();
        assert_eq!(display.bus.commands.as_slice(), &[0x81, 0x10, 0xAE, 0xAF]);
    }

    #[test]
    fn test_draw_text_clears_then_flushes() {
        let mut display = ready();
        display.fill_rectangle(100, 50, 10, 10);
        display.draw_text(0, 0, "A").unwrap();
        assert_eq!(display.bus.frames, 1);
        assert!(!display.framebuffer().pixel(105, 55));
        // 'A' at scale 2: left column rows 2..=13
        assert!(display.framebuffer().pixel(0, 2));
        assert!(display.framebuffer().pixel(1, 13));
        assert_eq!(display.bus.last_frame.as_slice(), display.framebuffer().vram());
    }

    #[test]
    fn test_draw_small_text_scale_one() {
        let mut display = ready();
        display.draw_small_text(0, 0, "A").unwrap();
        assert!(display.framebuffer().pixel(0, 6));
        assert!(!display.framebuffer().pixel(0, 7));
        assert!(display.framebuffer().pixel(1, 0));
        assert!(!display.framebuffer().pixel(1, 1));
    }

    #[test]
    fn test_bus_operations_need_init() {
        let mut display = Ssd1306::new(RecordingBus::default(), DisplayConfig::default());
        assert_eq!(display.show_on_screen(), Err(DisplayError::NotInitialized));
        assert_eq!(display.invert_colors(true), Err(DisplayError::NotInitialized));
        assert_eq!(display.draw_text(0, 0, "x"), Err(DisplayError::NotInitialized));
        assert_eq!(display.set_contrast(1), Err(DisplayError::NotInitialized));
        assert_eq!(display.bus.writes, 0);

        // framebuffer-only calls still work
        display.draw_line(0, 0, 3, 0);
        assert_eq!(display.framebuffer().lit_pixels(), 4);
        assert_eq!(display.draw_scaled_text(0, 10, "ab", 1, 1), (12, 10));
    }

    #[test]
    fn test_init_failure_resets_state() {
        let mut display = Ssd1306::new(RecordingBus::failing_at(5), DisplayConfig::default());
        assert_eq!(display.init(), Err(DisplayError::Bus(BusFault)));
        assert_eq!(display.state(), DisplayState::Uninitialized);
        assert_eq!(display.bus.commands.len(), 4);

        // a retry after the fault goes through
        display.init().unwrap();
        assert!(display.is_ready());
    }

    #[test]
    fn test_flush_failure_propagates() {
        let mut display = ready();
        display.bus.fail_at = Some(display.bus.writes + 1);
        assert_eq!(display.show_on_screen(), Err(DisplayError::Bus(BusFault)));
        assert!(display.is_ready());
    }

    #[test]
    fn test_on_i2c_binds_address() {
        struct NullI2c;
        impl I2cBus for NullI2c {
            type Error = ();
            fn write(&mut self, _: u8, _: &[u8]) -> Result<(), ()> {
                Ok(())
            }
            fn read(&mut self, _: u8, _: &mut [u8]) -> Result<(), ()> {
                Ok(())
            }
            fn write_read(&mut self, _: u8, _: &[u8], _: &mut [u8]) -> Result<(), ()> {
                Ok(())
            }
        }

        let config = DisplayConfig { address: 0x3D };
        let display = Ssd1306::on_i2c(NullI2c, config);
        assert_eq!(display.release().address(), 0x3D);
    }
}
