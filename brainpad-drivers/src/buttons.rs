//! Direction buttons
//!
//! The BrainPad's four buttons pull their pins to ground when pressed, so
//! a low level means pressed. Edge detection is done by polling: each
//! [`Button::poll`] compares the pin with what the previous poll saw.

use brainpad_hal::InputPin;

/// Edge reported by [`Button::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Pressed,
    Released,
}

/// Which button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    Up,
    Down,
    Left,
    Right,
}

impl ButtonId {
    /// Polling order used by [`Buttons`]
    pub const ALL: [ButtonId; 4] = [ButtonId::Up, ButtonId::Down, ButtonId::Left, ButtonId::Right];
}

/// One active-low push button
pub struct Button<P> {
    pin: P,
    pressed: bool,
}

impl<P: InputPin> Button<P> {
    /// Wrap `pin`; the first poll reports a press already in progress
    pub fn new(pin: P) -> Self {
        Self { pin, pressed: false }
    }

    /// Current level, without touching edge state
    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low()
    }

    /// Report a change since the last poll, if any
    pub fn poll(&mut self) -> Option<ButtonEvent> {
        let now = self.is_pressed();
        if now == self.pressed {
            return None;
        }
        self.pressed = now;
        Some(if now {
            ButtonEvent::Pressed
        } else {
            ButtonEvent::Released
        })
    }
}

/// The four direction buttons
pub struct Buttons<P> {
    up: Button<P>,
    down: Button<P>,
    left: Button<P>,
    right: Button<P>,
}

impl<P: InputPin> Buttons<P> {
    pub fn new(up: P, down: P, left: P, right: P) -> Self {
        Self {
            up: Button::new(up),
            down: Button::new(down),
            left: Button::new(left),
            right: Button::new(right),
        }
    }

    pub fn button(&mut self, id: ButtonId) -> &mut Button<P> {
        match id {
            ButtonId::Up => &mut self.up,
            ButtonId::Down => &mut self.down,
            ButtonId::Left => &mut self.left,
            ButtonId::Right => &mut self.right,
        }
    }

    pub fn is_pressed(&mut self, id: ButtonId) -> bool {
        self.button(id).is_pressed()
    }

    /// First pending edge in [`ButtonId::ALL`] order
    ///
    /// Buttons after the one reported are not sampled, so their edges are
    /// still there on the next call.
    pub fn poll(&mut self) -> Option<(ButtonId, ButtonEvent)> {
        ButtonId::ALL.into_iter().find_map(|id| {
            let event = self.button(id).poll()?;
            debug!("button {:?} {:?}", id, event);
            Some((id, event))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Pin whose level is set from outside through a shared cell
    struct SharedPin<'a>(&'a Cell<bool>);

    impl InputPin for SharedPin<'_> {
        fn is_high(&mut self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_active_low() {
        let level = Cell::new(true);
        let mut button = Button::new(SharedPin(&level));
        assert!(!button.is_pressed());
        level.set(false);
        assert!(button.is_pressed());
    }

    #[test]
    fn test_poll_reports_edges_once() {
        let level = Cell::new(true);
        let mut button = Button::new(SharedPin(&level));
        assert_eq!(button.poll(), None);

        level.set(false);
        assert_eq!(button.poll(), Some(ButtonEvent::Pressed));
        assert_eq!(button.poll(), None);

        level.set(true);
        assert_eq!(button.poll(), Some(ButtonEvent::Released));
        assert_eq!(button.poll(), None);
    }

    #[test]
    fn test_held_at_startup_reports_press() {
        let level = Cell::new(false);
        let mut button = Button::new(SharedPin(&level));
        assert_eq!(button.poll(), Some(ButtonEvent::Pressed));
    }

    #[test]
    fn test_buttons_poll_in_order() {
        let levels = [Cell::new(true), Cell::new(true), Cell::new(true), Cell::new(true)];
        let mut buttons = Buttons::new(
            SharedPin(&levels[0]),
            SharedPin(&levels[1]),
            SharedPin(&levels[2]),
            SharedPin(&levels[3]),
        );
        assert_eq!(buttons.poll(), None);

        levels[3].set(false);
        levels[1].set(false);
        assert_eq!(buttons.poll(), Some((ButtonId::Down, ButtonEvent::Pressed)));
        assert_eq!(buttons.poll(), Some((ButtonId::Right, ButtonEvent::Pressed)));
        assert_eq!(buttons.poll(), None);
        assert!(buttons.is_pressed(ButtonId::Right));
        assert!(!buttons.is_pressed(ButtonId::Up));
    }
}
