//! GPIO pin abstractions
//!
//! Digital pins used by both node roles: the ultrasonic trigger, the role
//! strap, the mode/preset buttons and the digit-select lines of the display.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Drive every pin in a group low.
///
/// Used to blank all digit-select lines between multiplex slots.
pub fn set_all_low<P: OutputPin>(pins: &mut [P]) {
    for pin in pins {
        pin.set_low();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = MockPin { high: false };
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(!pin.is_set_high());
    }

    #[test]
    fn test_set_all_low() {
        let mut pins = [
            MockPin { high: true },
            MockPin { high: false },
            MockPin { high: true },
        ];
        set_all_low(&mut pins);
        assert!(pins.iter().all(|p| !p.is_set_high()));
    }
}
