use embedded_hal::digital::OutputPin;

/// Active-high status LED (LD3 on the Discovery board) that remembers what
/// it was last told.
pub struct StatusLed<PIN: OutputPin> {
    pin: PIN,
    is_on: bool,
}

impl<PIN: OutputPin> StatusLed<PIN> {
    /// Wrap `pin` and switch the LED off.
    pub fn new(mut pin: PIN) -> Self {
        pin.set_low().ok();
        Self { pin, is_on: false }
    }

    pub fn set(&mut self, on: bool) {
        if on {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.is_on = on;
    }

    pub fn toggle(&mut self) {
        self.set(!self.is_on);
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock, State, Transaction};

    #[test]
    fn starts_off_and_toggles() {
        let pin = Mock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
        ]);

        let mut led = StatusLed::new(pin);
        assert!(!led.is_on());
        led.toggle();
        assert!(led.is_on());
        led.toggle();
        led.set(true);
        assert!(led.is_on());

        led.free().done();
    }
}
