//! Which oscillator ended up driving the PLL, and what that means for the
//! screen and the status LED.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

/// One heartbeat step: LED level and how long to hold it.
pub type Blink = (bool, u32);

const HSE_HEARTBEAT: &[Blink] = &[(true, 100), (false, 100), (true, 100), (false, 700)];
const HSI_HEARTBEAT: &[Blink] = &[(true, 500), (false, 500)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "hardware", derive(defmt::Format))]
pub enum ClockSource {
    /// 8 MHz crystal.
    Hse,
    /// 16 MHz internal RC.
    Hsi,
}

impl ClockSource {
    pub fn label(self) -> &'static str {
        match self {
            ClockSource::Hse => "Clock: HSE (External)",
            ClockSource::Hsi => "Clock: HSI (Internal)",
        }
    }

    pub fn label_color(self) -> Rgb565 {
        match self {
            ClockSource::Hse => Rgb565::GREEN,
            ClockSource::Hsi => Rgb565::BLUE,
        }
    }

    /// LED pattern for one second: a double blink on the crystal, a slow
    /// even blink on the fallback.
    pub fn heartbeat(self) -> &'static [Blink] {
        match self {
            ClockSource::Hse => HSE_HEARTBEAT,
            ClockSource::Hsi => HSI_HEARTBEAT,
        }
    }
}

/// Try the crystal first and fall back to the internal oscillator once.
///
/// Each closure starts its oscillator and reports whether it became ready.
/// `None` means neither did.
pub fn negotiate<H, I>(mut start_hse: H, mut start_hsi: I) -> Option<ClockSource>
where
    H: FnMut() -> bool,
    I: FnMut() -> bool,
{
    if start_hse() {
        Some(ClockSource::Hse)
    } else if start_hsi() {
        Some(ClockSource::Hsi)
    } else {
        None
    }
}
