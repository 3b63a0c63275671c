//! Oscillator bring-up with a single fallback from the crystal to the
//! internal RC oscillator.

use super::hal::pac;
use super::hal::prelude::*;
use super::hal::rcc::Clocks;

use crate::clock::{self, ClockSource};
use crate::config;

/// Start an oscillator, then run the PLL from it at full speed.
///
/// Returns `None` when neither oscillator reports ready.
pub fn freeze(rcc: pac::RCC) -> Option<(Clocks, ClockSource)> {
    let source = clock::negotiate(|| start_hse(&rcc), || start_hsi(&rcc))?;
    if source == ClockSource::Hsi {
        defmt::warn!("HSE did not start, running from HSI");
    }

    let cfgr = rcc.constrain().cfgr;
    let cfgr = match source {
        ClockSource::Hse => cfgr.use_hse(config::HSE_FREQ_HZ.Hz()),
        ClockSource::Hsi => cfgr,
    };
    let clocks = cfgr
        .sysclk(config::SYSCLK_HZ.Hz())
        .pclk1(config::PCLK1_HZ.Hz())
        .pclk2(config::PCLK2_HZ.Hz())
        .freeze();
    defmt::info!(
        "sysclk {} Hz from {} (pclk2 {} Hz)",
        clocks.sysclk().raw(),
        source,
        clocks.pclk2().raw()
    );
    Some((clocks, source))
}

fn start_hse(rcc: &pac::RCC) -> bool {
    rcc.cr.modify(|_, w| w.hseon().set_bit());
    let ready = wait_ready(|| rcc.cr.read().hserdy().bit_is_set());
    if !ready {
        rcc.cr.modify(|_, w| w.hseon().clear_bit());
    }
    ready
}

fn start_hsi(rcc: &pac::RCC) -> bool {
    rcc.cr.modify(|_, w| w.hsion().set_bit());
    wait_ready(|| rcc.cr.read().hsirdy().bit_is_set())
}

fn wait_ready(mut ready: impl FnMut() -> bool) -> bool {
    (0..config::OSC_STARTUP_POLLS).any(|_| ready())
}
