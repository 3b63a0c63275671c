//! Board bring-up for the STM32F429I-Discovery: clocks, the SPI5 link to
//! the on-board ILI9341 and the green user LED.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::MODE_0;

use hal::gpio::{Output, Pin, PinState};
use hal::pac;
use hal::prelude::*;
use hal::spi::Spi;
use ili9341::{Ili9341, SpiInterface};
use stm32f4xx_hal as hal;

pub mod clocks;
pub mod display;

use crate::clock::ClockSource;
use crate::config;
use crate::led::StatusLed;
use display::Lcd;

/// LD3, active high.
pub type LedPin = Pin<'G', 13, Output>;

pub struct Hardware {
    pub led: StatusLed<LedPin>,
    /// Initialized and switched on, frame memory untouched.
    pub lcd: Lcd,
    pub clock_source: ClockSource,
}

/// Bring up clocks, SPI5 and the display. Any failure on the way is fatal.
pub fn setup(peripherals: pac::Peripherals) -> Hardware {
    let gpiog = peripherals.GPIOG.split();
    let led = StatusLed::new(gpiog.pg13.into_push_pull_output_in_state(PinState::Low));

    let Some((clocks, clock_source)) = clocks::freeze(peripherals.RCC) else {
        defmt::error!("no oscillator came up");
        halt(led);
    };

    let gpiof = peripherals.GPIOF.split();
    let spi5_sck = gpiof.pf7.into_alternate();
    let spi5_miso = gpiof.pf8.into_alternate();
    let spi5_mosi = gpiof.pf9.into_alternate();

    let gpioc = peripherals.GPIOC.split();
    let lcd_cs = gpioc.pc2.into_push_pull_output_in_state(PinState::High);
    let gpiod = peripherals.GPIOD.split();
    let lcd_dc = gpiod.pd13.into_push_pull_output_in_state(PinState::High);

    let spi5 = Spi::new(
        peripherals.SPI5,
        (spi5_sck, spi5_miso, spi5_mosi),
        MODE_0,
        config::LCD_SPI_FREQ_HZ.Hz(),
        &clocks,
    );
    let mut delay = peripherals.TIM2.delay_us(&clocks);

    defmt::info!("display init");
    let di = SpiInterface::new(spi5, lcd_dc, lcd_cs);
    let lcd = match Ili9341::new(di).init(&mut delay) {
        Ok(lcd) => lcd,
        Err(e) => {
            defmt::error!("display init failed: {}", e);
            halt(led);
        }
    };

    Hardware {
        led,
        lcd,
        clock_source,
    }
}

/// Stop everything and blink the LED forever.
pub fn halt<PIN: OutputPin>(mut led: StatusLed<PIN>) -> ! {
    defmt::error!("halted");
    cortex_m::interrupt::disable();
    loop {
        led.toggle();
        cortex_m::asm::delay(config::HALT_BLINK_CYCLES);
    }
}
