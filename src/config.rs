//! Board and screen constants for the STM32F429I-Discovery.

/// External crystal on the Discovery board.
pub const HSE_FREQ_HZ: u32 = 8_000_000;
/// Internal RC oscillator.
pub const HSI_FREQ_HZ: u32 = 16_000_000;
/// Core clock after the PLL, whichever oscillator feeds it.
pub const SYSCLK_HZ: u32 = 168_000_000;
pub const PCLK1_HZ: u32 = 42_000_000;
pub const PCLK2_HZ: u32 = 84_000_000;

/// SPI5 sits on APB2; 84 MHz / 4.
pub const LCD_SPI_FREQ_HZ: u32 = 21_000_000;

/// Polls of the ready flag before an oscillator is given up on.
pub const OSC_STARTUP_POLLS: u32 = 0x0005_0000;

/// Busy-wait cycles between LED toggles once halted, 100 ms at full speed.
pub const HALT_BLINK_CYCLES: u32 = SYSCLK_HZ / 10;

/// Period of the counter/uptime redraw.
pub const STATUS_PERIOD_MS: u32 = 2_000;
