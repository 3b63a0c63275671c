use super::hal::gpio::{Output, Pin};
use super::hal::spi::Spi5;
use ili9341::{Ili9341, SpiInterface};

/// SPI5 with data/command on PD13 and chip-select on PC2.
pub type LcdInterface = SpiInterface<Spi5, Pin<'D', 13, Output>, Pin<'C', 2, Output>>;
pub type Lcd = Ili9341<LcdInterface>;
