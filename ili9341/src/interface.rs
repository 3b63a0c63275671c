//! Command/data transport over a 4-wire SPI bus.
//!
//! Framing is done by [`display_interface_spi::SPIInterface`]: chip-select
//! goes low for the whole transfer, data/command is low for commands and
//! high for data, and chip-select is released again after the bus write,
//! whether the write succeeded or not.

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use display_interface_spi::SPIInterface;
use embedded_hal_02::blocking::spi::Write;
use embedded_hal_02::digital::v2::OutputPin;

pub struct SpiInterface<SPI, DC, CS> {
    inner: SPIInterface<SPI, DC, CS>,
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: Write<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Takes ownership of the bus and both control lines. The pins are
    /// expected to be idle (high) already.
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self {
            inner: SPIInterface::new(spi, dc, cs),
        }
    }

    /// Send a single command byte.
    pub fn send_command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.inner.send_commands(DataFormat::U8(&[cmd]))
    }

    /// Send a single parameter or pixel byte.
    pub fn send_data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.inner.send_data(DataFormat::U8(&[value]))
    }

    pub fn release(self) -> (SPI, DC, CS) {
        self.inner.release()
    }
}

impl<SPI, DC, CS> WriteOnlyDataCommand for SpiInterface<SPI, DC, CS>
where
    SPI: Write<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        self.inner.send_commands(cmd)
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        self.inner.send_data(buf)
    }
}
