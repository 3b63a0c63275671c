//! # ILI9341 TFT driver
//!
//! Blocking driver for the ILI9341 controller found on the STM32F429I-Discovery
//! board (240x320, RGB565). It owns the power-up script, the column/page
//! windowing protocol, single pixel plotting and text rendering with the
//! built-in 8x8 [`font`].
//!
//! The driver is generic over any [`WriteOnlyDataCommand`] interface. For a
//! plain SPI bus with manual chip-select use [`SpiInterface`].
//!
//! There is no frame buffer: every call goes straight to the controller and
//! re-issues the address window, even for a single pixel.
//!
//! ```ignore
//! let di = SpiInterface::new(spi, dc, cs);
//! let mut lcd = Ili9341::new(di).init(&mut delay)?;
//! lcd.clear(Rgb565::BLACK)?;
//! lcd.draw_string(10, 10, "HELLO", Rgb565::WHITE, Rgb565::BLACK)?;
//! ```

#![cfg_attr(not(test), no_std)]

use core::iter;
use core::marker::PhantomData;

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;

pub mod command;
pub mod font;
pub mod interface;
#[cfg(test)]
mod mock;

pub use command::Command;
pub use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
pub use interface::SpiInterface;

use command::Step;
use font::{GLYPH_HEIGHT, GLYPH_WIDTH, LINE_ADVANCE};

/// Native panel width in portrait orientation.
pub const WIDTH: u16 = 240;
/// Native panel height in portrait orientation.
pub const HEIGHT: u16 = 320;

/// Controller has not seen the power-up script yet.
pub struct Uninitialized;
/// Controller is awake and accepts pixel data.
pub struct Ready;

#[derive(Debug, Clone)]
pub enum Error {
    /// The transport failed to move a byte.
    Interface(DisplayError),
    /// Coordinate outside the drawable surface.
    OutOfBounds,
    /// Character outside the printable ASCII range.
    UnsupportedGlyph,
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Interface(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "display interface error: {:?}", e),
            Error::OutOfBounds => f.write_str("coordinate out of bounds"),
            Error::UnsupportedGlyph => f.write_str("unsupported glyph"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Interface(_) => defmt::write!(f, "Interface"),
            Error::OutOfBounds => defmt::write!(f, "OutOfBounds"),
            Error::UnsupportedGlyph => defmt::write!(f, "UnsupportedGlyph"),
        }
    }
}

pub struct Ili9341<DI, MODE = Ready> {
    di: DI,
    width: u16,
    height: u16,
    _mode: PhantomData<MODE>,
}

impl<DI: WriteOnlyDataCommand> Ili9341<DI, Uninitialized> {
    /// Driver for the native 240x320 panel.
    pub fn new(di: DI) -> Self {
        Self::new_with_size(di, WIDTH, HEIGHT)
    }

    pub fn new_with_size(di: DI, width: u16, height: u16) -> Self {
        Self {
            di,
            width,
            height,
            _mode: PhantomData,
        }
    }

    /// Replay the power-up script and switch the panel on.
    pub fn init<D: DelayNs>(mut self, delay: &mut D) -> Result<Ili9341<DI, Ready>, Error> {
        for step in command::INIT_SCRIPT {
            match *step {
                Step::Delay(ms) => delay.delay_ms(ms),
                Step::Write(cmd, params) => self.write_command(cmd, params)?,
            }
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("ili9341 on, {}x{}", self.width, self.height);

        Ok(Ili9341 {
            di: self.di,
            width: self.width,
            height: self.height,
            _mode: PhantomData,
        })
    }
}

impl<DI: WriteOnlyDataCommand, MODE> Ili9341<DI, MODE> {
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn release(self) -> DI {
        self.di
    }

    fn write_command(&mut self, cmd: Command, params: &[u8]) -> Result<(), Error> {
        self.di.send_commands(DataFormat::U8(&[cmd.into()]))?;
        if !params.is_empty() {
            self.di.send_data(DataFormat::U8(params))?;
        }
        Ok(())
    }
}

impl<DI: WriteOnlyDataCommand> Ili9341<DI, Ready> {
    /// Select the inclusive rectangle `(x0, y0)..=(x1, y1)` and start a
    /// memory write. Bounds are passed through unchecked.
    pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error> {
        self.write_command(Command::ColumnAddressSet, &range(x0, x1))?;
        self.write_command(Command::PageAddressSet, &range(y0, y1))?;
        self.write_command(Command::MemoryWrite, &[])
    }

    /// Fill the whole surface with `color` in a single burst.
    pub fn clear(&mut self, color: Rgb565) -> Result<(), Error> {
        self.set_window(
            0,
            0,
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
        )?;
        let count = usize::from(self.width) * usize::from(self.height);
        self.write_repeated(color, count)
    }

    /// Plot one pixel. Coordinates off the surface are ignored.
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), Error> {
        if !self.contains(x, y) {
            return Ok(());
        }
        self.set_window(x, y, x, y)?;
        self.di
            .send_data(DataFormat::U16BE(&mut [color.into_storage()]))?;
        Ok(())
    }

    /// Like [`Self::draw_pixel`] but reports off-surface coordinates.
    pub fn try_draw_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), Error> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds);
        }
        self.draw_pixel(x, y, color)
    }

    /// Paint the 8x8 cell of `ch` with its top-left corner at `(x, y)`.
    ///
    /// Characters outside `' '..='\x7F'` are ignored. Printable characters
    /// without a drawing paint an empty cell in `bg`.
    pub fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgb565,
        bg: Rgb565,
    ) -> Result<(), Error> {
        match font::glyph(ch) {
            Some(bitmap) => self.draw_glyph(x, y, bitmap, fg, bg),
            None => Ok(()),
        }
    }

    /// Like [`Self::draw_char`] but reports characters that cannot be drawn.
    pub fn try_draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgb565,
        bg: Rgb565,
    ) -> Result<(), Error> {
        let bitmap = font::glyph(ch).ok_or(Error::UnsupportedGlyph)?;
        self.draw_glyph(x, y, bitmap, fg, bg)
    }

    /// Render `text` left to right starting at `(x, y)`.
    ///
    /// `'\n'` starts a new line at the starting `x`, [`LINE_ADVANCE`] rows
    /// down. A character whose cell would start within the last glyph width
    /// of the surface is moved to the start of the next line instead.
    pub fn draw_string(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgb565,
        bg: Rgb565,
    ) -> Result<(), Error> {
        let wrap_at = self.width.saturating_sub(GLYPH_WIDTH);
        let (mut cx, mut cy) = (x, y);

        for ch in text.chars() {
            if ch == '\n' {
                cx = x;
                cy = cy.saturating_add(LINE_ADVANCE);
                continue;
            }
            if cx >= wrap_at {
                cx = x;
                cy = cy.saturating_add(LINE_ADVANCE);
            }
            self.draw_char(cx, cy, ch, fg, bg)?;
            cx = cx.saturating_add(GLYPH_WIDTH);
        }
        Ok(())
    }

    fn draw_glyph(
        &mut self,
        x: u16,
        y: u16,
        bitmap: &font::Bitmap,
        fg: Rgb565,
        bg: Rgb565,
    ) -> Result<(), Error> {
        let fits = u32::from(x) + u32::from(GLYPH_WIDTH) <= u32::from(self.width)
            && u32::from(y) + u32::from(GLYPH_HEIGHT) <= u32::from(self.height);

        if fits {
            self.set_window(x, y, x + GLYPH_WIDTH - 1, y + GLYPH_HEIGHT - 1)?;
            let mut cells = font::cells(bitmap, fg.into_storage(), bg.into_storage());
            self.di.send_data(DataFormat::U16BEIter(&mut cells))?;
            return Ok(());
        }

        // Partially visible cell: plot pixel by pixel and let clipping drop
        // whatever falls off the surface.
        for (row, line) in (0..GLYPH_HEIGHT).zip(bitmap.iter()) {
            for col in 0..GLYPH_WIDTH {
                let color = if line & (0x80 >> col) != 0 { fg } else { bg };
                self.draw_pixel(x.saturating_add(col), y.saturating_add(row), color)?;
            }
        }
        Ok(())
    }

    fn write_repeated(&mut self, color: Rgb565, count: usize) -> Result<(), Error> {
        let mut words = iter::repeat(color.into_storage()).take(count);
        self.di.send_data(DataFormat::U16BEIter(&mut words))?;
        Ok(())
    }

    #[inline]
    fn contains(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }
}

/// Start and end address, both big-endian.
fn range(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

impl<DI: WriteOnlyDataCommand> OriginDimensions for Ili9341<DI, Ready> {
    fn size(&self) -> Size {
        Size::new(self.width.into(), self.height.into())
    }
}

impl<DI: WriteOnlyDataCommand> DrawTarget for Ili9341<DI, Ready> {
    type Color = Rgb565;
    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
                self.draw_pixel(x, y, color)?;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        let x0 = u16::try_from(area.top_left.x).map_err(|_| Error::OutOfBounds)?;
        let y0 = u16::try_from(area.top_left.y).map_err(|_| Error::OutOfBounds)?;
        let x1 = u16::try_from(bottom_right.x).map_err(|_| Error::OutOfBounds)?;
        let y1 = u16::try_from(bottom_right.y).map_err(|_| Error::OutOfBounds)?;

        self.set_window(x0, y0, x1, y1)?;
        self.write_repeated(color, area.size.width as usize * area.size.height as usize)
    }
}
