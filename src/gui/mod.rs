//! The debug screen: a fixed banner, a separator and two status rows that
//! are redrawn in place.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use heapless::String;
use ili9341::{Error, Ili9341, WriteOnlyDataCommand};

use crate::clock::ClockSource;

/// Left margin shared by every row.
pub const MARGIN_X: u16 = 10;

pub const TITLE_Y: u16 = 10;
pub const SUBTITLE_Y: u16 = 30;
pub const CLOCK_Y: u16 = 50;
pub const TEST_ROWS_Y: [u16; 3] = [80, 100, 120];
pub const SEPARATOR_Y: u16 = 145;
pub const COUNTER_Y: u16 = 160;
pub const UPTIME_Y: u16 = 180;

const TEST_ROWS: [&str; 3] = [
    "Test 1: HELLO",
    "Test 2: ABCDEFGHIJKLM",
    "Test 3: 0123456789",
];

const TITLE: &str = "STM32F429I Discovery";
const SUBTITLE: &str = "LCD Debug Display";

const BACKGROUND: Rgb565 = Rgb565::BLACK;
const SEPARATOR: Rgb565 = Rgb565::new(12, 24, 12);

pub type CounterLine = String<16>;
pub type UptimeLine = String<24>;

#[derive(Debug, Clone, Copy)]
pub struct DebugScreen {
    clock: ClockSource,
}

impl DebugScreen {
    pub fn new(clock: ClockSource) -> Self {
        Self { clock }
    }

    /// Draw the static part of the screen. Expects a cleared display.
    pub fn draw_banner<DI>(&self, lcd: &mut Ili9341<DI>) -> Result<(), Error>
    where
        DI: WriteOnlyDataCommand,
    {
        row(lcd, TITLE_Y, TITLE, Rgb565::WHITE)?;
        row(lcd, SUBTITLE_Y, SUBTITLE, Rgb565::YELLOW)?;
        row(lcd, CLOCK_Y, self.clock.label(), self.clock.label_color())?;
        for (y, text) in TEST_ROWS_Y.into_iter().zip(TEST_ROWS) {
            row(lcd, y, text, Rgb565::WHITE)?;
        }

        let margins = 2 * u32::from(MARGIN_X);
        let width = u32::from(lcd.width()).saturating_sub(margins);
        Rectangle::new(
            Point::new(MARGIN_X.into(), SEPARATOR_Y.into()),
            Size::new(width, 1),
        )
        .into_styled(PrimitiveStyle::with_fill(SEPARATOR))
        .draw(lcd)
    }

    /// Redraw the counter and uptime rows.
    pub fn draw_status<DI>(
        &self,
        lcd: &mut Ili9341<DI>,
        counter: u16,
        uptime_ms: u32,
    ) -> Result<(), Error>
    where
        DI: WriteOnlyDataCommand,
    {
        row(lcd, COUNTER_Y, &counter_line(counter), Rgb565::YELLOW)?;
        row(lcd, UPTIME_Y, &uptime_line(uptime_ms), Rgb565::GREEN)
    }
}

/// One line of text at the left margin, on the screen background.
fn row<DI>(lcd: &mut Ili9341<DI>, y: u16, text: &str, color: Rgb565) -> Result<(), Error>
where
    DI: WriteOnlyDataCommand,
{
    lcd.draw_string(MARGIN_X, y, text, color, BACKGROUND)
}

/// `Counter: N`, padded so a shorter value paints over the digits of a
/// longer one after the counter wraps.
pub fn counter_line(counter: u16) -> CounterLine {
    let mut line = CounterLine::new();
    // 14 characters at most, always fits
    let _ = write!(line, "Counter: {:<5}", counter);
    line
}

/// `Uptime: N ms`, padded the same way for when the millisecond count
/// wraps.
pub fn uptime_line(uptime_ms: u32) -> UptimeLine {
    let mut line = UptimeLine::new();
    // always 21 characters
    let _ = write!(line, "Uptime: {:<10} ms", uptime_ms);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use ili9341::{DataFormat, DisplayError};
    use embedded_hal_mock::eh1::delay::NoopDelay;

    /// Records the top-left corner of every memory write window and the
    /// number of pixels written into it.
    #[derive(Default)]
    struct Windows {
        last_cmd: u8,
        params: Vec<u8>,
        x0: u16,
        y0: u16,
        writes: Vec<((u16, u16), usize)>,
    }

    impl WriteOnlyDataCommand for Windows {
        fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
            let DataFormat::U8(&[cmd]) = cmd else {
                panic!("commands go out one byte at a time");
            };
            self.last_cmd = cmd;
            self.params.clear();
            if cmd == 0x2C {
                self.writes.push(((self.x0, self.y0), 0));
            }
            Ok(())
        }

        fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
            let pixels = match buf {
                DataFormat::U8(bytes) => {
                    self.params.extend_from_slice(bytes);
                    0
                }
                DataFormat::U16BE(words) => words.len(),
                DataFormat::U16BEIter(it) => it.count(),
                _ => panic!("unexpected format"),
            };
            match self.last_cmd {
                0x2A if self.params.len() >= 2 => {
                    self.x0 = u16::from_be_bytes([self.params[0], self.params[1]])
                }
                0x2B if self.params.len() >= 2 => {
                    self.y0 = u16::from_be_bytes([self.params[0], self.params[1]])
                }
                0x2C => {
                    if let Some(last) = self.writes.last_mut() {
                        last.1 += pixels;
                    }
                }
                _ => {}
            }
            Ok(())
        }
    }

    fn lcd() -> Ili9341<Windows> {
        Ili9341::new(Windows::default())
            .init(&mut NoopDelay)
            .unwrap()
    }

    fn origins(lcd: Ili9341<Windows>) -> Vec<((u16, u16), usize)> {
        lcd.release().writes
    }

    #[test]
    fn status_lines() {
        assert_eq!(counter_line(0).as_str(), "Counter: 0    ");
        assert_eq!(counter_line(u16::MAX).as_str(), "Counter: 65535");
        assert_eq!(uptime_line(0).as_str(), "Uptime: 0          ms");
        assert_eq!(uptime_line(u32::MAX).as_str(), "Uptime: 4294967295 ms");
    }

    #[test]
    fn counter_line_covers_old_digits_after_wrap() {
        let before = counter_line(u16::MAX);
        let after = counter_line(u16::MAX.wrapping_add(1));
        assert_eq!(after.as_str(), "Counter: 0    ");
        assert_eq!(after.len(), before.len());
    }

    #[test]
    fn uptime_line_covers_old_digits_after_wrap() {
        let before = uptime_line(u32::MAX);
        let after = uptime_line(u32::MAX.wrapping_add(1));
        assert_eq!(after.as_str(), "Uptime: 0          ms");
        assert_eq!(after.len(), before.len());
    }

    #[test]
    fn status_redraw_after_wrap_paints_the_same_cells() {
        let screen = DebugScreen::new(ClockSource::Hse);
        let mut first = lcd();
        screen.draw_status(&mut first, u16::MAX, u32::MAX).unwrap();
        let mut wrapped = lcd();
        screen.draw_status(&mut wrapped, 0, 0).unwrap();

        let before = origins(first);
        let after = origins(wrapped);

        assert_eq!(before, after);
    }

    #[test]
    fn banner_rows_start_at_the_margin() {
        let mut lcd = lcd();
        DebugScreen::new(ClockSource::Hse)
            .draw_banner(&mut lcd)
            .unwrap();
        let writes = origins(lcd);

        let row_starts: Vec<u16> = writes
            .iter()
            .filter(|((x, _), _)| *x == MARGIN_X)
            .map(|((_, y), _)| *y)
            .collect();
        let mut expected = vec![TITLE_Y, SUBTITLE_Y, CLOCK_Y];
        expected.extend(TEST_ROWS_Y);
        expected.push(SEPARATOR_Y);
        assert_eq!(row_starts, expected);
    }

    #[test]
    fn banner_glyph_count_matches_text() {
        let mut lcd = lcd();
        DebugScreen::new(ClockSource::Hsi)
            .draw_banner(&mut lcd)
            .unwrap();
        let writes = origins(lcd);

        let text_len = [TITLE, SUBTITLE, ClockSource::Hsi.label()]
            .iter()
            .chain(TEST_ROWS.iter())
            .map(|s| s.len())
            .sum::<usize>();
        let glyphs = writes.iter().filter(|(_, n)| *n == 64).count();
        assert_eq!(glyphs, text_len);

        let (origin, rule) = writes.last().unwrap();
        assert_eq!(*origin, (MARGIN_X, SEPARATOR_Y));
        assert_eq!(*rule, 220);
    }

    #[test]
    fn status_redraws_two_rows() {
        let mut lcd = lcd();
        DebugScreen::new(ClockSource::Hse)
            .draw_status(&mut lcd, 42, 123_456)
            .unwrap();
        let writes = origins(lcd);

        let counter_len = counter_line(42).len();
        let uptime_len = uptime_line(123_456).len();
        assert_eq!(writes.len(), counter_len + uptime_len);
        assert!(writes[..counter_len]
            .iter()
            .all(|((_, y), n)| *y == COUNTER_Y && *n == 64));
        assert!(writes[counter_len..]
            .iter()
            .all(|((_, y), n)| *y == UPTIME_Y && *n == 64));
        assert_eq!(writes[counter_len].0, (MARGIN_X, UPTIME_Y));
    }
}
