//! Test doubles: a controller model that records the command stream and
//! keeps its own frame memory, and a delay that only counts.

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::delay::DelayNs;

const CASET: u8 = 0x2A;
const PASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Command(u8),
    Data(u8),
}

/// Minimal ILI9341 model.
///
/// Interprets column/page address set and memory write the way the
/// controller does with MADCTL row-major addressing: the write pointer walks
/// the current window left to right, top to bottom, and stops at its end.
pub struct Panel {
    width: u16,
    height: u16,
    frame: Vec<u16>,
    events: Vec<Event>,
    windows: Vec<(u16, u16, u16, u16)>,
    current: Option<u8>,
    params: Vec<u8>,
    columns: (u16, u16),
    pages: (u16, u16),
    cursor: Option<(u16, u16)>,
    pending: Option<u8>,
    pixel_writes: usize,
    ramwr_bursts: usize,
}

impl Panel {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            frame: vec![0; usize::from(width) * usize::from(height)],
            events: Vec::new(),
            windows: Vec::new(),
            current: None,
            params: Vec::new(),
            columns: (0, width - 1),
            pages: (0, height - 1),
            cursor: None,
            pending: None,
            pixel_writes: 0,
            ramwr_bursts: 0,
        }
    }

    /// Forget the recorded traffic, keep frame memory.
    pub fn reset_log(&mut self) {
        self.events.clear();
        self.windows.clear();
        self.pixel_writes = 0;
        self.ramwr_bursts = 0;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(*c),
                Event::Data(_) => None,
            })
            .collect()
    }

    /// Parameter bytes following the last occurrence of `cmd`.
    pub fn params_of(&self, cmd: u8) -> Vec<u8> {
        let start = self
            .events
            .iter()
            .rposition(|e| *e == Event::Command(cmd))
            .expect("command was never sent");
        self.events[start + 1..]
            .iter()
            .map_while(|e| match e {
                Event::Data(b) => Some(*b),
                Event::Command(_) => None,
            })
            .collect()
    }

    /// Window active at each memory write, in order.
    pub fn windows(&self) -> &[(u16, u16, u16, u16)] {
        &self.windows
    }

    pub fn pixel_writes(&self) -> usize {
        self.pixel_writes
    }

    pub fn data_bursts_after_ramwr(&self) -> usize {
        self.ramwr_bursts
    }

    pub fn frame(&self) -> &[u16] {
        &self.frame
    }

    pub fn pixel(&self, x: u16, y: u16) -> u16 {
        self.frame[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    fn command(&mut self, cmd: u8) {
        self.events.push(Event::Command(cmd));
        self.current = Some(cmd);
        self.params.clear();
        self.pending = None;
        if cmd == RAMWR {
            self.windows
                .push((self.columns.0, self.pages.0, self.columns.1, self.pages.1));
            self.cursor = Some((self.columns.0, self.pages.0));
        }
    }

    fn data(&mut self, byte: u8) {
        self.events.push(Event::Data(byte));
        match self.current {
            Some(RAMWR) => match self.pending.take() {
                None => self.pending = Some(byte),
                Some(hi) => self.write_pixel(u16::from_be_bytes([hi, byte])),
            },
            Some(cmd @ (CASET | PASET)) => {
                self.params.push(byte);
                if self.params.len() == 4 {
                    let start = u16::from_be_bytes([self.params[0], self.params[1]]);
                    let end = u16::from_be_bytes([self.params[2], self.params[3]]);
                    if cmd == CASET {
                        self.columns = (start, end);
                    } else {
                        self.pages = (start, end);
                    }
                }
            }
            _ => self.params.push(byte),
        }
    }

    fn write_pixel(&mut self, color: u16) {
        self.pixel_writes += 1;
        let Some((x, y)) = self.cursor else {
            return;
        };
        if x < self.width && y < self.height {
            let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
            self.frame[idx] = color;
        }
        self.cursor = if x < self.columns.1 {
            Some((x + 1, y))
        } else if y < self.pages.1 {
            Some((self.columns.0, y + 1))
        } else {
            None
        };
    }
}

fn bytes(format: DataFormat<'_>) -> Vec<u8> {
    match format {
        DataFormat::U8(b) => b.to_vec(),
        DataFormat::U16BE(w) => w.iter().flat_map(|w| w.to_be_bytes()).collect(),
        DataFormat::U16BEIter(it) => it.flat_map(u16::to_be_bytes).collect(),
        DataFormat::U8Iter(it) => it.collect(),
        _ => panic!("format not used by the driver"),
    }
}

impl WriteOnlyDataCommand for Panel {
    fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        for byte in bytes(cmd) {
            self.command(byte);
        }
        Ok(())
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        if self.current == Some(RAMWR) {
            self.ramwr_bursts += 1;
        }
        for byte in bytes(buf) {
            self.data(byte);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingDelay {
    waits_ns: Vec<u32>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u32 {
        self.waits_ns.iter().sum::<u32>() / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns);
    }
}
