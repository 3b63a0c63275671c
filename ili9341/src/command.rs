//! ILI9341 opcodes and the power-up script.

/// Controller opcodes used by this driver.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    SoftwareReset = 0x01,
    SleepOut = 0x11,
    GammaSet = 0x26,
    DisplayOn = 0x29,
    ColumnAddressSet = 0x2A,
    PageAddressSet = 0x2B,
    MemoryWrite = 0x2C,
    MemoryAccessControl = 0x36,
    PixelFormatSet = 0x3A,
    FrameRateControl = 0xB1,
    DisplayFunctionControl = 0xB6,
    PowerControl1 = 0xC0,
    PowerControl2 = 0xC1,
    VcomControl1 = 0xC5,
    VcomControl2 = 0xC7,
    PowerControlA = 0xCB,
    PowerControlB = 0xCF,
    PositiveGammaCorrection = 0xE0,
    NegativeGammaCorrection = 0xE1,
    DriverTimingControlA = 0xE8,
    DriverTimingControlB = 0xEA,
    PowerOnSequenceControl = 0xED,
    Enable3Gamma = 0xF2,
    PumpRatioControl = 0xF7,
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd as u8
    }
}

/// One entry of the power-up script.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Command byte followed by its parameter bytes.
    Write(Command, &'static [u8]),
    /// Wait in milliseconds.
    Delay(u32),
}

/// Power-up wait mandated by the controller after reset and sleep-out.
pub const POWER_UP_DELAY_MS: u32 = 120;

/// MADCTL value: column address order mirrored, BGR panel.
pub const MADCTL_MX_BGR: u8 = 0x48;

/// COLMOD value: 16 bits per pixel on both interfaces.
pub const PIXEL_FORMAT_RGB565: u8 = 0x55;

/// Vendor init sequence for the STM32F429I-Discovery panel, replayed verbatim.
pub const INIT_SCRIPT: &[Step] = &[
    Step::Delay(POWER_UP_DELAY_MS),
    Step::Write(Command::SoftwareReset, &[]),
    Step::Delay(POWER_UP_DELAY_MS),
    Step::Write(Command::PowerControlA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    Step::Write(Command::PowerControlB, &[0x00, 0xC1, 0x30]),
    Step::Write(Command::DriverTimingControlA, &[0x85, 0x00, 0x78]),
    Step::Write(Command::DriverTimingControlB, &[0x00, 0x00]),
    Step::Write(Command::PowerOnSequenceControl, &[0x64, 0x03, 0x12, 0x81]),
    Step::Write(Command::PumpRatioControl, &[0x20]),
    Step::Write(Command::PowerControl1, &[0x23]),
    Step::Write(Command::PowerControl2, &[0x10]),
    Step::Write(Command::VcomControl1, &[0x3E, 0x28]),
    Step::Write(Command::VcomControl2, &[0x86]),
    Step::Write(Command::MemoryAccessControl, &[MADCTL_MX_BGR]),
    Step::Write(Command::PixelFormatSet, &[PIXEL_FORMAT_RGB565]),
    Step::Write(Command::FrameRateControl, &[0x00, 0x18]),
    Step::Write(Command::DisplayFunctionControl, &[0x08, 0x82, 0x27]),
    Step::Write(Command::Enable3Gamma, &[0x00]),
    Step::Write(Command::GammaSet, &[0x01]),
    Step::Write(
        Command::PositiveGammaCorrection,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09,
            0x00,
        ],
    ),
    Step::Write(
        Command::NegativeGammaCorrection,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36,
            0x0F,
        ],
    ),
    Step::Write(Command::SleepOut, &[]),
    Step::Delay(POWER_UP_DELAY_MS),
    Step::Write(Command::DisplayOn, &[]),
];
