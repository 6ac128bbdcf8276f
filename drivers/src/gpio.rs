use defmt::{Format, debug};
use diagnostics::ensure;
use registers::{Port, Register, RegisterInterface};

pub const PIN_COUNT: u8 = 16;

/// CNF/MODE nibble of a CRL/CRH slot. `0xC` is reserved by the hardware.
#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinMode {
    AnalogInput = 0x0,
    OutputPushPull10MHz = 0x1,
    OutputPushPull2MHz = 0x2,
    OutputPushPull50MHz = 0x3,
    FloatingInput = 0x4,
    OutputOpenDrain10MHz = 0x5,
    OutputOpenDrain2MHz = 0x6,
    OutputOpenDrain50MHz = 0x7,
    PullInput = 0x8,
    AlternatePushPull10MHz = 0x9,
    AlternatePushPull2MHz = 0xA,
    AlternatePushPull50MHz = 0xB,
    AlternateOpenDrain10MHz = 0xD,
    AlternateOpenDrain2MHz = 0xE,
    AlternateOpenDrain50MHz = 0xF,
}

impl PinMode {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub fn from_bits(bits: u32) -> PinMode {
        match bits {
            0x0 => PinMode::AnalogInput,
            0x1 => PinMode::OutputPushPull10MHz,
            0x2 => PinMode::OutputPushPull2MHz,
            0x3 => PinMode::OutputPushPull50MHz,
            0x4 => PinMode::FloatingInput,
            0x5 => PinMode::OutputOpenDrain10MHz,
            0x6 => PinMode::OutputOpenDrain2MHz,
            0x7 => PinMode::OutputOpenDrain50MHz,
            0x8 => PinMode::PullInput,
            0x9 => PinMode::AlternatePushPull10MHz,
            0xA => PinMode::AlternatePushPull2MHz,
            0xB => PinMode::AlternatePushPull50MHz,
            0xD => PinMode::AlternateOpenDrain10MHz,
            0xE => PinMode::AlternateOpenDrain2MHz,
            0xF => PinMode::AlternateOpenDrain50MHz,
            _ => diagnostics::assertion_failed(file!(), line!()),
        }
    }
}

fn config_slot(port: Port, pin: u8) -> (Register, u32) {
    ensure!(pin < PIN_COUNT);

    let register = if pin < 8 {
        Register::GpioCrl(port)
    } else {
        Register::GpioCrh(port)
    };

    (register, (pin as u32 % 8) * 4)
}

pub fn configure_pin<R: RegisterInterface>(registers: &R, port: Port, pin: u8, mode: PinMode) {
    let (register, offset) = config_slot(port, pin);

    debug!("GPIO: P{}{} as {}", port, pin, mode);

    registers.write_field(register, offset, 4, mode.bits());
}

pub fn pin_mode<R: RegisterInterface>(registers: &R, port: Port, pin: u8) -> PinMode {
    let (register, offset) = config_slot(port, pin);

    PinMode::from_bits(registers.read_field(register, offset, 4))
}

/// Drives an output pin through BSRR, so no other pin of the port is touched.
pub fn set_pin<R: RegisterInterface>(registers: &R, port: Port, pin: u8, on: bool) {
    ensure!(pin < PIN_COUNT);

    let bit = if on { pin as u32 } else { pin as u32 + 16 };
    registers.write(Register::GpioBsrr(port), 1 << bit);
}
