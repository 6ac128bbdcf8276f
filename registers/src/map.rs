use defmt::Format;
use diagnostics::ensure;

use crate::Port;

/// Control words reachable through a [`RegisterInterface`](crate::RegisterInterface).
///
/// Indexed variants carry the register number within their bank:
/// `AfioExticr(0..4)`, `Nvic*(0..3)` words of 32 interrupts, and
/// `NvicIpr(0..17)` words of four priority bytes.
#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    RccApb2enr,
    GpioCrl(Port),
    GpioCrh(Port),
    GpioOdr(Port),
    GpioBsrr(Port),
    AfioExticr(u8),
    ExtiImr,
    ExtiRtsr,
    ExtiFtsr,
    ExtiPr,
    NvicIser(u8),
    NvicIcer(u8),
    NvicIspr(u8),
    NvicIcpr(u8),
    NvicIpr(u8),
}

pub const EXTICR_COUNT: u8 = 4;
pub const NVIC_WORD_COUNT: u8 = 3;
pub const NVIC_IPR_COUNT: u8 = 17;

pub struct RegisterMap {
    pub rcc: usize,
    pub gpio: [usize; 5],
    pub afio: usize,
    pub exti: usize,
    pub nvic_iser: usize,
    pub nvic_icer: usize,
    pub nvic_ispr: usize,
    pub nvic_icpr: usize,
    pub nvic_ipr: usize,
}

pub static STM32F103: RegisterMap = RegisterMap {
    rcc: 0x4002_1000,
    gpio: [
        0x4001_0800,
        0x4001_0C00,
        0x4001_1000,
        0x4001_1400,
        0x4001_1800,
    ],
    afio: 0x4001_0000,
    exti: 0x4001_0400,
    nvic_iser: 0xE000_E100,
    nvic_icer: 0xE000_E180,
    nvic_ispr: 0xE000_E200,
    nvic_icpr: 0xE000_E280,
    nvic_ipr: 0xE000_E400,
};

impl Register {
    /// Halts unless the bank index names an implemented register.
    pub fn validate(self) {
        match self {
            Register::AfioExticr(index) => ensure!(index < EXTICR_COUNT),
            Register::NvicIser(word)
            | Register::NvicIcer(word)
            | Register::NvicIspr(word)
            | Register::NvicIcpr(word) => ensure!(word < NVIC_WORD_COUNT),
            Register::NvicIpr(word) => ensure!(word < NVIC_IPR_COUNT),
            _ => {}
        }
    }

    pub fn address(self) -> usize {
        self.validate();

        let map = &STM32F103;

        match self {
            Register::RccApb2enr => map.rcc + 0x18,
            Register::GpioCrl(port) => map.gpio[port.index()],
            Register::GpioCrh(port) => map.gpio[port.index()] + 0x04,
            Register::GpioOdr(port) => map.gpio[port.index()] + 0x0C,
            Register::GpioBsrr(port) => map.gpio[port.index()] + 0x10,
            Register::AfioExticr(index) => map.afio + 0x08 + 4 * index as usize,
            Register::ExtiImr => map.exti,
            Register::ExtiRtsr => map.exti + 0x08,
            Register::ExtiFtsr => map.exti + 0x0C,
            Register::ExtiPr => map.exti + 0x14,
            Register::NvicIser(word) => map.nvic_iser + 4 * word as usize,
            Register::NvicIcer(word) => map.nvic_icer + 4 * word as usize,
            Register::NvicIspr(word) => map.nvic_ispr + 4 * word as usize,
            Register::NvicIcpr(word) => map.nvic_icpr + 4 * word as usize,
            Register::NvicIpr(word) => map.nvic_ipr + 4 * word as usize,
        }
    }
}
