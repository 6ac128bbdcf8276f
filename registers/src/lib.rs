#![cfg_attr(not(test), no_std)]

//! Word-level access to the STM32F103 control registers used by the
//! interrupt pipeline, independent of how the words are backed.

mod map;

use defmt::Format;
use diagnostics::ensure;

pub use map::{Register, RegisterMap, STM32F103};

/// Global interrupt numbers implemented by the STM32F103 NVIC.
pub const IRQ_COUNT: u16 = 68;
pub const EXTI_LINE_COUNT: u8 = 16;
/// Implemented priority bits; the remaining low bits of each IPR byte read as zero.
pub const NVIC_PRIO_BITS: u8 = 4;

pub trait RegisterInterface {
    fn read(&self, register: Register) -> u32;
    fn write(&self, register: Register, value: u32);

    /// Read-modify-write. Must not be used on write-1-to-clear or
    /// write-1-to-set registers: writing back the bits that were read
    /// would clear or set every one of them.
    fn modify(&self, register: Register, f: impl FnOnce(u32) -> u32) {
        let value = self.read(register);
        self.write(register, f(value));
    }

    fn set_bits(&self, register: Register, bits: u32) {
        self.modify(register, |value| value | bits);
    }

    fn clear_bits(&self, register: Register, bits: u32) {
        self.modify(register, |value| value & !bits);
    }

    fn read_field(&self, register: Register, offset: u32, width: u32) -> u32 {
        let mask = field_mask(offset, width);
        (self.read(register) >> offset) & mask
    }

    fn write_field(&self, register: Register, offset: u32, width: u32, value: u32) {
        let mask = field_mask(offset, width);
        ensure!(value <= mask);

        self.modify(register, |current| {
            (current & !(mask << offset)) | (value << offset)
        });
    }
}

fn field_mask(offset: u32, width: u32) -> u32 {
    ensure!(width > 0 && offset + width <= 32);

    if width == 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

impl Port {
    pub const ALL: [Port; 5] = [Port::A, Port::B, Port::C, Port::D, Port::E];

    /// AFIO EXTICR nibble selecting this port.
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Port {
        match code {
            0 => Port::A,
            1 => Port::B,
            2 => Port::C,
            3 => Port::D,
            4 => Port::E,
            _ => diagnostics::assertion_failed(file!(), line!()),
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

/// Global interrupt that services external line `line`.
pub fn exti_irq(line: u8) -> u16 {
    ensure!(line < EXTI_LINE_COUNT);

    match line {
        0..=4 => 6 + line as u16,
        5..=9 => 23,
        _ => 40,
    }
}

/// Generates the behavioural tests every `RegisterInterface` backend must pass.
///
/// The backend type must provide `new()` and start with every tested word at zero.
#[macro_export]
macro_rules! declare_register_tests {
    {$T:ty, $(#[$meta:meta]),*, $($prelude:tt)*} => {
        #[cfg(test)]
        $(#[$meta])*
        mod register_tests {

            $($prelude)*

            use $crate::{Port, Register, RegisterInterface};

            #[test]
            pub fn plain_words_store_what_was_written() {
                let registers = <$T>::new();
                registers.write(Register::ExtiImr, 0x0000_2001);
                assert_eq!(registers.read(Register::ExtiImr), 0x0000_2001);
            }

            #[test]
            pub fn set_and_clear_bits_leave_the_rest_alone() {
                let registers = <$T>::new();
                registers.write(Register::ExtiRtsr, 0b1010);
                registers.set_bits(Register::ExtiRtsr, 0b0001);
                registers.clear_bits(Register::ExtiRtsr, 0b1000);
                assert_eq!(registers.read(Register::ExtiRtsr), 0b0011);
            }

            #[test]
            pub fn fields_are_written_in_place() {
                let registers = <$T>::new();
                registers.write(Register::AfioExticr(3), 0xFFFF);
                registers.write_field(Register::AfioExticr(3), 4, 4, Port::C.code());
                assert_eq!(registers.read(Register::AfioExticr(3)), 0xFF2F);
                assert_eq!(registers.read_field(Register::AfioExticr(3), 4, 4), 2);
            }
        }
    };
}
