#![no_std]

use core::ptr::{read_volatile, write_volatile};

use registers::{Register, RegisterInterface};

/// Volatile access to the real peripheral words.
pub struct MmioRegisters {
    _private: (),
}

impl MmioRegisters {
    /// # Safety
    ///
    /// Must only be constructed when running on an STM32F103, where every
    /// [`Register::address`] is a mapped, word-aligned peripheral register.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterInterface for MmioRegisters {
    fn read(&self, register: Register) -> u32 {
        let address = register.address() as *const u32;

        // SAFETY: see `MmioRegisters::new`.
        unsafe { read_volatile(address) }
    }

    fn write(&self, register: Register, value: u32) {
        let address = register.address() as *mut u32;

        // SAFETY: see `MmioRegisters::new`.
        unsafe { write_volatile(address, value) };

        if is_nvic(register) {
            // NVIC state change must complete before the next instruction.
            cortex_m::asm::dsb();
            cortex_m::asm::isb();
        }
    }
}

fn is_nvic(register: Register) -> bool {
    matches!(
        register,
        Register::NvicIser(_)
            | Register::NvicIcer(_)
            | Register::NvicIspr(_)
            | Register::NvicIcpr(_)
            | Register::NvicIpr(_)
    )
}
