#![cfg_attr(not(test), no_std)]

//! In-memory STM32F103 register file for host tests.
//!
//! Writes follow the hardware rules the drivers depend on: `ExtiPr` is
//! write-1-to-clear, the NVIC set/clear pairs share one bank of enable and
//! pending bits, BSRR drives ODR, and unimplemented IPR bits read as zero.
//! An EXTI line whose pending bit is set while unmasked keeps its NVIC
//! interrupt pending, so a handler that forgets the peripheral clear fires
//! again on the next dispatch.

use core::sync::atomic::{AtomicU32, Ordering};

use defmt::trace;
use diagnostics::ensure;
use registers::{EXTI_LINE_COUNT, Edge, IRQ_COUNT, Port, Register, RegisterInterface, exti_irq};

const RCC_SLOT: usize = 0;
const GPIO_SLOT: usize = 1;
const GPIO_WORDS: usize = 3;
const AFIO_SLOT: usize = GPIO_SLOT + GPIO_WORDS * Port::ALL.len();
const EXTI_IMR_SLOT: usize = AFIO_SLOT + 4;
const EXTI_RTSR_SLOT: usize = EXTI_IMR_SLOT + 1;
const EXTI_FTSR_SLOT: usize = EXTI_IMR_SLOT + 2;
const EXTI_PR_SLOT: usize = EXTI_IMR_SLOT + 3;
const NVIC_ENABLE_SLOT: usize = EXTI_IMR_SLOT + 4;
const NVIC_PENDING_SLOT: usize = NVIC_ENABLE_SLOT + 3;
const NVIC_IPR_SLOT: usize = NVIC_PENDING_SLOT + 3;
const SLOT_COUNT: usize = NVIC_IPR_SLOT + 17;

/// CRL/CRH reset value: every pin a floating input.
pub const GPIO_CONFIG_RESET: u32 = 0x4444_4444;
const IPR_IMPLEMENTED: u32 = 0xF0F0_F0F0;

pub struct SimulatedRegisters {
    words: [AtomicU32; SLOT_COUNT],
}

impl SimulatedRegisters {
    pub const fn new() -> Self {
        let mut words = [const { AtomicU32::new(0) }; SLOT_COUNT];

        let mut port = 0;
        while port < Port::ALL.len() {
            words[GPIO_SLOT + port * GPIO_WORDS] = AtomicU32::new(GPIO_CONFIG_RESET);
            words[GPIO_SLOT + port * GPIO_WORDS + 1] = AtomicU32::new(GPIO_CONFIG_RESET);
            port += 1;
        }

        Self { words }
    }

    /// Presents an edge on pin `line` of `port`.
    ///
    /// Latches the EXTI pending bit when `port` is the source selected for
    /// the line and the trigger for `edge` is enabled.
    pub fn drive_edge(&self, port: Port, line: u8, edge: Edge) {
        ensure!(line < EXTI_LINE_COUNT);

        let exticr = self.word(AFIO_SLOT + (line / 4) as usize);
        let selected = (exticr >> ((line % 4) * 4)) & 0xF;
        if selected != port.code() {
            return;
        }

        let trigger = match edge {
            Edge::Rising => self.word(EXTI_RTSR_SLOT),
            Edge::Falling => self.word(EXTI_FTSR_SLOT),
        };
        if trigger & (1 << line) == 0 {
            return;
        }

        trace!("Simulated {} edge on line {}", edge, line);

        self.words[EXTI_PR_SLOT].fetch_or(1 << line, Ordering::SeqCst);
        self.propagate();
    }

    /// Runs `handler` as the vector for `irq` when that interrupt is both
    /// enabled and pending. Pending state is left for the handler to clear.
    pub fn dispatch(&self, irq: u16, handler: impl FnOnce()) -> bool {
        ensure!(irq < IRQ_COUNT);

        let (slot, bit) = nvic_bit(irq);
        let enabled = self.word(NVIC_ENABLE_SLOT + slot) & bit != 0;
        let pending = self.word(NVIC_PENDING_SLOT + slot) & bit != 0;

        if enabled && pending {
            handler();
            true
        } else {
            false
        }
    }

    pub fn is_irq_pending(&self, irq: u16) -> bool {
        ensure!(irq < IRQ_COUNT);

        let (slot, bit) = nvic_bit(irq);
        self.word(NVIC_PENDING_SLOT + slot) & bit != 0
    }

    fn word(&self, slot: usize) -> u32 {
        self.words[slot].load(Ordering::SeqCst)
    }

    fn propagate(&self) {
        let active = self.word(EXTI_PR_SLOT) & self.word(EXTI_IMR_SLOT);

        for line in (0..EXTI_LINE_COUNT).filter(|line| active & (1 << line) != 0) {
            let (slot, bit) = nvic_bit(exti_irq(line));
            self.words[NVIC_PENDING_SLOT + slot].fetch_or(bit, Ordering::SeqCst);
        }
    }
}

impl Default for SimulatedRegisters {
    fn default() -> Self {
        Self::new()
    }
}

fn nvic_bit(irq: u16) -> (usize, u32) {
    ((irq >> 5) as usize, 1 << (irq & 31))
}

fn slot(register: Register) -> usize {
    register.validate();

    match register {
        Register::RccApb2enr => RCC_SLOT,
        Register::GpioCrl(port) => GPIO_SLOT + port.index() * GPIO_WORDS,
        Register::GpioCrh(port) => GPIO_SLOT + port.index() * GPIO_WORDS + 1,
        Register::GpioOdr(port) | Register::GpioBsrr(port) => {
            GPIO_SLOT + port.index() * GPIO_WORDS + 2
        }
        Register::AfioExticr(index) => AFIO_SLOT + index as usize,
        Register::ExtiImr => EXTI_IMR_SLOT,
        Register::ExtiRtsr => EXTI_RTSR_SLOT,
        Register::ExtiFtsr => EXTI_FTSR_SLOT,
        Register::ExtiPr => EXTI_PR_SLOT,
        Register::NvicIser(word) | Register::NvicIcer(word) => NVIC_ENABLE_SLOT + word as usize,
        Register::NvicIspr(word) | Register::NvicIcpr(word) => NVIC_PENDING_SLOT + word as usize,
        Register::NvicIpr(word) => NVIC_IPR_SLOT + word as usize,
    }
}

impl RegisterInterface for SimulatedRegisters {
    fn read(&self, register: Register) -> u32 {
        match register {
            Register::GpioBsrr(_) => 0,
            _ => self.word(slot(register)),
        }
    }

    fn write(&self, register: Register, value: u32) {
        let word = &self.words[slot(register)];

        match register {
            Register::GpioBsrr(_) => {
                let set = value & 0xFFFF;
                let reset = value >> 16;
                let odr = word.load(Ordering::SeqCst);
                word.store((odr & !reset) | set, Ordering::SeqCst);
            }
            Register::ExtiPr | Register::NvicIcer(_) | Register::NvicIcpr(_) => {
                word.fetch_and(!value, Ordering::SeqCst);
            }
            Register::NvicIser(_) | Register::NvicIspr(_) => {
                word.fetch_or(value, Ordering::SeqCst);
            }
            Register::NvicIpr(_) => word.store(value & IPR_IMPLEMENTED, Ordering::SeqCst),
            _ => word.store(value, Ordering::SeqCst),
        }

        self.propagate();
    }
}

registers::declare_register_tests!(crate::SimulatedRegisters,, use pretty_assertions::assert_eq;);

#[cfg(test)]
mod test;
