use core::sync::atomic::{Ordering, compiler_fence};

use defmt::{Format, debug};
use diagnostics::ensure;
use registers::{EXTI_LINE_COUNT, IRQ_COUNT, NVIC_PRIO_BITS, Port, Register, RegisterInterface};

pub const fn irq_word(irq: u16) -> u8 {
    (irq >> 5) as u8
}

pub const fn irq_bit(irq: u16) -> u32 {
    (irq & 31) as u32
}

pub const fn irq_from(word: u8, bit: u32) -> u16 {
    ((word as u16) << 5) | bit as u16
}

pub const fn exticr_index(line: u8) -> u8 {
    line / 4
}

pub const fn exticr_offset(line: u8) -> u32 {
    (line as u32 % 4) * 4
}

#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub rising: bool,
    pub falling: bool,
}

impl Trigger {
    pub const NONE: Trigger = Trigger {
        rising: false,
        falling: false,
    };
    pub const RISING: Trigger = Trigger {
        rising: true,
        falling: false,
    };
    pub const FALLING: Trigger = Trigger {
        rising: false,
        falling: true,
    };
    pub const BOTH: Trigger = Trigger {
        rising: true,
        falling: true,
    };
}

/// External line routing plus the NVIC side of each line's interrupt.
///
/// Line arguments must be below 16 and interrupt numbers below 68; anything
/// else halts through the assertion channel rather than being clamped.
pub struct InterruptController<'r, R: RegisterInterface> {
    registers: &'r R,
}

impl<'r, R: RegisterInterface> InterruptController<'r, R> {
    pub const fn new(registers: &'r R) -> Self {
        Self { registers }
    }

    pub fn select_source(&self, port: Port, line: u8) {
        ensure!(line < EXTI_LINE_COUNT);

        debug!("EXTI: line {} sourced from port {}", line, port);

        self.write_field(
            Register::AfioExticr(exticr_index(line)),
            exticr_offset(line),
            4,
            port.code(),
        );
    }

    pub fn source(&self, line: u8) -> Port {
        ensure!(line < EXTI_LINE_COUNT);

        let code = self.registers.read_field(
            Register::AfioExticr(exticr_index(line)),
            exticr_offset(line),
            4,
        );
        Port::from_code(code)
    }

    pub fn set_trigger_edge(&self, line: u8, trigger: Trigger) {
        ensure!(line < EXTI_LINE_COUNT);

        self.write_field(Register::ExtiRtsr, line as u32, 1, trigger.rising as u32);
        self.write_field(Register::ExtiFtsr, line as u32, 1, trigger.falling as u32);
    }

    pub fn trigger_edge(&self, line: u8) -> Trigger {
        ensure!(line < EXTI_LINE_COUNT);

        Trigger {
            rising: self.registers.read_field(Register::ExtiRtsr, line as u32, 1) == 1,
            falling: self.registers.read_field(Register::ExtiFtsr, line as u32, 1) == 1,
        }
    }

    /// `enabled` unmasks the line.
    pub fn mask(&self, line: u8, enabled: bool) {
        ensure!(line < EXTI_LINE_COUNT);

        self.write_field(Register::ExtiImr, line as u32, 1, enabled as u32);
    }

    pub fn is_unmasked(&self, line: u8) -> bool {
        ensure!(line < EXTI_LINE_COUNT);

        self.registers.read_field(Register::ExtiImr, line as u32, 1) == 1
    }

    pub fn clear_line_pending(&self, line: u8) {
        ensure!(line < EXTI_LINE_COUNT);

        self.write(Register::ExtiPr, 1 << line);
    }

    pub fn is_line_pending(&self, line: u8) -> bool {
        ensure!(line < EXTI_LINE_COUNT);

        self.registers.read_field(Register::ExtiPr, line as u32, 1) == 1
    }

    pub fn enable_global(&self, irq: u16) {
        ensure!(irq < IRQ_COUNT);

        self.write(Register::NvicIser(irq_word(irq)), 1 << irq_bit(irq));
    }

    pub fn disable_global(&self, irq: u16) {
        ensure!(irq < IRQ_COUNT);

        self.write(Register::NvicIcer(irq_word(irq)), 1 << irq_bit(irq));
    }

    pub fn is_enabled(&self, irq: u16) -> bool {
        ensure!(irq < IRQ_COUNT);

        self.registers
            .read_field(Register::NvicIser(irq_word(irq)), irq_bit(irq), 1)
            == 1
    }

    /// Lower is more urgent.
    ///
    /// Encoded the way CMSIS `NVIC_SetPriority` does: `priority` is shifted
    /// into the top `NVIC_PRIO_BITS` of the IPR byte and the bits shifted
    /// past the byte are dropped, so 20 is stored as `0x40` and reads back
    /// as 4. This truncation is deliberate and not treated as misuse; only
    /// the interrupt number is range checked.
    pub fn set_priority(&self, irq: u16, priority: u8) {
        ensure!(irq < IRQ_COUNT);

        let encoded = (u32::from(priority) << (8 - NVIC_PRIO_BITS)) & 0xFF;
        self.write_field(Register::NvicIpr((irq / 4) as u8), priority_offset(irq), 8, encoded);
    }

    pub fn priority(&self, irq: u16) -> u8 {
        ensure!(irq < IRQ_COUNT);

        let encoded = self
            .registers
            .read_field(Register::NvicIpr((irq / 4) as u8), priority_offset(irq), 8);
        (encoded >> (8 - NVIC_PRIO_BITS)) as u8
    }

    pub fn clear_pending(&self, irq: u16) {
        ensure!(irq < IRQ_COUNT);

        self.write(Register::NvicIcpr(irq_word(irq)), 1 << irq_bit(irq));
    }

    pub fn is_pending(&self, irq: u16) -> bool {
        ensure!(irq < IRQ_COUNT);

        self.registers
            .read_field(Register::NvicIspr(irq_word(irq)), irq_bit(irq), 1)
            == 1
    }

    fn write(&self, register: Register, value: u32) {
        compiler_fence(Ordering::SeqCst);
        self.registers.write(register, value);
        compiler_fence(Ordering::SeqCst);
    }

    fn write_field(&self, register: Register, offset: u32, width: u32, value: u32) {
        compiler_fence(Ordering::SeqCst);
        self.registers.write_field(register, offset, width, value);
        compiler_fence(Ordering::SeqCst);
    }
}

fn priority_offset(irq: u16) -> u32 {
    (irq as u32 % 4) * 8
}
