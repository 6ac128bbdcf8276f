use drivers::{
    button::EdgeCounterHandler,
    exti::{InterruptController, Trigger},
    gpio::{self, PinMode},
};
use embassy_stm32::interrupt;
use registers::{Port, Register, RegisterInterface};
use registers_mmio::MmioRegisters;

use crate::hardware::REGISTERS;

/// USER button on the nucleo board: PC13, pulled up, low while pressed.
const BUTTON_PORT: Port = Port::C;
const BUTTON_LINE: u8 = 13;
const BUTTON_IRQ: u16 = 40;
const BUTTON_PRIORITY: u8 = 20;

const AFIO_CLOCK_ENABLE: u32 = 1 << 0;

static CONTROLLER: InterruptController<'static, MmioRegisters> =
    InterruptController::new(&REGISTERS);

pub static BUTTON: EdgeCounterHandler = EdgeCounterHandler::new(BUTTON_LINE, BUTTON_IRQ);

/// Must run before the executor starts: the interrupt is live on return.
pub fn configure_button() {
    REGISTERS.set_bits(Register::RccApb2enr, AFIO_CLOCK_ENABLE);
    gpio::configure_pin(&REGISTERS, BUTTON_PORT, BUTTON_LINE, PinMode::FloatingInput);

    BUTTON.configure(&CONTROLLER, BUTTON_PORT, Trigger::FALLING, BUTTON_PRIORITY);
}

#[interrupt]
fn EXTI15_10() {
    BUTTON.on_interrupt(&CONTROLLER);
}
