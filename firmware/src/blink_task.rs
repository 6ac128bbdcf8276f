use defmt::{debug, info};
use drivers::gpio::{self, PinMode};
use embassy_executor::SpawnToken;
use embassy_time::Timer;
use registers::{Port, Register, RegisterInterface};

use crate::{hardware::REGISTERS, pattern_task::SEQUENCE_HANDOFF};

/// LD2 on the nucleo board, driven through the register layer rather than
/// the HAL.
const SEQUENCE_LED_PORT: Port = Port::A;
const SEQUENCE_LED_PIN: u8 = 5;

const GPIOA_CLOCK_ENABLE: u32 = 1 << 2;

const BLINK_ON_MS: u64 = 100;
const BLINK_OFF_MS: u64 = 100;

pub fn create_task() -> SpawnToken<impl Sized> {
    REGISTERS.set_bits(Register::RccApb2enr, GPIOA_CLOCK_ENABLE);
    gpio::set_pin(&REGISTERS, SEQUENCE_LED_PORT, SEQUENCE_LED_PIN, false);
    gpio::configure_pin(
        &REGISTERS,
        SEQUENCE_LED_PORT,
        SEQUENCE_LED_PIN,
        PinMode::OutputPushPull2MHz,
    );

    blink_task()
}

#[embassy_executor::task]
pub async fn blink_task() {
    info!("Blink: Task starting");

    loop {
        SEQUENCE_HANDOFF.take().await;
        debug!("Blink: sequence handed off");

        gpio::set_pin(&REGISTERS, SEQUENCE_LED_PORT, SEQUENCE_LED_PIN, true);
        Timer::after_millis(BLINK_ON_MS).await;

        gpio::set_pin(&REGISTERS, SEQUENCE_LED_PORT, SEQUENCE_LED_PIN, false);
        Timer::after_millis(BLINK_OFF_MS).await;
    }
}
