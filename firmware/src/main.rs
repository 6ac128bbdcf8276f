#![no_std]
#![no_main]

mod blink_task;
mod button;
mod hardware;
mod pattern_task;

use defmt::info;
use embassy_executor::Executor;
use static_cell::StaticCell;

use defmt_rtt as _;
use panic_probe as _;

use crate::hardware::Hardware;

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    let hardware = Hardware::get();

    button::configure_button();

    let executor = EXECUTOR.init(Executor::new());

    info!("Starting tasks");

    executor.run(|spawner| {
        spawner.spawn(blink_task::create_task()).unwrap();
        spawner
            .spawn(pattern_task::create_task(hardware.indicators))
            .unwrap();
    })
}
