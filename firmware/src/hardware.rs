use defmt::info;
use embassy_stm32::gpio::{Level, Output, Speed};
use pattern::INDICATOR_COUNT;
use registers_mmio::MmioRegisters;

// SAFETY: this binary only runs on the STM32F103RB.
pub static REGISTERS: MmioRegisters = unsafe { MmioRegisters::new() };

pub struct Hardware<'a> {
    /// Indexed by `pattern::Indicator`: PB10, PA8, PA9, PB6.
    pub indicators: [Output<'a>; INDICATOR_COUNT],
}

impl<'a> Hardware<'a> {
    pub fn get() -> Hardware<'a> {
        info!("Initializing");
        let peripherals = embassy_stm32::init(Default::default());

        let red = Output::new(peripherals.PB10, Level::Low, Speed::Low);
        let yellow = Output::new(peripherals.PA8, Level::Low, Speed::Low);
        let green = Output::new(peripherals.PA9, Level::Low, Speed::Low);
        let blue = Output::new(peripherals.PB6, Level::Low, Speed::Low);

        Hardware {
            indicators: [red, yellow, green, blue],
        }
    }
}
