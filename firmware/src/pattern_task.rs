use defmt::info;
use embassy_executor::SpawnToken;
use embassy_stm32::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Timer;
use handoff::TaskHandoffSignal;
use pattern::{INDICATOR_COUNT, Pattern, STEP_PERIOD_MS};
use static_cell::StaticCell;

use crate::button::BUTTON;

/// Given once per finished pattern cycle; the blink task waits on it.
pub static SEQUENCE_HANDOFF: TaskHandoffSignal<CriticalSectionRawMutex> = TaskHandoffSignal::new();

pub struct PatternTaskState<'a> {
    indicators: [Output<'a>; INDICATOR_COUNT],
}

impl<'a> PatternTaskState<'a> {
    pub fn new(indicators: [Output<'a>; INDICATOR_COUNT]) -> Self {
        Self { indicators }
    }
}

pub static PATTERN_TASK_STATE: StaticCell<PatternTaskState> = StaticCell::new();

pub fn create_task(indicators: [Output<'static>; INDICATOR_COUNT]) -> SpawnToken<impl Sized> {
    pattern_task(PATTERN_TASK_STATE.init(PatternTaskState::new(indicators)))
}

#[embassy_executor::task]
pub async fn pattern_task(state: &'static mut PatternTaskState<'static>) {
    info!("Pattern: Task starting");

    loop {
        let count = BUTTON.count();
        info!("USER button count: {}", count);

        let pattern = Pattern::for_count(count);
        for step in pattern.steps() {
            state.indicators[step.indicator.index()].set_level(step.on.into());
            Timer::after_millis(STEP_PERIOD_MS).await;
        }

        SEQUENCE_HANDOFF.give();
    }
}
