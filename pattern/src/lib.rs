#![cfg_attr(not(test), no_std)]

use defmt::Format;

pub const INDICATOR_COUNT: usize = 4;
pub const STEP_COUNT: usize = 2 * INDICATOR_COUNT;
pub const STEP_PERIOD_MS: u64 = 500;

/// Board order: red PB10, yellow PA8, green PA9, blue PB6.
#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Indicator {
    pub const ALL: [Indicator; INDICATOR_COUNT] = [
        Indicator::Red,
        Indicator::Yellow,
        Indicator::Green,
        Indicator::Blue,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub indicator: Indicator,
    pub on: bool,
}

/// One cycle: each indicator switched on then off, one step per
/// `STEP_PERIOD_MS`. The button count picks which indicator leads.
#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    steps: [Step; STEP_COUNT],
}

impl Pattern {
    pub fn for_count(count: u32) -> Self {
        let lead = count as usize % INDICATOR_COUNT;

        Self {
            steps: core::array::from_fn(|i| Step {
                indicator: Indicator::ALL[(lead + i / 2) % INDICATOR_COUNT],
                on: i % 2 == 0,
            }),
        }
    }

    pub fn steps(&self) -> &[Step; STEP_COUNT] {
        &self.steps
    }

    pub fn first(&self) -> Indicator {
        self.steps[0].indicator
    }
}

#[cfg(test)]
mod test;
