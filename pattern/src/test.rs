use pretty_assertions::assert_eq;

use crate::{Indicator, Pattern, STEP_COUNT, Step};

macro_rules! step {
    ($indicator:ident, $on:expr) => {
        Step {
            indicator: Indicator::$indicator,
            on: $on,
        }
    };
}

#[test]
fn no_presses_plays_the_board_order() {
    let pattern = Pattern::for_count(0);

    assert_eq!(
        pattern.steps(),
        &[
            step!(Red, true),
            step!(Red, false),
            step!(Yellow, true),
            step!(Yellow, false),
            step!(Green, true),
            step!(Green, false),
            step!(Blue, true),
            step!(Blue, false),
        ]
    );
}

#[test]
fn each_press_rotates_the_lead_indicator() {
    let leads: Vec<Indicator> = (0..6).map(|count| Pattern::for_count(count).first()).collect();

    assert_eq!(
        leads,
        vec![
            Indicator::Red,
            Indicator::Yellow,
            Indicator::Green,
            Indicator::Blue,
            Indicator::Red,
            Indicator::Yellow,
        ]
    );
}

#[test]
fn every_indicator_ends_the_cycle_off() {
    for count in 0..4 {
        let pattern = Pattern::for_count(count);

        for indicator in Indicator::ALL {
            let last = pattern
                .steps()
                .iter()
                .rev()
                .find(|step| step.indicator == indicator);
            assert_eq!(last.map(|step| step.on), Some(false));
        }
        assert_eq!(pattern.steps().len(), STEP_COUNT);
    }
}

#[test]
fn counter_wrap_keeps_the_rotation() {
    assert_eq!(Pattern::for_count(u32::MAX).first(), Indicator::Blue);
    assert_eq!(Pattern::for_count(u32::MAX.wrapping_add(1)).first(), Indicator::Red);
}
