#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod counter;
pub mod exti;
pub mod gpio;
