#![cfg_attr(not(test), no_std)]

use defmt::trace;
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};

/// Binary permit passed from one task to another.
///
/// Holds at most one permit: giving while a permit is pending does nothing,
/// so a burst of gives wakes the taker once. Meant for exactly one taker and
/// task context only.
pub struct TaskHandoffSignal<M: RawMutex> {
    signal: Signal<M, ()>,
}

impl<M: RawMutex> TaskHandoffSignal<M> {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    pub fn give(&self) {
        trace!("Handoff: give");
        self.signal.signal(());
    }

    /// Waits for a permit and consumes it.
    pub async fn take(&self) {
        self.signal.wait().await;
        trace!("Handoff: taken");
    }

    /// Consumes the permit if one is pending, without waiting.
    pub fn try_take(&self) -> bool {
        self.signal.try_take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }
}

impl<M: RawMutex> Default for TaskHandoffSignal<M> {
    fn default() -> Self {
        Self::new()
    }
}
