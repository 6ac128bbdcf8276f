use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::RawMutex};
use heapless::Vec;

use crate::DiagnosticRecord;

struct RingState<const N: usize> {
    slots: [Option<DiagnosticRecord>; N],
    tail: usize,
    len: usize,
}

/// Fixed-capacity circular log of failure records.
///
/// Every insert lands on `tail`, which then advances modulo `N`. Nothing is
/// ever consumed, so after `N` inserts the oldest entries are overwritten and
/// only the newest `N` records remain recoverable.
///
/// The slot write and the index update happen under `M`. With
/// `CriticalSectionRawMutex` that means interrupts are disabled for the two
/// steps, so task-context and interrupt-context inserts cannot interleave.
pub struct DiagnosticRingBuffer<M: RawMutex, const N: usize> {
    state: Mutex<M, RefCell<RingState<N>>>,
}

impl<M: RawMutex, const N: usize> DiagnosticRingBuffer<M, N> {
    pub const fn new() -> Self {
        assert!(N > 0);

        Self {
            state: Mutex::new(RefCell::new(RingState {
                slots: [None; N],
                tail: 0,
                len: 0,
            })),
        }
    }

    pub fn insert(&self, record: DiagnosticRecord) {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let tail = state.tail;

            state.slots[tail] = Some(record);
            state.tail = (tail + 1) % N;
            state.len = (state.len + 1).min(N);
        });
    }

    /// Slot that the next insert will overwrite.
    pub fn tail(&self) -> usize {
        self.state.lock(|state| state.borrow().tail)
    }

    pub fn len(&self) -> usize {
        self.state.lock(|state| state.borrow().len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Raw storage in slot order, as a debugger would see it.
    pub fn slots(&self) -> [Option<DiagnosticRecord>; N] {
        self.state.lock(|state| state.borrow().slots)
    }

    /// Recoverable records, oldest first.
    pub fn records(&self) -> Vec<DiagnosticRecord, N> {
        self.state.lock(|state| {
            let state = state.borrow();
            let oldest = if state.len < N { 0 } else { state.tail };

            (0..state.len)
                .filter_map(|offset| state.slots[(oldest + offset) % N])
                .collect()
        })
    }

    pub fn newest(&self) -> Option<DiagnosticRecord> {
        self.state.lock(|state| {
            let state = state.borrow();
            state.slots[(state.tail + N - 1) % N]
        })
    }
}

impl<M: RawMutex, const N: usize> Default for DiagnosticRingBuffer<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
