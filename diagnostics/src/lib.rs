#![cfg_attr(not(test), no_std)]

//! Assertion channel shared by interrupt and task context.
//!
//! A failed [`ensure!`] captures the call site into [`DIAGNOSTICS`], marks the
//! system as halted and then panics. On target the panic handler logs the
//! site and stops the core with the log intact for postmortem inspection; on
//! the host the halted state stays queryable through [`Diagnostics::is_halted`].

mod record;
mod ring;

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};

pub use record::DiagnosticRecord;
pub use ring::DiagnosticRingBuffer;

/// Number of failure records kept by the global log.
pub const DIAGNOSTIC_CAPACITY: usize = 32;

pub struct Diagnostics<M: RawMutex, const N: usize> {
    log: DiagnosticRingBuffer<M, N>,
    halted: AtomicBool,
}

impl<M: RawMutex, const N: usize> Diagnostics<M, N> {
    pub const fn new() -> Self {
        Self {
            log: DiagnosticRingBuffer::new(),
            halted: AtomicBool::new(false),
        }
    }

    pub fn log(&self) -> &DiagnosticRingBuffer<M, N> {
        &self.log
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    /// Records `record` and enters the terminal state. Never returns.
    pub fn halt(&self, record: DiagnosticRecord) -> ! {
        self.log.insert(record);
        self.halted.store(true, Ordering::Release);

        // panic-probe prints this through defmt before stopping the core.
        panic!("assertion failed at {}:{}", record.source(), record.line());
    }
}

impl<M: RawMutex, const N: usize> Default for Diagnostics<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

pub static DIAGNOSTICS: Diagnostics<CriticalSectionRawMutex, DIAGNOSTIC_CAPACITY> =
    Diagnostics::new();

#[cold]
#[inline(never)]
pub fn assertion_failed(source: &'static str, line: u32) -> ! {
    DIAGNOSTICS.halt(DiagnosticRecord::new(source, line))
}

/// Checks a precondition, halting through [`DIAGNOSTICS`] when it does not hold.
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::assertion_failed(file!(), line!())
        }
    };
}
