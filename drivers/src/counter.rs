use core::sync::atomic::{AtomicU32, Ordering};

/// Count of serviced interrupts. One writer (the handler), any number of readers.
///
/// `increment` is a load and a store, not a read-modify-write, so it must
/// only be called from the handler that owns the counter. Readers may see a
/// value one behind but never a torn one.
pub struct EventCounter {
    count: AtomicU32,
}

impl EventCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Returns the new count. Wraps at `u32::MAX`.
    pub fn increment(&self) -> u32 {
        let next = self.count.load(Ordering::Relaxed).wrapping_add(1);
        self.count.store(next, Ordering::Release);
        next
    }

    pub fn read(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }
}

impl Default for EventCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use pretty_assertions::assert_eq;

    use super::EventCounter;

    #[test]
    fn counts_every_increment() {
        let counter = EventCounter::new();

        for expected in 1..=10 {
            assert_eq!(counter.increment(), expected);
        }
        assert_eq!(counter.read(), 10);
    }

    #[test]
    fn wraps_silently() {
        let counter = EventCounter::new();
        counter.count.store(u32::MAX, Ordering::Relaxed);

        assert_eq!(counter.increment(), 0);
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn reader_sees_monotonic_values_and_the_final_count() {
        let counter = EventCounter::new();
        let done = AtomicBool::new(false);

        std::thread::scope(|scope| {
            let reader = scope.spawn(|| {
                let mut last = 0;
                while !done.load(Ordering::Acquire) {
                    let seen = counter.read();
                    assert!(seen >= last);
                    last = seen;
                }
                last
            });

            for _ in 0..10_000 {
                counter.increment();
            }
            done.store(true, Ordering::Release);

            assert!(reader.join().unwrap() <= 10_000);
        });

        assert_eq!(counter.read(), 10_000);
    }
}
