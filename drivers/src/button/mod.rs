use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, trace};
use diagnostics::ensure;
use registers::{Port, RegisterInterface, exti_irq};

use crate::{
    counter::EventCounter,
    exti::{InterruptController, Trigger},
};

/// Counts edges on one external line from inside its interrupt handler.
///
/// Lives in a `static` shared by the vector and task context: the handler
/// is the only writer of `count`, tasks read it through [`Self::count`].
pub struct EdgeCounterHandler {
    line: u8,
    irq: u16,
    count: EventCounter,
    running: AtomicBool,
}

impl EdgeCounterHandler {
    pub const fn new(line: u8, irq: u16) -> Self {
        Self {
            line,
            irq,
            count: EventCounter::new(),
            running: AtomicBool::new(false),
        }
    }

    /// Routes the line from `port`, arms `trigger`, unmasks it and enables
    /// its interrupt at `priority`. Interrupts can fire as soon as this
    /// returns.
    pub fn configure<R: RegisterInterface>(
        &self,
        controller: &InterruptController<'_, R>,
        port: Port,
        trigger: Trigger,
        priority: u8,
    ) {
        ensure!(exti_irq(self.line) == self.irq);

        controller.set_trigger_edge(self.line, trigger);
        controller.select_source(port, self.line);
        controller.mask(self.line, true);
        controller.enable_global(self.irq);
        controller.set_priority(self.irq, priority);

        info!(
            "Button: line {} on port {} armed for {} at priority {}",
            self.line, port, trigger, priority
        );
    }

    /// Interrupt body. Clears the line, then the NVIC bit, then counts.
    pub fn on_interrupt<R: RegisterInterface>(&self, controller: &InterruptController<'_, R>) {
        let reentered = self.running.swap(true, Ordering::Acquire);
        ensure!(!reentered);

        controller.clear_line_pending(self.line);
        controller.clear_pending(self.irq);
        let count = self.count.increment();

        trace!("Button: edge {} on line {}", count, self.line);

        self.running.store(false, Ordering::Release);
    }

    pub fn count(&self) -> u32 {
        self.count.read()
    }
}
