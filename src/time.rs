//! Tick counting shared with the timer interrupt, and the blocking delay seam.

use core::cell::Cell;
use critical_section::Mutex;

/// Read/reset access to the free-running tick counter.
///
/// Methods take `&self`: the counter lives behind interior mutability because
/// the timer interrupt owns the incrementing side of it.
pub trait TickSource {
    /// Returns a snapshot of the current tick count.
    fn ticks(&self) -> u32;

    /// Resets the count to zero, opening a new measurement window.
    fn reset(&self);
}

/// Free-running counter incremented from a periodic timer interrupt.
///
/// The count wraps at `u32::MAX`; at the nominal 1 ms period that is roughly
/// every 49.7 days. Reads and resets from the main loop run inside a critical
/// section, so an access wider than the platform's atomic width never observes
/// a torn value and a reset never races the interrupt-side increment.
///
/// Intended use is a `static` that the timer interrupt handler ticks:
///
/// ```rust,ignore
/// static TICKS: TickCell = TickCell::new();
///
/// #[interrupt]
/// fn TIM2() {
///     // acknowledge the peripheral's pending flag, then:
///     TICKS.tick();
/// }
/// ```
///
/// If the underlying timer is misconfigured the count still increments, just
/// at the wrong rate; nothing here can detect that.
pub struct TickCell(Mutex<Cell<u32>>);

impl TickCell {
    /// Creates a counter starting at zero.
    pub const fn new() -> Self {
        Self(Mutex::new(Cell::new(0)))
    }

    /// Increments the count by one.
    ///
    /// Call from the timer interrupt handler after acknowledging the
    /// hardware's pending flag. Keep the handler to this single increment so
    /// worst-case latency on the polling loop stays bounded.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let count = self.0.borrow(cs);
            count.set(count.get().wrapping_add(1));
        });
    }
}

impl TickSource for TickCell {
    fn ticks(&self) -> u32 {
        critical_section::with(|cs| self.0.borrow(cs).get())
    }

    fn reset(&self) {
        critical_section::with(|cs| self.0.borrow(cs).set(0));
    }
}

impl Default for TickCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking millisecond delay.
///
/// The debounce settle and the switching sequence busy-wait through this;
/// implement it with the platform's delay primitive.
pub trait Delay {
    /// Blocks for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
