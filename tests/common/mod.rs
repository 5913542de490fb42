//! Shared test infrastructure for relay-bypass integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use std::rc::Rc;

use relay_bypass::{Delay, PathOutputs, PersistentStore, SignalPath, SwitchInput, TickSource};

// ============================================================================
// Simulated Clock
// ============================================================================

/// Simulated wall clock in milliseconds, shared by every mock.
///
/// `SimDelay` advances it whenever the core busy-waits, so settle intervals
/// and dwell times line up with the tick counter (1 tick = 1 ms).
#[derive(Clone)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn new() -> Self {
        SimClock(Rc::new(Cell::new(0)))
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

/// Blocking delay that advances the simulated clock instead of sleeping.
pub struct SimDelay {
    clock: SimClock,
}

impl SimDelay {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
        }
    }
}

impl Delay for SimDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(ms as u64);
    }
}

/// Tick source slaved to the simulated clock, with the resettable window the
/// hold detector expects.
pub struct SimTicks {
    clock: SimClock,
    window_start: Cell<u64>,
}

impl SimTicks {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            window_start: Cell::new(0),
        }
    }
}

impl TickSource for SimTicks {
    fn ticks(&self) -> u32 {
        (self.clock.now() - self.window_start.get()) as u32
    }

    fn reset(&self) {
        self.window_start.set(self.clock.now());
    }
}

// ============================================================================
// Mock Hardware Adapter
// ============================================================================

/// Output activity recorded by the mock adapter, stamped with sim time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    Mute { engaged: bool, at: u64 },
    Path { path: SignalPath, at: u64 },
}

/// Hardware adapter mock: raw switch level in, recorded output events out.
///
/// The raw level can be set directly between polls, or flipped at a
/// scheduled future instant to simulate contact bounce inside a settle
/// window. All mutators take `&self` so tests can keep driving the adapter
/// through `BypassSwitcher::hardware` after the switcher owns it.
pub struct MockIo {
    clock: SimClock,
    level: Cell<bool>,
    flips: RefCell<Vec<(u64, bool)>>,
    events: RefCell<heapless::Vec<OutputEvent, 32>>,
}

impl MockIo {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            level: Cell::new(false),
            flips: RefCell::new(Vec::new()),
            events: RefCell::new(heapless::Vec::new()),
        }
    }

    /// Sets the raw switch level immediately.
    pub fn set_pressed(&self, pressed: bool) {
        self.level.set(pressed);
    }

    /// Schedules a raw level flip at an absolute sim time. Flips whose time
    /// has come are applied, in the order they were scheduled, on the next
    /// sample.
    pub fn flip_at(&self, at: u64, pressed: bool) {
        self.flips.borrow_mut().push((at, pressed));
    }

    /// Everything the switcher did to the outputs, in order.
    pub fn events(&self) -> Vec<OutputEvent> {
        self.events.borrow().iter().copied().collect()
    }

    /// Count of relay/indicator updates, including the power-up restore.
    pub fn path_updates(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, OutputEvent::Path { .. }))
            .count()
    }
}

impl SwitchInput for MockIo {
    fn is_pressed(&self) -> bool {
        let now = self.clock.now();
        let mut flips = self.flips.borrow_mut();
        let mut i = 0;
        while i < flips.len() {
            if flips[i].0 <= now {
                self.level.set(flips[i].1);
                flips.remove(i);
            } else {
                i += 1;
            }
        }
        self.level.get()
    }
}

impl PathOutputs for MockIo {
    fn set_mute(&mut self, engaged: bool) {
        let at = self.clock.now();
        let _ = self
            .events
            .borrow_mut()
            .push(OutputEvent::Mute { engaged, at });
    }

    fn select_path(&mut self, path: SignalPath) {
        let at = self.clock.now();
        let _ = self.events.borrow_mut().push(OutputEvent::Path { path, at });
    }
}

// ============================================================================
// Mock Persistent Store
// ============================================================================

/// Byte store backed by a shared cell, so tests can inspect the persisted
/// value (or seed a second switcher from it) after the first switcher takes
/// ownership of its copy.
#[derive(Clone)]
pub struct MemoryStore {
    byte: Rc<Cell<u8>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new(initial: u8) -> Self {
        Self {
            byte: Rc::new(Cell::new(initial)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn value(&self) -> u8 {
        self.byte.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl PersistentStore for MemoryStore {
    fn read_byte(&mut self) -> u8 {
        self.byte.get()
    }

    fn write_byte(&mut self, value: u8) {
        self.byte.set(value);
        self.writes.set(self.writes.get() + 1);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Asserts that every relay update after the power-up restore is strictly
/// bracketed by the mute element: engage timestamp < relay timestamp <
/// release timestamp, never equal or reversed.
pub fn assert_mute_brackets(events: &[OutputEvent]) {
    for (i, event) in events.iter().enumerate() {
        let OutputEvent::Path { at, .. } = event else {
            continue;
        };
        if i == 0 {
            continue; // power-up restore runs unbracketed
        }

        let Some(OutputEvent::Mute {
            engaged: true,
            at: engaged_at,
        }) = events.get(i - 1)
        else {
            panic!("relay update at {at} not preceded by mute engage: {events:?}");
        };
        let Some(OutputEvent::Mute {
            engaged: false,
            at: released_at,
        }) = events.get(i + 1)
        else {
            panic!("relay update at {at} not followed by mute release: {events:?}");
        };

        assert!(
            engaged_at < at && at < released_at,
            "mute bracket not strictly ordered: {engaged_at} / {at} / {released_at}"
        );
    }
}
