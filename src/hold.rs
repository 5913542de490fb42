//! Classification of held presses by dwell time.

use crate::HOLD_THRESHOLD_TICKS;
use crate::time::TickSource;
use crate::types::{HoldEvent, HoldState, SignalPath};

/// Distinguishes a hold gesture from a plain press using the tick counter.
///
/// The press that engages the effect opens a measurement window by resetting
/// the counter. If the switch then dwells past [`HOLD_THRESHOLD_TICKS`] the
/// press is classified as a hold: the effect stays in only while the switch
/// is down, and releasing it requests the return to bypass. A short press
/// latches as usual and the window simply expires unused.
#[derive(Debug)]
pub struct HoldDetector {
    state: HoldState,
}

impl HoldDetector {
    /// Creates a detector with no press in progress.
    pub fn new() -> Self {
        Self {
            state: HoldState::Idle,
        }
    }

    /// Returns the current classification state.
    pub fn state(&self) -> HoldState {
        self.state
    }

    /// Call on the debounced press edge, before the toggle executes.
    ///
    /// A press taken while bypassed is the one that engages the effect, so it
    /// opens a fresh measurement window. Presses taken while engaged leave
    /// the counter alone; they can never classify as holds.
    pub fn on_press<T: TickSource>(&mut self, current: SignalPath, ticks: &T) {
        if current == SignalPath::Bypass {
            ticks.reset();
        }
    }

    /// Call on every iteration the switch is stably held down.
    ///
    /// Classifies the press as a hold once the dwell exceeds the threshold.
    /// The arm signal fires at most once per press; further iterations past
    /// the threshold return nothing.
    pub fn service<T: TickSource>(&mut self, current: SignalPath, ticks: &T) -> Option<HoldEvent> {
        if current == SignalPath::Effect
            && self.state == HoldState::Idle
            && ticks.ticks() > HOLD_THRESHOLD_TICKS
        {
            self.state = HoldState::Armed;
            return Some(HoldEvent::Armed);
        }
        None
    }

    /// Call on the debounced release edge.
    ///
    /// An armed press requests the return transition on its way out; anything
    /// else releases silently. Either way the next press starts unclassified.
    pub fn on_release(&mut self) -> Option<HoldEvent> {
        if self.state == HoldState::Armed {
            self.state = HoldState::Idle;
            return Some(HoldEvent::Released);
        }
        None
    }
}

impl Default for HoldDetector {
    fn default() -> Self {
        Self::new()
    }
}
