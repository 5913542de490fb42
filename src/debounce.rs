//! Settle-and-resample debouncing of the footswitch input.

use crate::DEBOUNCE_SETTLE_MS;
use crate::time::Delay;
use crate::types::SwitchLevel;

/// Raw input side of the hardware adapter.
///
/// Returns the decoded logical level of the footswitch line (the line itself
/// is active-low, idle-high; the adapter hides the polarity). This is the
/// bouncing, unfiltered sample - feed it through a [`Debouncer`] before
/// acting on it.
pub trait SwitchInput {
    /// Samples the switch. `true` while the contact reads closed.
    fn is_pressed(&self) -> bool;
}

/// Outcome of one pressed-direction check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressPoll {
    /// Raw input does not read pressed, or a bounce failed the re-check.
    Idle,

    /// A new debounced press edge was accepted.
    Edge,

    /// The switch is stably held down; no new edge.
    Held,
}

/// Filters the raw, bouncing switch samples into stable level transitions.
///
/// Each direction is an independent guarded check: observe the raw level,
/// block for [`DEBOUNCE_SETTLE_MS`], re-sample, and only accept the
/// transition if the level held through the settle window. A bounce that has
/// already reversed by the re-sample fails the check and is discarded with no
/// state change, and the press direction cannot produce another edge until
/// the input has returned to its idle level.
#[derive(Debug)]
pub struct Debouncer {
    stable: SwitchLevel,
}

impl Debouncer {
    /// Creates a debouncer with the switch assumed released.
    pub fn new() -> Self {
        Self {
            stable: SwitchLevel::Released,
        }
    }

    /// Returns the current stable level.
    pub fn level(&self) -> SwitchLevel {
        self.stable
    }

    /// Pressed-direction check.
    ///
    /// Reports [`PressPoll::Edge`] exactly once per physical press; while the
    /// switch stays down, subsequent calls report [`PressPoll::Held`] so the
    /// caller can measure dwell.
    pub fn check_press<I: SwitchInput, D: Delay>(&mut self, input: &I, delay: &mut D) -> PressPoll {
        if !input.is_pressed() {
            return PressPoll::Idle;
        }

        delay.delay_ms(DEBOUNCE_SETTLE_MS);
        if !input.is_pressed() {
            // Bounce: gone again before the settle window closed.
            return PressPoll::Idle;
        }

        if self.stable == SwitchLevel::Pressed {
            return PressPoll::Held;
        }

        self.stable = SwitchLevel::Pressed;
        PressPoll::Edge
    }

    /// Released-direction check. Returns `true` on an accepted release edge.
    ///
    /// Only pays the settle wait when the raw sample actually disagrees with
    /// the stable level, so polling an idle switch is cheap.
    pub fn check_release<I: SwitchInput, D: Delay>(&mut self, input: &I, delay: &mut D) -> bool {
        if input.is_pressed() || self.stable == SwitchLevel::Released {
            return false;
        }

        delay.delay_ms(DEBOUNCE_SETTLE_MS);
        if input.is_pressed() {
            // Bounced back down within the settle window.
            return false;
        }

        self.stable = SwitchLevel::Released;
        true
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
