//! Path switching: the relay transition sequencer and the polling loop.
//!
//! Provides [`PathController`] which owns the committed [`SignalPath`] and
//! sequences the physical switching action, and [`BypassSwitcher`] which
//! composes it with the [`Debouncer`] and [`HoldDetector`] into the device's
//! control loop. Also defines the [`PathOutputs`] trait for the output side
//! of the hardware adapter.

use crate::debounce::{Debouncer, PressPoll, SwitchInput};
use crate::hold::HoldDetector;
use crate::store::PersistentStore;
use crate::time::{Delay, TickSource};
use crate::types::{HoldEvent, HoldState, SignalPath, SwitchEdge};
use crate::{MUTE_SETTLE_MS, RELAY_SETTLE_MS};

/// Output side of the hardware adapter.
///
/// Implement this for your board (GPIO, shift register, whatever drives the
/// relay). Handle any hardware errors internally - these methods cannot
/// fail. Pin polarity and assignment are the adapter's concern; the order in
/// which this trait's methods are called is the crate's.
pub trait PathOutputs {
    /// Engages or releases the isolating/mute element that sits across the
    /// output while the relay moves.
    fn set_mute(&mut self, engaged: bool);

    /// Drives the indicator and relay coil for `path` and releases the other
    /// path's drive, as a single paired update.
    fn select_path(&mut self, path: SignalPath);
}

/// Owns the committed path and sequences the physical transition.
///
/// The transition order is the correctness property of the whole device: the
/// mute element engages strictly before the relay moves and releases strictly
/// after the coil has settled, so the audio path is never momentarily shorted
/// between both routes or left floating between neither.
pub struct PathController {
    selection: SignalPath,
    pending: bool,
}

impl PathController {
    /// Seeds the committed path from the store and drives the outputs to
    /// match.
    ///
    /// No mute sequence runs at power-up: the outputs simply take on the
    /// restored path before any audio flows, and nothing is written back to
    /// the store.
    pub fn restore<H, S>(hw: &mut H, store: &mut S) -> Self
    where
        H: PathOutputs,
        S: PersistentStore,
    {
        let selection = SignalPath::from_stored(store.read_byte());
        hw.select_path(selection);

        Self {
            selection,
            pending: false,
        }
    }

    /// Returns the committed path.
    pub fn selection(&self) -> SignalPath {
        self.selection
    }

    /// Returns `true` if a toggle has been requested but not yet executed.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Requests a toggle of the committed path.
    ///
    /// Requests are a flag, not a counter: asking again before the next
    /// [`service`](Self::service) still produces exactly one transition.
    pub fn request_toggle(&mut self) {
        self.pending = true;
    }

    /// Executes at most one pending transition, then clears the request.
    ///
    /// The sequence is identical in both directions, parameterized only by
    /// the target path:
    ///
    /// 1. engage mute and wait [`MUTE_SETTLE_MS`] for the isolator to reach
    ///    full conduction;
    /// 2. drive the new path's indicator and relay coil as a pair and wait
    ///    [`RELAY_SETTLE_MS`] for the armature to actuate;
    /// 3. release mute;
    /// 4. persist the new path (best-effort), commit it, clear the request.
    ///
    /// Runs to completion once started; nothing in the loop can interrupt it.
    ///
    /// # Returns
    /// The newly committed path if a transition ran, `None` otherwise.
    pub fn service<H, D, S>(&mut self, hw: &mut H, delay: &mut D, store: &mut S) -> Option<SignalPath>
    where
        H: PathOutputs,
        D: Delay,
        S: PersistentStore,
    {
        if !self.pending {
            return None;
        }

        let target = self.selection.other();

        hw.set_mute(true);
        delay.delay_ms(MUTE_SETTLE_MS);
        hw.select_path(target);
        delay.delay_ms(RELAY_SETTLE_MS);
        hw.set_mute(false);

        store.write_byte(target.to_stored());
        self.selection = target;
        self.pending = false;

        Some(target)
    }
}

/// What one call to [`BypassSwitcher::poll`] observed and did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// Debounced edge accepted this iteration, if any.
    pub edge: Option<SwitchEdge>,

    /// Hold classification signal raised this iteration, if any.
    pub hold: Option<HoldEvent>,

    /// Path committed by a transition that ran this iteration, if any.
    pub switched: Option<SignalPath>,
}

/// The complete switcher: debounce, hold classification and path control
/// composed over injected hardware.
///
/// All hardware access goes through the trait parameters, so the state
/// machine runs unmodified in host tests. The tick source is held by shared
/// reference because the timer interrupt owns the other side of it.
///
/// # Type Parameters
/// * `'t` - Lifetime of the tick source reference
/// * `H` - Hardware adapter (switch input + path outputs)
/// * `D` - Blocking delay implementation
/// * `S` - Persistent store implementation
/// * `T` - Tick source implementation
pub struct BypassSwitcher<'t, H, D, S, T>
where
    H: SwitchInput + PathOutputs,
    D: Delay,
    S: PersistentStore,
    T: TickSource,
{
    hw: H,
    delay: D,
    store: S,
    ticks: &'t T,
    debouncer: Debouncer,
    hold: HoldDetector,
    controller: PathController,
}

impl<'t, H, D, S, T> BypassSwitcher<'t, H, D, S, T>
where
    H: SwitchInput + PathOutputs,
    D: Delay,
    S: PersistentStore,
    T: TickSource,
{
    /// Restores the persisted path and sets up an idle switcher.
    pub fn new(mut hw: H, delay: D, mut store: S, ticks: &'t T) -> Self {
        let controller = PathController::restore(&mut hw, &mut store);

        Self {
            hw,
            delay,
            store,
            ticks,
            debouncer: Debouncer::new(),
            hold: HoldDetector::new(),
            controller,
        }
    }

    /// Runs one iteration of the control loop.
    ///
    /// Order within an iteration: pressed-direction debounce (a new press
    /// edge requests a toggle and may open the hold window; a steady press
    /// services the hold detector), then released-direction debounce (an
    /// armed release requests the return toggle), then the controller
    /// consumes a pending request at most once.
    pub fn poll(&mut self) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        match self.debouncer.check_press(&self.hw, &mut self.delay) {
            PressPoll::Edge => {
                outcome.edge = Some(SwitchEdge::Press);
                // Window opens against the path as it stands now; the toggle
                // below has not executed yet.
                self.hold.on_press(self.controller.selection(), self.ticks);
                self.controller.request_toggle();
            }
            PressPoll::Held => {
                outcome.hold = self.hold.service(self.controller.selection(), self.ticks);
            }
            PressPoll::Idle => {}
        }

        if self.debouncer.check_release(&self.hw, &mut self.delay) {
            outcome.edge = Some(SwitchEdge::Release);
            if let Some(event) = self.hold.on_release() {
                outcome.hold = Some(event);
                self.controller.request_toggle();
            }
        }

        outcome.switched = self
            .controller
            .service(&mut self.hw, &mut self.delay, &mut self.store);

        outcome
    }

    /// Runs the control loop forever. This is the device's entire runtime.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// Returns the committed path.
    pub fn selection(&self) -> SignalPath {
        self.controller.selection()
    }

    /// Returns the current hold classification state.
    pub fn hold_state(&self) -> HoldState {
        self.hold.state()
    }

    /// Shared access to the hardware adapter.
    pub fn hardware(&self) -> &H {
        &self.hw
    }
}
