#![no_std]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`BypassSwitcher`**: the polling control loop - debounce, hold
//!   classification and path control composed over injected hardware
//! - **`PathController`**: owns the committed path and sequences the
//!   mute -> relay -> unmute transition
//! - **`Debouncer`**: settle-and-resample filtering of the raw footswitch
//! - **`HoldDetector`**: classifies a sustained press as a hold gesture
//! - **`SwitchInput` / `PathOutputs`**: traits to implement for your hardware
//! - **`PersistentStore`**: trait for the byte of non-volatile storage that
//!   survives power loss
//! - **`TickSource` / `TickCell`**: interrupt-driven tick counting with
//!   guarded reads and resets
//! - **`Delay`**: the blocking millisecond wait the settle intervals run on
//!
//! Hardware only ever appears behind these traits, so the whole state
//! machine runs - and is tested - on the host with mock implementations.

pub mod debounce;
pub mod hold;
pub mod store;
pub mod switcher;
pub mod time;
pub mod types;

pub use debounce::{Debouncer, PressPoll, SwitchInput};
pub use hold::HoldDetector;
pub use store::PersistentStore;
pub use switcher::{BypassSwitcher, PathController, PathOutputs, PollOutcome};
pub use time::{Delay, TickCell, TickSource};
pub use types::{HoldEvent, HoldState, SignalPath, SwitchEdge, SwitchLevel};

/// Settle interval between sampling and re-sampling the switch, in
/// milliseconds. Sized to outlast the contact bounce of common footswitches.
pub const DEBOUNCE_SETTLE_MS: u32 = 10;

/// Dwell after engaging the mute element before the relay moves, in
/// milliseconds. Lets the isolator reach full conduction first.
pub const MUTE_SETTLE_MS: u32 = 20;

/// Dwell after driving the relay before the mute element releases, in
/// milliseconds. Covers the coil's actuation time.
pub const RELAY_SETTLE_MS: u32 = 20;

/// Dwell, in timer ticks (nominally 1 ms each), past which a press counts as
/// a hold gesture. Tuned empirically - treat it as a knob, not a derived
/// quantity.
pub const HOLD_THRESHOLD_TICKS: u32 = 1000;
