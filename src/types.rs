//! Core types for path selection and switch events.

/// Byte persisted when the bypass path is selected.
pub const STORED_BYPASS: u8 = 0x00;

/// Byte persisted when the effect path is selected.
///
/// This doubles as the erased-cell value on common EEPROM parts, so a device
/// that has never written its store comes up with the effect engaged.
pub const STORED_EFFECT: u8 = 0xFF;

/// Which of the two signal routes the relay is committed to.
///
/// Exactly one path is active at any instant; the transition sequence in
/// [`PathController`](crate::PathController) guarantees both are never driven
/// at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalPath {
    /// Relay de-energized; input routed straight to output.
    Bypass,

    /// Relay energized; the effect circuit is in the signal chain.
    Effect,
}

impl SignalPath {
    /// Returns the opposite path.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            SignalPath::Bypass => SignalPath::Effect,
            SignalPath::Effect => SignalPath::Bypass,
        }
    }

    /// Decodes a persisted byte. Anything other than [`STORED_EFFECT`] is
    /// treated as bypass.
    pub fn from_stored(byte: u8) -> Self {
        if byte == STORED_EFFECT {
            SignalPath::Effect
        } else {
            SignalPath::Bypass
        }
    }

    /// Encodes this path for the persistent store.
    pub fn to_stored(self) -> u8 {
        match self {
            SignalPath::Bypass => STORED_BYPASS,
            SignalPath::Effect => STORED_EFFECT,
        }
    }
}

/// Debounced logical level of the footswitch.
///
/// Derived, not raw: only the [`Debouncer`](crate::Debouncer) produces
/// transitions of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchLevel {
    /// Switch at rest (input line idle-high).
    Released,

    /// Switch held down (input line pulled low).
    Pressed,
}

/// An accepted, debounced transition of the switch level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchEdge {
    /// Released -> Pressed.
    Press,

    /// Pressed -> Released.
    Release,
}

/// Classification state of the press currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldState {
    /// No press classified as a hold.
    Idle,

    /// The current press dwelled past the threshold and the arm signal has
    /// already fired for it. Resets to `Idle` on release.
    Armed,
}

/// Signals raised by the [`HoldDetector`](crate::HoldDetector).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldEvent {
    /// The press crossed the hold threshold. Raised exactly once per
    /// press-hold-release cycle.
    Armed,

    /// An armed press was released; the return transition is due.
    Released,
}
