//! Events that trigger mode transitions

use super::machine::Mode;

/// Button presses, after debouncing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Left button: cycle clock, date, temperature
    LeftPressed,
    /// Middle button: standby on/off
    MiddlePressed,
    /// Right button: toggle alarm on the clock face
    RightPressed,
}

/// What the orchestrator should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Ignore the event
    Stay,
    /// Switch to a mode and animate its face
    Enter(Mode),
    /// Flip the alarm indicator and redraw without motion
    ToggleAlarm,
}
