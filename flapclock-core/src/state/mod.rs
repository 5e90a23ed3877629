//! Display mode state machine
//!
//! The three front buttons move the clock between its faces. Transitions
//! are explicit, finite and deterministic; what to draw for a mode is
//! decided by `Mode::face`.

pub mod events;
pub mod machine;

pub use events::{Action, Event};
pub use machine::Mode;
