//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod buttons;
pub mod clock;

pub use buttons::button_task;
pub use clock::{clock_task, Clock, Panel};
