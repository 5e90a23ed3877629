//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use flapclock_core::state::Event;

/// Channel capacity for button events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Debounced button presses, consumed by the clock task
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, Event, INPUT_CHANNEL_SIZE> =
    Channel::new();
