//! Front button task
//!
//! One instance per button. Buttons pull the pin high when pressed.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use flapclock_core::state::Event;

use crate::channels::INPUT_CHANNEL;

/// Wait for presses on one button and forward them as `event`
#[embassy_executor::task(pool_size = 3)]
pub async fn button_task(mut button: Input<'static>, event: Event, debounce_ms: u32) {
    info!("Button task started: {}", event);

    loop {
        button.wait_for_rising_edge().await;

        // Debounce
        Timer::after_millis(debounce_ms as u64).await;
        if button.is_low() {
            continue;
        }

        match INPUT_CHANNEL.try_send(event) {
            Ok(()) => debug!("Button: {}", event),
            Err(_) => warn!("Input queue full, dropping {}", event),
        }

        // Wait for release, then let the contacts settle
        button.wait_for_low().await;
        Timer::after_millis(debounce_ms as u64).await;
    }
}
