//! Clock task
//!
//! Owns the drum ensemble, the RTC and the temperature sensor. Redraws the
//! current face at every minute boundary and reacts to button events.
//! Presses that arrive while the drums are rolling are discarded.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::adc::{self, Adc, Async};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{RTC, SPI0};
use embassy_rp::rtc::{DateTime, Rtc};
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Delay, Timer};

use flapclock_core::config::ClockConfig;
use flapclock_core::face::Snapshot;
use flapclock_core::layout::DRUM_COUNT;
use flapclock_core::sensor::die_temperature_x10;
use flapclock_core::state::{Action, Event, Mode};
use flapclock_core::Ensemble;
use flapclock_display::Max7219;

use crate::channels::INPUT_CHANNEL;

/// 8x8 modules on the FC-16 panel
pub const PANEL_MODULES: usize = 4;

/// MAX7219 chain on SPI0
pub type Panel = Max7219<Spi<'static, SPI0, Blocking>, Output<'static>, PANEL_MODULES>;

type Drums = Ensemble<'static, Panel, DRUM_COUNT>;

/// Everything the clock task drives
pub struct Clock {
    drums: Drums,
    rtc: Rtc<'static, RTC>,
    adc: Adc<'static, Async>,
    temp_sensor: adc::Channel<'static>,
    config: ClockConfig,
    mode: Mode,
    brightness: Option<u8>,
}

impl Clock {
    pub fn new(
        drums: Drums,
        rtc: Rtc<'static, RTC>,
        adc: Adc<'static, Async>,
        temp_sensor: adc::Channel<'static>,
        config: ClockConfig,
    ) -> Self {
        Self {
            drums,
            rtc,
            adc,
            temp_sensor,
            config,
            mode: Mode::Clock,
            brightness: None,
        }
    }

    fn now(&self) -> Option<DateTime> {
        match self.rtc.now() {
            Ok(now) => Some(now),
            Err(_) => {
                warn!("RTC not running");
                None
            }
        }
    }

    /// Seconds until the next minute boundary (1-60)
    fn seconds_to_next_minute(&self) -> u64 {
        let second = self.now().map_or(0, |now| now.second.min(59));
        60 - second as u64
    }

    async fn snapshot(&mut self) -> Snapshot {
        let mut snapshot = Snapshot::default();

        if let Some(now) = self.now() {
            snapshot.hour = now.hour;
            snapshot.minute = now.minute;
            // RTC counts Sunday = 0
            snapshot.weekday = (now.day_of_week as u8 + 6) % 7;
            snapshot.day = now.day;
        }

        if self.config.temperature_sensor {
            match self.adc.read(&mut self.temp_sensor).await {
                Ok(raw) => {
                    snapshot.celsius_x10 =
                        die_temperature_x10(raw, self.config.temperature_offset_x10);
                    trace!("Temperature: {} x0.1 C", snapshot.celsius_x10);
                }
                Err(_) => warn!("Temperature read failed"),
            }
        }

        snapshot
    }

    fn update_brightness(&mut self) {
        let Some(now) = self.now() else {
            return;
        };
        let level = self.config.brightness.level(now.month, now.hour);
        if self.brightness == Some(level) {
            return;
        }

        match self.drums.surface_mut().set_intensity(level) {
            Ok(()) => {
                info!("Brightness: {} -> {}", self.brightness, level);
                self.brightness = Some(level);
            }
            Err(e) => warn!("Brightness update failed: {}", e),
        }
    }

    /// Animate the drums to the current mode's face
    async fn show(&mut self) {
        let snapshot = self.snapshot().await;
        let face = self.mode.face(&snapshot, &self.config);
        debug!("Face {}: {}", self.mode, face.glyphs);

        if let Err(e) = self
            .drums
            .move_all_to_async(&face.glyphs, face.show_alarm, face.show_sync, &mut Delay)
            .await
        {
            warn!("Drum animation failed: {}", e);
        }

        // Drop presses made while the drums were rolling
        while INPUT_CHANNEL.try_receive().is_ok() {}
    }

    async fn handle(&mut self, event: Event) {
        match self.mode.transition(event, self.config.temperature_sensor) {
            Action::Stay => {}
            Action::Enter(mode) => {
                info!("Mode: {} -> {}", self.mode, mode);
                self.mode = mode;
                self.show().await;
            }
            Action::ToggleAlarm => {
                let enabled = !self.drums.alarm_enabled();
                info!("Alarm enabled: {}", enabled);
                self.drums.set_alarm_enabled(enabled);
                if let Err(e) = self.drums.refresh() {
                    warn!("Refresh failed: {}", e);
                }
            }
        }
    }

    async fn on_minute(&mut self) {
        self.update_brightness();
        if self.mode.refreshes_each_minute() {
            self.show().await;
        }
    }
}

/// Clock task - minute loop plus button handling
#[embassy_executor::task]
pub async fn clock_task(mut clock: Clock) {
    info!("Clock task started");

    clock.update_brightness();
    clock.show().await;

    loop {
        let wait = Timer::after_secs(clock.seconds_to_next_minute());
        match select(INPUT_CHANNEL.receive(), wait).await {
            Either::First(event) => clock.handle(event).await,
            Either::Second(()) => clock.on_minute().await,
        }
    }
}
