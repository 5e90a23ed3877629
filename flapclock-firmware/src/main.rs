//! Flapclock - Split-Flap Dot-Matrix Clock Firmware
//!
//! Main firmware binary for an RP2040 driving a 4-module MAX7219 panel.
//! Every character is a virtual drum that rolls to its next glyph.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};
use embassy_rp::spi::{self, Spi};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use flapclock_core::config::{parse_config, ClockConfig};
use flapclock_core::layout::standard_layout;
use flapclock_core::state::Event;
use flapclock_core::{Ensemble, RenderSurface};
use flapclock_display::Max7219;

use crate::tasks::{Clock, Panel};

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit clock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../clock.toml");

/// MAX7219 accepts up to 10 MHz
const SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// How long the self-test lights every pixel
const SELF_TEST_MS: u64 = 1000;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Flapclock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Display: FC-16 panel on SPI0 (SCK=GPIO18, MOSI=GPIO19, CS=GPIO17)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);

    let mut panel: Panel = Max7219::new(spi, cs);
    if let Err(e) = panel.init() {
        warn!("Display init failed: {}", e);
    }
    if let Err(e) = panel.set_intensity(0) {
        warn!("Display intensity failed: {}", e);
    }
    self_test(&mut panel).await;

    let mut drums = Ensemble::new(panel, config.ensemble(), standard_layout());
    drums.set_alarm_enabled(true);
    // No network time on this board
    drums.set_time_sync_failed(true);
    info!("Drums initialized");

    let mut rtc = Rtc::new(p.RTC);
    if rtc.set_datetime(boot_time()).is_err() {
        warn!("RTC rejected boot time");
    }

    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let temp_sensor = adc::Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);

    // Buttons pull high when pressed (left=GPIO21, middle=GPIO22, right=GPIO27)
    let left = Input::new(p.PIN_21, Pull::Down);
    let middle = Input::new(p.PIN_22, Pull::Down);
    let right = Input::new(p.PIN_27, Pull::Down);

    info!("Spawning tasks...");
    let debounce_ms = config.debounce_ms;
    spawner
        .spawn(tasks::button_task(left, Event::LeftPressed, debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(middle, Event::MiddlePressed, debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(right, Event::RightPressed, debounce_ms))
        .unwrap();

    let clock = Clock::new(drums, rtc, adc, temp_sensor, config);
    spawner.spawn(tasks::clock_task(clock)).unwrap();

    info!("All tasks spawned");
}

/// Parse the embedded clock.toml, falling back to defaults
fn load_config() -> ClockConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config loaded: rotation={}, order={}, language={}",
                config.rotation, config.order, config.language
            );
            config
        }
        Err(e) => {
            warn!("Config parse failed ({}), using defaults", e);
            ClockConfig::default()
        }
    }
}

/// Light every pixel briefly, then blank the panel
async fn self_test(panel: &mut Panel) {
    for background in [true, false] {
        let result = panel.clear(background).and_then(|()| panel.present());
        if let Err(e) = result {
            warn!("Self-test failed: {}", e);
            return;
        }
        if background {
            Timer::after_millis(SELF_TEST_MS).await;
        }
    }
}

/// Wall-clock time the RTC starts from at power-up
fn boot_time() -> DateTime {
    DateTime {
        year: 2022,
        month: 1,
        day: 1,
        day_of_week: DayOfWeek::Saturday,
        hour: 12,
        minute: 0,
        second: 0,
    }
}
