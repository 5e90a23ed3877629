//! Mode definitions and transitions

use super::events::{Action, Event};
use crate::config::ClockConfig;
use crate::face::{Face, Snapshot};

/// Face currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Hours and minutes
    #[default]
    Clock,
    /// Weekday and day of month
    Date,
    /// Temperature and humidity (needs a sensor)
    Temperature,
    /// Everything blank
    Standby,
}

impl Mode {
    /// Action for an event in this mode
    ///
    /// `sensor_present` decides whether the date face is followed by the
    /// temperature face or by the clock.
    pub fn transition(self, event: Event, sensor_present: bool) -> Action {
        match (self, event) {
            (Mode::Clock | Mode::Standby, Event::LeftPressed) => Action::Enter(Mode::Date),
            (Mode::Date, Event::LeftPressed) if sensor_present => {
                Action::Enter(Mode::Temperature)
            }
            (Mode::Date | Mode::Temperature, Event::LeftPressed) => Action::Enter(Mode::Clock),

            (Mode::Standby, Event::MiddlePressed) => Action::Enter(Mode::Clock),
            (_, Event::MiddlePressed) => Action::Enter(Mode::Standby),

            (Mode::Clock, Event::RightPressed) => Action::ToggleAlarm,
            (_, Event::RightPressed) => Action::Stay,
        }
    }

    /// Glyph request for this mode
    pub fn face(self, snapshot: &Snapshot, config: &ClockConfig) -> Face {
        match self {
            Mode::Clock => Face::clock(snapshot.hour, snapshot.minute, config),
            Mode::Date => Face::date(snapshot.weekday, snapshot.day, config.language),
            Mode::Temperature => Face::temperature(
                snapshot.celsius_x10,
                snapshot.humidity_pct,
                config.temperature_unit,
            ),
            Mode::Standby => Face::standby(),
        }
    }

    /// Modes whose face changes every minute
    pub fn refreshes_each_minute(self) -> bool {
        matches!(self, Mode::Clock | Mode::Temperature)
    }
}
