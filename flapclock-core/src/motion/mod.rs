//! Drum motion: position tables and move planning
//!
//! Provides the toroidal position table each drum rolls over and the
//! start/cruise/stop step profile that makes the roll look mechanical.

pub mod planner;
pub mod table;

pub use planner::{shortest_direction, Direction, START_PATTERN, STAGGER_FRAMES, STOP_PATTERN};
pub use table::{Cell, PositionTable, Row, MAX_POSITIONS, ROW_HEIGHT};
