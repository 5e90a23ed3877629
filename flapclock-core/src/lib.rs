//! Board-agnostic core logic for the split-flap dot-matrix clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Glyph sets (8x8 bitmaps for digits, colon marks and weekday letters)
//! - Drum position tables and motion planning (start/cruise/stop profile)
//! - The drum ensemble that staggers and renders all character cells
//! - Clock faces: which glyphs to show for time, date, temperature, standby
//! - Mode state machine driven by the three front buttons
//! - On-die temperature sensor conversion
//! - Configuration type definitions and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod drum;
pub mod ensemble;
pub mod face;
pub mod glyph;
pub mod layout;
pub mod motion;
pub mod sensor;
pub mod state;

pub use drum::{Drum, PlanError};
pub use ensemble::{Ensemble, EnsembleError};
pub use flapclock_display::{RenderSurface, SurfaceError};
