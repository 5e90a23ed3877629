//! Render surface abstraction and dot-matrix hardware for Flapclock
//!
//! This crate provides:
//! - `RenderSurface` trait: the pixel sink the drum engine paints into
//! - `FrameBuffer`: a 1-bit buffer for a horizontal chain of 8x8 modules
//! - `Max7219`: a driver for daisy-chained MAX7219 LED matrix modules
//!
//! # Architecture
//!
//! The core engine only ever talks to `RenderSurface`. Hardware drivers own a
//! `FrameBuffer`, accept pixel writes into it, and push the whole buffer out
//! on `present()`. Host tests use a bare `FrameBuffer` as the surface.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod framebuffer;
pub mod max7219;

// Re-export key types
pub use backend::{RenderSurface, SurfaceError};
pub use framebuffer::{FrameBuffer, MODULE_SIZE};
pub use max7219::Max7219;
