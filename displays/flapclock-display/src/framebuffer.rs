//! 1-bit frame buffer for a chain of 8x8 modules
//!
//! Modules are laid out left to right. Each module row is one byte with the
//! most significant bit as the leftmost pixel, which is the byte order the
//! MAX7219 digit registers expect on FC-16 style boards.

use crate::backend::{RenderSurface, SurfaceError};

/// Pixels per module side
pub const MODULE_SIZE: usize = 8;

/// Frame buffer covering `MODULES` horizontally chained 8x8 modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer<const MODULES: usize> {
    /// Row-major storage: `rows[y][module]`
    rows: [[u8; MODULES]; MODULE_SIZE],
}

impl<const MODULES: usize> Default for FrameBuffer<MODULES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MODULES: usize> FrameBuffer<MODULES> {
    /// Width in pixels
    pub const WIDTH: usize = MODULES * MODULE_SIZE;

    /// Height in pixels
    pub const HEIGHT: usize = MODULE_SIZE;

    /// Create a dark frame buffer
    pub const fn new() -> Self {
        Self {
            rows: [[0; MODULES]; MODULE_SIZE],
        }
    }

    /// Read a pixel, `None` when outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return None;
        }
        let byte = self.rows[y][x / MODULE_SIZE];
        Some(byte & Self::mask(x) != 0)
    }

    /// Raw row byte of one module
    pub fn module_row(&self, module: usize, row: usize) -> Option<u8> {
        self.rows.get(row)?.get(module).copied()
    }

    /// Count lit pixels
    pub fn lit_count(&self) -> u32 {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }

    fn mask(x: usize) -> u8 {
        0x80 >> (x % MODULE_SIZE)
    }
}

impl<const MODULES: usize> RenderSurface for FrameBuffer<MODULES> {
    fn set_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), SurfaceError> {
        let (x, y) = (x as usize, y as usize);
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return Err(SurfaceError::InvalidCoordinates);
        }

        let byte = &mut self.rows[y][x / MODULE_SIZE];
        if on {
            *byte |= Self::mask(x);
        } else {
            *byte &= !Self::mask(x);
        }
        Ok(())
    }

    fn clear(&mut self, background: bool) -> Result<(), SurfaceError> {
        let fill = if background { 0xFF } else { 0x00 };
        for row in self.rows.iter_mut() {
            row.fill(fill);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        // Nothing to flush for a bare buffer
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (Self::WIDTH as u8, Self::HEIGHT as u8)
    }
}
