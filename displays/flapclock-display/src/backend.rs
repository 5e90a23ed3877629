//! Render surface trait
//!
//! Defines the interface between the drum engine and a pixel display.

/// Render surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Communication error with the display hardware
    Communication,
    /// Pixel coordinates outside the surface
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Monochrome pixel surface
///
/// Writes land in an off-screen buffer; nothing becomes visible until
/// `present()` is called. Implementations for real hardware push the buffer
/// to the panel in `present()`.
pub trait RenderSurface {
    /// Set a single pixel to lit (`true`) or dark (`false`)
    fn set_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), SurfaceError>;

    /// Fill the whole buffer with the background value
    fn clear(&mut self, background: bool) -> Result<(), SurfaceError>;

    /// Make the buffered frame visible
    fn present(&mut self) -> Result<(), SurfaceError>;

    /// Get the surface dimensions
    ///
    /// Returns (width, height) in pixels
    fn dimensions(&self) -> (u8, u8);
}
