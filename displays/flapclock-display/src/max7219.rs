//! MAX7219 LED matrix driver
//!
//! Driver for daisy-chained MAX7219 8x8 modules over SPI (FC-16 boards).
//! Pixels are drawn into a local `FrameBuffer` and shifted out row by row
//! on `present()`.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::backend::{RenderSurface, SurfaceError};
use crate::framebuffer::{FrameBuffer, MODULE_SIZE};

/// Maximum intensity level
pub const MAX_INTENSITY: u8 = 15;

/// MAX7219 register addresses
#[allow(dead_code)]
mod reg {
    pub const NOOP: u8 = 0x00;
    pub const DIGIT0: u8 = 0x01;
    pub const DECODE_MODE: u8 = 0x09;
    pub const INTENSITY: u8 = 0x0A;
    pub const SCAN_LIMIT: u8 = 0x0B;
    pub const SHUTDOWN: u8 = 0x0C;
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// MAX7219 chain driver
pub struct Max7219<SPI, CS, const MODULES: usize> {
    spi: SPI,
    cs: CS,
    buffer: FrameBuffer<MODULES>,
    initialized: bool,
}

impl<SPI, CS, const MODULES: usize> Max7219<SPI, CS, MODULES>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create a new driver; call `init()` before presenting frames
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            buffer: FrameBuffer::new(),
            initialized: false,
        }
    }

    /// Initialize every module in the chain
    pub fn init(&mut self) -> Result<(), SurfaceError> {
        let init_cmds: [(u8, u8); 5] = [
            (reg::SHUTDOWN, 0x00),
            (reg::DISPLAY_TEST, 0x00),
            (reg::SCAN_LIMIT, 0x07), // All 8 rows
            (reg::DECODE_MODE, 0x00), // Raw pixel data, no BCD
            (reg::SHUTDOWN, 0x01),
        ];

        for (register, data) in init_cmds {
            self.broadcast(register, data)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Set LED intensity (0 = darkest, 15 = brightest)
    pub fn set_intensity(&mut self, level: u8) -> Result<(), SurfaceError> {
        self.broadcast(reg::INTENSITY, level.min(MAX_INTENSITY))
    }

    /// Get the local frame buffer
    pub fn buffer(&self) -> &FrameBuffer<MODULES> {
        &self.buffer
    }

    /// Release the bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Write the same register value to every module
    fn broadcast(&mut self, register: u8, data: u8) -> Result<(), SurfaceError> {
        self.frame(|_| (register, data))
    }

    /// Shift one `(register, data)` pair per module within a single CS frame
    ///
    /// The first pair written ends up in the module farthest down the chain,
    /// which on FC-16 boards is the leftmost one.
    fn frame<F>(&mut self, mut pair: F) -> Result<(), SurfaceError>
    where
        F: FnMut(usize) -> (u8, u8),
    {
        self.cs.set_low().map_err(|_| SurfaceError::Communication)?;

        let mut result = Ok(());
        for module in 0..MODULES {
            let (register, data) = pair(module);
            if self.spi.write(&[register, data]).is_err() {
                result = Err(SurfaceError::Communication);
                break;
            }
        }
        if result.is_ok() && self.spi.flush().is_err() {
            result = Err(SurfaceError::Communication);
        }

        // Latch happens on the rising edge, release CS even after a failure
        self.cs.set_high().map_err(|_| SurfaceError::Communication)?;
        result
    }
}

impl<SPI, CS, const MODULES: usize> RenderSurface for Max7219<SPI, CS, MODULES>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    fn set_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), SurfaceError> {
        self.buffer.set_pixel(x, y, on)
    }

    fn clear(&mut self, background: bool) -> Result<(), SurfaceError> {
        self.buffer.clear(background)
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        if !self.initialized {
            return Err(SurfaceError::NotInitialized);
        }

        for row in 0..MODULE_SIZE {
            let buffer = &self.buffer;
            let rows: [u8; MODULES] =
                core::array::from_fn(|module| buffer.module_row(module, row).unwrap_or(0));
            self.frame(|module| (reg::DIGIT0 + row as u8, rows[module]))?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        self.buffer.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Wire {
        Select,
        Deselect,
        Byte(u8),
    }

    /// Shared log so bus and pin writes interleave in order
    #[derive(Default)]
    struct Log(std::rc::Rc<std::cell::RefCell<Vec<Wire>>>);

    impl Log {
        fn handle(&self) -> Self {
            Self(self.0.clone())
        }

        fn take(&self) -> Vec<Wire> {
            core::mem::take(&mut *self.0.borrow_mut())
        }
    }

    struct RecordingBus(Log);

    impl embedded_hal::spi::ErrorType for RecordingBus {
        type Error = Infallible;
    }

    impl SpiBus<u8> for RecordingBus {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            let mut log = self.0 .0.borrow_mut();
            log.extend(words.iter().map(|&b| Wire::Byte(b)));
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            read.fill(0);
            self.write(write)
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            let copy: Vec<u8> = words.to_vec();
            self.write(&copy)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct RecordingPin(Log);

    impl embedded_hal::digital::ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0 .0.borrow_mut().push(Wire::Select);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0 .0.borrow_mut().push(Wire::Deselect);
            Ok(())
        }
    }

    fn driver() -> (Max7219<RecordingBus, RecordingPin, 4>, Log) {
        let log = Log::default();
        let drv = Max7219::new(RecordingBus(log.handle()), RecordingPin(log.handle()));
        (drv, log)
    }

    #[test]
    fn test_init_broadcasts_to_every_module() {
        let (mut drv, log) = driver();
        drv.init().unwrap();

        let wire = log.take();
        // 5 commands, each framed by select/deselect around 4 modules x 2 bytes
        assert_eq!(wire.len(), 5 * (2 + 4 * 2));
        assert_eq!(wire[0], Wire::Select);
        assert_eq!(&wire[1..3], &[Wire::Byte(0x0C), Wire::Byte(0x00)]);
        assert_eq!(wire[9], Wire::Deselect);

        // Last command wakes the chip
        let last = &wire[wire.len() - 10..];
        assert_eq!(&last[1..3], &[Wire::Byte(0x0C), Wire::Byte(0x01)]);
    }

    #[test]
    fn test_present_requires_init() {
        let (mut drv, _log) = driver();
        assert_eq!(drv.present(), Err(SurfaceError::NotInitialized));
    }

    #[test]
    fn test_present_shifts_rows_leftmost_module_first() {
        let (mut drv, log) = driver();
        drv.init().unwrap();
        log.take();

        drv.set_pixel(0, 0, true).unwrap(); // module 0, row 0
        drv.set_pixel(31, 0, true).unwrap(); // module 3, row 0
        drv.present().unwrap();

        let wire = log.take();
        assert_eq!(wire.len(), 8 * (2 + 4 * 2));
        assert_eq!(
            &wire[..10],
            &[
                Wire::Select,
                Wire::Byte(0x01),
                Wire::Byte(0x80),
                Wire::Byte(0x01),
                Wire::Byte(0x00),
                Wire::Byte(0x01),
                Wire::Byte(0x00),
                Wire::Byte(0x01),
                Wire::Byte(0x01),
                Wire::Deselect,
            ]
        );
        // Row 7 uses the last digit register
        assert_eq!(wire[wire.len() - 9], Wire::Byte(0x08));
    }

    #[test]
    fn test_buffer_tracks_pixels_and_release_returns_bus() {
        let (mut drv, log) = driver();
        drv.set_pixel(10, 4, true).unwrap();

        // Drawing only touches the local buffer
        assert_eq!(drv.buffer().pixel(10, 4), Some(true));
        assert_eq!(drv.buffer().lit_count(), 1);
        assert!(log.take().is_empty());

        let (mut spi, mut cs) = drv.release();
        spi.write(&[0xAA]).unwrap();
        cs.set_high().unwrap();
        assert_eq!(log.take(), [Wire::Byte(0xAA), Wire::Deselect]);
    }

    #[test]
    fn test_intensity_is_clamped() {
        let (mut drv, log) = driver();
        drv.set_intensity(40).unwrap();

        let wire = log.take();
        assert_eq!(&wire[1..3], &[Wire::Byte(0x0A), Wire::Byte(MAX_INTENSITY)]);
    }
}
