//! Physical layout of the five-character row on a 32x8 panel
//!
//! ```text
//!  x: 0      7      14 17     24    31
//!     [wd0 ] [wd1 ] [:] [ d1 ] [ d0 ] *
//! ```
//!
//! The rightmost column is reserved for the indicator marks.

use crate::glyph::{colon, digits, left_wheel, second_wheel, GlyphSet};

/// Number of character drums in the row
pub const DRUM_COUNT: usize = 5;

/// Panel width the standard layout is drawn for
pub const PANEL_WIDTH: u8 = 32;

/// Alarm-enabled mark: single pixel at the bottom of the indicator column
pub const ALARM_ROWS: [u8; 1] = [7];

/// Time-sync-failed mark: short line plus a dot, like an exclamation mark
pub const SYNC_FAILED_ROWS: [u8; 4] = [0, 1, 2, 4];

/// Placement and glyph set of one drum
#[derive(Debug, Clone, Copy)]
pub struct DrumSpec<'a> {
    /// Left column on the surface
    pub x: u8,
    /// Columns drawn, counted from bit 0 of each glyph row
    pub width: u8,
    pub glyphs: GlyphSet<'a>,
}

/// The clock's drum row: two letter/digit drums, a colon drum, two digit drums
pub const fn standard_layout() -> [DrumSpec<'static>; DRUM_COUNT] {
    [
        DrumSpec { x: 0, width: 6, glyphs: left_wheel() },
        DrumSpec { x: 7, width: 6, glyphs: second_wheel() },
        DrumSpec { x: 14, width: 2, glyphs: colon() },
        DrumSpec { x: 17, width: 6, glyphs: digits() },
        DrumSpec { x: 24, width: 6, glyphs: digits() },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drums_do_not_overlap() {
        let layout = standard_layout();
        for pair in layout.windows(2) {
            assert!(pair[0].x + pair[0].width <= pair[1].x);
        }
        let last = layout[DRUM_COUNT - 1];
        assert!(last.x + last.width < PANEL_WIDTH - 1);
    }

    #[test]
    fn test_glyph_set_sizes() {
        let sizes: Vec<usize> = standard_layout().iter().map(|d| d.glyphs.len()).collect();
        assert_eq!(sizes, vec![17, 18, 3, 11, 11]);
    }
}
