//! Drum position table
//!
//! A drum with `g` glyphs has `9 * g` discrete positions: the 8 bitmap rows
//! of each glyph followed by one blank spacer row. Position `p` shows the
//! eight consecutive rows starting at `p`, wrapping from the last position
//! back to 0.

use heapless::Vec;

use crate::config::Order;
use crate::glyph::{GLYPH_ROWS, MAX_GLYPHS};

/// Positions per glyph cell (bitmap rows plus spacer)
pub const ROW_HEIGHT: usize = GLYPH_ROWS as usize + 1;

/// Maximum positions on a single drum
pub const MAX_POSITIONS: usize = ROW_HEIGHT * MAX_GLYPHS;

/// Row within a glyph cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    /// Bitmap row 0..=7
    Glyph(u8),
    /// Blank gap between two glyphs
    Spacer,
}

impl Row {
    /// Signed row index, -1 for the spacer
    pub fn index(self) -> i8 {
        match self {
            Row::Glyph(row) => row as i8,
            Row::Spacer => -1,
        }
    }
}

/// One table entry: which glyph row is at a drum position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    pub glyph: u8,
    pub row: Row,
}

impl Cell {
    /// Home row: the glyph sits exactly in the 8-row window
    pub fn is_home(&self) -> bool {
        self.row == Row::Glyph(0)
    }

    /// Check for the home row of a specific glyph
    pub fn is_home_of(&self, glyph: u8) -> bool {
        self.glyph == glyph && self.is_home()
    }
}

/// Toroidal position → (glyph, row) lookup
#[derive(Debug, Clone)]
pub struct PositionTable {
    cells: Vec<Cell, MAX_POSITIONS>,
    glyph_count: u8,
    order: Order,
}

impl PositionTable {
    /// Build the table for `glyph_count` glyphs (1..=MAX_GLYPHS)
    ///
    /// With `Order::Natural` the glyph index falls as the position rises, so
    /// glyph `n + 1` sits above glyph `n` on the drum. `Order::Reversed`
    /// mirrors that.
    pub fn build(glyph_count: u8, order: Order) -> Self {
        let count = (glyph_count as usize).clamp(1, MAX_GLYPHS);
        let mut cells = Vec::new();

        for pos in 0..count * ROW_HEIGHT {
            let cell_index = pos / ROW_HEIGHT;
            let glyph = match order {
                Order::Natural => (count - cell_index) % count,
                Order::Reversed => cell_index,
            };
            let row = match pos % ROW_HEIGHT {
                r if r < GLYPH_ROWS as usize => Row::Glyph(r as u8),
                _ => Row::Spacer,
            };
            // Capacity is MAX_POSITIONS and count is clamped to MAX_GLYPHS
            let _ = cells.push(Cell {
                glyph: glyph as u8,
                row,
            });
        }

        Self {
            cells,
            glyph_count: count as u8,
            order,
        }
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never empty: a table holds at least one glyph cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of glyphs
    pub fn glyph_count(&self) -> u8 {
        self.glyph_count
    }

    /// Order convention the table was built with
    pub fn order(&self) -> Order {
        self.order
    }

    /// Look up a position, wrapping around the drum
    pub fn cell(&self, position: usize) -> Cell {
        self.cells[position % self.cells.len()]
    }

    /// Step `delta` positions from `position`, wrapping in both directions
    pub fn advance(&self, position: u16, delta: i8) -> u16 {
        let len = self.cells.len() as i32;
        (position as i32 + delta as i32).rem_euclid(len) as u16
    }

    /// Position of a glyph's home row
    pub fn home_of(&self, glyph: u8) -> Option<u16> {
        self.cells
            .iter()
            .position(|cell| cell.is_home_of(glyph))
            .map(|pos| pos as u16)
    }

    /// All entries in position order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
