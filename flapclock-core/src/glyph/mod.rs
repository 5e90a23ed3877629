//! Glyph bitmaps and glyph sets
//!
//! A glyph is an 8x8 bitmap packed into a `u64`, one byte per row with row 0
//! in the least significant byte. Within a row byte, bit `c` lights column
//! `c` counted from the left edge of the character cell.

pub mod font;

pub use font::*;

/// Rows per glyph bitmap
pub const GLYPH_ROWS: u8 = 8;

/// Maximum glyphs on a single drum
pub const MAX_GLYPHS: usize = 32;

/// One 8x8 bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph(pub u64);

impl Glyph {
    /// Glyph with no lit pixels
    pub const BLANK: Self = Self(0);

    /// Create a glyph from packed row bytes
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Get one row byte; rows past the bitmap are dark
    pub const fn row(self, row: u8) -> u8 {
        if row >= GLYPH_ROWS {
            return 0;
        }
        (self.0 >> (8 * row as u32)) as u8
    }

    /// Check whether a pixel is lit
    pub const fn is_lit(self, row: u8, col: u8) -> bool {
        col < 8 && self.row(row) & (1 << col) != 0
    }
}

/// Glyph set errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphSetError {
    /// A drum needs at least one glyph
    Empty,
    /// More glyphs than a position table can hold
    TooManyGlyphs,
}

/// Ordered, immutable glyph sequence shared by reference across drums
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet<'a> {
    glyphs: &'a [Glyph],
}

impl<'a> GlyphSet<'a> {
    /// Wrap a glyph slice
    pub const fn new(glyphs: &'a [Glyph]) -> Result<Self, GlyphSetError> {
        if glyphs.is_empty() {
            Err(GlyphSetError::Empty)
        } else if glyphs.len() > MAX_GLYPHS {
            Err(GlyphSetError::TooManyGlyphs)
        } else {
            Ok(Self { glyphs })
        }
    }

    /// Wrap a built-in table whose size is known to be valid
    pub(crate) const fn from_table(glyphs: &'a [Glyph]) -> Self {
        Self { glyphs }
    }

    /// Number of glyphs
    pub const fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false: construction rejects empty sets
    pub const fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Get a glyph by index
    pub fn get(&self, index: u8) -> Option<Glyph> {
        self.glyphs.get(index as usize).copied()
    }

    /// Iterate glyphs in order
    pub fn iter(&self) -> impl Iterator<Item = &'a Glyph> {
        self.glyphs.iter()
    }
}
