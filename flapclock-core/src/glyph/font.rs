//! Built-in glyph tables
//!
//! Drawn for a 6-pixel wide cell. Letter tables carry just the characters
//! needed for two-letter weekday abbreviations in German and English.

use super::{Glyph, GlyphSet};

/// Index of the blank glyph in every digit-based set
pub const BLANK: u8 = 10;

/// Colon drum: nothing shown
pub const COLON_BLANK: u8 = 0;

/// Colon drum: time separator
pub const COLON_TIME: u8 = 1;

/// Colon drum: low dot pair (temperature / humidity separator)
pub const COLON_DOTS: u8 = 2;

/// First letter index after the digits in the weekday wheels
pub const LETTERS_START: u8 = 11;

/// 0-9 followed by blank
pub const DIGITS: [Glyph; 11] = [
    Glyph(0x1e3333333333331e),
    Glyph(0x1818181818181e18),
    Glyph(0x3f03060c1830331e),
    Glyph(0x1e3330301c30331e),
    Glyph(0x303030303f333332),
    Glyph(0x1e3330301f03033f),
    Glyph(0x1e3333331f03331e),
    Glyph(0x0c0c0c0c0c18303f),
    Glyph(0x1e3333331e33331e),
    Glyph(0x1e3330303e33331e),
    Glyph::BLANK,
];

/// Blank, colon, low dots
pub const COLON: [Glyph; 3] = [
    Glyph::BLANK,
    Glyph(0x0000030300030300),
    Glyph(0x0000000000000303),
];

/// D F M S T W
pub const WEEKDAY_CAPITALS: [Glyph; 6] = [
    Glyph(0x1f3333333333331f),
    Glyph(0x030303031f03033f),
    Glyph(0x333333333f3f3321),
    Glyph(0x1e3330301e03331e),
    Glyph(0x0c0c0c0c0c0c0c3f),
    Glyph(0x21333f3f33333333),
];

/// a e h i o r u
pub const WEEKDAY_LOWERCASE: [Glyph; 7] = [
    Glyph(0x3e33333e301e0000),
    Glyph(0x1e33031f331e0000),
    Glyph(0x333333331f030303),
    Glyph(0x0606060606000600),
    Glyph(0x1e3333331e000000),
    Glyph(0x060606061e000000),
    Glyph(0x3e33333333000000),
];

/// Leftmost drum: digits, blank, D F M S T W
pub const LEFT_WHEEL: [Glyph; 17] = join(DIGITS, WEEKDAY_CAPITALS);

/// Second drum: digits, blank, a e h i o r u
pub const SECOND_WHEEL: [Glyph; 18] = join(DIGITS, WEEKDAY_LOWERCASE);

/// Capital letter glyph indices on `LEFT_WHEEL`
pub mod capital {
    use super::LETTERS_START;

    pub const D: u8 = LETTERS_START;
    pub const F: u8 = LETTERS_START + 1;
    pub const M: u8 = LETTERS_START + 2;
    pub const S: u8 = LETTERS_START + 3;
    pub const T: u8 = LETTERS_START + 4;
    pub const W: u8 = LETTERS_START + 5;
}

/// Lowercase letter glyph indices on `SECOND_WHEEL`
pub mod lower {
    use super::LETTERS_START;

    pub const A: u8 = LETTERS_START;
    pub const E: u8 = LETTERS_START + 1;
    pub const H: u8 = LETTERS_START + 2;
    pub const I: u8 = LETTERS_START + 3;
    pub const O: u8 = LETTERS_START + 4;
    pub const R: u8 = LETTERS_START + 5;
    pub const U: u8 = LETTERS_START + 6;
}

/// Digit drum set
pub const fn digits() -> GlyphSet<'static> {
    GlyphSet::from_table(&DIGITS)
}

/// Colon drum set
pub const fn colon() -> GlyphSet<'static> {
    GlyphSet::from_table(&COLON)
}

/// Leftmost drum set
pub const fn left_wheel() -> GlyphSet<'static> {
    GlyphSet::from_table(&LEFT_WHEEL)
}

/// Second drum set
pub const fn second_wheel() -> GlyphSet<'static> {
    GlyphSet::from_table(&SECOND_WHEEL)
}

const fn join<const A: usize, const B: usize, const C: usize>(
    a: [Glyph; A],
    b: [Glyph; B],
) -> [Glyph; C] {
    let mut out = [Glyph::BLANK; C];
    let mut i = 0;
    while i < A {
        out[i] = a[i];
        i += 1;
    }
    let mut j = 0;
    while j < B {
        out[A + j] = b[j];
        j += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_sizes() {
        assert_eq!(digits().len(), 11);
        assert_eq!(colon().len(), 3);
        assert_eq!(left_wheel().len(), 17);
        assert_eq!(second_wheel().len(), 18);
    }

    #[test]
    fn test_wheels_start_with_digits() {
        for i in 0..DIGITS.len() {
            assert_eq!(LEFT_WHEEL[i], DIGITS[i]);
            assert_eq!(SECOND_WHEEL[i], DIGITS[i]);
        }
        assert_eq!(LEFT_WHEEL[capital::W as usize], WEEKDAY_CAPITALS[5]);
        assert_eq!(SECOND_WHEEL[lower::U as usize], WEEKDAY_LOWERCASE[6]);
    }

    #[test]
    fn test_blank_is_dark() {
        assert_eq!(DIGITS[BLANK as usize], Glyph::BLANK);
        assert_eq!(COLON[COLON_BLANK as usize], Glyph::BLANK);
    }
}
