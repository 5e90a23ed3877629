//! Drum move planning
//!
//! A move is a sequence of signed unit steps over the position table. The
//! drum first lurches forward with the start pattern, then advances one row
//! per frame until the target glyph sits in the window, and finally rocks
//! back and forth with the stop pattern before coming to rest.

use crate::config::Order;

/// Zero-motion frames inserted per drum to the right of a drum
///
/// Drum `i` of `n` waits `(n - 1 - i) * STAGGER_FRAMES` frames, so the
/// rightmost drum starts first.
pub const STAGGER_FRAMES: usize = 12;

/// Step multipliers applied before cruising (net +7 rows)
pub const START_PATTERN: [i8; 23] = [
    0, 0, 0, 1, 0, 0, 0, 1, 0, //
    0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0,
];

/// Step multipliers applied after the target glyph is reached (net 0 rows)
pub const STOP_PATTERN: [i8; 34] = [
    1, 1, 1, 0, 1, 0, 0, 1, 0, -1, 0, 0, -1, 0, //
    0, -1, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, -1,
];

/// Rotation direction in position space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Towards higher table positions
    Up,
    /// Towards lower table positions
    Down,
    /// No motion
    Still,
}

impl Direction {
    /// Signed step: +1, -1 or 0
    pub fn sign(self) -> i8 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Still => 0,
        }
    }

    /// Opposite direction (`Still` stays `Still`)
    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Still => Direction::Still,
        }
    }

    /// Check for the no-motion case
    pub fn is_still(self) -> bool {
        self == Direction::Still
    }
}

/// Pick the direction that reaches `to` in the fewest glyph cells
///
/// Distances are measured in glyph-index space. With `Order::Natural`
/// stepping `Up` in position space walks towards lower glyph indices. On a
/// tie the drum steps `Down` (towards higher glyph indices); the result is
/// mirrored for `Order::Reversed`.
pub fn shortest_direction(from: u8, to: u8, glyph_count: u8, order: Order) -> Direction {
    if from == to || glyph_count == 0 {
        return Direction::Still;
    }

    let count = glyph_count as i16;
    let towards_higher = (to as i16 - from as i16).rem_euclid(count);
    let towards_lower = count - towards_higher;

    let natural = if towards_lower < towards_higher {
        Direction::Up
    } else {
        Direction::Down
    };

    match order {
        Order::Natural => natural,
        Order::Reversed => natural.reversed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pattern_net_motion() {
        let start: i32 = START_PATTERN.iter().map(|&s| s as i32).sum();
        let stop: i32 = STOP_PATTERN.iter().map(|&s| s as i32).sum();
        assert_eq!(start, 7);
        assert_eq!(stop, 0);
    }

    #[test]
    fn test_same_glyph_is_still() {
        for glyph in 0..11 {
            assert_eq!(shortest_direction(glyph, glyph, 11, Order::Natural), Direction::Still);
            assert_eq!(shortest_direction(glyph, glyph, 11, Order::Reversed), Direction::Still);
        }
    }

    #[test]
    fn test_shorter_way_round() {
        // 1 -> 9 over 11 glyphs: 8 cells upwards in index, 3 cells downwards
        assert_eq!(shortest_direction(1, 9, 11, Order::Natural), Direction::Up);
        assert_eq!(shortest_direction(9, 1, 11, Order::Natural), Direction::Down);
        assert_eq!(shortest_direction(1, 9, 11, Order::Reversed), Direction::Down);
    }

    #[test]
    fn test_tie_prefers_higher_index() {
        // 0 -> 2 over 4 glyphs is two cells either way
        assert_eq!(shortest_direction(0, 2, 4, Order::Natural), Direction::Down);
        assert_eq!(shortest_direction(2, 0, 4, Order::Natural), Direction::Down);
        assert_eq!(shortest_direction(0, 2, 4, Order::Reversed), Direction::Up);
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::Up.sign(), 1);
        assert_eq!(Direction::Down.sign(), -1);
        assert_eq!(Direction::Still.sign(), 0);
        assert_eq!(Direction::Up.reversed(), Direction::Down);
        assert!(Direction::Still.reversed().is_still());
    }

    proptest! {
        #[test]
        fn prop_direction_antisymmetric(count in 1u8..=32, a in 0u8..32, b in 0u8..32) {
            let (a, b) = (a % count, b % count);
            prop_assume!(a != b);

            let forward = (b as i16 - a as i16).rem_euclid(count as i16);
            let backward = count as i16 - forward;
            let there = shortest_direction(a, b, count, Order::Natural);
            let back = shortest_direction(b, a, count, Order::Natural);

            if forward == backward {
                prop_assert_eq!(there, Direction::Down);
                prop_assert_eq!(back, Direction::Down);
            } else {
                prop_assert_eq!(there, back.reversed());
            }
        }
    }
}
