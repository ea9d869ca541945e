//! Coordinate, heading and quadrant-cell primitives.
//!
//! The coordinate order is (y, x, z): y and x span the ground plane, z is
//! elevation. Track shapes are authored facing north (+y) and derived for
//! the other headings by repeated clockwise rotation.

use std::ops::{Add, AddAssign};

/// A tile position or offset in the generation volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub y: i32,
    pub x: i32,
    pub z: i32,
}

impl Coord {
    #[inline]
    pub const fn new(y: i32, x: i32, z: i32) -> Self {
        Self { y, x, z }
    }

    /// Reflects across the x = 0 plane, swapping handedness.
    #[inline]
    pub const fn mirror(self) -> Self {
        Self::new(self.y, -self.x, self.z)
    }

    /// Rotates 90 degrees clockwise about the vertical axis (north to east).
    #[inline]
    pub const fn rotate_cw(self) -> Self {
        Self::new(-self.x, self.y, self.z)
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.y + rhs.y, self.x + rhs.x, self.z + rhs.z)
    }
}

impl AddAssign for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: Coord) {
        *self = *self + rhs;
    }
}

/// The direction the train is travelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// All headings in clockwise rotation order.
    pub const ALL: [Heading; 4] = [
        Heading::North,
        Heading::East,
        Heading::South,
        Heading::West,
    ];

    #[inline]
    pub const fn turn_left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    #[inline]
    pub const fn turn_right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }
}

/// Occupancy of the four sub-quadrants of one tile-column at one elevation.
///
/// Stored as a 4-bit mask so collision tests and merges are single bitwise
/// operations. Quadrants are addressed (row, col): c00 row 0 col 0, c01
/// row 0 col 1, c10 row 1 col 0, c11 row 1 col 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuadCell(u8);

impl QuadCell {
    pub const EMPTY: QuadCell = QuadCell(0);
    pub const FULL: QuadCell = QuadCell(0b1111);

    /// Builds a cell from four occupancy flags given as 0/1, in footprint
    /// table order (c00, c01, c10, c11).
    #[inline]
    pub const fn of(c00: u8, c01: u8, c10: u8, c11: u8) -> Self {
        QuadCell((c00 & 1) | (c01 & 1) << 1 | (c10 & 1) << 2 | (c11 & 1) << 3)
    }

    #[inline]
    pub const fn c00(self) -> bool {
        self.0 & 1 != 0
    }

    #[inline]
    pub const fn c01(self) -> bool {
        self.0 & 2 != 0
    }

    #[inline]
    pub const fn c10(self) -> bool {
        self.0 & 4 != 0
    }

    #[inline]
    pub const fn c11(self) -> bool {
        self.0 & 8 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of occupied quadrants (0 to 4).
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Mirror across the x = 0 plane: swaps the quadrant columns.
    #[inline]
    pub const fn mirror(self) -> Self {
        Self::from_flags(self.c01(), self.c00(), self.c11(), self.c10())
    }

    /// Quadrant permutation matching a clockwise rotation of the tile.
    #[inline]
    pub const fn rotate_cw(self) -> Self {
        Self::from_flags(self.c01(), self.c11(), self.c00(), self.c10())
    }

    /// Disjoint-or merge: `None` when any quadrant is set on both sides.
    #[inline]
    pub const fn resolve(self, other: QuadCell) -> Option<QuadCell> {
        if self.0 & other.0 != 0 {
            return None;
        }
        Some(QuadCell(self.0 | other.0))
    }

    #[inline]
    const fn from_flags(c00: bool, c01: bool, c10: bool, c11: bool) -> Self {
        QuadCell(c00 as u8 | (c01 as u8) << 1 | (c10 as u8) << 2 | (c11 as u8) << 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_left_then_right_is_identity() {
        for h in Heading::ALL {
            assert_eq!(h.turn_left().turn_right(), h);
            assert_eq!(h.turn_right().turn_left(), h);
        }
    }

    #[test]
    fn test_four_right_turns_are_identity() {
        for h in Heading::ALL {
            assert_eq!(h.turn_right().turn_right().turn_right().turn_right(), h);
        }
    }

    #[test]
    fn test_coord_mirror_is_involution() {
        let c = Coord::new(2, -3, 5);
        assert_eq!(c.mirror().mirror(), c);
    }

    #[test]
    fn test_coord_rotate_four_times_is_identity() {
        let c = Coord::new(1, 2, 3);
        assert_eq!(c.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), c);
        assert_eq!(c.rotate_cw(), Coord::new(-2, 1, 3));
    }

    #[test]
    fn test_quadcell_mirror_swaps_columns() {
        let cell = QuadCell::of(1, 0, 1, 0);
        assert_eq!(cell.mirror(), QuadCell::of(0, 1, 0, 1));
        assert_eq!(cell.mirror().mirror(), cell);
    }

    #[test]
    fn test_quadcell_rotate_four_times_is_identity() {
        // exhaustive over all 16 occupancy patterns
        for bits in 0u8..16 {
            let cell = QuadCell::of(bits & 1, (bits >> 1) & 1, (bits >> 2) & 1, (bits >> 3) & 1);
            assert_eq!(cell.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), cell);
        }
    }

    #[test]
    fn test_quadcell_rotate_permutation() {
        let cell = QuadCell::of(1, 0, 0, 0);
        // c00 moves to the c10 quadrant under a clockwise rotation
        assert_eq!(cell.rotate_cw(), QuadCell::of(0, 0, 1, 0));
    }

    #[test]
    fn test_resolve_is_commutative() {
        let a = QuadCell::of(1, 0, 1, 0);
        let b = QuadCell::of(0, 1, 0, 0);
        assert_eq!(a.resolve(b), b.resolve(a));
        assert_eq!(a.resolve(b), Some(QuadCell::of(1, 1, 1, 0)));
    }

    #[test]
    fn test_resolve_with_empty_is_identity() {
        for bits in 0u8..16 {
            let cell = QuadCell::of(bits & 1, (bits >> 1) & 1, (bits >> 2) & 1, (bits >> 3) & 1);
            assert_eq!(cell.resolve(QuadCell::EMPTY), Some(cell));
        }
    }

    #[test]
    fn test_resolve_detects_shared_quadrant() {
        let a = QuadCell::of(1, 1, 0, 0);
        let b = QuadCell::of(0, 1, 1, 1);
        assert_eq!(a.resolve(b), None);
        assert_eq!(QuadCell::FULL.resolve(QuadCell::FULL), None);
    }
}
