use std::ops::{Add, Sub};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        $crate::Pos { x: $x, y: $y }
    };
}

/// relative positions of the eight cells surrounding a cell.
pub const NEIGHBOR_OFFSETS: [Pos; 8] = [
    pos!(-1, -1),
    pos!(-1, 0),
    pos!(-1, 1),
    pos!(0, -1),
    pos!(0, 1),
    pos!(1, -1),
    pos!(1, 0),
    pos!(1, 1),
];

impl Pos {
    /// raw neighbor positions, possibly one step outside of any grid.
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        NEIGHBOR_OFFSETS.into_iter().map(move |offset| self + offset)
    }
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.x - rhs.x, self.y - rhs.y)
    }
}

#[test]
fn test_neighbors() {
    let around: Vec<_> = pos!(0, 0).neighbors().collect();
    assert_eq!(around.len(), 8);
    assert!(!around.contains(&pos!(0, 0)));
    assert!(around.contains(&pos!(-1, 1)));
    assert!(around.contains(&pos!(1, -1)));
}

#[test]
fn test_arithmetic() {
    assert_eq!(pos!(2, 3) + pos!(-1, 1), pos!(1, 4));
    assert_eq!(pos!(2, 3) - pos!(2, 5), pos!(0, -2));
}
