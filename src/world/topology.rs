use crate::{pos, Pos};

/// neighbor semantics of a grid: where its edges are and whether they meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    width: i32,
    height: i32,
    wrap: bool,
}

impl Topology {
    pub fn new(width: u32, height: u32, wrap: bool) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            wrap,
        }
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn contains(&self, Pos { x, y }: Pos) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// maps a position at most one step outside the grid back onto it.
    /// returns `None` when the grid is bounded and the position falls off an edge.
    pub fn normalize(&self, pos: Pos) -> Option<Pos> {
        if !self.wrap {
            return self.contains(pos).then_some(pos);
        }
        let x = fold(pos.x, self.width);
        let y = fold(pos.y, self.height);
        Some(pos!(x, y))
    }

    /// normalized neighbors of `pos`, one entry per offset.
    pub fn neighbors(self, pos: Pos) -> impl Iterator<Item = Pos> {
        pos.neighbors().filter_map(move |p| self.normalize(p))
    }
}

fn fold(n: i32, size: i32) -> i32 {
    if n == size {
        0
    } else if n == -1 {
        size - 1
    } else {
        n
    }
}
