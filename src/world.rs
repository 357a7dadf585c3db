use crate::Pos;

/// read-only view over a rectangular grid of cells.
pub trait Board {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn wrap(&self) -> bool;
    fn get(&self, pos: Pos) -> bool;
    fn actives(&self) -> Vec<Pos>;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn topology(&self) -> Topology {
        Topology::new(self.width(), self.height(), self.wrap())
    }
}

pub(crate) use hashed_world::check_dimensions;
pub use hashed_world::World;
mod hashed_world;

pub use topology::Topology;
mod topology;
