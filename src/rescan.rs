//! Dense full-grid recomputation of a generation, used to cross-check the
//! incremental engine.

use crate::{pos, world::check_dimensions, Board, Error, Pos, Result, Topology};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescanGrid {
    width: u32,
    height: u32,
    wrap: bool,
    cells: Vec<bool>,
}

impl RescanGrid {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_wrap(width, height, false)
    }

    pub fn with_wrap(width: u32, height: u32, wrap: bool) -> Result<Self> {
        check_dimensions(width, height)?;
        let cells = vec![false; width as usize * height as usize];
        Ok(Self {
            width,
            height,
            wrap,
            cells,
        })
    }

    /// copies the state and topology of any board.
    pub fn from_board(board: &impl Board) -> Self {
        let (width, height) = board.dimensions();
        let mut grid = Self {
            width,
            height,
            wrap: board.wrap(),
            cells: vec![false; width as usize * height as usize],
        };
        for pos in board.actives() {
            grid.set(pos, true);
        }
        grid
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.topology()
            .contains(pos)
            .then(|| pos.x as usize + pos.y as usize * self.width as usize)
    }

    /// writes a cell, positions outside of the grid are ignored.
    pub fn set(&mut self, pos: Pos, alive: bool) {
        if let Some(index) = self.index(pos) {
            self.cells[index] = alive;
        }
    }

    fn positions(&self) -> impl Iterator<Item = Pos> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| pos!(x, y)))
    }
}

impl Board for RescanGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn wrap(&self) -> bool {
        self.wrap
    }

    fn get(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|index| self.cells[index])
    }

    fn actives(&self) -> Vec<Pos> {
        self.positions().filter(|&pos| self.get(pos)).collect()
    }
}

fn ensure_same_dimensions(left: &impl Board, right: &impl Board) -> Result<()> {
    if left.dimensions() != right.dimensions() {
        return Err(Error::DimensionMismatch {
            left: left.dimensions(),
            right: right.dimensions(),
        });
    }
    Ok(())
}

/// Writes the generation following `current` into `future` by rescanning
/// every cell, and returns the positions that changed.
pub fn advance(current: &RescanGrid, future: &mut RescanGrid) -> Result<Vec<Pos>> {
    ensure_same_dimensions(current, future)?;
    let topology: Topology = current.topology();
    let mut changes = vec![];
    for pos in current.positions() {
        let neighbors = topology
            .neighbors(pos)
            .filter(|&neighbor| current.get(neighbor))
            .count();
        let alive = current.get(pos);
        let next = if alive {
            neighbors == 2 || neighbors == 3
        } else {
            neighbors == 3
        };
        future.set(pos, next);
        if next != alive {
            changes.push(pos);
        }
    }
    Ok(changes)
}

/// positions whose state differs between two boards of the same size.
pub fn diff(left: &impl Board, right: &impl Board) -> Result<Vec<Pos>> {
    ensure_same_dimensions(left, right)?;
    let (width, height) = left.dimensions();
    let mut differences = vec![];
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = pos!(x, y);
            if left.get(pos) != right.get(pos) {
                differences.push(pos);
            }
        }
    }
    Ok(differences)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::World;

    fn random_world(rng: &mut StdRng, wrap: bool) -> World {
        let width = rng.random_range(3..24);
        let height = rng.random_range(3..24);
        let density = rng.random_range(0.05..0.6);
        let mut world = World::with_wrap(width, height, wrap).unwrap();
        crate::seed::fill_random(&mut world, density, rng).unwrap();
        world
    }

    fn check_equivalence(seed: u64, wrap: bool) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = random_world(&mut rng, wrap);
        for generation in 0..40 {
            let current = RescanGrid::from_board(&world);
            let mut future = current.clone();
            advance(&current, &mut future).unwrap();
            world.step();
            let differences = diff(&world, &future).unwrap();
            assert!(
                differences.is_empty(),
                "seed {seed}, wrap {wrap}, generation {generation}: {differences:?}"
            );
        }
    }

    #[test]
    fn incremental_matches_rescan_bounded() {
        for seed in 0..32 {
            check_equivalence(seed, false);
        }
    }

    #[test]
    fn incremental_matches_rescan_wrapped() {
        for seed in 100..132 {
            check_equivalence(seed, true);
        }
    }

    #[test]
    fn incremental_matches_rescan_with_edits() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut world = random_world(&mut rng, false);
        for _ in 0..30 {
            for _ in 0..5 {
                let pos = pos!(
                    rng.random_range(0..world.width() as i32),
                    rng.random_range(0..world.height() as i32)
                );
                if rng.random_bool(0.5) {
                    world.spawn(pos);
                } else {
                    world.kill(pos);
                }
            }
            let current = RescanGrid::from_board(&world);
            let mut future = current.clone();
            advance(&current, &mut future).unwrap();
            world.step();
            assert!(diff(&world, &future).unwrap().is_empty());
        }
    }

    #[test]
    fn incremental_matches_rescan_tiny_torus() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let width = rng.random_range(1..=5);
            let height = rng.random_range(1..=5);
            let wrap = width <= 2 || height <= 2 || rng.random_bool(0.5);
            let mut world = World::with_wrap(width, height, wrap).unwrap();
            crate::seed::fill_random(&mut world, 0.5, &mut rng).unwrap();
            for generation in 0..30 {
                if rng.random_bool(0.2) {
                    let wrap = !world.wrap();
                    world.set_wrap(wrap);
                }
                let current = RescanGrid::from_board(&world);
                let mut future = current.clone();
                advance(&current, &mut future).unwrap();
                world.step();
                let differences = diff(&world, &future).unwrap();
                assert!(
                    differences.is_empty(),
                    "seed {seed}, {width}x{height}, generation {generation}: {differences:?}"
                );
            }
        }
    }

    #[test]
    fn tiny_torus_counts_every_offset() {
        let mut world = World::with_wrap(1, 1, true).unwrap();
        world.spawn(pos!(0, 0));
        // all eight offsets fold back onto the cell itself
        assert_eq!(world.neighbor_count(pos!(0, 0)), 8);
        world.step();
        assert_eq!(world.population(), 0);

        let mut world = World::with_wrap(2, 1, true).unwrap();
        world.spawn(pos!(0, 0));
        assert_eq!(world.neighbor_count(pos!(1, 0)), 6);
        assert_eq!(world.neighbor_count(pos!(0, 0)), 2);
    }

    #[test]
    fn advance_reports_changes() {
        let mut current = RescanGrid::new(5, 5).unwrap();
        for pos in [pos!(1, 2), pos!(2, 2), pos!(3, 2)] {
            current.set(pos, true);
        }
        let mut future = RescanGrid::new(5, 5).unwrap();
        let mut changes = advance(&current, &mut future).unwrap();
        changes.sort();
        assert_eq!(
            changes,
            vec![pos!(1, 2), pos!(2, 1), pos!(2, 3), pos!(3, 2)]
        );
        assert_eq!(future.actives(), vec![pos!(2, 1), pos!(2, 2), pos!(2, 3)]);
    }

    #[test]
    fn mismatched_dimensions() {
        let current = RescanGrid::new(4, 4).unwrap();
        let mut future = RescanGrid::new(4, 5).unwrap();
        assert!(matches!(
            advance(&current, &mut future),
            Err(Error::DimensionMismatch {
                left: (4, 4),
                right: (4, 5)
            })
        ));
        let world = World::new(5, 4).unwrap();
        assert!(diff(&world, &current).is_err());
    }

    #[test]
    fn set_ignores_outside() {
        let mut grid = RescanGrid::new(2, 2).unwrap();
        grid.set(pos!(2, 0), true);
        grid.set(pos!(-1, 1), true);
        assert!(grid.actives().is_empty());
        assert!(!grid.get(pos!(2, 0)));
    }
}
