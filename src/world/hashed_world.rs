use std::collections::{hash_map::Entry, HashMap, HashSet};

use metrohash::MetroBuildHasher;
use tracing::{debug, info, trace};

use crate::{Board, Error, Pos, Result, Topology};

type PosSet = HashSet<Pos, MetroBuildHasher>;
type PosMap<V> = HashMap<Pos, V, MetroBuildHasher>;

/// largest side a world may have, so that every neighbor position fits an `i32`.
const MAX_SIDE: u32 = i32::MAX as u32 - 1;

/// A fixed-size grid evolved incrementally.
///
/// Besides the set of live cells, the world keeps the live-neighbor count of
/// every cell touching a live cell, and the set of cells whose inputs changed
/// since the last generation. Stepping only re-evaluates that dirty set, so a
/// generation costs time proportional to the active boundary instead of the
/// grid area.
#[derive(Debug, Clone)]
pub struct World {
    width: u32,
    height: u32,
    topology: Topology,
    live: PosSet,
    /// only ever holds counts >= 1.
    neighbor_counts: PosMap<u8>,
    dirty: PosSet,
    generation: u64,
}

impl World {
    /// creates an empty bounded world.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_wrap(width, height, false)
    }

    /// creates an empty world, toroidal when `wrap` is set.
    pub fn with_wrap(width: u32, height: u32, wrap: bool) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            topology: Topology::new(width, height, wrap),
            live: PosSet::default(),
            neighbor_counts: PosMap::default(),
            dirty: PosSet::default(),
            generation: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn wrap(&self) -> bool {
        self.topology.wrap()
    }

    pub fn population(&self) -> usize {
        self.live.len()
    }

    /// number of generations stepped since creation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, pos: Pos) -> bool {
        self.live.contains(&pos)
    }

    pub fn inspect(&self, pos: Pos) -> bool {
        self.get(pos)
    }

    /// live neighbors currently touching `pos` under the active topology.
    pub fn neighbor_count(&self, pos: Pos) -> u8 {
        self.neighbor_counts.get(&pos).copied().unwrap_or(0)
    }

    pub fn is_dirty(&self, pos: Pos) -> bool {
        self.dirty.contains(&pos)
    }

    /// number of cells pending re-evaluation on the next step.
    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    /// Brings the cell at `pos` to life.
    ///
    /// Returns `false` without touching anything when `pos` lies outside of
    /// the grid or already holds a live cell. Wrapping never applies here:
    /// it only changes who counts as a neighbor.
    pub fn spawn(&mut self, pos: Pos) -> bool {
        if !self.topology.contains(pos) || self.live.contains(&pos) {
            trace!(?pos, "rejected spawn");
            return false;
        }
        self.live.insert(pos);
        for neighbor in self.topology.neighbors(pos) {
            *self.neighbor_counts.entry(neighbor).or_insert(0) += 1;
            self.dirty.insert(neighbor);
        }
        self.dirty.insert(pos);
        true
    }

    /// Kills the cell at `pos`.
    ///
    /// Returns `false` without touching anything when `pos` lies outside of
    /// the grid or is already dead.
    pub fn kill(&mut self, pos: Pos) -> bool {
        if !self.topology.contains(pos) || !self.live.remove(&pos) {
            trace!(?pos, "rejected kill");
            return false;
        }
        for neighbor in self.topology.neighbors(pos) {
            if let Entry::Occupied(mut entry) = self.neighbor_counts.entry(neighbor) {
                *entry.get_mut() -= 1;
                if *entry.get() == 0 {
                    entry.remove();
                }
            }
            self.dirty.insert(neighbor);
        }
        self.dirty.insert(pos);
        true
    }

    /// Advances the world by one generation.
    ///
    /// Only dirty cells are evaluated. Flipped cells are then committed
    /// through `spawn` and `kill`, which seeds the dirty set of the
    /// following generation.
    pub fn step(&mut self) {
        let pending = std::mem::take(&mut self.dirty);
        let mut births = vec![];
        let mut deaths = vec![];
        for &pos in &pending {
            let alive = self.get(pos);
            match (alive, self.next_state(pos)) {
                (false, true) => births.push(pos),
                (true, false) => deaths.push(pos),
                _ => (),
            }
        }

        for &pos in &births {
            self.spawn(pos);
        }
        for &pos in &deaths {
            self.kill(pos);
        }
        self.generation += 1;

        debug!(
            generation = self.generation,
            evaluated = pending.len(),
            births = births.len(),
            deaths = deaths.len(),
            population = self.population(),
            "stepped"
        );
    }

    /// the rule folded over the cell's own state: 3 means alive, 4 means unchanged.
    fn next_state(&self, pos: Pos) -> bool {
        let alive = self.get(pos);
        match alive as u8 + self.neighbor_count(pos) {
            3 => true,
            4 => alive,
            _ => false,
        }
    }

    /// Switches between toroidal and bounded neighbor semantics.
    ///
    /// Neighbor counts are rebuilt from the live set under the new mode, and
    /// every cell whose count may have changed is marked dirty.
    pub fn set_wrap(&mut self, wrap: bool) {
        if wrap == self.wrap() {
            return;
        }
        self.topology = Topology::new(self.width, self.height, wrap);

        let previous = std::mem::take(&mut self.neighbor_counts);
        self.dirty.extend(previous.into_keys());
        for &pos in &self.live {
            for neighbor in self.topology.neighbors(pos) {
                *self.neighbor_counts.entry(neighbor).or_insert(0) += 1;
                self.dirty.insert(neighbor);
            }
            self.dirty.insert(pos);
        }
        info!(wrap, population = self.population(), "wrap mode changed");
    }

    /// Calls `callback` with every live cell, in no particular order, until
    /// it returns `true`.
    ///
    /// The world is borrowed for the whole traversal, so it cannot be
    /// mutated from within the callback.
    pub fn traverse(&self, mut callback: impl FnMut(Pos) -> bool) {
        for &pos in &self.live {
            if callback(pos) {
                return;
            }
        }
    }

    pub fn actives(&self) -> Vec<Pos> {
        self.live.iter().copied().collect()
    }
}

impl Board for World {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn wrap(&self) -> bool {
        self.wrap()
    }

    fn get(&self, pos: Pos) -> bool {
        self.get(pos)
    }

    fn actives(&self) -> Vec<Pos> {
        self.actives()
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
        return Err(Error::EmptyDimension { width, height });
    }
    Ok(())
}
