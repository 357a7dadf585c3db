use std::{fs, path::PathBuf, time::Duration};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::{seed::fill_random, Pattern, Result, World};

const DEFAULT_PATTERN: &str = "r-pentomino";

#[derive(Debug, Parser)]
#[command(
    name = "golrs",
    version,
    about = "a TUI for vizualising an incremental game of life engine."
)]
pub struct Config {
    /// Width of the world in cells
    #[arg(long, default_value_t = 64)]
    pub width: u32,

    /// Height of the world in cells
    #[arg(long, default_value_t = 32)]
    pub height: u32,

    /// Join opposite edges of the world
    #[arg(long)]
    pub wrap: bool,

    /// Milliseconds between generations
    #[arg(long, default_value_t = 200)]
    pub tick_ms: u64,

    /// Plaintext pattern file to load, centered in the world
    #[arg(short, long, conflicts_with = "builtin")]
    pub pattern: Option<PathBuf>,

    /// Built-in pattern: glider, block, blinker, r-pentomino, gosper-gun
    #[arg(short, long)]
    pub builtin: Option<String>,

    /// Fill the world randomly with this density instead of a pattern
    #[arg(short, long, conflicts_with_all = ["pattern", "builtin"])]
    pub random: Option<f64>,

    /// Seed for the random fill
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,

    /// Step without a terminal UI and print a summary
    #[arg(long)]
    pub headless: bool,

    /// Number of generations to step in headless mode
    #[arg(short, long, default_value_t = 100)]
    pub generations: u64,

    /// Cross-check every generation against a full rescan (headless only)
    #[arg(long, requires = "headless")]
    pub verify: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn log_filter(&self) -> &'static str {
        match (self.verbose, self.headless) {
            (true, _) => "debug",
            (false, true) => "info",
            (false, false) => "warn",
        }
    }

    /// creates the world and populates it from the pattern, builtin or random fill.
    pub fn build_world(&self) -> Result<World> {
        let mut world = World::with_wrap(self.width, self.height, self.wrap)?;

        if let Some(density) = self.random {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let spawned = fill_random(&mut world, density, &mut rng)?;
            info!(density, spawned, "filled world randomly");
            return Ok(world);
        }

        let pattern = match (&self.pattern, &self.builtin) {
            (Some(path), _) => Pattern::parse(&fs::read_to_string(path)?)?,
            (None, Some(name)) => Pattern::builtin(name)?,
            (None, None) => Pattern::builtin(DEFAULT_PATTERN)?,
        };
        let origin = pattern.centered_in(&world);
        let spawned = pattern.place(&mut world, origin);
        info!(
            spawned,
            clipped = pattern.cells().len() - spawned,
            "placed pattern"
        );
        Ok(world)
    }
}
