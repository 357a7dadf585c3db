use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use golrs::{
    rescan::{self, RescanGrid},
    Config, Sim, View, World,
};

fn run_headless(mut world: World, config: &Config) -> anyhow::Result<()> {
    for _ in 0..config.generations {
        if config.verify {
            let current = RescanGrid::from_board(&world);
            let mut expected = current.clone();
            rescan::advance(&current, &mut expected)?;
            world.step();
            let mismatches = rescan::diff(&world, &expected)?;
            if !mismatches.is_empty() {
                warn!(generation = world.generation(), ?mismatches, "rescan mismatch");
                bail!(
                    "generation {} differs from a full rescan at {} cells",
                    world.generation(),
                    mismatches.len()
                );
            }
        } else {
            world.step();
        }
    }
    info!(
        generation = world.generation(),
        population = world.population(),
        verified = config.verify,
        "done"
    );
    println!(
        "generation {}: population {} on {}x{}{}",
        world.generation(),
        world.population(),
        world.width(),
        world.height(),
        if world.wrap() { " (torus)" } else { "" }
    );
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let world = config
        .build_world()
        .context("failed to set up the initial world")?;

    if config.headless {
        return run_headless(world, &config);
    }

    let simulation = Sim::spawn(world, config.tick());
    let view = View::spawn(simulation.handle());

    view.join().context("terminal view failed")?;
    simulation.join();
    Ok(())
}
