use rand::Rng;

use crate::{pos, Error, Result, World};

/// spawns every cell of the world with probability `density`, returns how many were spawned.
pub fn fill_random(world: &mut World, density: f64, rng: &mut impl Rng) -> Result<usize> {
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::InvalidDensity(density));
    }
    let mut spawned = 0;
    for y in 0..world.height() as i32 {
        for x in 0..world.width() as i32 {
            if rng.random_bool(density) && world.spawn(pos!(x, y)) {
                spawned += 1;
            }
        }
    }
    Ok(spawned)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn density_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new(8, 8).unwrap();
        assert_eq!(fill_random(&mut world, 0.0, &mut rng).unwrap(), 0);
        assert_eq!(fill_random(&mut world, 1.0, &mut rng).unwrap(), 64);
        assert_eq!(world.population(), 64);
        assert!(matches!(
            fill_random(&mut world, 1.5, &mut rng),
            Err(Error::InvalidDensity(_))
        ));
        assert!(fill_random(&mut world, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn seeded_fill_is_reproducible() {
        let fill = |seed| {
            let mut world = World::new(16, 16).unwrap();
            fill_random(&mut world, 0.3, &mut StdRng::seed_from_u64(seed)).unwrap();
            let mut actives = world.actives();
            actives.sort();
            actives
        };
        assert_eq!(fill(9), fill(9));
    }
}
