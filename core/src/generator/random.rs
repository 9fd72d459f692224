use hashbrown::HashSet;
use ndarray::Array2;
use rand::Rng;

use super::*;

/// Upper bound on full-placement regenerations before the configuration is
/// reported as infeasible.
const MAX_ATTEMPTS: u32 = 128;

/// Draws hazard positions uniformly from the unexcluded area, regenerating
/// the whole placement until the safe region comes out 4-connected.
#[derive(Clone, Debug)]
pub struct RandomHazardGenerator<R> {
    rng: R,
}

impl<R: Rng> RandomHazardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    fn place_once(
        &mut self,
        count: CellCount,
        size: Coord2,
        excluded: &HashSet<Coord2>,
    ) -> HazardLayout {
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut placed = 0;

        while placed < count {
            let coords = (
                self.rng.random_range(0..size.0),
                self.rng.random_range(0..size.1),
            );
            if excluded.contains(&coords) || hazard_mask[coords.to_nd_index()] {
                continue;
            }
            hazard_mask[coords.to_nd_index()] = true;
            placed += 1;
        }

        HazardLayout::from_hazard_mask(hazard_mask)
    }
}

impl<R: Rng> HazardGenerator for RandomHazardGenerator<R> {
    fn place(
        &mut self,
        count: CellCount,
        size: Coord2,
        excluded: &HashSet<Coord2>,
    ) -> Result<HazardLayout> {
        let free = free_cell_count(size, excluded);
        if count > free {
            return Err(GameError::Configuration {
                hazards: count,
                free,
            });
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let layout = self.place_once(count, size, excluded);
            if layout.is_fully_connected() {
                return Ok(layout);
            }
            log::debug!("placement attempt {attempt} left the safe region disconnected");
        }

        log::warn!(
            "no connected placement found for {count} hazards on a {}x{} grid after {MAX_ATTEMPTS} attempts",
            size.0,
            size.1
        );
        Err(GameError::Configuration {
            hazards: count,
            free,
        })
    }
}

/// Cells available to the generator: in bounds and not excluded.
fn free_cell_count(size: Coord2, excluded: &HashSet<Coord2>) -> CellCount {
    let in_bounds = excluded
        .iter()
        .filter(|&&(x, y)| x < size.0 && y < size.1)
        .count() as CellCount;
    mult(size.0, size.1) - in_bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn generator(seed: u64) -> RandomHazardGenerator<SmallRng> {
        RandomHazardGenerator::new(SmallRng::seed_from_u64(seed))
    }

    fn excluded_zone(center: Coord2, size: Coord2) -> HashSet<Coord2> {
        let mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut zone: HashSet<Coord2> = mask.iter_neighbors(center).collect();
        zone.insert(center);
        zone
    }

    #[test]
    fn places_exact_count_outside_excluded_zone() {
        let excluded = excluded_zone((0, 0), (8, 8));
        let layout = generator(7)
            .place(10, (8, 8), &excluded)
            .unwrap();

        assert_eq!(layout.hazard_count(), 10);
        for coords in &excluded {
            assert!(!layout.contains_hazard(*coords));
        }
    }

    #[test]
    fn placement_keeps_safe_region_connected() {
        let excluded = excluded_zone((4, 4), (9, 9));

        for seed in 0..20 {
            let layout = generator(seed)
                .place(25, (9, 9), &excluded)
                .unwrap();
            assert!(layout.is_fully_connected(), "seed {seed} disconnected");
        }
    }

    #[test]
    fn rejects_count_larger_than_free_area() {
        let excluded = excluded_zone((0, 0), (3, 3));

        let result = generator(1).place(6, (3, 3), &excluded);

        assert_eq!(
            result,
            Err(GameError::Configuration { hazards: 6, free: 5 })
        );
    }

    #[test]
    fn fully_excluded_grid_fails_instead_of_spinning() {
        // The excluded zone covers all nine tiles of the 3x3 grid.
        let excluded = excluded_zone((1, 1), (3, 3));

        let result = generator(1).place(1, (3, 3), &excluded);

        assert_eq!(
            result,
            Err(GameError::Configuration { hazards: 1, free: 0 })
        );
    }

    #[test]
    fn out_of_bounds_exclusions_do_not_shrink_the_free_area() {
        let excluded: HashSet<Coord2> = HashSet::from_iter([(200, 200)]);

        let layout = generator(3).place(2, (4, 4), &excluded).unwrap();

        assert_eq!(layout.hazard_count(), 2);
    }

    #[test]
    fn zero_hazards_is_a_valid_placement() {
        let layout = generator(5).place(0, (4, 4), &HashSet::new()).unwrap();

        assert_eq!(layout.hazard_count(), 0);
        assert!(layout.is_fully_connected());
    }
}
