use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod tile;
mod types;

/// Everything the core needs to build a board. Pixel sizes, lives and other
/// presentation knobs live with the caller.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub min_hazards: CellCount,
    pub max_hazards: CellCount,
    pub collectibles: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(
        size: Coord2,
        min_hazards: CellCount,
        max_hazards: CellCount,
        collectibles: CellCount,
    ) -> Self {
        Self {
            size,
            min_hazards,
            max_hazards,
            collectibles,
        }
    }

    /// Normalizes degenerate values: zero-sized grids are bumped to 1x1 and
    /// an inverted hazard range is collapsed. Whether the hazards actually
    /// fit on the grid is checked at build time, not here.
    pub fn new(
        (size_x, size_y): Coord2,
        min_hazards: CellCount,
        max_hazards: CellCount,
        collectibles: CellCount,
    ) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let max_hazards = max_hazards.min(mult(size_x, size_y));
        let min_hazards = min_hazards.min(max_hazards);
        Self::new_unchecked((size_x, size_y), min_hazards, max_hazards, collectibles)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Finalized hazard positions for one board. The mask is immutable once the
/// layout leaves the generator.
#[derive(Clone, Debug, PartialEq)]
pub struct HazardLayout {
    hazard_mask: Array2<bool>,
    hazard_count: CellCount,
}

impl HazardLayout {
    pub fn from_hazard_mask(hazard_mask: Array2<bool>) -> Self {
        let hazard_count = hazard_mask
            .iter()
            .filter(|&&is_hazard| is_hazard)
            .count()
            .try_into()
            .expect("cell count should fit CellCount");
        Self {
            hazard_mask,
            hazard_count,
        }
    }

    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in hazard_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            hazard_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_hazard_mask(hazard_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.hazard_mask.dim();
        (
            dim.0.try_into().expect("axis should fit Coord"),
            dim.1.try_into().expect("axis should fit Coord"),
        )
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.hazard_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.hazard_mask
            .len()
            .try_into()
            .expect("cell count should fit CellCount")
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn contains_hazard(&self, coords: Coord2) -> bool {
        self.hazard_mask[coords.to_nd_index()]
    }

    pub fn adjacent_hazard_count(&self, coords: Coord2) -> u8 {
        self.hazard_mask
            .iter_neighbors(coords)
            .filter(|&pos| self.contains_hazard(pos))
            .count()
            .try_into()
            .expect("neighbor count should fit u8")
    }

    /// Whether the non-hazard region forms a single 4-connected component.
    ///
    /// Walks orthogonally from the first safe tile and compares the visited
    /// count against the safe-cell total. A board full of hazards is
    /// trivially connected.
    pub fn is_fully_connected(&self) -> bool {
        use std::collections::VecDeque;

        let Some(seed) = self.first_safe_tile() else {
            return true;
        };

        let mut visited: hashbrown::HashSet<Coord2> = hashbrown::HashSet::new();
        visited.insert(seed);
        let mut to_visit = VecDeque::from([seed]);

        while let Some(coords) = to_visit.pop_front() {
            for pos in self.hazard_mask.iter_cardinal(coords) {
                if !self.contains_hazard(pos) && visited.insert(pos) {
                    to_visit.push_back(pos);
                }
            }
        }

        visited.len() == usize::from(self.safe_cell_count())
    }

    fn first_safe_tile(&self) -> Option<Coord2> {
        let (x_end, y_end) = self.size();
        for x in 0..x_end {
            for y in 0..y_end {
                if !self.contains_hazard((x, y)) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.hazard_mask.iter_neighbors(coords)
    }

    pub(crate) fn iter_cardinal(&self, coords: Coord2) -> CardinalIter {
        self.hazard_mask.iter_cardinal(coords)
    }
}
