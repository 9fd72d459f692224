use std::collections::{BTreeSet, VecDeque};

use hashbrown::HashSet;
use ndarray::Array2;
use rand::Rng;
use rand::seq::IndexedRandom;
use smallvec::SmallVec;

use crate::*;

/// One playable board: the tile grid, the finalized hazard layout, and the
/// coordinates still carrying a collectible.
///
/// Built once per session via [`build_board`] (or [`Board::generate`] with a
/// caller-supplied RNG) and replaced wholesale on restart.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    tiles: Array2<Tile>,
    layout: HazardLayout,
    start: Coord2,
    collectibles: BTreeSet<Coord2>,
    revealed_count: CellCount,
}

/// Single entry point for collaborators: builds a fresh board from the
/// configuration using thread-local randomness.
pub fn build_board(config: GameConfig) -> Result<Board> {
    Board::generate(config, &mut rand::rng())
}

impl Board {
    /// Builds a board in the fixed sequence: start tile, excluded pocket,
    /// hazard placement, tile grid, collectible placement over the
    /// reachable region, adjacency stamping, initial reveal.
    pub fn generate<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let size = config.size;
        let hazards = if config.min_hazards == config.max_hazards {
            config.min_hazards
        } else {
            rng.random_range(config.min_hazards..=config.max_hazards)
        };

        let start = (
            rng.random_range(0..size.0),
            rng.random_range(0..size.1),
        );
        let excluded: HashSet<Coord2> = excluded_zone(start, size).into_iter().collect();

        let mut generator = RandomHazardGenerator::new(&mut *rng);
        let layout = generator.place(hazards, size, &excluded)?;

        let mut board = Self::from_layout(layout, start)?;
        board.place_collectibles(config.collectibles, rng);
        board.stamp_adjacency();

        let opened = board.reveal(start)?;
        log::debug!(
            "built {}x{} board: {hazards} hazards, start {start:?}, {opened} tiles opened",
            size.0,
            size.1
        );

        Ok(board)
    }

    /// Wraps an already-finalized hazard layout into an unrevealed board.
    /// Adjacency counts are not stamped yet; stamping happens after
    /// collectible placement in the build sequence.
    pub fn from_layout(layout: HazardLayout, start: Coord2) -> Result<Self> {
        let start = layout.validate_coords(start)?;
        let size = layout.size();

        let mut tiles: Array2<Tile> = Array2::default(size.to_nd_index());
        for ((x, y), tile) in tiles.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            *tile = Tile::new(layout.contains_hazard(coords));
        }

        Ok(Self {
            tiles,
            layout,
            start,
            collectibles: BTreeSet::new(),
            revealed_count: 0,
        })
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn hazard_count(&self) -> CellCount {
        self.layout.hazard_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn collectibles_remaining(&self) -> CellCount {
        self.collectibles.len() as CellCount
    }

    pub fn collectible_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.collectibles.iter().copied()
    }

    pub fn tile(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    /// Reveals the tile at `coords` and flood-fills outward across
    /// zero-adjacency tiles, returning how many tiles went from hidden to
    /// revealed in this call.
    ///
    /// Revealing a hazard uncovers only that tile and returns 0; deciding
    /// loss of life from that is the caller's business. Numbered tiles are
    /// revealed but never propagate. Repeat calls are no-ops.
    pub fn reveal(&mut self, coords: Coord2) -> Result<CellCount> {
        let coords = self.layout.validate_coords(coords)?;

        if self.tiles[coords.to_nd_index()].is_revealed() {
            return Ok(0);
        }

        if self.layout.contains_hazard(coords) {
            self.tiles[coords.to_nd_index()].mark_revealed();
            return Ok(0);
        }

        // Explicit worklist; the fill may span the whole grid and must not
        // recurse.
        let mut opened = 0;
        let mut visited: HashSet<Coord2> = HashSet::new();
        let mut to_visit = VecDeque::from([coords]);
        visited.insert(coords);

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.layout.contains_hazard(visit_coords) {
                continue;
            }

            let tile = &mut self.tiles[visit_coords.to_nd_index()];
            if !tile.is_revealed() {
                tile.mark_revealed();
                opened += 1;
            }

            // Numbered tiles border a hazard and terminate the fill.
            if self.tiles[visit_coords.to_nd_index()]
                .adjacent_hazard_count()
                .is_some()
            {
                continue;
            }

            for pos in self.layout.iter_neighbors(visit_coords) {
                if visited.insert(pos) {
                    to_visit.push_back(pos);
                }
            }
        }

        self.revealed_count += opened;
        Ok(opened)
    }

    /// Every coordinate reachable from `coords` by orthogonal moves that
    /// never enter a hazard tile, excluding `coords` itself.
    ///
    /// This is the movement-adjacency rule, deliberately distinct from the
    /// 8-neighbor reveal fill; the builder uses it as the candidate pool
    /// for collectibles.
    pub fn reachable_from(&self, coords: Coord2) -> Result<BTreeSet<Coord2>> {
        let coords = self.layout.validate_coords(coords)?;

        let mut visited = BTreeSet::new();
        if self.layout.contains_hazard(coords) {
            return Ok(visited);
        }

        visited.insert(coords);
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.layout.iter_cardinal(visit_coords) {
                if !self.layout.contains_hazard(pos) && visited.insert(pos) {
                    to_visit.push_back(pos);
                }
            }
        }

        visited.remove(&coords);
        Ok(visited)
    }

    /// Removes the collectible at `coords`, if any, returning whether one
    /// was actually picked up.
    pub fn take_collectible(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.layout.validate_coords(coords)?;

        if !self.collectibles.remove(&coords) {
            return Ok(false);
        }

        self.tiles[coords.to_nd_index()].clear_collectible();
        Ok(true)
    }

    fn place_collectibles<R: Rng>(&mut self, requested: CellCount, rng: &mut R) {
        let candidates: Vec<Coord2> = self
            .reachable_from(self.start)
            .expect("start was validated at construction")
            .into_iter()
            .collect();

        if candidates.len() < usize::from(requested) {
            log::warn!(
                "only {} reachable tiles for {requested} collectibles, placing fewer",
                candidates.len()
            );
        }

        let chosen: Vec<Coord2> = candidates
            .choose_multiple(rng, usize::from(requested))
            .copied()
            .collect();
        for coords in chosen {
            self.tiles[coords.to_nd_index()].place_collectible();
            self.collectibles.insert(coords);
        }
    }

    fn stamp_adjacency(&mut self) {
        let (x_end, y_end) = self.size();
        for x in 0..x_end {
            for y in 0..y_end {
                let count = self.layout.adjacent_hazard_count((x, y));
                self.tiles[(x, y).to_nd_index()].set_adjacent_hazards(count);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn stamp_adjacency_for_tests(&mut self) {
        self.stamp_adjacency();
    }
}

/// The start tile plus its in-bounds 8-neighbors; hazards never land here,
/// so the first reveal always opens a pocket.
pub fn excluded_zone(start: Coord2, size: Coord2) -> SmallVec<[Coord2; 9]> {
    let mut zone: SmallVec<[Coord2; 9]> = NeighborIter::new(start, size).collect();
    zone.push(start);
    zone
}
