/// One grid cell of the playing field. Its position is its index in the
/// board grid and is not duplicated here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    hazard: bool,
    collectible: bool,
    revealed: bool,
    adjacent_hazards: Option<u8>,
}

impl Tile {
    pub(crate) const fn new(hazard: bool) -> Self {
        Self {
            hazard,
            collectible: false,
            revealed: false,
            adjacent_hazards: None,
        }
    }

    pub const fn is_hazard(self) -> bool {
        self.hazard
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn has_collectible(self) -> bool {
        self.collectible
    }

    /// Number of hazards among the 8-neighbors, `None` when there are none.
    /// A hazard tile carries a count like any other, but the reveal rule
    /// never consults it.
    pub const fn adjacent_hazard_count(self) -> Option<u8> {
        self.adjacent_hazards
    }

    // `revealed` is monotonic: there is deliberately no way to hide a tile
    // again.
    pub(crate) fn mark_revealed(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn place_collectible(&mut self) {
        self.collectible = true;
    }

    pub(crate) fn clear_collectible(&mut self) {
        self.collectible = false;
    }

    pub(crate) fn set_adjacent_hazards(&mut self, count: u8) {
        debug_assert!(count <= 8);
        self.adjacent_hazards = if count == 0 { None } else { Some(count) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_adjacency_is_stored_as_absent() {
        let mut tile = Tile::new(false);

        tile.set_adjacent_hazards(0);
        assert_eq!(tile.adjacent_hazard_count(), None);

        tile.set_adjacent_hazards(3);
        assert_eq!(tile.adjacent_hazard_count(), Some(3));
    }
}
