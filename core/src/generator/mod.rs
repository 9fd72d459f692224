use hashbrown::HashSet;

use crate::*;
pub use random::*;

mod random;

/// Strategy producing the hazard positions for a fresh board.
///
/// Implementations must return exactly `count` distinct in-bounds hazards,
/// none of them inside `excluded`, and must leave the non-hazard region
/// 4-connected.
pub trait HazardGenerator {
    fn place(
        &mut self,
        count: CellCount,
        size: Coord2,
        excluded: &HashSet<Coord2>,
    ) -> Result<HazardLayout>;
}
