use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Generation strategy that blocks random cells and hands out pieces in random orientations, all drawn from one
/// seeded source so a seed always replays the same sequence of levels.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLevelGenerator {
    rng: SmallRng,
}

impl RandomLevelGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl LevelGenerator for RandomLevelGenerator {
    fn generate(&mut self, level: &LevelConfig) -> Result<PlayEngine> {
        let board = Board::generate(level.grid, level.blocked, &mut self.rng)?;
        let inventory = random_inventory(level, &mut self.rng);
        log::debug!(
            "Generated level {:?}: {} pieces, {} moves",
            level.name,
            level.total_pieces(),
            level.moves
        );
        Ok(PlayEngine::new(board, inventory, level.moves))
    }
}

/// Straights first, then corners, each in a uniformly random orientation.
pub fn random_inventory<R: Rng + ?Sized>(level: &LevelConfig, rng: &mut R) -> Inventory {
    let mut inventory = Inventory::new();
    for _ in 0..level.straights {
        inventory.add(PipeType::STRAIGHTS[rng.random_range(0..PipeType::STRAIGHTS.len())]);
    }
    for _ in 0..level.corners {
        inventory.add(PipeType::CORNERS[rng.random_range(0..PipeType::CORNERS.len())]);
    }
    inventory
}
