use crate::*;
pub use random::*;

mod random;

/// Builds the board and hands out the pieces for a level attempt.
pub trait LevelGenerator {
    fn generate(&mut self, level: &LevelConfig) -> Result<PlayEngine>;
}
