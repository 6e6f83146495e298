use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Static parameters of one level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    /// Side length of the square board.
    pub grid: Coord,
    /// Straight pieces handed out, each vertical or horizontal at random.
    pub straights: CellCount,
    /// Corner pieces handed out, each in a random orientation.
    pub corners: CellCount,
    /// Move budget for one attempt.
    pub moves: CellCount,
    pub blocked: CellCount,
}

impl LevelConfig {
    pub fn new(name: &str, grid: Coord, straights: CellCount, corners: CellCount, moves: CellCount, blocked: CellCount) -> Self {
        Self {
            name: name.to_string(),
            grid,
            straights,
            corners,
            moves,
            blocked,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid, self.grid)
    }

    pub const fn total_pieces(&self) -> CellCount {
        self.straights.saturating_add(self.corners)
    }

    fn validate(&self) -> core::result::Result<(), &'static str> {
        if self.grid < 2 {
            return Err("grid must be at least 2");
        }
        if self.blocked > self.total_cells() - 2 {
            return Err("more blocked cells than free cells");
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed level catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Level catalog has no levels")]
    Empty,
    #[error("Level {index} is invalid: {reason}")]
    InvalidLevel { index: usize, reason: &'static str },
}

/// Ordered, non-empty list of levels played one after another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelConfig>", into = "Vec<LevelConfig>")]
pub struct LevelCatalog {
    levels: Vec<LevelConfig>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelConfig>) -> core::result::Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            level
                .validate()
                .map_err(|reason| CatalogError::InvalidLevel { index, reason })?;
        }
        Ok(Self { levels })
    }

    /// Parses a JSON array of levels.
    pub fn from_json(json: &str) -> core::result::Result<Self, CatalogError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn get(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self {
            levels: Vec::from([
                LevelConfig::new("Beginner", 5, 6, 4, 20, 0),
                LevelConfig::new("Easy", 6, 7, 5, 18, 2),
                LevelConfig::new("Medium", 7, 8, 6, 16, 4),
                LevelConfig::new("Hard", 7, 9, 7, 14, 6),
                LevelConfig::new("Expert", 8, 10, 8, 12, 8),
                LevelConfig::new("Master", 8, 11, 9, 10, 10),
                LevelConfig::new("Legend", 9, 12, 10, 8, 12),
            ]),
        }
    }
}

impl TryFrom<Vec<LevelConfig>> for LevelCatalog {
    type Error = CatalogError;

    fn try_from(levels: Vec<LevelConfig>) -> core::result::Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<LevelCatalog> for Vec<LevelConfig> {
    fn from(catalog: LevelCatalog) -> Self {
        catalog.levels
    }
}

/// Points and stars awarded when a level is completed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Flat bonus for finishing a level.
    pub level_bonus: u32,
    /// Extra points for every move left over.
    pub move_bonus: u32,
    /// Percent of the move budget that must be left for three stars.
    pub three_star_percent: u8,
    /// Percent of the move budget that must be left for two stars.
    pub two_star_percent: u8,
}

impl ScoringRules {
    pub fn score(&self, moves_left: CellCount) -> u32 {
        self.level_bonus
            .saturating_add(self.move_bonus.saturating_mul(moves_left.into()))
    }

    /// One to three stars depending on how much of the budget was left.
    pub fn stars(&self, moves_left: CellCount, budget: CellCount) -> u8 {
        if budget == 0 {
            return 1;
        }
        let percent_left = u32::from(moves_left) * 100 / u32::from(budget);
        if percent_left >= self.three_star_percent.into() {
            3
        } else if percent_left >= self.two_star_percent.into() {
            2
        } else {
            1
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            level_bonus: 100,
            move_bonus: 10,
            three_star_percent: 50,
            two_star_percent: 25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = LevelCatalog::default();

        assert_eq!(catalog.len(), 7);
        assert_eq!(LevelCatalog::new(catalog.levels().to_vec()).map(|c| c.len()).ok(), Some(7));
        assert_eq!(catalog.get(0).map(|level| level.grid), Some(5));
        assert_eq!(catalog.get(6).map(|level| level.name.as_str()), Some("Legend"));
        assert!(catalog.get(7).is_none());
    }

    #[test]
    fn parses_json_catalog() {
        let json = r#"[
            {"name": "Tiny", "grid": 2, "straights": 1, "corners": 1, "moves": 3, "blocked": 0},
            {"name": "Small", "grid": 4, "straights": 3, "corners": 2, "moves": 6, "blocked": 2}
        ]"#;

        let catalog = LevelCatalog::from_json(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1), Some(&LevelConfig::new("Small", 4, 3, 2, 6, 2)));
    }

    #[test]
    fn rejects_invalid_catalogs() {
        assert!(matches!(LevelCatalog::from_json("[]"), Err(CatalogError::Empty)));
        assert!(matches!(LevelCatalog::from_json("{"), Err(CatalogError::Parse(_))));

        let crowded = r#"[{"name": "X", "grid": 3, "straights": 1, "corners": 1, "moves": 3, "blocked": 8}]"#;
        assert!(matches!(
            LevelCatalog::from_json(crowded),
            Err(CatalogError::InvalidLevel { index: 0, .. })
        ));

        let tiny = LevelConfig::new("X", 1, 0, 0, 1, 0);
        let valid = LevelConfig::new("Y", 3, 1, 1, 3, 0);
        assert!(matches!(
            LevelCatalog::new(Vec::from([valid, tiny])),
            Err(CatalogError::InvalidLevel { index: 1, .. })
        ));
    }

    #[test]
    fn scoring_rewards_leftover_moves() {
        let rules = ScoringRules::default();

        assert_eq!(rules.score(0), 100);
        assert_eq!(rules.score(7), 170);
        assert_eq!(rules.stars(10, 20), 3);
        assert_eq!(rules.stars(5, 20), 2);
        assert_eq!(rules.stars(4, 20), 1);
        assert_eq!(rules.stars(0, 0), 1);
    }
}
