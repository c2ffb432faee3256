//! Data-driven game balance
//!
//! The level table (grid size and ball speed per difficulty) and the theme
//! layout patterns. The built-in defaults can be overridden from JSON; either
//! way the table is validated once at startup and a broken table refuses to
//! start the game.

use std::collections::BTreeMap;
use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_TIME_SECS, LEVELS_PER_DIFFICULTY, STARTING_LIVES};
use crate::error::GameError;

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Highest durability a freshly placed brick can roll
    pub fn max_durability(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual themes; each picks its own brick layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    NightSky,
    Forest,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::NightSky, Theme::Forest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::NightSky => "nightSky",
            Theme::Forest => "forest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nightsky" | "night" | "night_sky" => Some(Theme::NightSky),
            "forest" => Some(Theme::Forest),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which grid cells receive a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRule {
    /// Every cell
    Full,
    /// `(row + col) % 2 == 0`
    Checkerboard,
    /// Every other row
    EvenRows,
    /// Every other column
    EvenColumns,
    /// `(row + col) % 3 == 0`
    Diagonal,
    /// Even row and even column
    Lattice,
}

impl PatternRule {
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match self {
            PatternRule::Full => true,
            PatternRule::Checkerboard => (row + col) % 2 == 0,
            PatternRule::EvenRows => row % 2 == 0,
            PatternRule::EvenColumns => col % 2 == 0,
            PatternRule::Diagonal => (row + col) % 3 == 0,
            PatternRule::Lattice => row % 2 == 0 && col % 2 == 0,
        }
    }
}

/// Grid size and starting ball velocity for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub rows: usize,
    pub columns: usize,
    /// Pixels per frame; negative y launches upward
    pub speed: IVec2,
}

impl LevelDescriptor {
    pub const fn new(rows: usize, columns: usize, dx: i32, dy: i32) -> Self {
        Self {
            rows,
            columns,
            speed: IVec2::new(dx, dy),
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub levels: BTreeMap<Difficulty, Vec<LevelDescriptor>>,
    pub patterns: BTreeMap<Theme, Vec<PatternRule>>,
    pub starting_lives: u32,
    pub level_time_secs: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        let levels = BTreeMap::from([
            (
                Difficulty::Easy,
                vec![
                    LevelDescriptor::new(3, 5, 2, -2),
                    LevelDescriptor::new(4, 6, 2, -2),
                    LevelDescriptor::new(5, 7, 2, -2),
                ],
            ),
            (
                Difficulty::Medium,
                vec![
                    LevelDescriptor::new(4, 6, 3, -3),
                    LevelDescriptor::new(5, 7, 3, -3),
                    LevelDescriptor::new(6, 8, 3, -3),
                ],
            ),
            (
                Difficulty::Hard,
                vec![
                    LevelDescriptor::new(5, 7, 4, -4),
                    LevelDescriptor::new(6, 8, 4, -4),
                    LevelDescriptor::new(7, 9, 4, -4),
                ],
            ),
        ]);

        let patterns = BTreeMap::from([
            (
                Theme::NightSky,
                vec![PatternRule::Full, PatternRule::Checkerboard, PatternRule::EvenRows],
            ),
            (
                Theme::Forest,
                vec![PatternRule::EvenColumns, PatternRule::Diagonal, PatternRule::Lattice],
            ),
        ]);

        Self {
            levels,
            patterns,
            starting_lives: STARTING_LIVES,
            level_time_secs: LEVEL_TIME_SECS,
        }
    }
}

impl Tuning {
    /// Parse a tuning override; fields left out fall back to the defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every difficulty/theme combination the menus can reach
    pub fn validate(&self) -> Result<(), GameError> {
        for difficulty in Difficulty::ALL {
            for level in 0..LEVELS_PER_DIFFICULTY {
                let desc = self.level(difficulty, level)?;
                if desc.rows == 0 || desc.columns == 0 {
                    return Err(GameError::EmptyGrid { difficulty, level });
                }
                if desc.speed.y == 0 {
                    return Err(GameError::StalledBall { difficulty, level });
                }
            }
        }
        for theme in Theme::ALL {
            for level in 0..LEVELS_PER_DIFFICULTY {
                self.pattern(theme, level)?;
            }
        }
        Ok(())
    }

    pub fn level(
        &self,
        difficulty: Difficulty,
        level: usize,
    ) -> Result<LevelDescriptor, GameError> {
        self.levels
            .get(&difficulty)
            .and_then(|levels| levels.get(level))
            .copied()
            .ok_or(GameError::MissingLevel { difficulty, level })
    }

    pub fn pattern(&self, theme: Theme, level: usize) -> Result<PatternRule, GameError> {
        self.patterns
            .get(&theme)
            .and_then(|rules| rules.get(level))
            .copied()
            .ok_or(GameError::MissingPattern { theme, level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        let easy0 = tuning.level(Difficulty::Easy, 0).unwrap();
        assert_eq!((easy0.rows, easy0.columns), (3, 5));
        assert_eq!(easy0.speed, IVec2::new(2, -2));
        let hard2 = tuning.level(Difficulty::Hard, 2).unwrap();
        assert_eq!((hard2.rows, hard2.columns), (7, 9));
    }

    #[test]
    fn test_pattern_rules() {
        assert!(PatternRule::Full.contains(4, 7));
        assert!(PatternRule::Checkerboard.contains(1, 1));
        assert!(!PatternRule::Checkerboard.contains(1, 2));
        assert!(PatternRule::EvenRows.contains(2, 5));
        assert!(!PatternRule::EvenRows.contains(3, 0));
        assert!(PatternRule::EvenColumns.contains(3, 0));
        assert!(PatternRule::Diagonal.contains(1, 2));
        assert!(!PatternRule::Diagonal.contains(1, 1));
        assert!(PatternRule::Lattice.contains(2, 4));
        assert!(!PatternRule::Lattice.contains(2, 3));
    }

    #[test]
    fn test_missing_pattern_is_rejected() {
        let json = r#"{
            "patterns": {
                "nightSky": ["full", "checkerboard"],
                "forest": ["full", "full", "full"]
            }
        }"#;
        match Tuning::from_json(json) {
            Err(GameError::MissingPattern { theme, level }) => {
                assert_eq!(theme, Theme::NightSky);
                assert_eq!(level, 2);
            }
            other => panic!("expected missing pattern, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "level_time_secs": 60 }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.level_time_secs, 60);
        assert_eq!(tuning.starting_lives, STARTING_LIVES);
        assert_eq!(tuning.level(Difficulty::Medium, 1).unwrap().columns, 7);
    }

    #[test]
    fn test_stalled_ball_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.levels.get_mut(&Difficulty::Medium).unwrap()[1].speed = IVec2::new(3, 0);
        assert!(matches!(
            tuning.validate(),
            Err(GameError::StalledBall { difficulty: Difficulty::Medium, level: 1 })
        ));
    }

    #[test]
    fn test_garbage_json_is_parse_error() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(GameError::Parse(_))));
    }

    #[test]
    fn test_names_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::parse(d.as_str()), Some(d));
        }
        for t in Theme::ALL {
            assert_eq!(Theme::parse(t.as_str()), Some(t));
        }
    }
}
