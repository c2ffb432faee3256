//! Error types
//!
//! Gameplay outcomes (a dropped ball, an expired timer) are state transitions,
//! not errors. This enum only covers broken configuration and misuse of the
//! session entry points.

use std::fmt;

use crate::tuning::{Difficulty, Theme};

#[derive(Debug)]
pub enum GameError {
    /// Tuning or settings JSON could not be parsed
    Parse(serde_json::Error),
    /// A difficulty is missing a level descriptor
    MissingLevel { difficulty: Difficulty, level: usize },
    /// A theme is missing a layout pattern for a level
    MissingPattern { theme: Theme, level: usize },
    /// A level descriptor has zero rows or columns
    EmptyGrid { difficulty: Difficulty, level: usize },
    /// A level descriptor's ball would never move vertically
    StalledBall { difficulty: Difficulty, level: usize },
    /// `start_game` was called before a theme was picked
    ThemeNotSelected,
    /// Level index outside the table
    LevelOutOfRange(usize),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Parse(e) => write!(f, "invalid configuration: {e}"),
            GameError::MissingLevel { difficulty, level } => {
                write!(f, "no level {level} defined for {difficulty} difficulty")
            }
            GameError::MissingPattern { theme, level } => {
                write!(f, "theme {theme} has no brick pattern for level {level}")
            }
            GameError::EmptyGrid { difficulty, level } => {
                write!(f, "{difficulty} level {level} has an empty brick grid")
            }
            GameError::StalledBall { difficulty, level } => {
                write!(f, "{difficulty} level {level} has no vertical ball speed")
            }
            GameError::ThemeNotSelected => write!(f, "a theme must be selected before starting"),
            GameError::LevelOutOfRange(level) => write!(f, "level index {level} is out of range"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Parse(e)
    }
}
