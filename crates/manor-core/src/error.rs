//! Error types for the manor engine
//!
//! Every engine error is recoverable: a failed call leaves the grid, the deck
//! and the engine state exactly as they were.

use thiserror::Error;

use crate::manor::{LockLevel, Pos};

/// Errors returned by engine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManorError {
    #[error("no cell beyond the manor wall")]
    OutOfBounds,

    #[error("the current room has no door on that side")]
    NoDoor,

    #[error("door is locked (level {0})")]
    Locked(LockLevel),

    #[error("no room in the deck fits at {0}")]
    NoValidRoom(Pos),

    #[error("not enough gems: {needed} needed")]
    InsufficientGems { needed: u32 },

    #[error("no valid orientation remains at {0}")]
    PlacementExhausted(Pos),

    #[error("a draft is in progress")]
    NotRoaming,

    #[error("no draft is in progress")]
    NotDrafting,

    #[error("no candidate #{index} (draft has {available})")]
    InvalidChoice { index: usize, available: usize },

    #[error("the game is over")]
    GameOver,
}

/// Errors raised while building a room catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog has no room named '{0}'")]
    MissingAnchor(String),

    #[error("entrance and goal must be different rooms ('{0}')")]
    SameAnchor(String),

    #[error("catalog has more than one room named '{0}'")]
    DuplicateAnchor(String),

    #[error("room #{0} has an empty name")]
    EmptyName(usize),

    #[error("could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by [`crate::EngineConfig::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 2x1, got {rows}x{cols}")]
    GridTooSmall { rows: usize, cols: usize },

    #[error("{which} position {pos} is outside a {rows}x{cols} grid")]
    AnchorOutOfBounds {
        which: &'static str,
        pos: Pos,
        rows: usize,
        cols: usize,
    },

    #[error("start and goal share the cell {0}")]
    AnchorsOverlap(Pos),

    #[error("start and goal must be on different rows")]
    AnchorsShareRow,

    #[error("max_candidates must be at least 1")]
    NoCandidates,

    #[error("lock curve weights are all zero")]
    EmptyLockCurve,

    #[error("could not parse config: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ManorError::Locked(LockLevel::Double).to_string(),
            "door is locked (level 2)"
        );
        assert_eq!(
            ManorError::NoValidRoom(Pos::new(7, 2)).to_string(),
            "no room in the deck fits at (7, 2)"
        );
        assert_eq!(
            ManorError::InvalidChoice {
                index: 3,
                available: 2
            }
            .to_string(),
            "no candidate #3 (draft has 2)"
        );
    }

    #[test]
    fn test_catalog_parse_error_wraps_serde() {
        let err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = CatalogError::from(err);
        assert!(err.to_string().starts_with("could not parse catalog"));
    }
}
