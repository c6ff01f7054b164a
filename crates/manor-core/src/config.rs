//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLS, DEFAULT_GOAL, DEFAULT_ROWS, DEFAULT_START};
use crate::error::ConfigError;
use crate::manor::{LockCurve, MAX_CANDIDATES, OrientationPolicy, Pos};

/// Tunables for one [`crate::ManorEngine`].
///
/// Every field has a default, so a JSON file only needs the ones it changes:
///
/// ```json
/// { "rows": 7, "cols": 5, "start": { "row": 6, "col": 2 }, "lock_curve": [2, 2, 1] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// Entrance cell, where the player starts
    pub start: Pos,
    /// Goal cell; reaching it wins
    pub goal: Pos,
    /// Candidates offered per draft
    pub max_candidates: usize,
    pub orientation_policy: OrientationPolicy,
    /// Lock weights for rows between the anchors
    pub lock_curve: LockCurve,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: DEFAULT_START,
            goal: DEFAULT_GOAL,
            max_candidates: MAX_CANDIDATES,
            orientation_policy: OrientationPolicy::default(),
            lock_curve: LockCurve::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (rows, cols) = (self.rows, self.cols);
        if rows < 2 || cols < 1 {
            return Err(ConfigError::GridTooSmall { rows, cols });
        }
        for (which, pos) in [("start", self.start), ("goal", self.goal)] {
            if pos.row >= rows || pos.col >= cols {
                return Err(ConfigError::AnchorOutOfBounds {
                    which,
                    pos,
                    rows,
                    cols,
                });
            }
        }
        if self.start == self.goal {
            return Err(ConfigError::AnchorsOverlap(self.start));
        }
        // Lock levels are keyed by row, so the two anchors need their own.
        if self.start.row == self.goal.row {
            return Err(ConfigError::AnchorsShareRow);
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::NoCandidates);
        }
        if self.lock_curve.is_empty() {
            return Err(ConfigError::EmptyLockCurve);
        }
        Ok(())
    }
}
