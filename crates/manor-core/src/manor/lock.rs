//! Door locks
//!
//! Lock difficulty grows with distance from the entrance: doors into the
//! start row are never locked, doors into the goal row always need two keys,
//! and everything in between is rolled from a weighted curve.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// How hard a door is to open
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum LockLevel {
    #[default]
    Open = 0,
    Single = 1,
    Double = 2,
}

impl LockLevel {
    pub const ALL: [LockLevel; 3] = [LockLevel::Open, LockLevel::Single, LockLevel::Double];

    pub const fn level(self) -> u8 {
        self as u8
    }

    pub const fn is_locked(self) -> bool {
        !matches!(self, LockLevel::Open)
    }
}

impl fmt::Display for LockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl TryFrom<u8> for LockLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        LockLevel::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| format!("lock level must be 0..=2, got {value}"))
    }
}

impl From<LockLevel> for u8 {
    fn from(level: LockLevel) -> u8 {
        level.level()
    }
}

/// Relative weights of levels 0, 1 and 2 for rows between the anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockCurve {
    pub weights: [u32; 3],
}

impl Default for LockCurve {
    fn default() -> Self {
        Self { weights: [1, 3, 1] }
    }
}

impl LockCurve {
    pub const fn new(open: u32, single: u32, double: u32) -> Self {
        Self {
            weights: [open, single, double],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.iter().all(|w| *w == 0)
    }

    /// Roll a level. An all-zero curve yields `Single`.
    pub fn sample(&self, rng: &mut GameRng) -> LockLevel {
        rng.weighted_index_u32(&self.weights)
            .and_then(|i| LockLevel::ALL.get(i).copied())
            .unwrap_or(LockLevel::Single)
    }
}

/// Maps destination rows to lock levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPolicy {
    start_row: usize,
    goal_row: usize,
    curve: LockCurve,
}

impl LockPolicy {
    pub fn new(start_row: usize, goal_row: usize, curve: LockCurve) -> Self {
        Self {
            start_row,
            goal_row,
            curve,
        }
    }

    pub fn curve(&self) -> LockCurve {
        self.curve
    }

    /// Lock level of a door leading into `row`.
    pub fn level_for_row(&self, row: usize, rng: &mut GameRng) -> LockLevel {
        let level = if row == self.start_row {
            LockLevel::Open
        } else if row == self.goal_row {
            LockLevel::Double
        } else {
            self.curve.sample(rng)
        };
        tracing::debug!(row, %level, "lock rolled");
        level
    }
}
