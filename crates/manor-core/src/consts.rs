//! Game constants

use crate::manor::Pos;

/// Default grid height
pub const DEFAULT_ROWS: usize = 9;

/// Default grid width
pub const DEFAULT_COLS: usize = 5;

/// Default entrance cell: bottom row, middle column
pub const DEFAULT_START: Pos = Pos::new(8, 2);

/// Default goal cell: top row, middle column
pub const DEFAULT_GOAL: Pos = Pos::new(0, 2);

/// Steps granted at the start of a day
pub const STARTING_STEPS: u32 = 70;

/// Gems in hand at the start of a day
pub const STARTING_GEMS: u32 = 2;

/// Steps restored by one piece of food
pub const FOOD_STEPS: u32 = 2;
