//! The manor: grid, deck, placement, drafting and locks

mod deck;
mod draft;
mod grid;
mod lock;
mod placement;

pub use deck::Deck;
pub use draft::{MAX_CANDIDATES, draw_candidates, eligible_indices};
pub use grid::{Grid, Pos};
pub use lock::{LockCurve, LockLevel, LockPolicy};
pub use placement::{
    OrientationPolicy, PlacementPlan, apply_plan, commit_draw, plan_placement, rule_allows,
    valid_orientations,
};
