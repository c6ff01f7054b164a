//! manor-core: grid, placement and draft engine for a room-drafting game
//!
//! The player starts in the entrance at the bottom of a fixed grid and tries
//! to reach the goal room at the top. Every door that opens onto an empty
//! cell offers a short draft of rooms that fit there; the chosen room is
//! placed, rotated to agree with its neighbors, and taken out of the deck.
//!
//! This crate has no I/O. Resource bookkeeping is behind the [`Resources`]
//! trait, renderers read [`ManorSnapshot`]s, and all randomness flows
//! through one seeded [`GameRng`].

pub mod config;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod manor;
pub mod resources;
pub mod room;
pub mod snapshot;

mod consts;
mod rng;

pub use config::EngineConfig;
pub use consts::*;
pub use engine::{Candidate, Draft, EngineState, GameOutcome, ManorEngine, OpenResult};
pub use error::{CatalogError, ConfigError, ManorError};
pub use inventory::{Inventory, Permanents, ResourceKind, RoomEffect};
pub use resources::Resources;
pub use rng::GameRng;
pub use snapshot::{CandidateView, DraftView, ManorSnapshot, RoomView};
