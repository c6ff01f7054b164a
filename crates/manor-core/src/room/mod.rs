//! Room definitions
//!
//! Templates, their door masks, the catalog they come from, and the placed
//! instances the grid holds.

mod catalog;
mod doors;
mod placed;
mod template;

pub use catalog::RoomCatalog;
pub use doors::{Direction, Doors, Orientation};
pub use placed::PlacedRoom;
pub use template::{
    Amount, ColorClass, EffectRef, LootEntry, LootItem, MAX_RARITY, PlacementRule, Rarity,
    RoomTemplate,
};
