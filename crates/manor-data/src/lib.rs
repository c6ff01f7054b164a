//! manor-data: Static room data for the manor engine
//!
//! The default room table and a ready-built [`RoomCatalog`] made from it.

pub mod rooms;

use manor_core::CatalogError;
use manor_core::room::{RoomCatalog, RoomTemplate};

pub use rooms::{ANTECHAMBER, ENTRANCE_HALL, ROOMS, RoomDef, find_room, num_rooms};

/// Templates for every entry of [`ROOMS`], in table order.
pub fn default_templates() -> Vec<RoomTemplate> {
    ROOMS.iter().map(RoomDef::to_template).collect()
}

/// The default manor catalog, Entrance Hall to Antechamber.
pub fn default_catalog() -> Result<RoomCatalog, CatalogError> {
    RoomCatalog::new(default_templates(), ENTRANCE_HALL, ANTECHAMBER)
}
