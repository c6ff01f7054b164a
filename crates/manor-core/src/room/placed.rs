//! A template instantiated on the grid

use serde::Serialize;

use super::doors::{Direction, Doors, Orientation};
use super::template::RoomTemplate;

/// A room standing on a grid cell.
///
/// Only the grid creates these. `resolved_doors` is fixed at placement; the
/// `looted` flag belongs to the resource collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedRoom {
    template: RoomTemplate,
    orientation: Orientation,
    doors: Doors,
    looted: bool,
}

impl PlacedRoom {
    pub(crate) fn new(template: RoomTemplate, orientation: Orientation, doors: Doors) -> Self {
        Self {
            template,
            orientation,
            doors,
            looted: false,
        }
    }

    pub fn template(&self) -> &RoomTemplate {
        &self.template
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Doors actually in effect after rotation and trimming
    pub fn doors(&self) -> Doors {
        self.doors
    }

    pub fn has_door(&self, side: Direction) -> bool {
        self.doors.is_open(side)
    }

    pub fn is_looted(&self) -> bool {
        self.looted
    }

    /// Flag the room's one-time rewards as collected.
    ///
    /// Returns false if it had already been looted.
    pub fn mark_looted(&mut self) -> bool {
        !std::mem::replace(&mut self.looted, true)
    }
}
