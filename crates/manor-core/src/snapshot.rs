//! Read-only views for renderers

use serde::Serialize;

use crate::engine::{Candidate, Draft, EngineState, GameOutcome, ManorEngine};
use crate::manor::{LockLevel, Pos};
use crate::room::{ColorClass, Direction, Doors, Orientation, PlacedRoom};

/// One occupied cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub pos: Pos,
    pub name: String,
    pub color: ColorClass,
    pub orientation: Orientation,
    pub doors: Doors,
    pub looted: bool,
}

impl RoomView {
    fn new(pos: Pos, room: &PlacedRoom) -> Self {
        Self {
            pos,
            name: room.name().to_string(),
            color: room.template().color,
            orientation: room.orientation(),
            doors: room.doors(),
            looted: room.is_looted(),
        }
    }
}

/// One offered room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    pub name: String,
    pub color: ColorClass,
    pub gem_cost: u32,
    pub rarity: u8,
    pub orientation: Orientation,
    pub doors: Doors,
}

impl From<&Candidate> for CandidateView {
    fn from(c: &Candidate) -> Self {
        Self {
            name: c.template.name.clone(),
            color: c.template.color,
            gem_cost: c.template.gem_cost,
            rarity: c.template.rarity.tier(),
            orientation: c.orientation,
            doors: c.doors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftView {
    pub target: Pos,
    pub entry: Direction,
    pub lock_level: LockLevel,
    pub candidates: Vec<CandidateView>,
}

impl From<&Draft> for DraftView {
    fn from(d: &Draft) -> Self {
        Self {
            target: d.target,
            entry: d.entry,
            lock_level: d.lock_level,
            candidates: d.candidates.iter().map(CandidateView::from).collect(),
        }
    }
}

/// Everything a renderer needs to draw the manor, detached from the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManorSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub start: Pos,
    pub goal: Pos,
    pub player: Pos,
    pub outcome: GameOutcome,
    pub deck_size: usize,
    /// Occupied cells, row-major
    pub rooms: Vec<RoomView>,
    /// Present while drafting
    pub draft: Option<DraftView>,
}

impl ManorSnapshot {
    pub fn room_at(&self, pos: Pos) -> Option<&RoomView> {
        self.rooms.iter().find(|r| r.pos == pos)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&ManorEngine> for ManorSnapshot {
    fn from(engine: &ManorEngine) -> Self {
        let grid = engine.grid();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            start: grid.start(),
            goal: grid.goal(),
            player: engine.position(),
            outcome: engine.outcome(),
            deck_size: engine.deck().len(),
            rooms: grid
                .occupied()
                .map(|(pos, room)| RoomView::new(pos, room))
                .collect(),
            draft: match engine.state() {
                EngineState::Drafting(draft) => Some(DraftView::from(draft)),
                EngineState::Roaming => None,
            },
        }
    }
}

impl ManorEngine {
    pub fn snapshot(&self) -> ManorSnapshot {
        ManorSnapshot::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::inventory::{Inventory, ResourceKind};
    use crate::manor::LockCurve;
    use crate::rng::GameRng;
    use crate::room::{RoomCatalog, RoomTemplate};

    fn engine() -> ManorEngine {
        let rooms = vec![
            RoomTemplate::new(
                "Entrance Hall",
                ColorClass::Blue,
                Doors::NORTH | Doors::EAST | Doors::WEST,
            ),
            RoomTemplate::new("Antechamber", ColorClass::Blue, Doors::SOUTH),
            RoomTemplate::new("Parlor", ColorClass::Blue, Doors::all()).with_gem_cost(1),
        ];
        let catalog = RoomCatalog::new(rooms, "Entrance Hall", "Antechamber").unwrap();
        let config = EngineConfig {
            lock_curve: LockCurve::new(1, 0, 0),
            ..EngineConfig::default()
        };
        ManorEngine::new(&catalog, config, GameRng::new(11)).unwrap()
    }

    #[test]
    fn test_roaming_snapshot() {
        let snap = engine().snapshot();
        assert_eq!((snap.rows, snap.cols), (9, 5));
        assert_eq!(snap.player, Pos::new(8, 2));
        assert_eq!(snap.rooms.len(), 2);
        assert_eq!(snap.rooms[0].name, "Antechamber");
        assert_eq!(snap.room_at(Pos::new(8, 2)).unwrap().name, "Entrance Hall");
        assert_eq!(snap.deck_size, 1);
        assert!(snap.draft.is_none());
    }

    #[test]
    fn test_drafting_snapshot_serializes() {
        let mut e = engine();
        let mut inv = Inventory::empty().with(ResourceKind::Steps, 5);
        e.attempt_open(Direction::North, &mut inv).unwrap();
        let snap = e.snapshot();
        let draft = snap.draft.as_ref().unwrap();
        assert_eq!(draft.target, Pos::new(7, 2));
        assert_eq!(draft.entry, Direction::South);
        assert_eq!(draft.lock_level, LockLevel::Open);
        assert_eq!(draft.candidates[0].name, "Parlor");
        assert_eq!(draft.candidates[0].gem_cost, 1);

        let json: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(json["draft"]["entry"], "south");
        assert_eq!(json["draft"]["lock_level"], 0);
        assert_eq!(json["outcome"], "in_progress");
        assert_eq!(json["rooms"][1]["doors"], serde_json::json!([true, true, false, true]));
    }
}
