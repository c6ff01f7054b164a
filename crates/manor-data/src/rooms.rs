//! Room table
//!
//! Every card in the default manor. Doors are given in the unrotated frame;
//! the engine turns them to fit. Rooms listed twice appear twice in the deck.

use manor_core::room::{
    Amount, ColorClass, Doors, EffectRef, LootItem, MAX_RARITY, PlacementRule, Rarity,
    RoomTemplate,
};

/// Name of the room the player starts in
pub const ENTRANCE_HALL: &str = "Entrance Hall";

/// Name of the room the player must reach
pub const ANTECHAMBER: &str = "Antechamber";

const N: Doors = Doors::NORTH;
const E: Doors = Doors::EAST;
const S: Doors = Doors::SOUTH;
const W: Doors = Doors::WEST;
const ALL: Doors = Doors::all();

/// Static description of one room card
#[derive(Debug, Clone, Copy)]
pub struct RoomDef {
    pub name: &'static str,
    pub color: ColorClass,
    pub rarity: Rarity,
    pub gem_cost: u32,
    pub doors: Doors,
    pub placement: PlacementRule,
    /// Effect id and its amount range
    pub effect: Option<(&'static str, u32, u32)>,
    /// Item and count range
    pub loot: &'static [(LootItem, u32, u32)],
}

impl RoomDef {
    pub const fn new(name: &'static str, color: ColorClass, doors: Doors) -> Self {
        Self {
            name,
            color,
            rarity: Rarity::COMMON,
            gem_cost: 0,
            doors,
            placement: PlacementRule::None,
            effect: None,
            loot: &[],
        }
    }

    /// Tiers above [`MAX_RARITY`] fail const evaluation of the table.
    pub const fn rarity(mut self, tier: u8) -> Self {
        self.rarity = match Rarity::new(tier) {
            Some(rarity) => rarity,
            None => panic!("room rarity tier out of range"),
        };
        self
    }

    pub const fn cost(mut self, gems: u32) -> Self {
        self.gem_cost = gems;
        self
    }

    pub const fn border_only(mut self) -> Self {
        self.placement = PlacementRule::BorderOnly;
        self
    }

    pub const fn interior_only(mut self) -> Self {
        self.placement = PlacementRule::InteriorOnly;
        self
    }

    pub const fn effect(mut self, id: &'static str, min: u32, max: u32) -> Self {
        self.effect = Some((id, min, max));
        self
    }

    pub const fn loot(mut self, loot: &'static [(LootItem, u32, u32)]) -> Self {
        self.loot = loot;
        self
    }

    pub fn to_template(&self) -> RoomTemplate {
        let mut template = RoomTemplate::new(self.name, self.color, self.doors)
            .with_rarity(self.rarity)
            .with_gem_cost(self.gem_cost)
            .with_placement(self.placement);
        if let Some((id, min, max)) = self.effect {
            template = template.with_effect(EffectRef::new(id, Amount::range(min, max)));
        }
        for &(item, min, max) in self.loot {
            template = template.with_loot(item, Amount::range(min, max));
        }
        template
    }
}

use ColorClass::{Blue, Brown, Green, Orange, Purple, Red, Yellow};
use LootItem::{
    Apple, Banana, Coin, Cupcake, Dice, Gem, Hammer, Key, Lockpick, MetalDetector,
    Orange as OrangeFruit, RabbitFoot, Shovel,
};

/// All rooms of the default manor, anchors first
pub static ROOMS: &[RoomDef] = &[
    // Anchors
    RoomDef::new(ENTRANCE_HALL, Blue, N.union(E).union(W)),
    RoomDef::new(ANTECHAMBER, Blue, E.union(S).union(W)).rarity(3),
    // Blueprints
    RoomDef::new("Parlor", Blue, S.union(W))
        .effect("add_gem", 1, 3)
        .loot(&[(Key, 0, 1)]),
    RoomDef::new("Closet", Blue, S).loot(&[(Coin, 1, 2), (Apple, 0, 1)]),
    RoomDef::new("Closet", Blue, S).loot(&[(Key, 0, 1), (Banana, 0, 1)]),
    RoomDef::new("Storeroom", Blue, S).loot(&[(Gem, 0, 1), (Coin, 0, 2), (Dice, 0, 1)]),
    RoomDef::new("Spare Room", Blue, N.union(S)),
    RoomDef::new("Nook", Blue, S.union(W)).loot(&[(Key, 1, 1)]),
    RoomDef::new("Lavatory", Blue, S.union(E)),
    RoomDef::new("Vault", Blue, S)
        .rarity(3)
        .cost(3)
        .effect("add_coin", 10, 20),
    RoomDef::new("Den", Blue, E.union(S).union(W))
        .loot(&[(Gem, 0, 1)]),
    RoomDef::new("Study", Blue, S.union(W))
        .rarity(1)
        .cost(1)
        .effect("add_dice", 1, 1),
    RoomDef::new("Library", Blue, S.union(W))
        .rarity(2)
        .cost(1)
        .loot(&[(MetalDetector, 0, 1)]),
    RoomDef::new("Billiard Room", Blue, S.union(W)).rarity(1),
    RoomDef::new("Gallery", Blue, N.union(S))
        .rarity(2)
        .interior_only(),
    RoomDef::new("Rotunda", Blue, S.union(W)).rarity(2).cost(3),
    RoomDef::new("Pantry", Blue, S.union(W))
        .loot(&[(OrangeFruit, 1, 2), (Coin, 0, 1)]),
    RoomDef::new("Kitchen", Blue, S.union(W))
        .rarity(1)
        .cost(1)
        .loot(&[(Cupcake, 1, 2), (Apple, 0, 2)]),
    RoomDef::new("Workshop", Blue, N.union(S))
        .rarity(2)
        .loot(&[(Shovel, 0, 1), (Lockpick, 0, 1), (Hammer, 0, 1)]),
    RoomDef::new("Great Hall", Blue, ALL).rarity(2).cost(2),
    // Hallways
    RoomDef::new("Corridor", Orange, N.union(S)),
    RoomDef::new("Corridor", Orange, N.union(S)),
    RoomDef::new("Hallway", Orange, E.union(S).union(W)),
    RoomDef::new("West Wing Hall", Orange, E.union(S).union(W)).rarity(1),
    RoomDef::new("East Wing Hall", Orange, E.union(S).union(W)).rarity(1),
    RoomDef::new("Passageway", Orange, ALL).rarity(1).cost(2),
    RoomDef::new("Foyer", Orange, N.union(S))
        .rarity(2)
        .cost(2)
        .interior_only(),
    // Bedrooms
    RoomDef::new("Bedroom", Purple, N.union(E))
        .rarity(1)
        .cost(1)
        .effect("add_step", 5, 5),
    RoomDef::new("Guest Bedroom", Purple, S).effect("add_step", 2, 3),
    RoomDef::new("Boudoir", Purple, S.union(W))
        .rarity(1)
        .cost(1)
        .loot(&[(RabbitFoot, 0, 1)]),
    RoomDef::new("Nursery", Purple, S).rarity(1).effect("add_step", 3, 5),
    // Outdoor rooms
    RoomDef::new("Veranda", Green, N.union(S))
        .rarity(2)
        .cost(2)
        .border_only()
        .loot(&[(Gem, 1, 2)]),
    RoomDef::new("Terrace", Green, S).rarity(1).border_only(),
    RoomDef::new("Greenhouse", Green, S)
        .rarity(1)
        .cost(1)
        .border_only()
        .effect("add_gem", 1, 2),
    RoomDef::new("Patio", Green, S.union(W))
        .rarity(1)
        .cost(1)
        .border_only(),
    RoomDef::new("Courtyard", Green, E.union(S).union(W))
        .rarity(1)
        .cost(1)
        .interior_only(),
    RoomDef::new("Cloister", Green, ALL)
        .rarity(3)
        .cost(3)
        .interior_only(),
    // Shops
    RoomDef::new("Chapel", Yellow, N.union(S))
        .rarity(1)
        .cost(1)
        .effect("add_coin", 1, 3),
    RoomDef::new("Commissary", Yellow, S.union(W))
        .rarity(1)
        .cost(1)
        .loot(&[(Key, 1, 1), (Dice, 0, 1)]),
    RoomDef::new("Locksmith", Yellow, S)
        .rarity(2)
        .cost(1)
        .effect("add_key", 1, 2),
    // Hazards
    RoomDef::new("Danger Room", Red, N.union(W)).rarity(1),
    RoomDef::new("Lavender Room", Red, N.union(S)).rarity(2),
    RoomDef::new("Dark Room", Red, E.union(S).union(W)).rarity(1),
    // Utility rooms
    RoomDef::new("Laundry Room", Brown, S).rarity(2).cost(1),
    RoomDef::new("Boiler Room", Brown, E.union(S).union(W))
        .rarity(2)
        .cost(1)
        .effect("lockpick", 1, 1),
    RoomDef::new("Utility Closet", Brown, S)
        .loot(&[(Key, 0, 1), (Coin, 0, 2)]),
];

/// First table entry with `name`.
pub fn find_room(name: &str) -> Option<&'static RoomDef> {
    ROOMS.iter().find(|r| r.name == name)
}

pub fn num_rooms() -> usize {
    ROOMS.len()
}
