//! Reference inventory
//!
//! A plain [`Resources`] implementation: five counted resources, five
//! permanent items, the standard lock rules, and the room effects and loot
//! found in the default catalog.

use bitflags::bitflags;
use strum::{Display, EnumIter, EnumString};

use crate::consts::{FOOD_STEPS, STARTING_GEMS, STARTING_STEPS};
use crate::manor::LockLevel;
use crate::resources::Resources;
use crate::rng::GameRng;
use crate::room::{EffectRef, LootEntry, LootItem, PlacedRoom};

/// Counted resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Steps,
    Coins,
    Gems,
    Keys,
    Dice,
}

bitflags! {
    /// Items that are kept for the rest of the day once found
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Permanents: u8 {
        /// Opens single locks without spending a key
        const LOCKPICK = 0x01;
        const RABBIT_FOOT = 0x02;
        const METAL_DETECTOR = 0x04;
        const SHOVEL = 0x08;
        const HAMMER = 0x10;
    }
}

/// Effects the inventory knows how to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RoomEffect {
    AddStep,
    AddCoin,
    AddGem,
    AddKey,
    AddDice,
    Lockpick,
    #[strum(serialize = "metaldetector", serialize = "metal_detector")]
    MetalDetector,
    #[strum(serialize = "rabbitfoot", serialize = "rabbit_foot")]
    RabbitFoot,
    Shovel,
    Hammer,
}

/// Steps, coins, gems, keys, dice and permanent items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    steps: u32,
    coins: u32,
    gems: u32,
    keys: u32,
    dice: u32,
    permanents: Permanents,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Start-of-day inventory
    pub fn new() -> Self {
        Self {
            steps: STARTING_STEPS,
            coins: 0,
            gems: STARTING_GEMS,
            keys: 0,
            dice: 0,
            permanents: Permanents::empty(),
        }
    }

    /// Empty inventory, handy as a builder base
    pub fn empty() -> Self {
        Self {
            steps: 0,
            coins: 0,
            gems: 0,
            keys: 0,
            dice: 0,
            permanents: Permanents::empty(),
        }
    }

    pub fn with(mut self, kind: ResourceKind, n: u32) -> Self {
        *self.slot(kind) = n;
        self
    }

    pub fn with_permanent(mut self, item: Permanents) -> Self {
        self.permanents |= item;
        self
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Steps => self.steps,
            ResourceKind::Coins => self.coins,
            ResourceKind::Gems => self.gems,
            ResourceKind::Keys => self.keys,
            ResourceKind::Dice => self.dice,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, n: u32) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(n);
    }

    /// Take `n` of `kind` if that many are held; otherwise change nothing.
    pub fn take(&mut self, kind: ResourceKind, n: u32) -> bool {
        let slot = self.slot(kind);
        match slot.checked_sub(n) {
            Some(left) => {
                *slot = left;
                true
            }
            None => false,
        }
    }

    pub fn has(&self, item: Permanents) -> bool {
        self.permanents.contains(item)
    }

    pub fn permanents(&self) -> Permanents {
        self.permanents
    }

    /// Returns false if the item was already held.
    pub fn grant(&mut self, item: Permanents) -> bool {
        let fresh = !self.permanents.contains(item);
        self.permanents |= item;
        fresh
    }

    /// Apply a room's on-enter effect. Unknown ids are logged and skipped.
    pub fn apply_effect(&mut self, effect: &EffectRef, rng: &mut GameRng) -> Option<RoomEffect> {
        let Ok(kind) = effect.id.parse::<RoomEffect>() else {
            tracing::warn!(id = %effect.id, "unknown room effect");
            return None;
        };
        let amount = effect.value.sample(rng);
        match kind {
            RoomEffect::AddStep => self.add(ResourceKind::Steps, amount),
            RoomEffect::AddCoin => self.add(ResourceKind::Coins, amount),
            RoomEffect::AddGem => self.add(ResourceKind::Gems, amount),
            RoomEffect::AddKey => self.add(ResourceKind::Keys, amount),
            RoomEffect::AddDice => self.add(ResourceKind::Dice, amount),
            RoomEffect::Lockpick => {
                self.grant(Permanents::LOCKPICK);
            }
            RoomEffect::MetalDetector => {
                self.grant(Permanents::METAL_DETECTOR);
            }
            RoomEffect::RabbitFoot => {
                self.grant(Permanents::RABBIT_FOOT);
            }
            RoomEffect::Shovel => {
                self.grant(Permanents::SHOVEL);
            }
            RoomEffect::Hammer => {
                self.grant(Permanents::HAMMER);
            }
        }
        tracing::debug!(effect = %kind, amount, "room effect applied");
        Some(kind)
    }

    /// Pick up one loot line. Counts are rolled each call.
    pub fn pick_up(&mut self, entry: &LootEntry, rng: &mut GameRng) -> u32 {
        let qty = entry.count.sample(rng);
        if qty == 0 {
            return 0;
        }
        match entry.item {
            item if item.is_food() => {
                self.add(ResourceKind::Steps, FOOD_STEPS.saturating_mul(qty));
            }
            LootItem::Key => self.add(ResourceKind::Keys, qty),
            LootItem::Gem => self.add(ResourceKind::Gems, qty),
            LootItem::Coin => self.add(ResourceKind::Coins, qty),
            LootItem::Dice => self.add(ResourceKind::Dice, qty),
            LootItem::Lockpick => {
                self.grant(Permanents::LOCKPICK);
            }
            LootItem::MetalDetector => {
                self.grant(Permanents::METAL_DETECTOR);
            }
            LootItem::RabbitFoot => {
                self.grant(Permanents::RABBIT_FOOT);
            }
            LootItem::Shovel => {
                self.grant(Permanents::SHOVEL);
            }
            LootItem::Hammer => {
                self.grant(Permanents::HAMMER);
            }
            LootItem::Apple | LootItem::Banana | LootItem::Cupcake | LootItem::Orange => {}
        }
        qty
    }

    fn slot(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Steps => &mut self.steps,
            ResourceKind::Coins => &mut self.coins,
            ResourceKind::Gems => &mut self.gems,
            ResourceKind::Keys => &mut self.keys,
            ResourceKind::Dice => &mut self.dice,
        }
    }
}

impl Resources for Inventory {
    fn steps(&self) -> u32 {
        self.steps
    }

    fn use_steps(&mut self, n: u32) {
        self.steps = self.steps.saturating_sub(n);
    }

    fn use_gems(&mut self, n: u32) -> bool {
        self.take(ResourceKind::Gems, n)
    }

    fn can_open(&self, level: LockLevel) -> bool {
        match level {
            LockLevel::Open => true,
            LockLevel::Single => self.keys >= 1 || self.has(Permanents::LOCKPICK),
            LockLevel::Double => self.keys >= 2,
        }
    }

    fn spend_for_lock(&mut self, level: LockLevel) {
        match level {
            LockLevel::Open => {}
            // A key is used when there is one; the lockpick is never used up.
            LockLevel::Single => {
                self.take(ResourceKind::Keys, 1);
            }
            LockLevel::Double => {
                self.take(ResourceKind::Keys, 2);
            }
        }
    }

    fn use_dice(&mut self, n: u32) -> bool {
        self.take(ResourceKind::Dice, n)
    }

    /// The effect fires on every entry; loot only the first time.
    fn enter_room(&mut self, room: &mut PlacedRoom, rng: &mut GameRng) {
        if let Some(effect) = room.template().effect.clone() {
            self.apply_effect(&effect, rng);
        }
        if room.mark_looted() {
            let loot = room.template().loot.clone();
            for entry in &loot {
                let qty = self.pick_up(entry, rng);
                if qty > 0 {
                    tracing::debug!(room = room.name(), item = %entry.item, qty, "loot picked up");
                }
            }
        }
    }
}
