//! Room templates: the immutable cards a manor is drafted from

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::doors::Doors;
use crate::rng::GameRng;

/// Highest rarity tier a template may carry
pub const MAX_RARITY: u8 = 3;

/// Color family of a room
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorClass {
    /// Blueprints: ordinary rooms
    #[default]
    Blue,
    /// Bedrooms
    Purple,
    /// Hallways
    Orange,
    /// Gardens and outdoor rooms
    Green,
    /// Shops
    Yellow,
    /// Hazards
    Red,
    /// Utility rooms
    Brown,
}

/// Where on the grid a template may be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlacementRule {
    #[default]
    None,
    /// Only on the outer ring of cells
    BorderOnly,
    /// Never on the outer ring of cells
    #[serde(alias = "not_edges")]
    InteriorOnly,
}

/// Draw rarity tier, 0 (common) to 3 (rarest).
///
/// Each tier divides the draw weight by three.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rarity(u8);

impl Rarity {
    pub const COMMON: Rarity = Rarity(0);

    pub const fn new(tier: u8) -> Option<Self> {
        if tier <= MAX_RARITY {
            Some(Rarity(tier))
        } else {
            None
        }
    }

    pub const fn tier(self) -> u8 {
        self.0
    }

    /// Relative draw weight `1 / 3^tier`.
    pub fn weight(self) -> f64 {
        1.0 / 3f64.powi(self.0 as i32)
    }
}

impl TryFrom<u8> for Rarity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rarity::new(value).ok_or_else(|| format!("rarity must be 0..={MAX_RARITY}, got {value}"))
    }
}

impl From<Rarity> for u8 {
    fn from(r: Rarity) -> u8 {
        r.0
    }
}

/// Inclusive quantity range, written as `3` or `[1, 4]` in catalog files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "AmountRepr", into = "AmountRepr")]
pub struct Amount {
    pub min: u32,
    pub max: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Fixed(u32),
    Range(u32, u32),
}

impl From<AmountRepr> for Amount {
    fn from(repr: AmountRepr) -> Self {
        match repr {
            AmountRepr::Fixed(n) => Amount::fixed(n),
            AmountRepr::Range(a, b) => Amount::range(a, b),
        }
    }
}

impl From<Amount> for AmountRepr {
    fn from(amount: Amount) -> Self {
        if amount.min == amount.max {
            AmountRepr::Fixed(amount.min)
        } else {
            AmountRepr::Range(amount.min, amount.max)
        }
    }
}

impl Amount {
    pub const fn fixed(n: u32) -> Self {
        Self { min: n, max: n }
    }

    /// Bounds are sorted, so `range(5, 2)` is `2..=5`.
    pub const fn range(a: u32, b: u32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// The canonical scalar for fields that must not vary per draw.
    pub const fn lower_bound(self) -> u32 {
        self.min
    }

    pub fn sample(self, rng: &mut GameRng) -> u32 {
        rng.range_inclusive(self.min, self.max)
    }
}

/// Opaque reference to an on-enter effect.
///
/// The engine never interprets it; the resource collaborator resolves `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectRef {
    pub id: String,
    #[serde(default = "EffectRef::default_value")]
    pub value: Amount,
}

impl EffectRef {
    pub fn new(id: impl Into<String>, value: Amount) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    fn default_value() -> Amount {
        Amount::fixed(1)
    }
}

/// Items a room can hold, picked up the first time it is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LootItem {
    Apple,
    Banana,
    Cupcake,
    Orange,
    Key,
    Gem,
    Coin,
    Dice,
    Lockpick,
    MetalDetector,
    RabbitFoot,
    Shovel,
    Hammer,
}

impl LootItem {
    pub const fn is_food(self) -> bool {
        matches!(
            self,
            LootItem::Apple | LootItem::Banana | LootItem::Cupcake | LootItem::Orange
        )
    }
}

/// One loot line of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: LootItem,
    pub count: Amount,
}

/// Immutable room definition from the catalog.
///
/// Equality is by value: two identical templates are interchangeable deck
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RoomTemplate {
    pub name: String,
    pub color: ColorClass,
    pub rarity: Rarity,
    pub gem_cost: u32,
    /// Doors in the unrotated reference frame
    pub doors: Doors,
    pub placement: PlacementRule,
    pub effect: Option<EffectRef>,
    pub loot: Vec<LootEntry>,
}

impl RoomTemplate {
    /// A common, free template of the given color with no effect or loot.
    pub fn new(name: impl Into<String>, color: ColorClass, doors: Doors) -> Self {
        Self {
            name: name.into(),
            color,
            rarity: Rarity::COMMON,
            gem_cost: 0,
            doors,
            placement: PlacementRule::None,
            effect: None,
            loot: Vec::new(),
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_gem_cost(mut self, gem_cost: u32) -> Self {
        self.gem_cost = gem_cost;
        self
    }

    pub fn with_placement(mut self, placement: PlacementRule) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_effect(mut self, effect: EffectRef) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_loot(mut self, item: LootItem, count: Amount) -> Self {
        self.loot.push(LootEntry { item, count });
        self
    }

    pub fn is_free(&self) -> bool {
        self.gem_cost == 0
    }

    pub fn draw_weight(&self) -> f64 {
        self.rarity.weight()
    }
}
