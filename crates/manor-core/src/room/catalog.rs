//! Room catalog: the full, immutable table of templates
//!
//! Catalog files are JSON:
//!
//! ```json
//! {
//!   "entrance": "Entrance Hall",
//!   "goal": "Antechamber",
//!   "rooms": [
//!     { "name": "Parlor", "color": "blue", "rarity": [0, 1], "gem_cost": 0,
//!       "doors": [false, false, true, true],
//!       "effect": { "id": "add_gem", "value": [1, 3] },
//!       "loot": [{ "item": "key", "count": 1 }] }
//!   ]
//! }
//! ```
//!
//! `rarity` and `gem_cost` may be written as a `[min, max]` pair; the lower
//! bound is kept.

use serde::Deserialize;
use serde::de::Error as _;

use super::doors::Doors;
use super::template::{
    Amount, ColorClass, EffectRef, LootEntry, PlacementRule, Rarity, RoomTemplate,
};
use crate::error::CatalogError;

/// One room as written in a catalog file
#[derive(Debug, Clone, Deserialize)]
struct RoomRecord {
    name: String,
    #[serde(default)]
    color: ColorClass,
    #[serde(default = "zero_amount")]
    rarity: Amount,
    #[serde(default = "zero_amount")]
    gem_cost: Amount,
    doors: Doors,
    #[serde(default)]
    placement: PlacementRule,
    #[serde(default)]
    effect: Option<EffectRef>,
    #[serde(default)]
    loot: Vec<LootEntry>,
}

fn zero_amount() -> Amount {
    Amount::fixed(0)
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    entrance: String,
    goal: String,
    rooms: Vec<RoomRecord>,
}

impl TryFrom<RoomRecord> for RoomTemplate {
    type Error = String;

    fn try_from(r: RoomRecord) -> Result<Self, Self::Error> {
        let tier = u8::try_from(r.rarity.lower_bound()).unwrap_or(u8::MAX);
        let rarity = Rarity::try_from(tier).map_err(|e| format!("{}: {e}", r.name))?;
        Ok(RoomTemplate {
            name: r.name,
            color: r.color,
            rarity,
            gem_cost: r.gem_cost.lower_bound(),
            doors: r.doors,
            placement: r.placement,
            effect: r.effect,
            loot: r.loot,
        })
    }
}

/// The immutable set of room templates plus the two fixed anchors.
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    templates: Vec<RoomTemplate>,
    entrance: usize,
    goal: usize,
}

impl RoomCatalog {
    /// Build a catalog, locating the entrance and goal templates by name.
    pub fn new(
        templates: Vec<RoomTemplate>,
        entrance: &str,
        goal: &str,
    ) -> Result<Self, CatalogError> {
        if entrance == goal {
            return Err(CatalogError::SameAnchor(entrance.to_string()));
        }
        if let Some(i) = templates.iter().position(|t| t.name.trim().is_empty()) {
            return Err(CatalogError::EmptyName(i));
        }
        // Anchors are matched by name, so each must name exactly one template.
        let find = |name: &str| {
            let mut hits = templates
                .iter()
                .enumerate()
                .filter(|(_, t)| t.name == name)
                .map(|(i, _)| i);
            match (hits.next(), hits.next()) {
                (Some(i), None) => Ok(i),
                (Some(_), Some(_)) => Err(CatalogError::DuplicateAnchor(name.to_string())),
                (None, _) => Err(CatalogError::MissingAnchor(name.to_string())),
            }
        };
        let entrance = find(entrance)?;
        let goal = find(goal)?;
        Ok(Self {
            templates,
            entrance,
            goal,
        })
    }

    /// Parse a catalog file.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        let mut templates = Vec::with_capacity(file.rooms.len());
        for record in file.rooms {
            let template = RoomTemplate::try_from(record)
                .map_err(|msg| CatalogError::Parse(serde_json::Error::custom(msg)))?;
            templates.push(template);
        }
        Self::new(templates, &file.entrance, &file.goal)
    }

    pub fn entrance(&self) -> &RoomTemplate {
        &self.templates[self.entrance]
    }

    pub fn goal(&self) -> &RoomTemplate {
        &self.templates[self.goal]
    }

    /// True for templates that are pre-placed and never drawn
    pub fn is_anchor(&self, template: &RoomTemplate) -> bool {
        template.name == self.entrance().name || template.name == self.goal().name
    }

    pub fn templates(&self) -> &[RoomTemplate] {
        &self.templates
    }

    pub fn get(&self, name: &str) -> Option<&RoomTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
