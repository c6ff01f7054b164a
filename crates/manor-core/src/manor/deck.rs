//! The deck: templates not yet placed

use crate::rng::GameRng;
use crate::room::{RoomCatalog, RoomTemplate};

/// Multiset of drawable templates. Only ever shrinks.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<RoomTemplate>,
}

impl Deck {
    /// Every catalog template except the anchors, shuffled once.
    pub fn build(catalog: &RoomCatalog, rng: &mut GameRng) -> Self {
        let mut cards: Vec<RoomTemplate> = catalog
            .templates()
            .iter()
            .filter(|t| !catalog.is_anchor(t))
            .cloned()
            .collect();
        rng.shuffle(&mut cards);
        tracing::debug!(cards = cards.len(), "deck built");
        Self { cards }
    }

    /// A deck holding exactly `cards`, in the given order.
    pub fn from_templates(cards: Vec<RoomTemplate>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, template: &RoomTemplate) -> bool {
        self.cards.contains(template)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomTemplate> + '_ {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[RoomTemplate] {
        &self.cards
    }

    /// Remove one entry equal to `template`. Returns false if none matched.
    pub fn remove_one(&mut self, template: &RoomTemplate) -> bool {
        match self.cards.iter().position(|c| c == template) {
            Some(i) => {
                self.cards.remove(i);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{ColorClass, Doors};

    fn catalog() -> RoomCatalog {
        let rooms = vec![
            RoomTemplate::new("Entrance Hall", ColorClass::Blue, Doors::all()),
            RoomTemplate::new("Antechamber", ColorClass::Blue, Doors::SOUTH),
            RoomTemplate::new("Closet", ColorClass::Blue, Doors::SOUTH),
            RoomTemplate::new("Closet", ColorClass::Blue, Doors::SOUTH),
            RoomTemplate::new("Hallway", ColorClass::Orange, Doors::NORTH | Doors::SOUTH),
        ];
        RoomCatalog::new(rooms, "Entrance Hall", "Antechamber").unwrap()
    }

    #[test]
    fn test_build_excludes_anchors() {
        let mut rng = GameRng::new(1);
        let deck = Deck::build(&catalog(), &mut rng);
        assert_eq!(deck.len(), 3);
        assert!(deck.iter().all(|t| t.name != "Entrance Hall" && t.name != "Antechamber"));
    }

    #[test]
    fn test_build_is_seeded() {
        let a = Deck::build(&catalog(), &mut GameRng::new(9));
        let b = Deck::build(&catalog(), &mut GameRng::new(9));
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_remove_one_takes_a_single_duplicate() {
        let mut deck = Deck::build(&catalog(), &mut GameRng::new(2));
        let closet = RoomTemplate::new("Closet", ColorClass::Blue, Doors::SOUTH);
        assert!(deck.remove_one(&closet));
        assert_eq!(deck.len(), 2);
        assert!(deck.contains(&closet));
        assert!(deck.remove_one(&closet));
        assert!(!deck.remove_one(&closet));
        assert_eq!(deck.len(), 1);
    }
}
