//! Candidate drafting
//!
//! Draws up to three rarity-weighted templates that fit the target cell,
//! then makes sure a free one is offered whenever a free one fits.

use super::deck::Deck;
use super::grid::{Grid, Pos};
use super::placement::valid_orientations;
use crate::rng::GameRng;
use crate::room::{Direction, RoomTemplate};

/// Cards offered per draft
pub const MAX_CANDIDATES: usize = 3;

/// Deck indices of templates with at least one legal orientation at `pos`.
pub fn eligible_indices(grid: &Grid, deck: &Deck, pos: Pos, entry: Direction) -> Vec<usize> {
    deck.iter()
        .enumerate()
        .filter(|(_, t)| !valid_orientations(grid, t, pos, entry).is_empty())
        .map(|(i, _)| i)
        .collect()
}

/// Draw up to `max` candidates for the empty cell `pos`, entered through
/// its `entry` side.
///
/// Picks are made without replacement with weight `1 / 3^rarity`, in pick
/// order. If every pick costs gems while an unpicked eligible template is
/// free, one pick chosen at random is swapped for a random free one. An
/// empty result is a dead end.
pub fn draw_candidates(
    grid: &Grid,
    deck: &Deck,
    pos: Pos,
    entry: Direction,
    max: usize,
    rng: &mut GameRng,
) -> Vec<RoomTemplate> {
    let cards = deck.as_slice();
    let mut pool = eligible_indices(grid, deck, pos, entry);
    if pool.is_empty() {
        tracing::debug!(%pos, %entry, deck = deck.len(), "no eligible room");
        return Vec::new();
    }
    let eligible = pool.len();

    let mut picks = Vec::with_capacity(max.min(pool.len()));
    while picks.len() < max && !pool.is_empty() {
        let weights: Vec<f64> = pool.iter().map(|&i| cards[i].draw_weight()).collect();
        let Some(k) = rng.weighted_index(&weights) else {
            break;
        };
        picks.push(pool.remove(k));
    }

    if !picks.is_empty() && picks.iter().all(|&i| !cards[i].is_free()) {
        let free: Vec<usize> = pool.iter().copied().filter(|&i| cards[i].is_free()).collect();
        if !free.is_empty() {
            let slot = rng.index(picks.len());
            let swap_in = rng.choose(&free).copied();
            if let (Some(slot), Some(swap_in)) = (slot, swap_in) {
                tracing::debug!(
                    out = %cards[picks[slot]].name,
                    into = %cards[swap_in].name,
                    "swapped in a free room"
                );
                picks[slot] = swap_in;
            }
        }
    }

    let drawn: Vec<RoomTemplate> = picks.into_iter().map(|i| cards[i].clone()).collect();
    tracing::debug!(
        %pos,
        eligible,
        drawn = ?drawn.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        "candidates drawn"
    );
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{ColorClass, Doors, Rarity};

    fn grid() -> Grid {
        let hall = RoomTemplate::new("Entrance Hall", ColorClass::Blue, Doors::all());
        let ante = RoomTemplate::new("Antechamber", ColorClass::Blue, Doors::all());
        Grid::new(9, 5, Pos::new(8, 2), Pos::new(0, 2), &hall, &ante).unwrap()
    }

    fn card(name: &str, rarity: u8, cost: u32) -> RoomTemplate {
        RoomTemplate::new(name, ColorClass::Blue, Doors::all())
            .with_rarity(Rarity::new(rarity).unwrap())
            .with_gem_cost(cost)
    }

    const TARGET: Pos = Pos::new(7, 2);

    #[test]
    fn test_small_pool_is_returned_whole() {
        let a = card("A", 0, 0);
        let b = RoomTemplate::new("B", ColorClass::Blue, Doors::NORTH)
            .with_rarity(Rarity::new(1).unwrap())
            .with_gem_cost(2);
        let deck = Deck::from_templates(vec![a.clone(), b.clone()]);
        let mut rng = GameRng::new(1);
        let drawn = draw_candidates(&grid(), &deck, TARGET, Direction::South, 3, &mut rng);
        assert_eq!(drawn.len(), 2);
        assert!(drawn.contains(&a));
        assert!(drawn.contains(&b));
    }

    #[test]
    fn test_never_more_than_max() {
        let deck = Deck::from_templates((0..10).map(|i| card(&format!("R{i}"), i % 4, 1)).collect());
        let mut rng = GameRng::new(2);
        for _ in 0..50 {
            let drawn = draw_candidates(&grid(), &deck, TARGET, Direction::South, 3, &mut rng);
            assert_eq!(drawn.len(), 3);
            // Without replacement: three distinct deck entries.
            assert_ne!(drawn[0], drawn[1]);
            assert_ne!(drawn[1], drawn[2]);
            assert_ne!(drawn[0], drawn[2]);
        }
    }

    #[test]
    fn test_ineligible_cards_are_never_offered() {
        let fits = card("Fits", 0, 0);
        let wall = RoomTemplate::new("Wall", ColorClass::Red, Doors::empty());
        let deck = Deck::from_templates(vec![wall.clone(), fits.clone(), wall]);
        let mut rng = GameRng::new(3);
        let drawn = draw_candidates(&grid(), &deck, TARGET, Direction::South, 3, &mut rng);
        assert_eq!(drawn, vec![fits]);
    }

    #[test]
    fn test_dead_end_returns_empty() {
        let deck = Deck::from_templates(vec![RoomTemplate::new("Wall", ColorClass::Red, Doors::empty())]);
        let mut rng = GameRng::new(4);
        assert!(draw_candidates(&grid(), &deck, TARGET, Direction::South, 3, &mut rng).is_empty());
        assert!(draw_candidates(&grid(), &Deck::default(), TARGET, Direction::South, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_free_room_is_guaranteed_when_one_fits() {
        // One free card buried among many cheap-to-draw paid ones.
        let mut cards: Vec<RoomTemplate> = (0..12).map(|i| card(&format!("Paid{i}"), 0, 2)).collect();
        cards.push(card("Free", 3, 0));
        let deck = Deck::from_templates(cards);
        for seed in 0..200 {
            let mut rng = GameRng::new(seed);
            let drawn = draw_candidates(&grid(), &deck, TARGET, Direction::South, 3, &mut rng);
            assert_eq!(drawn.len(), 3);
            assert!(drawn.iter().any(|t| t.is_free()), "seed {seed}: {drawn:?}");
        }
    }

    #[test]
    fn test_guarantee_is_best_effort() {
        // The only free card cannot be placed here, so nothing can be done.
        let deck = Deck::from_templates(vec![
            card("Paid", 0, 1),
            RoomTemplate::new("Free wall", ColorClass::Blue, Doors::empty()),
        ]);
        let mut rng = GameRng::new(5);
        let drawn = draw_candidates(&grid(), &deck, TARGET, Direction::South, 3, &mut rng);
        assert_eq!(drawn.len(), 1);
        assert!(!drawn[0].is_free());
    }

    #[test]
    fn test_rarity_weighting_converges_to_three_to_one() {
        let common = card("Common", 0, 0);
        let rare = card("Rare", 1, 0);
        let deck = Deck::from_templates(vec![common.clone(), rare]);
        let mut rng = GameRng::new(6);
        let n = 20_000;
        let mut common_hits = 0;
        for _ in 0..n {
            let drawn = draw_candidates(&grid(), &deck, TARGET, Direction::South, 1, &mut rng);
            if drawn[0] == common {
                common_hits += 1;
            }
        }
        let ratio = common_hits as f64 / (n - common_hits) as f64;
        assert!((ratio - 3.0).abs() < 0.25, "ratio {ratio}");
    }
}
