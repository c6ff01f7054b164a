//! Placement validation
//!
//! Which rotations of a template may stand on a given empty cell.

use serde::{Deserialize, Serialize};

use super::deck::Deck;
use super::grid::{Grid, Pos};
use crate::error::ManorError;
use crate::rng::GameRng;
use crate::room::{Direction, Doors, Orientation, PlacedRoom, PlacementRule, RoomTemplate};

/// How a room's orientation is picked among the legal ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationPolicy {
    /// Uniformly at random
    #[default]
    UniformRandom,
    /// Lowest legal quarter-turn count
    FirstValid,
}

impl OrientationPolicy {
    pub fn pick(
        self,
        options: &[(Orientation, Doors)],
        rng: &mut GameRng,
    ) -> Option<(Orientation, Doors)> {
        match self {
            OrientationPolicy::UniformRandom => rng.choose(options).copied(),
            OrientationPolicy::FirstValid => options.first().copied(),
        }
    }
}

/// Whether the template's placement rule allows `pos` at all.
pub fn rule_allows(grid: &Grid, rule: PlacementRule, pos: Pos) -> bool {
    match rule {
        PlacementRule::None => true,
        PlacementRule::BorderOnly => grid.is_border(pos),
        PlacementRule::InteriorOnly => !grid.is_border(pos),
    }
}

/// Every legal `(orientation, doors)` for `template` at the empty cell `pos`,
/// entered through its `entry` side.
///
/// An orientation is legal when the entry door is open, no open door leads
/// off the grid, and every side facing a placed room matches that room's
/// door. An empty result means the template cannot go here.
pub fn valid_orientations(
    grid: &Grid,
    template: &RoomTemplate,
    pos: Pos,
    entry: Direction,
) -> Vec<(Orientation, Doors)> {
    if !grid.in_bounds(pos) || grid.is_occupied(pos) {
        return Vec::new();
    }
    if !rule_allows(grid, template.placement, pos) {
        return Vec::new();
    }

    Orientation::ALL
        .into_iter()
        .filter_map(|orientation| {
            let doors = template.doors.rotated(orientation);
            fits(grid, pos, entry, doors).then_some((orientation, doors))
        })
        .collect()
}

fn fits(grid: &Grid, pos: Pos, entry: Direction, doors: Doors) -> bool {
    if !doors.is_open(entry) {
        return false;
    }
    Direction::ALL.into_iter().all(|side| {
        let open = doors.is_open(side);
        match grid.neighbor(pos, side) {
            None => !open,
            Some(next) => match grid.get(next) {
                Some(room) => room.has_door(side.opposite()) == open,
                None => true,
            },
        }
    })
}

/// A resolved placement, checked but not yet applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPlan {
    pub pos: Pos,
    pub orientation: Orientation,
    pub doors: Doors,
}

/// Re-check `template` at `pos` and settle its orientation.
///
/// `preferred` wins when it is still legal (it is what a draft previewed);
/// otherwise `policy` picks. Fails with `PlacementExhausted` when nothing is
/// legal any more or the template has left the deck.
#[allow(clippy::too_many_arguments)]
pub fn plan_placement(
    grid: &Grid,
    deck: &Deck,
    template: &RoomTemplate,
    pos: Pos,
    entry: Direction,
    preferred: Option<Orientation>,
    policy: OrientationPolicy,
    rng: &mut GameRng,
) -> Result<PlacementPlan, ManorError> {
    if !deck.contains(template) {
        return Err(ManorError::PlacementExhausted(pos));
    }
    let options = valid_orientations(grid, template, pos, entry);
    let chosen = preferred
        .and_then(|want| options.iter().copied().find(|(o, _)| *o == want))
        .or_else(|| policy.pick(&options, rng));
    let (orientation, doors) = chosen.ok_or(ManorError::PlacementExhausted(pos))?;
    Ok(PlacementPlan {
        pos,
        orientation,
        doors,
    })
}

/// Apply a plan: write the room into the grid and take its card from the deck.
pub fn apply_plan<'g>(
    grid: &'g mut Grid,
    deck: &mut Deck,
    template: &RoomTemplate,
    plan: PlacementPlan,
) -> Result<&'g PlacedRoom, ManorError> {
    if grid.is_occupied(plan.pos) || !deck.remove_one(template) {
        return Err(ManorError::PlacementExhausted(plan.pos));
    }
    tracing::debug!(
        room = %template.name,
        pos = %plan.pos,
        orientation = plan.orientation.quarter_turns(),
        doors = %plan.doors.label(),
        deck = deck.len(),
        "room placed"
    );
    grid.place(
        plan.pos,
        PlacedRoom::new(template.clone(), plan.orientation, plan.doors),
    );
    grid.get(plan.pos).ok_or(ManorError::PlacementExhausted(plan.pos))
}

/// Place a drafted template: re-validate, pick an orientation, write the
/// grid cell and remove one matching card from the deck. Nothing changes on
/// failure.
#[allow(clippy::too_many_arguments)]
pub fn commit_draw<'g>(
    grid: &'g mut Grid,
    deck: &mut Deck,
    template: &RoomTemplate,
    pos: Pos,
    entry: Direction,
    preferred: Option<Orientation>,
    policy: OrientationPolicy,
    rng: &mut GameRng,
) -> Result<&'g PlacedRoom, ManorError> {
    let plan = plan_placement(grid, deck, template, pos, entry, preferred, policy, rng)?;
    apply_plan(grid, deck, template, plan)
}
