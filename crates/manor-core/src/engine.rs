//! The manor engine
//!
//! A two-state machine driven by the game loop. While `Roaming` the player
//! walks through placed rooms or opens a door onto an empty cell, which
//! starts a draft. While `Drafting` the player commits one of the offered
//! rooms, rerolls the offer, or walks away.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::EngineConfig;
use crate::error::{ConfigError, ManorError};
use crate::manor::{
    Deck, Grid, LockLevel, LockPolicy, Pos, apply_plan, draw_candidates, eligible_indices,
    plan_placement, valid_orientations,
};
use crate::resources::Resources;
use crate::rng::GameRng;
use crate::room::{Direction, Doors, Orientation, RoomCatalog, RoomTemplate};

/// How the day is going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameOutcome {
    #[default]
    InProgress,
    /// The player reached the goal room
    Won,
    /// The player ran out of steps
    Lost,
}

/// One offered room, with the orientation it would be placed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub template: RoomTemplate,
    pub orientation: Orientation,
    pub doors: Doors,
}

/// An open draft for an empty cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub target: Pos,
    /// Side of the new room the player walks in through
    pub entry: Direction,
    /// Lock paid to open the door
    pub lock_level: LockLevel,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Roaming,
    Drafting(Draft),
}

/// What a successful `attempt_open` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenResult {
    /// Walked into an already placed room
    Moved(Pos),
    /// Opened a door onto an empty cell; a draft with this many candidates
    /// is now open
    Drafting(usize),
}

/// Orchestrates grid, deck, locks and drafts for one day in the manor.
#[derive(Debug, Clone)]
pub struct ManorEngine {
    config: EngineConfig,
    grid: Grid,
    deck: Deck,
    rng: GameRng,
    locks: LockPolicy,
    /// Lock level of each empty cell, rolled on first contact
    lock_levels: HashMap<Pos, LockLevel>,
    position: Pos,
    state: EngineState,
    outcome: GameOutcome,
}

impl ManorEngine {
    /// Set up a fresh manor: anchors placed, deck shuffled, player at the
    /// entrance.
    pub fn new(
        catalog: &RoomCatalog,
        config: EngineConfig,
        mut rng: GameRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(
            config.rows,
            config.cols,
            config.start,
            config.goal,
            catalog.entrance(),
            catalog.goal(),
        )?;
        let deck = Deck::build(catalog, &mut rng);
        let locks = LockPolicy::new(config.start.row, config.goal.row, config.lock_curve);
        tracing::debug!(
            rows = config.rows,
            cols = config.cols,
            deck = deck.len(),
            seed = rng.seed(),
            "manor ready"
        );
        Ok(Self {
            position: config.start,
            config,
            grid,
            deck,
            rng,
            locks,
            lock_levels: HashMap::new(),
            state: EngineState::Roaming,
            outcome: GameOutcome::InProgress,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            EngineState::Drafting(draft) => Some(draft),
            EngineState::Roaming => None,
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Walk through the door on side `dir`, or open it onto an empty cell.
    ///
    /// A failed call leaves the grid, the deck and the resources untouched.
    /// Once a door is paid for it stays open, even if the draft is cancelled.
    pub fn attempt_open<R: Resources>(
        &mut self,
        dir: Direction,
        res: &mut R,
    ) -> Result<OpenResult, ManorError> {
        if self.outcome != GameOutcome::InProgress {
            return Err(ManorError::GameOver);
        }
        if res.steps() == 0 {
            self.finish(GameOutcome::Lost);
            return Err(ManorError::GameOver);
        }
        if !matches!(self.state, EngineState::Roaming) {
            return Err(ManorError::NotRoaming);
        }

        let target = self
            .grid
            .neighbor(self.position, dir)
            .ok_or(ManorError::OutOfBounds)?;
        let has_door = self
            .grid
            .get(self.position)
            .is_some_and(|room| room.has_door(dir));
        if !has_door {
            return Err(ManorError::NoDoor);
        }

        if self.grid.is_occupied(target) {
            self.enter(target, res);
            return Ok(OpenResult::Moved(target));
        }

        let entry = dir.opposite();
        let level = self.lock_level_at(target);
        if !res.can_open(level) {
            return Err(ManorError::Locked(level));
        }
        if eligible_indices(&self.grid, &self.deck, target, entry).is_empty() {
            tracing::debug!(%target, "dead end");
            return Err(ManorError::NoValidRoom(target));
        }

        res.spend_for_lock(level);
        self.lock_levels.insert(target, LockLevel::Open);
        let candidates = self.draw(target, entry);
        let count = candidates.len();
        tracing::debug!(%target, %entry, %level, count, "draft opened");
        self.state = EngineState::Drafting(Draft {
            target,
            entry,
            lock_level: level,
            candidates,
        });
        Ok(OpenResult::Drafting(count))
    }

    /// Spend one die to replace the current offer. Returns false, keeping
    /// the offer, when no die is available.
    pub fn reroll<R: Resources>(&mut self, res: &mut R) -> Result<bool, ManorError> {
        let (target, entry) = match &self.state {
            EngineState::Drafting(draft) => (draft.target, draft.entry),
            EngineState::Roaming => return Err(ManorError::NotDrafting),
        };
        if !res.use_dice(1) {
            return Ok(false);
        }
        let candidates = self.draw(target, entry);
        tracing::debug!(%target, count = candidates.len(), "draft rerolled");
        match &mut self.state {
            EngineState::Drafting(draft) if !candidates.is_empty() => draft.candidates = candidates,
            _ => {}
        }
        Ok(true)
    }

    /// Place candidate `choice` and walk into it.
    ///
    /// Placement is checked before gems are taken, and nothing changes if
    /// either step fails; the draft stays open for another choice.
    pub fn commit<R: Resources>(&mut self, choice: usize, res: &mut R) -> Result<Pos, ManorError> {
        let EngineState::Drafting(draft) = &self.state else {
            return Err(ManorError::NotDrafting);
        };
        let (target, entry) = (draft.target, draft.entry);
        let candidate = draft
            .candidates
            .get(choice)
            .cloned()
            .ok_or(ManorError::InvalidChoice {
                index: choice,
                available: draft.candidates.len(),
            })?;

        let plan = plan_placement(
            &self.grid,
            &self.deck,
            &candidate.template,
            target,
            entry,
            Some(candidate.orientation),
            self.config.orientation_policy,
            &mut self.rng,
        )?;
        let cost = candidate.template.gem_cost;
        if !res.use_gems(cost) {
            return Err(ManorError::InsufficientGems { needed: cost });
        }
        apply_plan(&mut self.grid, &mut self.deck, &candidate.template, plan)?;
        self.lock_levels.remove(&target);
        self.state = EngineState::Roaming;
        tracing::debug!(room = %candidate.template.name, %target, cost, "draft committed");

        self.enter(target, res);
        Ok(target)
    }

    /// Close the draft without placing anything.
    pub fn cancel(&mut self) -> Result<(), ManorError> {
        match self.state {
            EngineState::Drafting(_) => {
                self.state = EngineState::Roaming;
                Ok(())
            }
            EngineState::Roaming => Err(ManorError::NotDrafting),
        }
    }

    /// Lock level of the door on side `dir`, if it leads to an empty cell.
    ///
    /// The level is rolled on first call and kept, so what is shown here is
    /// what `attempt_open` will ask for.
    pub fn lock_level_toward(&mut self, dir: Direction) -> Option<LockLevel> {
        let here = self.grid.get(self.position)?;
        if !here.has_door(dir) {
            return None;
        }
        let target = self.grid.neighbor(self.position, dir)?;
        if self.grid.is_occupied(target) {
            return None;
        }
        Some(self.lock_level_at(target))
    }

    fn lock_level_at(&mut self, pos: Pos) -> LockLevel {
        if let Some(level) = self.lock_levels.get(&pos) {
            return *level;
        }
        let level = self.locks.level_for_row(pos.row, &mut self.rng);
        self.lock_levels.insert(pos, level);
        level
    }

    fn draw(&mut self, target: Pos, entry: Direction) -> Vec<Candidate> {
        let drawn = draw_candidates(
            &self.grid,
            &self.deck,
            target,
            entry,
            self.config.max_candidates,
            &mut self.rng,
        );
        let policy = self.config.orientation_policy;
        drawn
            .into_iter()
            .filter_map(|template| {
                let options = valid_orientations(&self.grid, &template, target, entry);
                let (orientation, doors) = policy.pick(&options, &mut self.rng)?;
                Some(Candidate {
                    template,
                    orientation,
                    doors,
                })
            })
            .collect()
    }

    fn enter<R: Resources>(&mut self, pos: Pos, res: &mut R) {
        self.position = pos;
        res.use_steps(1);
        if let Some(room) = self.grid.get_mut(pos) {
            res.enter_room(room, &mut self.rng);
        }
        if pos == self.grid.goal() {
            self.finish(GameOutcome::Won);
        } else if res.steps() == 0 {
            self.finish(GameOutcome::Lost);
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        if self.outcome == GameOutcome::InProgress {
            tracing::info!(
                %outcome,
                position = %self.position,
                rooms = self.grid.placed_count(),
                "day over"
            );
            self.outcome = outcome;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Inventory, ResourceKind};
    use crate::manor::LockCurve;
    use crate::room::{Amount, ColorClass, LootItem};

    fn catalog(rooms: Vec<RoomTemplate>) -> RoomCatalog {
        let mut all = vec![
            RoomTemplate::new(
                "Entrance Hall",
                ColorClass::Blue,
                Doors::NORTH | Doors::EAST | Doors::WEST,
            ),
            RoomTemplate::new(
                "Antechamber",
                ColorClass::Blue,
                Doors::EAST | Doors::SOUTH | Doors::WEST,
            ),
        ];
        all.extend(rooms);
        RoomCatalog::new(all, "Entrance Hall", "Antechamber").unwrap()
    }

    fn open_room(name: &str) -> RoomTemplate {
        RoomTemplate::new(name, ColorClass::Blue, Doors::all())
    }

    /// Default layout with every lock between the anchors open
    fn engine(rooms: Vec<RoomTemplate>) -> ManorEngine {
        let config = EngineConfig {
            lock_curve: LockCurve::new(1, 0, 0),
            ..EngineConfig::default()
        };
        ManorEngine::new(&catalog(rooms), config, GameRng::new(7)).unwrap()
    }

    fn rich() -> Inventory {
        Inventory::empty()
            .with(ResourceKind::Steps, 100)
            .with(ResourceKind::Gems, 10)
            .with(ResourceKind::Keys, 10)
    }

    #[test]
    fn test_lock_curve_near_u32_max_opens_middle_rows() {
        let config = EngineConfig::from_json(r#"{ "lock_curve": [4294967295, 1, 0] }"#).unwrap();
        let mut e = ManorEngine::new(&catalog(vec![open_room("A")]), config, GameRng::new(3)).unwrap();
        let mut inv = rich();
        assert_eq!(e.attempt_open(Direction::North, &mut inv), Ok(OpenResult::Drafting(1)));
    }

    #[test]
    fn test_entering_a_room_with_huge_food_loot() {
        let pantry = open_room("Pantry").with_loot(LootItem::Apple, Amount::fixed(4_000_000_000));
        let mut e = engine(vec![pantry]);
        let mut inv = rich();
        e.attempt_open(Direction::North, &mut inv).unwrap();
        assert_eq!(e.commit(0, &mut inv), Ok(Pos::new(7, 2)));
        assert_eq!(inv.steps(), u32::MAX);
    }

    #[test]
    fn test_starts_roaming_at_the_entrance() {
        let e = engine(vec![open_room("A")]);
        assert_eq!(e.position(), Pos::new(8, 2));
        assert_eq!(e.state(), &EngineState::Roaming);
        assert_eq!(e.outcome(), GameOutcome::InProgress);
        assert_eq!(e.deck().len(), 1);
    }

    #[test]
    fn test_wall_and_edge_errors() {
        let mut e = engine(vec![open_room("A")]);
        let mut inv = rich();
        assert_eq!(e.attempt_open(Direction::South, &mut inv), Err(ManorError::OutOfBounds));
        let mut e = ManorEngine::new(
            &catalog(vec![open_room("A")]),
            EngineConfig {
                start: Pos::new(7, 2),
                ..EngineConfig::default()
            },
            GameRng::new(1),
        )
        .unwrap();
        assert_eq!(e.attempt_open(Direction::South, &mut inv), Err(ManorError::NoDoor));
    }

    #[test]
    fn test_open_commit_and_walk_back() {
        let mut e = engine(vec![open_room("A")]);
        let mut inv = rich();

        assert_eq!(e.attempt_open(Direction::North, &mut inv), Ok(OpenResult::Drafting(1)));
        let draft = e.draft().unwrap();
        assert_eq!(draft.target, Pos::new(7, 2));
        assert_eq!(draft.entry, Direction::South);
        assert_eq!(draft.lock_level, LockLevel::Open);

        assert_eq!(e.commit(0, &mut inv), Ok(Pos::new(7, 2)));
        assert_eq!(e.position(), Pos::new(7, 2));
        assert_eq!(e.state(), &EngineState::Roaming);
        assert!(e.deck().is_empty());
        assert_eq!(inv.steps(), 99);

        assert_eq!(e.attempt_open(Direction::South, &mut inv), Ok(OpenResult::Moved(Pos::new(8, 2))));
        assert_eq!(inv.steps(), 98);
    }

    #[test]
    fn test_state_errors() {
        let mut e = engine(vec![open_room("A")]);
        let mut inv = rich();
        assert_eq!(e.commit(0, &mut inv), Err(ManorError::NotDrafting));
        assert_eq!(e.reroll(&mut inv), Err(ManorError::NotDrafting));
        assert_eq!(e.cancel(), Err(ManorError::NotDrafting));

        e.attempt_open(Direction::North, &mut inv).unwrap();
        assert_eq!(e.attempt_open(Direction::East, &mut inv), Err(ManorError::NotRoaming));
        assert_eq!(
            e.commit(5, &mut inv),
            Err(ManorError::InvalidChoice {
                index: 5,
                available: 1
            })
        );
        assert_eq!(e.cancel(), Ok(()));
        assert_eq!(e.deck().len(), 1);
        assert_eq!(e.grid().placed_count(), 2);
    }

    #[test]
    fn test_insufficient_gems_keeps_the_draft() {
        let pricey = open_room("Vault").with_gem_cost(3);
        let mut e = engine(vec![pricey]);
        let mut inv = rich().with(ResourceKind::Gems, 2);
        e.attempt_open(Direction::North, &mut inv).unwrap();
        assert_eq!(e.commit(0, &mut inv), Err(ManorError::InsufficientGems { needed: 3 }));
        assert!(e.draft().is_some());
        assert_eq!(e.deck().len(), 1);
        assert_eq!(inv.get(ResourceKind::Gems), 2);

        inv.add(ResourceKind::Gems, 1);
        e.commit(0, &mut inv).unwrap();
        assert_eq!(inv.get(ResourceKind::Gems), 0);
    }

    #[test]
    fn test_dead_end_costs_nothing() {
        let wall = RoomTemplate::new("Wall", ColorClass::Red, Doors::empty());
        let mut e = engine(vec![wall]);
        let mut inv = rich();
        assert_eq!(
            e.attempt_open(Direction::North, &mut inv),
            Err(ManorError::NoValidRoom(Pos::new(7, 2)))
        );
        assert_eq!(e.state(), &EngineState::Roaming);
        assert_eq!(inv, rich());
    }

    #[test]
    fn test_locked_door_and_memoized_level() {
        let config = EngineConfig {
            lock_curve: LockCurve::new(0, 0, 1),
            ..EngineConfig::default()
        };
        let mut e = ManorEngine::new(
            &catalog(vec![open_room("A"), open_room("B")]),
            config,
            GameRng::new(3),
        )
        .unwrap();
        let mut inv = rich();
        e.attempt_open(Direction::North, &mut inv).unwrap();
        e.commit(0, &mut inv).unwrap();

        let mut broke = Inventory::empty().with(ResourceKind::Steps, 10);
        assert_eq!(e.lock_level_toward(Direction::North), Some(LockLevel::Double));
        assert_eq!(
            e.attempt_open(Direction::North, &mut broke),
            Err(ManorError::Locked(LockLevel::Double))
        );

        let keys_before = inv.get(ResourceKind::Keys);
        e.attempt_open(Direction::North, &mut inv).unwrap();
        assert_eq!(inv.get(ResourceKind::Keys), keys_before - 2);
        e.cancel().unwrap();
        // Paid once, open for good.
        assert_eq!(e.lock_level_toward(Direction::North), Some(LockLevel::Open));
        assert_eq!(e.lock_level_toward(Direction::South), None);
    }

    #[test]
    fn test_reroll_needs_a_die() {
        let rooms = (0..6).map(|i| open_room(&format!("R{i}"))).collect();
        let mut e = engine(rooms);
        let mut inv = rich();
        e.attempt_open(Direction::North, &mut inv).unwrap();
        assert_eq!(e.reroll(&mut inv), Ok(false));
        inv.add(ResourceKind::Dice, 1);
        assert_eq!(e.reroll(&mut inv), Ok(true));
        assert_eq!(inv.get(ResourceKind::Dice), 0);
        assert_eq!(e.draft().unwrap().candidates.len(), 3);
    }

    #[test]
    fn test_reaching_the_goal_wins() {
        let config = EngineConfig {
            rows: 3,
            cols: 1,
            start: Pos::new(2, 0),
            goal: Pos::new(0, 0),
            ..EngineConfig::default()
        };
        let straight = RoomTemplate::new("Hall", ColorClass::Orange, Doors::NORTH | Doors::SOUTH);
        let mut e = ManorEngine::new(&catalog(vec![straight]), config, GameRng::new(2)).unwrap();
        let mut inv = rich();
        e.attempt_open(Direction::North, &mut inv).unwrap();
        e.commit(0, &mut inv).unwrap();
        assert_eq!(e.outcome(), GameOutcome::InProgress);
        assert_eq!(e.attempt_open(Direction::North, &mut inv), Ok(OpenResult::Moved(Pos::new(0, 0))));
        assert_eq!(e.outcome(), GameOutcome::Won);
        assert_eq!(e.attempt_open(Direction::South, &mut inv), Err(ManorError::GameOver));
    }

    #[test]
    fn test_running_out_of_steps_loses() {
        let mut e = engine(vec![open_room("A")]);
        let mut inv = rich().with(ResourceKind::Steps, 1);
        e.attempt_open(Direction::North, &mut inv).unwrap();
        e.commit(0, &mut inv).unwrap();
        assert_eq!(inv.steps(), 0);
        assert_eq!(e.outcome(), GameOutcome::Lost);
        assert_eq!(e.attempt_open(Direction::South, &mut inv), Err(ManorError::GameOver));
    }
}
