//! The manor grid
//!
//! A fixed `rows × cols` matrix addressed as `(row, col)`, row 0 at the top.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::room::{Direction, Doors, Orientation, PlacedRoom, RoomTemplate};

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// One step in `dir`, or None when that leaves a `rows × cols` grid.
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Pos { row, col })
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Matrix of optional placed rooms with two permanent anchors.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<PlacedRoom>>,
    start: Pos,
    goal: Pos,
}

impl Grid {
    /// Create a grid with the entrance at `start` and the goal room at `goal`.
    ///
    /// Anchors sit at orientation 0; doors that would lead off the grid are
    /// closed, and so are facing doors that disagree if the anchors touch.
    pub fn new(
        rows: usize,
        cols: usize,
        start: Pos,
        goal: Pos,
        entrance: &RoomTemplate,
        goal_room: &RoomTemplate,
    ) -> Result<Self, ConfigError> {
        if rows < 2 || cols < 1 {
            return Err(ConfigError::GridTooSmall { rows, cols });
        }
        for (which, pos) in [("start", start), ("goal", goal)] {
            if pos.row >= rows || pos.col >= cols {
                return Err(ConfigError::AnchorOutOfBounds {
                    which,
                    pos,
                    rows,
                    cols,
                });
            }
        }
        if start == goal {
            return Err(ConfigError::AnchorsOverlap(start));
        }

        let mut grid = Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            start,
            goal,
        };

        let mut start_doors = grid.inbound_doors(start, entrance.doors);
        let mut goal_doors = grid.inbound_doors(goal, goal_room.doors);
        if let Some(side) = Direction::ALL
            .into_iter()
            .find(|d| start.step(*d, rows, cols) == Some(goal))
        {
            if start_doors.is_open(side) != goal_doors.is_open(side.opposite()) {
                start_doors.remove(side.door());
                goal_doors.remove(side.opposite().door());
            }
        }

        grid.place(
            start,
            PlacedRoom::new(entrance.clone(), Orientation::default(), start_doors),
        );
        grid.place(
            goal,
            PlacedRoom::new(goal_room.clone(), Orientation::default(), goal_doors),
        );
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// True for cells on the outer ring
    pub fn is_border(&self, pos: Pos) -> bool {
        pos.row == 0 || pos.col == 0 || pos.row == self.rows - 1 || pos.col == self.cols - 1
    }

    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        pos.step(dir, self.rows, self.cols)
    }

    pub fn get(&self, pos: Pos) -> Option<&PlacedRoom> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// Mutable access for the enter hook; the grid keeps ownership.
    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut PlacedRoom> {
        self.index(pos).and_then(|i| self.cells[i].as_mut())
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.get(pos).is_some()
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, &PlacedRoom)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|room| (Pos::new(i / cols, i % cols), room))
        })
    }

    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Empty cells that an open door of a placed room leads into.
    pub fn frontier(&self) -> Vec<(Pos, Direction)> {
        let mut out = Vec::new();
        for (pos, room) in self.occupied() {
            for side in room.doors().open_sides() {
                if let Some(next) = self.neighbor(pos, side) {
                    if !self.is_occupied(next) {
                        out.push((next, side.opposite()));
                    }
                }
            }
        }
        out
    }

    /// `doors` with every side that leads off the grid closed.
    pub fn inbound_doors(&self, pos: Pos, doors: Doors) -> Doors {
        doors
            .open_sides()
            .filter(|d| self.neighbor(pos, *d).is_some())
            .fold(Doors::empty(), |acc, d| acc | d.door())
    }

    pub(crate) fn place(&mut self, pos: Pos, room: PlacedRoom) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = Some(room);
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.row * self.cols + pos.col)
    }
}
