//! Compass sides, door masks and quarter-turn rotation

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// One of the four sides of a room, in clockwise order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All sides, clockwise from North
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Index into a N,E,S,W ordered array
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Row/column delta of one step in this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// The door flag on this side
    pub const fn door(self) -> Doors {
        match self {
            Direction::North => Doors::NORTH,
            Direction::East => Doors::EAST,
            Direction::South => Doors::SOUTH,
            Direction::West => Doors::WEST,
        }
    }
}

bitflags! {
    /// Open doors of a room, one bit per side.
    ///
    /// Bits follow clockwise order so a quarter turn is a 4-bit rotate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Doors: u8 {
        const NORTH = 0b0001;
        const EAST = 0b0010;
        const SOUTH = 0b0100;
        const WEST = 0b1000;
    }
}

impl Serialize for Doors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Doors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let sides = <[bool; 4]>::deserialize(deserializer)?;
        Ok(Doors::from_array(sides))
    }
}

impl Doors {
    /// Build from booleans ordered North, East, South, West.
    pub fn from_array(sides: [bool; 4]) -> Self {
        Direction::iter()
            .filter(|d| sides[d.index()])
            .fold(Doors::empty(), |acc, d| acc | d.door())
    }

    /// Booleans ordered North, East, South, West.
    pub fn to_array(self) -> [bool; 4] {
        Direction::ALL.map(|d| self.is_open(d))
    }

    pub fn is_open(self, side: Direction) -> bool {
        self.contains(side.door())
    }

    /// Sides with an open door, clockwise from North.
    pub fn open_sides(self) -> impl Iterator<Item = Direction> {
        Direction::iter().filter(move |d| self.is_open(*d))
    }

    /// Rotate clockwise by the given orientation.
    pub fn rotated(self, orientation: Orientation) -> Self {
        let k = orientation.quarter_turns() as u32;
        let bits = self.bits() as u32;
        let turned = ((bits << k) | (bits >> ((4 - k) % 4))) & 0b1111;
        Doors::from_bits_truncate(turned as u8)
    }

    /// Compact N/E/S/W label such as "N-S-" for logs and snapshots.
    pub fn label(self) -> String {
        Direction::ALL
            .iter()
            .map(|d| {
                if self.is_open(*d) {
                    match d {
                        Direction::North => 'N',
                        Direction::East => 'E',
                        Direction::South => 'S',
                        Direction::West => 'W',
                    }
                } else {
                    '-'
                }
            })
            .collect()
    }
}

/// Quarter turns clockwise applied to a canonical door mask (0..=3).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Orientation(u8);

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation(0),
        Orientation(1),
        Orientation(2),
        Orientation(3),
    ];

    /// Wraps any turn count into 0..=3
    pub const fn new(quarter_turns: u8) -> Self {
        Orientation(quarter_turns % 4)
    }

    pub const fn quarter_turns(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Orientation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 4 {
            Ok(Orientation(value))
        } else {
            Err(format!("orientation must be 0..=3, got {value}"))
        }
    }
}

impl From<Orientation> for u8 {
    fn from(o: Orientation) -> u8 {
        o.0
    }
}
