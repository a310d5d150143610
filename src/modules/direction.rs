use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One face of a grid cell, plus the sideless `Unknown` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
    /// No specific side. Valid for sideless accounting, never for routing.
    Unknown,
}

impl Direction {
    /// The cardinal directions in routing order.
    pub const VALID: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The face that sees a transfer arriving through `self`.
    ///
    /// # Panics
    ///
    /// Panics on [`Direction::Unknown`]; no routing path may produce one.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::Unknown => panic!("Direction::Unknown has no opposite"),
        }
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self, Direction::Unknown)
    }

    /// Unit step `(dx, dy, dz)` for this face.
    pub const fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
            Direction::Unknown => (0, 0, 0),
        }
    }

    /// Bit used by [`SideMask`]. `Unknown` has none.
    const fn bit(self) -> u8 {
        match self {
            Direction::Down => 1 << 0,
            Direction::Up => 1 << 1,
            Direction::North => 1 << 2,
            Direction::South => 1 << 3,
            Direction::West => 1 << 4,
            Direction::East => 1 << 5,
            Direction::Unknown => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
            Direction::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Set of cardinal faces. Serializes as a list of direction names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Direction>", into = "Vec<Direction>")]
pub struct SideMask(u8);

impl SideMask {
    pub const NONE: SideMask = SideMask(0);
    pub const ALL: SideMask = SideMask(0b11_1111);

    pub const fn only(side: Direction) -> Self {
        SideMask(side.bit())
    }

    pub const fn with(self, side: Direction) -> Self {
        SideMask(self.0 | side.bit())
    }

    /// `Unknown` is never a member.
    pub const fn contains(self, side: Direction) -> bool {
        side.is_valid() && self.0 & side.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::VALID
            .into_iter()
            .filter(move |side| self.contains(*side))
    }
}

impl FromIterator<Direction> for SideMask {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(SideMask::NONE, SideMask::with)
    }
}

impl From<Vec<Direction>> for SideMask {
    fn from(sides: Vec<Direction>) -> Self {
        sides.into_iter().collect()
    }
}

impl From<SideMask> for Vec<Direction> {
    fn from(mask: SideMask) -> Self {
        mask.iter().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn origin() -> Self {
        Self { x: 0, y: 0, z: 0 }
    }

    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// The adjacent cell through `side`, or `None` past the edge of the
    /// coordinate space. `Unknown` yields `self`.
    pub fn checked_step(self, side: Direction) -> Option<Self> {
        let (dx, dy, dz) = side.delta();
        self.checked_offset(dx, dy, dz)
    }

    /// Like [`Position::checked_step`], for cells away from the coordinate edge.
    ///
    /// # Panics
    ///
    /// Panics when the step leaves the `i32` coordinate space.
    pub fn step(self, side: Direction) -> Self {
        match self.checked_step(side) {
            Some(next) => next,
            None => panic!("{self} has no neighbor to the {side}"),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<_> = s.trim().split(',').collect();
        if parts.len() != 3 {
            return Err("Position must be formatted as x,y,z".into());
        }

        let x = parts[0]
            .trim()
            .parse::<i32>()
            .map_err(|_| "x must be an integer")?;
        let y = parts[1]
            .trim()
            .parse::<i32>()
            .map_err(|_| "y must be an integer")?;
        let z = parts[2]
            .trim()
            .parse::<i32>()
            .map_err(|_| "z must be an integer")?;

        Ok(Position { x, y, z })
    }
}
