use tracing::trace;

use crate::modules::capability::{Emitter, Tile};
use crate::modules::direction::{Direction, Position};

/// Neighbor lookup supplied by the world that owns the nodes.
pub trait SpatialGrid {
    /// The cell adjacent to `position` through `side`, if anything is there.
    fn neighbor_at(&mut self, position: Position, side: Direction) -> Option<&mut dyn Tile>;
}

/// A neighbor reached through one of the origin's faces.
pub struct Contact<'g> {
    /// Face of the origin the energy leaves through.
    pub side: Direction,
    /// Face of the neighbor the energy arrives through.
    pub arrival: Direction,
    pub tile: &'g mut dyn Tile,
}

/// Walks the faces of one origin in routing order.
pub struct Resolver<'o> {
    origin: &'o dyn Emitter,
    position: Position,
    next: usize,
}

impl<'o> Resolver<'o> {
    /// `None` when the origin is not placed anywhere.
    pub fn new(origin: &'o dyn Emitter) -> Option<Self> {
        let position = origin.position()?;
        Some(Self {
            origin,
            position,
            next: 0,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Next face worth contacting, or `None` once every face was visited or
    /// `used` has reached `requested`.
    pub fn next_side(&mut self, used: u64, requested: u64) -> Option<Direction> {
        while let Some(&side) = Direction::VALID.get(self.next) {
            if used >= requested {
                trace!(used, requested, "budget spent, stopping");
                self.next = Direction::VALID.len();
                return None;
            }
            self.next += 1;
            if !self.origin.offers_output_to(side) {
                trace!(%side, "origin does not output on this side");
                continue;
            }
            return Some(side);
        }
        None
    }

    /// Resolves the neighbor through `side`.
    pub fn lookup<'g, G>(&self, grid: &'g mut G, side: Direction) -> Option<Contact<'g>>
    where
        G: SpatialGrid + ?Sized,
    {
        let arrival = side.opposite();
        match grid.neighbor_at(self.position, side) {
            Some(tile) => Some(Contact {
                side,
                arrival,
                tile,
            }),
            None => {
                trace!(%side, position = %self.position, "no neighbor");
                None
            }
        }
    }
}
