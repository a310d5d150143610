use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::modules::block::{Block, Placed};
use crate::modules::capability::Tile;
use crate::modules::config::InteropConfig;
use crate::modules::direction::{Direction, Position};
use crate::modules::error::{Error, Result};
use crate::modules::network::EnergyNet;
use crate::modules::topology::SpatialGrid;

/// Outcome of one emitter pushing into its neighbors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Emission {
    pub position: Position,
    pub voltage: u64,
    pub offered: u64,
    pub used: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub emissions: Vec<Emission>,
}

impl TickReport {
    pub fn total_used(&self) -> u64 {
        self.emissions.iter().map(|e| e.used).sum()
    }
}

/// Sparse voxel grid of blocks that routes power between neighbors.
#[derive(Debug, Default)]
pub struct World {
    blocks: HashMap<Position, Block>,
    net: EnergyNet,
    tick: u64,
}

impl World {
    pub fn new(config: InteropConfig) -> Self {
        Self {
            blocks: HashMap::new(),
            net: EnergyNet::new(config),
            tick: 0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &InteropConfig {
        self.net.config()
    }

    pub fn place(&mut self, position: Position, block: Block) -> Result<()> {
        if self.blocks.contains_key(&position) {
            return Err(Error::DuplicatePosition(position));
        }
        self.blocks.insert(position, block);
        Ok(())
    }

    pub fn block(&self, position: Position) -> Option<&Block> {
        self.blocks.get(&position)
    }

    /// Blocks ordered by position.
    pub fn blocks(&self) -> Vec<(Position, &Block)> {
        let mut blocks: Vec<_> = self.blocks.iter().map(|(p, b)| (*p, b)).collect();
        blocks.sort_by_key(|(p, _)| *p);
        blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Runs one distribution from the machine at `position`.
    ///
    /// The machine is taken out of the grid for the duration of the call and
    /// pays `voltage * used` from its buffer afterwards.
    pub fn emit(&mut self, position: Position) -> Result<Emission> {
        let block = self
            .blocks
            .remove(&position)
            .ok_or(Error::EmptyCell(position))?;
        let machine = match block {
            Block::Machine(machine) => machine,
            other => {
                self.blocks.insert(position, other);
                return Err(Error::NotAnEmitter(position));
            }
        };

        let mut placed = Placed { position, machine };
        let voltage = placed.machine.output_voltage;
        let offered = placed.machine.available_amperage();
        let net = self.net;
        let used = if offered == 0 {
            0
        } else {
            net.distribute(self, &placed, voltage, offered)
        };
        placed.machine.drain(voltage, used);
        self.blocks.insert(position, Block::Machine(placed.machine));

        Ok(Emission {
            position,
            voltage,
            offered,
            used,
        })
    }

    /// Advances one tick: clears per-tick input counters, then lets every
    /// emitter distribute in position order.
    pub fn step(&mut self) -> Result<TickReport> {
        self.tick += 1;
        for block in self.blocks.values_mut() {
            block.start_tick();
        }

        let mut emitters: Vec<Position> = self
            .blocks
            .iter()
            .filter(|(_, block)| block.is_emitter())
            .map(|(position, _)| *position)
            .collect();
        emitters.sort();

        let mut emissions = Vec::with_capacity(emitters.len());
        for position in emitters {
            emissions.push(self.emit(position)?);
        }

        let report = TickReport {
            tick: self.tick,
            emissions,
        };
        info!(
            tick = report.tick,
            emitters = report.emissions.len(),
            used = report.total_used(),
            "tick complete"
        );
        Ok(report)
    }
}

impl SpatialGrid for World {
    fn neighbor_at(&mut self, position: Position, side: Direction) -> Option<&mut dyn Tile> {
        let neighbor = position.checked_step(side)?;
        self.blocks
            .get_mut(&neighbor)
            .map(|block| block as &mut dyn Tile)
    }
}
