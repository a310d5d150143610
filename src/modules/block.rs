use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modules::capability::{
    Binding, ColorTag, Emitter, EnergyConnected, EnergyReceiver, EnergySink, Tile,
};
use crate::modules::color::WILDCARD;
use crate::modules::direction::{Direction, Position, SideMask};

fn wildcard() -> ColorTag {
    WILDCARD
}

fn all_sides() -> SideMask {
    SideMask::ALL
}

fn unlimited() -> u64 {
    u64::MAX
}

/// Native node with an energy buffer. Emits when it has an output voltage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    #[serde(default = "wildcard")]
    pub color: ColorTag,
    #[serde(default = "all_sides")]
    pub inputs: SideMask,
    #[serde(default)]
    pub outputs: SideMask,
    #[serde(default)]
    pub stored: u64,
    pub capacity: u64,
    #[serde(default = "unlimited")]
    pub max_input_voltage: u64,
    #[serde(default = "unlimited")]
    pub max_input_amperage: u64,
    #[serde(default)]
    pub output_voltage: u64,
    #[serde(default)]
    pub output_amperage: u64,
    #[serde(skip)]
    received_this_tick: u64,
}

impl Machine {
    /// Wildcard consumer accepting on every side.
    pub fn consumer(capacity: u64) -> Self {
        Self {
            color: WILDCARD,
            inputs: SideMask::ALL,
            outputs: SideMask::NONE,
            stored: 0,
            capacity,
            max_input_voltage: u64::MAX,
            max_input_amperage: u64::MAX,
            output_voltage: 0,
            output_amperage: 0,
            received_this_tick: 0,
        }
    }

    /// Wildcard generator emitting on every side, starting full.
    pub fn generator(voltage: u64, amperage: u64, capacity: u64) -> Self {
        Self {
            inputs: SideMask::NONE,
            outputs: SideMask::ALL,
            stored: capacity,
            output_voltage: voltage,
            output_amperage: amperage,
            ..Self::consumer(capacity)
        }
    }

    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = color;
        self
    }

    pub fn with_inputs(mut self, inputs: SideMask) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: SideMask) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_input_limits(mut self, max_voltage: u64, max_amperage: u64) -> Self {
        self.max_input_voltage = max_voltage;
        self.max_input_amperage = max_amperage;
        self
    }

    pub fn with_stored(mut self, stored: u64) -> Self {
        self.stored = stored;
        self
    }

    pub fn free_space(&self) -> u64 {
        self.capacity.saturating_sub(self.stored)
    }

    pub fn received_this_tick(&self) -> u64 {
        self.received_this_tick
    }

    pub fn is_emitter(&self) -> bool {
        self.output_voltage > 0 && self.output_amperage > 0 && !self.outputs.is_empty()
    }

    /// Units the machine can put on the wire right now.
    pub fn available_amperage(&self) -> u64 {
        if self.output_voltage == 0 {
            return 0;
        }
        self.output_amperage
            .min(self.stored / self.output_voltage)
    }

    pub(crate) fn start_tick(&mut self) {
        self.received_this_tick = 0;
    }

    pub(crate) fn drain(&mut self, voltage: u64, amperage: u64) {
        self.stored = self
            .stored
            .saturating_sub(voltage.saturating_mul(amperage));
    }
}

impl EnergyConnected for Machine {
    fn try_absorb(&mut self, side: Direction, voltage: u64, amperage: u64) -> u64 {
        if amperage == 0 {
            return 0;
        }
        if side.is_valid() && !self.inputs.contains(side) {
            return 0;
        }
        if voltage > self.max_input_voltage {
            return 0;
        }

        let by_space = match voltage {
            0 => amperage,
            v => self.free_space() / v,
        };
        let by_rate = self
            .max_input_amperage
            .saturating_sub(self.received_this_tick);
        let taken = amperage.min(by_space).min(by_rate);

        self.stored = self.stored.saturating_add(voltage.saturating_mul(taken));
        self.received_this_tick += taken;
        taken
    }

    fn accepts_input_from(&self, side: Direction) -> bool {
        self.inputs.contains(side)
    }

    fn offers_output_to(&self, side: Direction) -> bool {
        self.outputs.contains(side)
    }

    fn color_tag(&self) -> ColorTag {
        self.color
    }
}

/// A machine lifted out of the grid so it can emit into it.
#[derive(Debug)]
pub(crate) struct Placed {
    pub position: Position,
    pub machine: Machine,
}

impl EnergyConnected for Placed {
    fn try_absorb(&mut self, side: Direction, voltage: u64, amperage: u64) -> u64 {
        self.machine.try_absorb(side, voltage, amperage)
    }

    fn accepts_input_from(&self, side: Direction) -> bool {
        self.machine.accepts_input_from(side)
    }

    fn offers_output_to(&self, side: Direction) -> bool {
        self.machine.offers_output_to(side)
    }

    fn color_tag(&self) -> ColorTag {
        self.machine.color_tag()
    }
}

impl Emitter for Placed {
    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

/// Foreign node speaking the legacy demand-driven protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySink {
    #[serde(default = "all_sides")]
    pub accepts: SideMask,
    #[serde(default)]
    pub stored: u64,
    pub capacity: u64,
    /// Largest packet taken in one injection; bigger packets are cut short.
    #[serde(default = "unlimited")]
    pub max_packet: u64,
}

impl LegacySink {
    pub fn new(capacity: u64) -> Self {
        Self {
            accepts: SideMask::ALL,
            stored: 0,
            capacity,
            max_packet: u64::MAX,
        }
    }

    pub fn with_max_packet(mut self, max_packet: u64) -> Self {
        self.max_packet = max_packet;
        self
    }
}

impl EnergySink for LegacySink {
    fn accepts_energy_from(&self, _emitter: &dyn Emitter, side: Direction) -> bool {
        self.accepts.contains(side)
    }

    fn demanded_energy(&self) -> u64 {
        self.capacity.saturating_sub(self.stored)
    }

    // The buffer may overfill by up to one packet.
    fn inject_energy(&mut self, _side: Direction, voltage: u64, simulate: bool) -> u64 {
        let taken = voltage.min(self.max_packet);
        if !simulate {
            self.stored = self.stored.saturating_add(taken);
        }
        taken
    }
}

/// Foreign node speaking the rate-based protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateReceiver {
    #[serde(default = "all_sides")]
    pub accepts: SideMask,
    #[serde(default)]
    pub stored: i32,
    pub capacity: i32,
    #[serde(default = "max_rate")]
    pub max_receive: i32,
}

fn max_rate() -> i32 {
    i32::MAX
}

impl RateReceiver {
    pub fn new(capacity: i32) -> Self {
        Self {
            accepts: SideMask::ALL,
            stored: 0,
            capacity,
            max_receive: i32::MAX,
        }
    }

    pub fn with_max_receive(mut self, max_receive: i32) -> Self {
        self.max_receive = max_receive;
        self
    }
}

impl EnergyReceiver for RateReceiver {
    fn receive_energy(&mut self, side: Direction, amount: i32, simulate: bool) -> i32 {
        if amount <= 0 || !self.accepts.contains(side) {
            return 0;
        }
        let room = self.capacity.saturating_sub(self.stored).max(0);
        let taken = amount.min(self.max_receive).min(room);
        if !simulate {
            self.stored += taken;
        }
        taken
    }
}

/// Contents of one grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Machine(Machine),
    Sink(LegacySink),
    Receiver(RateReceiver),
    Inert,
}

impl Block {
    pub const fn label(&self) -> &'static str {
        match self {
            Block::Machine(_) => "machine",
            Block::Sink(_) => "sink",
            Block::Receiver(_) => "receiver",
            Block::Inert => "inert",
        }
    }

    pub fn as_machine(&self) -> Option<&Machine> {
        match self {
            Block::Machine(machine) => Some(machine),
            _ => None,
        }
    }

    pub fn is_emitter(&self) -> bool {
        self.as_machine().is_some_and(Machine::is_emitter)
    }

    /// Energy held by the block, in its own unit.
    pub fn stored(&self) -> i64 {
        match self {
            Block::Machine(machine) => i64::try_from(machine.stored).unwrap_or(i64::MAX),
            Block::Sink(sink) => i64::try_from(sink.stored).unwrap_or(i64::MAX),
            Block::Receiver(receiver) => i64::from(receiver.stored),
            Block::Inert => 0,
        }
    }

    pub(crate) fn start_tick(&mut self) {
        if let Block::Machine(machine) = self {
            machine.start_tick();
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl Tile for Block {
    fn bind(&mut self) -> Binding<'_> {
        match self {
            Block::Machine(machine) => Binding::Native(machine),
            Block::Sink(sink) => Binding::LegacySink(sink),
            Block::Receiver(receiver) => Binding::RateReceiver(receiver),
            Block::Inert => Binding::Ineligible,
        }
    }
}
