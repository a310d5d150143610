//! Contracts a grid cell can expose to the energy network.
//!
//! A cell is probed once per distribution call through [`Tile::bind`], which
//! reports the single protocol the network should use to talk to it.

use crate::modules::direction::{Direction, Position};

/// Color tag of a native node. Negative values are wildcards.
pub type ColorTag = i8;

/// First-class participant of the energy network.
pub trait EnergyConnected {
    /// Offers `amperage` units of `voltage` arriving through `side` and
    /// returns how many units were taken.
    ///
    /// Must never return more than `amperage`, and must be a no-op returning
    /// 0 when `amperage` is 0. `side` may be [`Direction::Unknown`] for
    /// sideless injection, in which case side checks are skipped.
    fn try_absorb(&mut self, side: Direction, voltage: u64, amperage: u64) -> u64;

    fn accepts_input_from(&self, side: Direction) -> bool;

    fn offers_output_to(&self, side: Direction) -> bool;

    fn color_tag(&self) -> ColorTag;
}

/// A native node that can originate a distribution.
pub trait Emitter: EnergyConnected {
    /// Cell the emitter occupies, if it is placed in a grid.
    fn position(&self) -> Option<Position>;
}

/// Legacy demand-driven protocol: energy is pushed one packet at a time.
pub trait EnergySink {
    fn accepts_energy_from(&self, emitter: &dyn Emitter, side: Direction) -> bool;

    /// Energy the sink still wants this tick.
    fn demanded_energy(&self) -> u64;

    /// Pushes one packet of `voltage` and returns the amount accepted.
    fn inject_energy(&mut self, side: Direction, voltage: u64, simulate: bool) -> u64;
}

/// Rate-based protocol measured in a foreign unit.
pub trait EnergyReceiver {
    /// Returns the amount accepted, or that would be accepted when
    /// `simulate` is set.
    fn receive_energy(&mut self, side: Direction, amount: i32, simulate: bool) -> i32;
}

/// The protocol a resolved neighbor speaks this call.
pub enum Binding<'a> {
    Native(&'a mut dyn EnergyConnected),
    LegacySink(&'a mut dyn EnergySink),
    RateReceiver(&'a mut dyn EnergyReceiver),
    Ineligible,
}

impl Binding<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Binding::Native(_) => "native",
            Binding::LegacySink(_) => "legacy_sink",
            Binding::RateReceiver(_) => "rate_receiver",
            Binding::Ineligible => "ineligible",
        }
    }
}

/// Anything that can occupy a grid cell.
///
/// Implementors speaking more than one protocol should prefer native, then
/// legacy sink, then rate receiver.
pub trait Tile {
    fn bind(&mut self) -> Binding<'_>;
}
