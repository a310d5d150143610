use tracing::{debug, trace};

use crate::modules::adapter;
use crate::modules::capability::{Binding, Emitter};
use crate::modules::color;
use crate::modules::config::InteropConfig;
use crate::modules::topology::{Resolver, SpatialGrid};

/// Pushes power from one emitter into its adjacent cells.
///
/// The network keeps no state between calls besides its interop switches;
/// every neighbor is re-resolved and re-bound on each distribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnergyNet {
    config: InteropConfig,
}

impl EnergyNet {
    pub fn new(config: InteropConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InteropConfig {
        &self.config
    }

    /// Offers `amperage` units of `voltage` to the neighbors of `origin` and
    /// returns how many units were taken in total.
    ///
    /// Neighbors are visited in [`Direction::VALID`] order and the walk stops
    /// as soon as the budget is used up. The result never exceeds `amperage`.
    /// An origin without a position distributes nothing.
    ///
    /// [`Direction::VALID`]: crate::Direction::VALID
    pub fn distribute<G>(
        &self,
        grid: &mut G,
        origin: &dyn Emitter,
        voltage: u64,
        amperage: u64,
    ) -> u64
    where
        G: SpatialGrid + ?Sized,
    {
        let Some(mut resolver) = Resolver::new(origin) else {
            debug!("origin has no position; nothing distributed");
            return 0;
        };

        let origin_color = origin.color_tag();
        let mut used = 0u64;
        while let Some(side) = resolver.next_side(used, amperage) {
            let Some(contact) = resolver.lookup(grid, side) else {
                continue;
            };
            let remaining = amperage - used;
            let arrival = contact.arrival;

            let accepted = match contact.tile.bind() {
                Binding::Native(node) => {
                    let neighbor_color = node.color_tag();
                    if !color::compatible(origin_color, neighbor_color) {
                        trace!(%side, origin_color, neighbor_color, "color mismatch");
                        continue;
                    }
                    adapter::inject_native(node, arrival, voltage, remaining)
                }
                Binding::LegacySink(sink) => {
                    adapter::inject_legacy(sink, origin, arrival, voltage, remaining)
                }
                Binding::RateReceiver(receiver) if self.config.foreign_receiver_enabled => {
                    adapter::inject_receiver(
                        receiver,
                        arrival,
                        voltage,
                        self.config.conversion_rate_percent,
                    )
                }
                binding => {
                    trace!(%side, binding = binding.label(), "neighbor not eligible");
                    continue;
                }
            };
            used += accepted.min(remaining);
        }

        debug!(
            position = %resolver.position(),
            voltage,
            requested = amperage,
            used,
            "distribution finished"
        );
        used
    }
}
