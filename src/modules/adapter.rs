//! Per-protocol transfer strategies.
//!
//! Each adapter hands power to one neighbor and returns the number of units
//! it consumed. None of them ever returns more than the amperage it was
//! given.

use tracing::{debug, warn};

use crate::modules::capability::{Emitter, EnergyConnected, EnergyReceiver, EnergySink};
use crate::modules::direction::Direction;

/// Offers every remaining unit to a native node in one call.
pub fn inject_native(
    node: &mut dyn EnergyConnected,
    arrival: Direction,
    voltage: u64,
    amperage: u64,
) -> u64 {
    let used = node.try_absorb(arrival, voltage, amperage);
    if used > amperage {
        warn!(used, offered = amperage, %arrival, "native node over-reported; clamping");
        return amperage;
    }
    debug!(used, offered = amperage, %arrival, "native transfer");
    used
}

/// Pushes whole packets into a legacy sink until its demand or the budget
/// runs out.
///
/// A packet the sink only partly takes ends the transfer and is not
/// counted, even though the accepted part stays with the sink.
pub fn inject_legacy(
    sink: &mut dyn EnergySink,
    emitter: &dyn Emitter,
    arrival: Direction,
    voltage: u64,
    amperage: u64,
) -> u64 {
    if !sink.accepts_energy_from(emitter, arrival) {
        debug!(%arrival, "legacy sink refuses this side");
        return 0;
    }

    let mut used = 0;
    while used < amperage && sink.demanded_energy() > 0 {
        let accepted = sink.inject_energy(arrival, voltage, false);
        if accepted != voltage {
            debug!(accepted, voltage, used, "legacy sink took a partial packet");
            break;
        }
        used += 1;
    }
    debug!(used, offered = amperage, %arrival, "legacy transfer");
    used
}

/// Converts `voltage` into the receiver's unit, saturating at `i32::MAX`.
pub fn convert_voltage(voltage: u64, rate_percent: u32) -> i32 {
    let scaled = voltage.saturating_mul(u64::from(rate_percent)) / 100;
    i32::try_from(scaled).unwrap_or(i32::MAX)
}

/// Sends one packet to a rate-based receiver if it would take all of it.
///
/// Returns 1 on a committed transfer and 0 otherwise; a partial simulated
/// result never leads to a commit.
pub fn inject_receiver(
    receiver: &mut dyn EnergyReceiver,
    arrival: Direction,
    voltage: u64,
    rate_percent: u32,
) -> u64 {
    let amount = convert_voltage(voltage, rate_percent);
    let simulated = receiver.receive_energy(arrival, amount, true);
    if simulated != amount {
        debug!(simulated, amount, %arrival, "receiver would not take a full packet");
        return 0;
    }
    receiver.receive_energy(arrival, amount, false);
    debug!(amount, %arrival, "receiver transfer");
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::capability::ColorTag;
    use crate::modules::direction::Position;

    struct Origin;

    impl EnergyConnected for Origin {
        fn try_absorb(&mut self, _: Direction, _: u64, _: u64) -> u64 {
            0
        }

        fn accepts_input_from(&self, _: Direction) -> bool {
            false
        }

        fn offers_output_to(&self, _: Direction) -> bool {
            true
        }

        fn color_tag(&self) -> ColorTag {
            -1
        }
    }

    impl Emitter for Origin {
        fn position(&self) -> Option<Position> {
            Some(Position::origin())
        }
    }

    struct Greedy {
        claims: u64,
    }

    impl EnergyConnected for Greedy {
        fn try_absorb(&mut self, _: Direction, _: u64, _: u64) -> u64 {
            self.claims
        }

        fn accepts_input_from(&self, _: Direction) -> bool {
            true
        }

        fn offers_output_to(&self, _: Direction) -> bool {
            false
        }

        fn color_tag(&self) -> ColorTag {
            -1
        }
    }

    struct Sink {
        accepts: bool,
        demand: u64,
        packet_limit: u64,
        received: u64,
        injections: u32,
    }

    impl Sink {
        fn new(demand: u64, packet_limit: u64) -> Self {
            Self {
                accepts: true,
                demand,
                packet_limit,
                received: 0,
                injections: 0,
            }
        }
    }

    impl EnergySink for Sink {
        fn accepts_energy_from(&self, _: &dyn Emitter, _: Direction) -> bool {
            self.accepts
        }

        fn demanded_energy(&self) -> u64 {
            self.demand
        }

        fn inject_energy(&mut self, _: Direction, voltage: u64, simulate: bool) -> u64 {
            let taken = voltage.min(self.packet_limit);
            if !simulate {
                self.injections += 1;
                self.received += taken;
                self.demand = self.demand.saturating_sub(taken);
            }
            taken
        }
    }

    struct Receiver {
        room: i32,
        calls: Vec<(i32, bool)>,
    }

    impl EnergyReceiver for Receiver {
        fn receive_energy(&mut self, _: Direction, amount: i32, simulate: bool) -> i32 {
            self.calls.push((amount, simulate));
            let taken = amount.min(self.room);
            if !simulate {
                self.room -= taken;
            }
            taken
        }
    }

    #[test]
    fn native_result_is_clamped_to_the_offer() {
        let mut node = Greedy { claims: 9 };
        assert_eq!(inject_native(&mut node, Direction::Up, 32, 3), 3);

        let mut honest = Greedy { claims: 2 };
        assert_eq!(inject_native(&mut honest, Direction::Up, 32, 3), 2);
    }

    #[test]
    fn legacy_stops_when_demand_is_met() {
        let mut sink = Sink::new(64, u64::MAX);
        let used = inject_legacy(&mut sink, &Origin, Direction::West, 32, 10);
        assert_eq!(used, 2);
        assert_eq!(sink.injections, 2);
        assert_eq!(sink.demand, 0);
    }

    #[test]
    fn legacy_stops_when_budget_is_spent() {
        let mut sink = Sink::new(1_000, u64::MAX);
        assert_eq!(inject_legacy(&mut sink, &Origin, Direction::West, 32, 3), 3);
        assert_eq!(sink.received, 96);
    }

    #[test]
    fn legacy_partial_packet_is_kept_but_not_counted() {
        let mut sink = Sink::new(1_000, 20);
        let used = inject_legacy(&mut sink, &Origin, Direction::West, 32, 4);
        assert_eq!(used, 0);
        assert_eq!(sink.injections, 1);
        assert_eq!(sink.received, 20);
    }

    #[test]
    fn legacy_refusing_side_gets_nothing() {
        let mut sink = Sink::new(1_000, u64::MAX);
        sink.accepts = false;
        assert_eq!(inject_legacy(&mut sink, &Origin, Direction::West, 32, 4), 0);
        assert_eq!(sink.injections, 0);
    }

    #[test]
    fn conversion_scales_and_saturates() {
        assert_eq!(convert_voltage(32, 360), 115);
        assert_eq!(convert_voltage(100, 100), 100);
        assert_eq!(convert_voltage(u64::MAX, 360), i32::MAX);
        assert_eq!(convert_voltage(10_000_000_000, 100), i32::MAX);
    }

    #[test]
    fn receiver_commits_only_full_packets() {
        let mut receiver = Receiver {
            room: 1_000,
            calls: Vec::new(),
        };
        assert_eq!(inject_receiver(&mut receiver, Direction::Down, 100, 360), 1);
        assert_eq!(receiver.calls, vec![(360, true), (360, false)]);
        assert_eq!(receiver.room, 640);
    }

    #[test]
    fn receiver_partial_simulation_never_commits() {
        let mut receiver = Receiver {
            room: 300,
            calls: Vec::new(),
        };
        assert_eq!(inject_receiver(&mut receiver, Direction::Down, 100, 360), 0);
        assert_eq!(receiver.calls, vec![(360, true)]);
        assert_eq!(receiver.room, 300);
    }
}
