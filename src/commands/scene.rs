use enet::{Emission, Position, TickReport, World};

pub(super) fn run_ticks(mut world: World, ticks: u64, json: bool) -> enet::Result<()> {
    if !json {
        let config = world.config();
        println!(
            "Loaded {} blocks (receiver interop: {}, conversion rate: {}%)",
            world.len(),
            if config.foreign_receiver_enabled { "on" } else { "off" },
            config.conversion_rate_percent
        );
    }

    for _ in 0..ticks {
        let report = world.step()?;
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_tick(&report);
        }
    }

    if !json {
        print_blocks(&world);
    }
    Ok(())
}

pub(super) fn run_emit(mut world: World, at: Position) -> enet::Result<()> {
    let emission = world.emit(at)?;
    println!("{}", describe_emission(&emission));
    print_blocks(&world);
    Ok(())
}

fn print_tick(report: &TickReport) {
    println!("Tick {} (used {}A)", report.tick, report.total_used());
    for emission in &report.emissions {
        println!(" - {}", describe_emission(emission));
    }
}

fn describe_emission(emission: &Emission) -> String {
    format!(
        "{} emitted {}V: {}/{}A used",
        emission.position, emission.voltage, emission.used, emission.offered
    )
}

fn print_blocks(world: &World) {
    println!("Blocks:");
    for (position, block) in world.blocks() {
        println!("  {:<16} {:<9} stored={}", position.to_string(), block, block.stored());
    }
}
