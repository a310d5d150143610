use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use enet::{InteropConfig, Position, Scene, World, load_config, load_scene};
use tracing_subscriber::EnvFilter;

mod config;
mod scene;

use config::{ConfigCommand, run_config};
use scene::{run_emit, run_ticks};

#[derive(Parser)]
#[command(
    name = "enet",
    version,
    about = "Energy network sandbox: route power between neighboring blocks",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a scene for a number of ticks
    Run {
        #[command(flatten)]
        scene: SceneArgs,
        /// Number of ticks to run
        #[arg(short = 't', long, default_value_t = 1)]
        ticks: u64,
        /// Print tick reports as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Distribute once from a single machine and print the result
    Emit {
        #[command(flatten)]
        scene: SceneArgs,
        /// Position of the emitting machine as x,y,z
        #[arg(long)]
        at: Position,
    },
    /// Interop configuration (.enet/config.json)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args)]
pub struct SceneArgs {
    /// Scene file describing the block layout
    #[arg(short = 's', long)]
    scene: PathBuf,
    /// Allow transfers into rate-based receivers
    #[arg(long)]
    receiver_interop: bool,
    /// Refuse transfers into rate-based receivers
    #[arg(long, conflicts_with = "receiver_interop")]
    no_receiver_interop: bool,
    /// Receiver units per 100 units of voltage
    #[arg(long)]
    conversion_rate: Option<u32>,
}

impl SceneArgs {
    /// Loads the scene and resolves the effective interop switches: flags
    /// win over the scene's own section, which wins over the config file.
    fn load(&self) -> enet::Result<World> {
        let scene: Scene = load_scene(&self.scene)?;
        let base = match scene.interop {
            Some(interop) => interop,
            None => load_config()?,
        };
        let config = self.apply(base);
        scene.into_world(config)
    }

    fn apply(&self, mut config: InteropConfig) -> InteropConfig {
        if self.receiver_interop {
            config.foreign_receiver_enabled = true;
        }
        if self.no_receiver_interop {
            config.foreign_receiver_enabled = false;
        }
        if let Some(rate) = self.conversion_rate {
            config.conversion_rate_percent = rate;
        }
        config
    }
}

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("enet=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = dispatch(cli.command) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn dispatch(command: Command) -> enet::Result<()> {
    match command {
        Command::Run { scene, ticks, json } => {
            let world = scene.load()?;
            run_ticks(world, ticks, json)
        }
        Command::Emit { scene, at } => {
            let world = scene.load()?;
            run_emit(world, at)
        }
        Command::Config { command } => run_config(command),
    }
}
