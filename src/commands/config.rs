use clap::Subcommand;
use enet::{InteropConfig, config_file_path, load_config, save_config};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default (or given) values
    Init {
        /// Enable rate-based receiver interop
        #[arg(long)]
        receiver_interop: bool,
        /// Receiver units per 100 units of voltage
        #[arg(long)]
        conversion_rate: Option<u32>,
    },
    /// Print the effective config
    Show,
}

pub(super) fn run_config(cmd: ConfigCommand) -> enet::Result<()> {
    match cmd {
        ConfigCommand::Init {
            receiver_interop,
            conversion_rate,
        } => {
            let mut config = InteropConfig::default().with_receivers(receiver_interop);
            if let Some(rate) = conversion_rate {
                config = config.with_conversion_rate(rate);
            }
            save_config(&config)?;
            println!("Wrote {}", config_file_path().display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Show => {
            let path = config_file_path();
            let config = load_config()?;
            if !path.exists() {
                println!("{} not found; showing defaults", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
