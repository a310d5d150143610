pub mod modules;

pub use modules::adapter::{self, convert_voltage};
pub use modules::block::{Block, LegacySink, Machine, RateReceiver};
pub use modules::capability::{
    Binding, ColorTag, Emitter, EnergyConnected, EnergyReceiver, EnergySink, Tile,
};
pub use modules::color::{self, WILDCARD};
pub use modules::config::{
    self, DEFAULT_CONVERSION_RATE_PERCENT, InteropConfig, config_file_path, load_config,
    load_config_from, save_config, save_config_to,
};
pub use modules::direction::{Direction, Position, SideMask};
pub use modules::error::{Error, Result};
pub use modules::network::EnergyNet;
pub use modules::scene::{BlockSpec, Scene, load_scene};
pub use modules::topology::{Contact, Resolver, SpatialGrid};
pub use modules::world::{Emission, TickReport, World};
