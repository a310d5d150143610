use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::modules::block::Block;
use crate::modules::config::InteropConfig;
use crate::modules::direction::Position;
use crate::modules::error::{Error, Result};
use crate::modules::world::World;

/// A block and where it sits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub position: Position,
    #[serde(flatten)]
    pub block: Block,
}

/// Read-only description of a world layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Interop switches the scene was designed for, if any.
    #[serde(default)]
    pub interop: Option<InteropConfig>,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

impl Scene {
    /// Checks the layout and builds a world running under `config`.
    pub fn into_world(self, config: InteropConfig) -> Result<World> {
        if config.foreign_receiver_enabled && config.conversion_rate_percent == 0 {
            return Err(Error::InvalidScene(
                "conversion_rate_percent must be greater than 0 when receivers are enabled"
                    .into(),
            ));
        }

        let mut world = World::new(config);
        for entry in self.blocks {
            if let Block::Machine(machine) = &entry.block {
                if machine.stored > machine.capacity {
                    return Err(Error::InvalidScene(format!(
                        "machine at {} stores {} but holds at most {}",
                        entry.position, machine.stored, machine.capacity
                    )));
                }
            }
            world.place(entry.position, entry.block)?;
        }
        Ok(world)
    }
}

pub fn load_scene(path: &Path) -> Result<Scene> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        hint: "check the scene layout",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::direction::Direction;

    const SCENE: &str = r#"{
        "interop": { "foreign_receiver_enabled": true, "conversion_rate_percent": 200 },
        "blocks": [
            { "position": {"x": 0, "y": 0, "z": 0}, "kind": "machine",
              "capacity": 1000, "stored": 1000, "output_voltage": 32, "output_amperage": 2,
              "outputs": ["up", "down"], "inputs": [] },
            { "position": {"x": 0, "y": 1, "z": 0}, "kind": "receiver", "capacity": 500 },
            { "position": {"x": 0, "y": -1, "z": 0}, "kind": "inert" }
        ]
    }"#;

    #[test]
    fn loads_and_builds_a_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        fs::write(&path, SCENE).unwrap();

        let scene = load_scene(&path).unwrap();
        let config = scene.interop.expect("interop section");
        assert_eq!(config.conversion_rate_percent, 200);

        let mut world = scene.into_world(config).unwrap();
        assert_eq!(world.len(), 3);

        let report = world.step().unwrap();
        assert_eq!(report.total_used(), 1);
        let receiver = world.block(Position::origin().step(Direction::Up)).unwrap();
        assert_eq!(receiver.stored(), 64);
    }

    #[test]
    fn duplicate_positions_are_rejected() {
        let scene: Scene = serde_json::from_str(
            r#"{"blocks": [
                {"position": {"x": 1, "y": 1, "z": 1}, "kind": "inert"},
                {"position": {"x": 1, "y": 1, "z": 1}, "kind": "inert"}
            ]}"#,
        )
        .unwrap();

        assert!(matches!(
            scene.into_world(InteropConfig::default()),
            Err(Error::DuplicatePosition(p)) if p == Position::new(1, 1, 1)
        ));
    }

    #[test]
    fn overfull_machine_is_rejected() {
        let scene: Scene = serde_json::from_str(
            r#"{"blocks": [
                {"position": {"x": 0, "y": 0, "z": 0}, "kind": "machine", "capacity": 10, "stored": 11}
            ]}"#,
        )
        .unwrap();

        assert!(matches!(
            scene.into_world(InteropConfig::default()),
            Err(Error::InvalidScene(_))
        ));
    }

    #[test]
    fn zero_conversion_rate_is_rejected_with_receivers() {
        let zero = InteropConfig::default().with_conversion_rate(0);
        assert!(Scene::default().into_world(zero).is_ok());
        assert!(matches!(
            Scene::default().into_world(zero.with_receivers(true)),
            Err(Error::InvalidScene(_))
        ));
    }

    #[test]
    fn malformed_scene_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();

        let err = load_scene(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
