use std::path::Path;

use islewalk_agents::{NpcConfig, PlayerConfig};
use islewalk_input::CameraConfig;
use islewalk_kernel::{WorldConfig, WorldError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("world error: {0}")]
    World(#[from] WorldError),
}

/// Everything needed to start a session. Missing JSON fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub npcs: NpcConfig,
    pub camera: CameraConfig,
    /// Seeds NPC placement and wandering. World layout uses `world.seed`.
    pub rng_seed: u64,
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let config = serde_json::from_reader(std::io::BufReader::new(std::fs::File::open(path)?))?;
        tracing::debug!(path = %path.display(), "loaded sim config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
