//! Server configuration, loaded from `config/copper.json5`.

use std::{fs, net::SocketAddr, path::Path};

use serde::Deserialize;

const DEFAULT_CONFIG_STR: &str = include_str!("default_config.json5");

/// How the world generates its chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldModeConfig {
    /// Grass over dirt at `ground_y`.
    Flat,
    /// Noise terrain.
    Terrain,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Deserialize)]
pub struct CopperConfig {
    pub server_address: SocketAddr,
    pub seed: i64,
    pub max_players: u32,
    pub view_distance: u8,
    pub simulation_distance: u8,
    pub world_mode: WorldModeConfig,
    /// Surface level for flat worlds.
    pub ground_y: i32,
    pub motd: String,
    /// Directory holding the extracted registry tables.
    pub data_dir: String,
}

impl CopperConfig {
    /// Reads the config, writing the bundled default first if the file
    /// does not exist yet.
    ///
    /// # Panics
    /// - If the config cannot be read, written or parsed; a server without
    ///   a config has nothing sensible to do.
    #[must_use]
    pub fn load_or_create(path: &Path) -> Self {
        let config_str = if path.exists() {
            fs::read_to_string(path).expect("config file is readable")
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("config directory is writable");
            }
            fs::write(path, DEFAULT_CONFIG_STR).expect("config file is writable");
            DEFAULT_CONFIG_STR.to_string()
        };

        let config: CopperConfig =
            serde_json5::from_str(&config_str).expect("config file parses");
        config.validate().expect("config file is valid");
        config
    }

    /// Bounds checks on the distances.
    pub fn validate(&self) -> Result<(), String> {
        if self.view_distance == 0 || self.view_distance > 32 {
            return Err("View distance must be between 1 and 32".to_string());
        }
        if self.simulation_distance == 0 || self.simulation_distance > 32 {
            return Err("Simulation distance must be between 1 and 32".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_and_validates() {
        let config: CopperConfig = serde_json5::from_str(DEFAULT_CONFIG_STR).expect("parses");
        config.validate().expect("valid");
        assert_eq!(config.server_address.port(), 25565);
        assert_eq!(config.view_distance, 10);
    }
}
