//! Process-wide shared state.

use std::sync::Arc;

use copper_registry::Registry;
use copper_world::World;

use crate::config::CopperConfig;

/// Everything a session needs a handle to: the static tables, the shared
/// world and the configuration.
pub struct Server {
    #[allow(missing_docs)]
    pub registry: Arc<Registry>,
    #[allow(missing_docs)]
    pub world: Arc<World>,
    #[allow(missing_docs)]
    pub config: CopperConfig,
}

impl Server {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(registry: Arc<Registry>, world: Arc<World>, config: CopperConfig) -> Self {
        Self {
            registry,
            world,
            config,
        }
    }

    /// The server's view distance in chunks.
    #[must_use]
    pub fn view_distance(&self) -> i32 {
        i32::from(self.config.view_distance)
    }
}
