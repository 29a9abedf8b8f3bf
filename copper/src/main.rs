use std::{path::Path, sync::Arc};

use copper::{
    CopperServer,
    config::{CopperConfig, WorldModeConfig},
    server::Server,
};
use copper_registry::Registry;
use copper_world::{World, block_manager::WorldMode, terrain::NoiseParams};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CopperConfig::load_or_create(Path::new("config/copper.json5"));
    log::info!("Starting Copper for Minecraft {}", copper_protocol::GAME_VERSION);

    let registry = Arc::new(Registry::load(Path::new(&config.data_dir)));

    let mode = match config.world_mode {
        WorldModeConfig::Flat => WorldMode::Flat,
        WorldModeConfig::Terrain => WorldMode::Terrain,
    };
    let world = World::new(
        &registry,
        config.seed,
        NoiseParams::default(),
        mode,
        config.ground_y,
    );

    let cancel_token = CancellationToken::new();
    let tick_handle = world.spawn_tick_task(cancel_token.clone());

    let server = Arc::new(Server::new(registry, Arc::clone(&world), config));
    let mut copper = CopperServer::new(server, cancel_token.clone()).await?;

    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Shutdown requested");
            shutdown_token.cancel();
        }
    });

    copper.run().await;

    tick_handle.await?;
    log::info!("Goodbye");
    Ok(())
}
