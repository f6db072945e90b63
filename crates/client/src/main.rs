//! Demo client driving a timed block move end to end.
//!
//! Places a stone block, starts a move, shows the reserved cells refusing a
//! rival's placement and damage, then advances the clock and prints the
//! landed state plus the full feed transcript.
mod config;

use anyhow::Result;
use runtime::{Runtime, RuntimeConfig};
use world_content::ContentFactory;
use world_core::{CellPos, Direction, EntityId, World, WorldConfig};

use config::DemoConfig;

const PLAYER: EntityId = EntityId(1);
const RIVAL: EntityId = EntityId(2);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::from_env();
    run_demo(config).await
}

async fn run_demo(config: DemoConfig) -> Result<()> {
    let mut builder = Runtime::builder().config(RuntimeConfig {
        tick_ms: config.tick_ms,
        ..RuntimeConfig::default()
    });

    let mut move_duration_ms = WorldConfig::DEFAULT_MOVE_DURATION_MS;
    if let Some(data_dir) = &config.data_dir {
        let factory = ContentFactory::new(data_dir);
        let world_config = factory.load_config()?;
        move_duration_ms = world_config.default_move_duration_ms;
        builder = builder.world(World::new(world_config, factory.load_blocks()?));
    }
    if let Some(duration) = config.move_duration_ms {
        move_duration_ms = duration;
    }

    let rt = builder.build().await?;
    let handle = rt.handle();
    let mut feed = rt.subscribe();

    let origin = CellPos::new(0, 0, 0);
    let destination = origin.step(Direction::East);

    handle.place_block(PLAYER, origin, "stone").await?;
    let accepted = handle
        .move_block(origin, Direction::East, move_duration_ms)
        .await?;
    println!("move accepted: {accepted}");

    let reserved = handle.query_cell(destination).await?;
    println!(
        "destination mid-flight: {}",
        serde_json::to_string(&reserved)?
    );

    // Both reserved cells reject third-party interference.
    if let Err(error) = handle.place_block(RIVAL, destination, "dirt").await {
        println!("rival placement refused: {error}");
    }
    let damage = handle.damage_block(RIVAL, origin, 100).await?;
    println!("rival damage outcome: {damage:?}");

    let now = handle.advance(move_duration_ms).await?;
    println!("clock advanced to {now}");

    let landed = handle.query_cell(destination).await?;
    println!(
        "destination after landing: {}",
        serde_json::to_string(&landed)?
    );

    drop(handle);
    rt.shutdown().await?;

    println!("feed transcript:");
    while let Ok(event) = feed.try_recv() {
        println!("  {}", serde_json::to_string(&event)?);
    }

    Ok(())
}
