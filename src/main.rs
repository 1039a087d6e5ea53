use kestrel_sim::Config;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use kestrel_sim::adapters::outbound::{init_console_logger, init_file_logger, TracingEventSink};
use kestrel_sim::application::SimulationService;
use kestrel_sim::domains::world::World;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Kestrel Sim");

    // Load configuration, falling back to the stock scenario
    let config = match Config::from_file("config.toml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.toml ({}), using defaults", e);
            Config::default()
        }
    };

    info!(
        "Scenario: {} scouts, {} attackers, {} adversaries, {} obstacles",
        config.world.scout_count,
        config.world.attacker_count,
        config.world.adversary_count,
        config.world.obstacles.len()
    );

    let logger = match &config.simulation.log_file {
        Some(path) => match init_file_logger(path) {
            Ok(logger) => logger,
            Err(e) => {
                warn!("{}; falling back to console logging", e);
                init_console_logger()
            }
        },
        None => init_console_logger(),
    };

    let world = World::initialize("world-1".to_string(), config.to_world_init())?;
    let mut service = SimulationService::new(world, logger, Arc::new(TracingEventSink));

    let mut ticker =
        tokio::time::interval(Duration::from_millis(config.simulation.tick_interval_ms));
    for _ in 0..config.simulation.tick_count {
        ticker.tick().await;
        let outcome = service.run_tick().await?;
        info!(
            "timestep={} moved={} plans={} stalled={}",
            outcome.time_step,
            outcome.agents_moved,
            outcome.plans_built,
            outcome.stalled_agents.len()
        );
    }

    let world = service.world();
    for scout in &world.scouts {
        info!(
            "{} at ({:.1}, {:.1}), energy {:.1}",
            scout.id, scout.position.x, scout.position.y, scout.remaining_energy
        );
    }
    info!("Kestrel Sim finished after {} ticks", world.time_step);

    Ok(())
}
