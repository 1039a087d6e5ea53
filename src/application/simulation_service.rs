use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::common::{
    AggregateRoot, ApplicationError, ApplicationResult, EventEnvelope, EventMetadata, EventSink,
};
use crate::domains::logger::DynLogger;
use crate::domains::world::{TickOutcome, World};

const EVENT_SOURCE: &str = "kestrel-sim";

/// Aggregated outcome of a full `run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub ticks_run: u64,
    pub final_time_step: u64,
    pub total_plans_built: usize,
    pub total_stalls: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives the world tick by tick, drains domain events from the world and
/// its agents, and publishes them through the configured sink.
pub struct SimulationService {
    world: World,
    logger: DynLogger,
    event_sink: Arc<dyn EventSink>,
}

impl SimulationService {
    pub fn new(world: World, logger: DynLogger, event_sink: Arc<dyn EventSink>) -> Self {
        Self {
            world,
            logger,
            event_sink,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Advance the world by one tick and publish everything it emitted.
    pub async fn run_tick(&mut self) -> ApplicationResult<TickOutcome> {
        let outcome = self.world.tick();

        for stalled in &outcome.stalled_agents {
            self.logger
                .warn(&format!("agent {} stalled at tick {}", stalled, outcome.time_step));
        }
        debug!(
            time_step = outcome.time_step,
            agents_moved = outcome.agents_moved,
            plans_built = outcome.plans_built,
            "tick complete"
        );

        self.publish_events().await?;
        Ok(outcome)
    }

    /// Run a fixed number of ticks back to back.
    pub async fn run(&mut self, ticks: u64) -> ApplicationResult<SimulationReport> {
        let started_at = Utc::now();
        let mut total_plans_built = 0usize;
        let mut total_stalls = 0usize;

        for _ in 0..ticks {
            let outcome = self.run_tick().await?;
            total_plans_built += outcome.plans_built;
            total_stalls += outcome.stalled_agents.len();
        }

        let report = SimulationReport {
            ticks_run: ticks,
            final_time_step: self.world.time_step,
            total_plans_built,
            total_stalls,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            ticks = report.ticks_run,
            plans = report.total_plans_built,
            stalls = report.total_stalls,
            "simulation run complete"
        );
        Ok(report)
    }

    async fn publish_events(&mut self) -> ApplicationResult<()> {
        let mut envelopes = Vec::new();

        for event in self.world.uncommitted_events() {
            envelopes.push(
                EventEnvelope::new(event, "World", Self::metadata())
                    .map_err(crate::common::DomainError::SerializationError)
                    .map_err(ApplicationError::Domain)?,
            );
        }
        self.world.mark_events_as_committed();

        for agent in self.world.agents_mut() {
            for event in agent.uncommitted_events() {
                envelopes.push(
                    EventEnvelope::new(event, "AerialAgent", Self::metadata())
                        .map_err(crate::common::DomainError::SerializationError)
                        .map_err(ApplicationError::Domain)?,
                );
            }
            agent.mark_events_as_committed();
        }

        if envelopes.is_empty() {
            return Ok(());
        }
        if let Err(reason) = self.event_sink.publish(envelopes).await {
            warn!("event sink rejected batch: {}", reason);
            return Err(ApplicationError::EventSink(reason));
        }
        Ok(())
    }

    fn metadata() -> EventMetadata {
        EventMetadata {
            correlation_id: None,
            source: EVENT_SOURCE.to_string(),
        }
    }
}
