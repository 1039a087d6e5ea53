use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldEvent {
    WorldInitialized {
        world_id: String,
        scout_count: usize,
        attacker_count: usize,
        adversary_count: usize,
        obstacle_count: usize,
        timestamp: DateTime<Utc>,
    },
    SimulationTicked {
        world_id: String,
        time_step: u64,
        agents_moved: usize,
        timestamp: DateTime<Utc>,
    },
    PathPlanned {
        world_id: String,
        agent_id: String,
        node_count: usize,
        waypoint_count: usize,
        goal_reached: bool,
        timestamp: DateTime<Utc>,
    },
    AgentStalled {
        world_id: String,
        agent_id: String,
        attempts: u32,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    ConflictRegistered {
        world_id: String,
        conflict_id: String,
        owner_index: usize,
        expected_time_step: u32,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for WorldEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WorldEvent::WorldInitialized { .. } => "WorldInitialized",
            WorldEvent::SimulationTicked { .. } => "SimulationTicked",
            WorldEvent::PathPlanned { .. } => "PathPlanned",
            WorldEvent::AgentStalled { .. } => "AgentStalled",
            WorldEvent::ConflictRegistered { .. } => "ConflictRegistered",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            WorldEvent::WorldInitialized { world_id, .. } => world_id,
            WorldEvent::SimulationTicked { world_id, .. } => world_id,
            WorldEvent::PathPlanned { world_id, .. } => world_id,
            WorldEvent::AgentStalled { world_id, .. } => world_id,
            WorldEvent::ConflictRegistered { world_id, .. } => world_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            WorldEvent::WorldInitialized { timestamp, .. } => *timestamp,
            WorldEvent::SimulationTicked { timestamp, .. } => *timestamp,
            WorldEvent::PathPlanned { timestamp, .. } => *timestamp,
            WorldEvent::AgentStalled { timestamp, .. } => *timestamp,
            WorldEvent::ConflictRegistered { timestamp, .. } => *timestamp,
        }
    }
}
