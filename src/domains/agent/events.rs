use crate::common::DomainEvent;
use crate::domains::planning::Position2D;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::AgentRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AgentEvent {
    AgentCreated {
        agent_id: String,
        index: usize,
        role: AgentRole,
        position: Position2D,
        initial_energy: f64,
        timestamp: DateTime<Utc>,
    },
    PathInstalled {
        agent_id: String,
        waypoint_count: usize,
        timestamp: DateTime<Utc>,
    },
    WaypointReached {
        agent_id: String,
        waypoint_index: usize,
        position: Position2D,
        timestamp: DateTime<Utc>,
    },
    PathExhausted {
        agent_id: String,
        timestamp: DateTime<Utc>,
    },
    EnergyDepleted {
        agent_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for AgentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AgentEvent::AgentCreated { .. } => "AgentCreated",
            AgentEvent::PathInstalled { .. } => "PathInstalled",
            AgentEvent::WaypointReached { .. } => "WaypointReached",
            AgentEvent::PathExhausted { .. } => "PathExhausted",
            AgentEvent::EnergyDepleted { .. } => "EnergyDepleted",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            AgentEvent::AgentCreated { agent_id, .. } => agent_id,
            AgentEvent::PathInstalled { agent_id, .. } => agent_id,
            AgentEvent::WaypointReached { agent_id, .. } => agent_id,
            AgentEvent::PathExhausted { agent_id, .. } => agent_id,
            AgentEvent::EnergyDepleted { agent_id, .. } => agent_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AgentEvent::AgentCreated { timestamp, .. } => *timestamp,
            AgentEvent::PathInstalled { timestamp, .. } => *timestamp,
            AgentEvent::WaypointReached { timestamp, .. } => *timestamp,
            AgentEvent::PathExhausted { timestamp, .. } => *timestamp,
            AgentEvent::EnergyDepleted { timestamp, .. } => *timestamp,
        }
    }
}
