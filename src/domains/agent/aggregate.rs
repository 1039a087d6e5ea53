use serde::{Deserialize, Serialize};

use crate::common::{AggregateRoot, DomainError, DomainResult};
use crate::domains::airspace::{Conflict, Obstacle, Target, WorkspaceBounds};
use crate::domains::planning::feasibility::point_in_obstacles;
use crate::domains::planning::geometry::{distance_between, normalize_angle};
use crate::domains::planning::{Orientation2D, Path, Position2D, RrtPlanner, RrtTree, Waypoint};

use super::events::AgentEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    Scout,
    Attacker,
    Adversary,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Scout => "scout",
            AgentRole::Attacker => "attacker",
            AgentRole::Adversary => "adversary",
        }
    }
}

/// Outcome summary of one replanning call, reported to the world layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanSummary {
    pub node_count: usize,
    pub waypoint_count: usize,
    pub goal_reached: bool,
}

/// Walk inward along the ray at `angle` from `center`, starting at
/// `range` and halving, until a position inside the bounds and outside
/// every obstacle is found.
pub fn feasible_ring_position(
    center: Position2D,
    angle: f64,
    range: f64,
    obstacles: &[Obstacle],
    bounds: &WorkspaceBounds,
) -> Option<Position2D> {
    let mut distance = range;
    while distance > 1e-3 {
        let candidate = Position2D::new(
            center.x + distance * angle.cos(),
            center.y + distance * angle.sin(),
        );
        if bounds.contains(&candidate) && !point_in_obstacles(obstacles, candidate.x, candidate.y)
        {
            return Some(candidate);
        }
        distance /= 2.0;
    }
    None
}

/// An aerial unit with a position, heading, energy reserve and, for
/// scouts, an installed route it consumes one waypoint per tick.
///
/// Scouts own their planner so every agent draws from its own random
/// source; attackers idle and adversaries orbit their protected target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AerialAgent {
    pub id: String,
    pub index: usize,
    pub role: AgentRole,
    pub position: Position2D,
    pub orientation: Orientation2D,
    pub target: Option<Target>,
    pub remaining_energy: f64,
    pub previous_waypoint: Position2D,
    pub path: Path,
    next_waypoint: usize,
    pub patrol_center: Option<Position2D>,
    pub patrol_angle: f64,
    pub last_tree: Option<RrtTree>,
    pub version: u64,
    #[serde(skip)]
    planner: RrtPlanner,
    #[serde(skip)]
    uncommitted_events: Vec<AgentEvent>,
}

impl AerialAgent {
    pub fn new(
        index: usize,
        role: AgentRole,
        position: Position2D,
        target: Option<Target>,
        initial_energy: f64,
        planner: RrtPlanner,
    ) -> Self {
        let id = format!("{}-{}", role.as_str(), index);
        let mut agent = Self {
            id: id.clone(),
            index,
            role,
            position,
            orientation: Orientation2D::default(),
            target,
            remaining_energy: initial_energy,
            previous_waypoint: position,
            path: Path::default(),
            next_waypoint: 0,
            patrol_center: None,
            patrol_angle: 0.0,
            last_tree: None,
            version: 0,
            planner,
            uncommitted_events: Vec::new(),
        };

        let event = AgentEvent::AgentCreated {
            agent_id: id,
            index,
            role,
            position,
            initial_energy,
            timestamp: chrono::Utc::now(),
        };
        agent.add_event(event);
        agent
    }

    pub fn assign_patrol(&mut self, center: Position2D, start_angle: f64) {
        self.patrol_center = Some(center);
        self.patrol_angle = normalize_angle(start_angle);
    }

    /// Install a freshly planned route and rewind the cursor so the next
    /// advance lands on waypoint 0.
    pub fn install_path(&mut self, path: Path) {
        let waypoint_count = path.len();
        self.path = path;
        self.reset_cursor();

        let event = AgentEvent::PathInstalled {
            agent_id: self.id.clone(),
            waypoint_count,
            timestamp: chrono::Utc::now(),
        };
        self.add_event(event);
    }

    pub fn reset_cursor(&mut self) {
        self.next_waypoint = 0;
    }

    /// Consume the next waypoint of the installed route: move there, adopt
    /// its heading, burn energy for the distance covered. Returns false
    /// without moving when the route is exhausted.
    pub fn advance_to_next_waypoint(&mut self) -> bool {
        let Some(waypoint) = self.path.waypoint_at(self.next_waypoint).copied() else {
            if self.next_waypoint == self.path.len() {
                // first overrun of this route
                self.next_waypoint += 1;
                let event = AgentEvent::PathExhausted {
                    agent_id: self.id.clone(),
                    timestamp: chrono::Utc::now(),
                };
                self.add_event(event);
            }
            return false;
        };

        let waypoint_index = self.next_waypoint;
        self.next_waypoint += 1;
        self.move_to(waypoint.position);
        self.orientation = waypoint.orientation;

        let event = AgentEvent::WaypointReached {
            agent_id: self.id.clone(),
            waypoint_index,
            position: self.position,
            timestamp: chrono::Utc::now(),
        };
        self.add_event(event);
        true
    }

    /// The not-yet-consumed suffix of the installed route, exposed as
    /// plain data for collaborators that draw motion segments.
    pub fn future_path(&self) -> Vec<Waypoint> {
        let from = self.next_waypoint.min(self.path.len());
        self.path.waypoints[from..].to_vec()
    }

    /// Grow a fresh tree from the current configuration toward the
    /// assigned target, keep the tree for export, install its path.
    pub fn replan(
        &mut self,
        obstacles: &[Obstacle],
        conflicts: &[Conflict],
    ) -> DomainResult<PlanSummary> {
        let Some(target) = self.target else {
            return Err(DomainError::InvalidCommand {
                reason: format!("Agent {} has no assigned target", self.id),
            });
        };

        let mut tree = self.planner.build_tree(
            self.position,
            self.orientation,
            target.position,
            self.index,
            obstacles,
            conflicts,
        )?;

        let node_count = tree.node_count();
        let path = tree.take_path().unwrap_or_default();
        let goal_reached = path
            .last()
            .map(|waypoint| waypoint.position == target.position)
            .unwrap_or(false);
        let summary = PlanSummary {
            node_count,
            waypoint_count: path.len(),
            goal_reached,
        };

        self.last_tree = Some(tree);
        self.install_path(path);
        Ok(summary)
    }

    /// Advance the patrol angle and re-derive the position on the circle
    /// around the protected target, halving the radius until a feasible
    /// position inside the bounds is found. Returns true if the agent
    /// moved this tick.
    pub fn advance_patrol(
        &mut self,
        patrol_range: f64,
        angle_increment: f64,
        obstacles: &[Obstacle],
        bounds: &WorkspaceBounds,
    ) -> bool {
        let Some(center) = self.patrol_center else {
            return false;
        };
        self.patrol_angle = normalize_angle(self.patrol_angle + angle_increment);

        match feasible_ring_position(center, self.patrol_angle, patrol_range, obstacles, bounds) {
            Some(candidate) => {
                self.move_to(candidate);
                true
            }
            None => false,
        }
    }

    fn move_to(&mut self, position: Position2D) {
        let moved_distance = distance_between(&self.position, &position);
        let energy_before = self.remaining_energy;
        self.previous_waypoint = self.position;
        self.position = position;
        self.remaining_energy -= moved_distance;

        if energy_before > 0.0 && self.remaining_energy <= 0.0 {
            let event = AgentEvent::EnergyDepleted {
                agent_id: self.id.clone(),
                timestamp: chrono::Utc::now(),
            };
            self.add_event(event);
        }
    }
}

impl AggregateRoot for AerialAgent {
    type Event = AgentEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            AgentEvent::AgentCreated {
                agent_id,
                index,
                role,
                position,
                initial_energy,
                ..
            } => {
                self.id = agent_id.clone();
                self.index = *index;
                self.role = *role;
                self.position = *position;
                self.remaining_energy = *initial_energy;
            }
            AgentEvent::WaypointReached { position, .. } => {
                self.position = *position;
            }
            _ => {}
        }
        self.version += 1;
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}
