use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::common::{AggregateRoot, DomainError, DomainResult};
use crate::domains::agent::{feasible_ring_position, AerialAgent, AgentRole, PlanSummary};
use crate::domains::airspace::{Conflict, Obstacle, Target, WorkspaceBounds};
use crate::domains::planning::feasibility::point_in_obstacles;
use crate::domains::planning::{Position2D, RrtParams, RrtPlanner};

use super::events::WorldEvent;

/// Everything needed to stand up a world: field geometry, fleet sizes and
/// the planner parameters every scout is equipped with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldInit {
    pub bounds: WorkspaceBounds,
    pub obstacles: Vec<Obstacle>,
    pub scout_count: usize,
    pub attacker_count: usize,
    pub adversary_count: usize,
    pub target_count: usize,
    pub base_center: Position2D,
    pub initial_energy: f64,
    pub patrol_range: f64,
    pub adversary_turn_increment: f64,
    pub adversary_patrol_enabled: bool,
    pub max_replan_attempts: u32,
    pub planner_params: RrtParams,
    /// Seed for target/adversary placement and, offset per scout, for the
    /// scouts' planners. Entropy-seeded when unset.
    pub seed: Option<u64>,
}

/// Per-tick outcome reported to the application layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickOutcome {
    pub time_step: u64,
    pub agents_moved: usize,
    pub plans_built: usize,
    pub stalled_agents: Vec<String>,
}

/// The simulated field and its fleets, advanced tick by tick.
///
/// Scouts follow their installed routes and replan (a bounded number of
/// times per tick) when the route runs out; attackers idle; adversaries
/// orbit the target they protect. Obstacles and registered conflicts are
/// immutable during a tick and shared read-only with every planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub id: String,
    pub bounds: WorkspaceBounds,
    pub obstacles: Vec<Obstacle>,
    pub conflicts: Vec<Conflict>,
    pub targets: Vec<Target>,
    pub scouts: Vec<AerialAgent>,
    pub attackers: Vec<AerialAgent>,
    pub adversaries: Vec<AerialAgent>,
    pub time_step: u64,
    pub patrol_range: f64,
    pub adversary_turn_increment: f64,
    pub adversary_patrol_enabled: bool,
    pub max_replan_attempts: u32,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<WorldEvent>,
}

const PLACEMENT_RETRY_LIMIT: u32 = 1000;

impl World {
    pub fn initialize(id: String, init: WorldInit) -> DomainResult<Self> {
        let mut rng = match init.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let targets = Self::place_targets(&init, &mut rng)?;

        let mut scouts = Vec::with_capacity(init.scout_count);
        for index in 0..init.scout_count {
            let planner = match init.seed {
                Some(seed) => {
                    RrtPlanner::with_seed(init.planner_params.clone(), seed.wrapping_add(index as u64 + 1))
                }
                None => RrtPlanner::new(init.planner_params.clone()),
            };
            scouts.push(AerialAgent::new(
                index,
                AgentRole::Scout,
                init.base_center,
                targets.first().copied(),
                init.initial_energy,
                planner,
            ));
        }

        let mut attackers = Vec::with_capacity(init.attacker_count);
        for offset in 0..init.attacker_count {
            attackers.push(AerialAgent::new(
                init.scout_count + offset,
                AgentRole::Attacker,
                init.base_center,
                None,
                init.initial_energy,
                RrtPlanner::new(init.planner_params.clone()),
            ));
        }

        let mut adversaries = Vec::with_capacity(init.adversary_count);
        for offset in 0..init.adversary_count {
            let index = init.scout_count + init.attacker_count + offset;
            let mut patrol = None;
            let mut start_position = init.base_center;
            if !targets.is_empty() {
                let protected = targets[offset % targets.len()];
                let start_angle = rng.gen::<f64>() * std::f64::consts::TAU;
                if let Some(position) = feasible_ring_position(
                    protected.position,
                    start_angle,
                    init.patrol_range,
                    &init.obstacles,
                    &init.bounds,
                ) {
                    start_position = position;
                }
                patrol = Some((protected.position, start_angle));
            }
            let mut adversary = AerialAgent::new(
                index,
                AgentRole::Adversary,
                start_position,
                None,
                init.initial_energy,
                RrtPlanner::new(init.planner_params.clone()),
            );
            if let Some((center, angle)) = patrol {
                adversary.assign_patrol(center, angle);
            }
            adversaries.push(adversary);
        }

        let mut world = Self {
            id: id.clone(),
            bounds: init.bounds,
            obstacles: init.obstacles,
            conflicts: Vec::new(),
            targets,
            scouts,
            attackers,
            adversaries,
            time_step: 0,
            patrol_range: init.patrol_range,
            adversary_turn_increment: init.adversary_turn_increment,
            adversary_patrol_enabled: init.adversary_patrol_enabled,
            max_replan_attempts: init.max_replan_attempts,
            version: 0,
            uncommitted_events: Vec::new(),
        };

        let event = WorldEvent::WorldInitialized {
            world_id: id,
            scout_count: world.scouts.len(),
            attacker_count: world.attackers.len(),
            adversary_count: world.adversaries.len(),
            obstacle_count: world.obstacles.len(),
            timestamp: chrono::Utc::now(),
        };
        world.add_event(event);
        Ok(world)
    }

    /// Targets are sampled uniformly inside the field, inset by the patrol
    /// range, rejecting positions inside obstacles.
    fn place_targets(init: &WorldInit, rng: &mut StdRng) -> DomainResult<Vec<Target>> {
        let inset = init.patrol_range;
        let usable_width = (init.bounds.width() - 2.0 * inset).max(0.0);
        let usable_height = (init.bounds.height() - 2.0 * inset).max(0.0);

        let mut targets = Vec::with_capacity(init.target_count);
        for index in 0..init.target_count {
            let mut placed = None;
            for _ in 0..PLACEMENT_RETRY_LIMIT {
                let x = init.bounds.min_x + inset + rng.gen::<f64>() * usable_width;
                let y = init.bounds.min_y + inset + rng.gen::<f64>() * usable_height;
                if !point_in_obstacles(&init.obstacles, x, y) {
                    placed = Some(Position2D::new(x, y));
                    break;
                }
            }
            let Some(position) = placed else {
                return Err(DomainError::NoFeasibleSample {
                    attempts: PLACEMENT_RETRY_LIMIT,
                });
            };
            targets.push(Target::new(index, position));
        }
        Ok(targets)
    }

    /// Register an externally produced conflict for subsequent planning
    /// calls to honor.
    pub fn register_conflict(&mut self, conflict: Conflict) {
        let event = WorldEvent::ConflictRegistered {
            world_id: self.id.clone(),
            conflict_id: conflict.id.clone(),
            owner_index: conflict.owner_index,
            expected_time_step: conflict.expected_time_step,
            timestamp: chrono::Utc::now(),
        };
        self.conflicts.push(conflict);
        self.add_event(event);
    }

    /// Advance simulated time by one tick.
    ///
    /// Each scout consumes the next waypoint of its route; a scout whose
    /// route is exhausted replans and retries, at most `max_replan_attempts`
    /// times, and is reported stalled when no attempt yields progress.
    pub fn tick(&mut self) -> TickOutcome {
        let obstacles = &self.obstacles;
        let conflicts = &self.conflicts;
        let max_attempts = self.max_replan_attempts;

        let mut agents_moved = 0usize;
        let mut plans: Vec<(String, PlanSummary)> = Vec::new();
        let mut stalled: Vec<(String, u32, String)> = Vec::new();

        for scout in self.scouts.iter_mut() {
            let mut advanced = scout.advance_to_next_waypoint();
            if !advanced {
                if scout.target.is_none() {
                    continue;
                }
                let mut attempts = 0;
                let mut failure = String::from("no progress after replanning");
                while !advanced && attempts < max_attempts {
                    attempts += 1;
                    match scout.replan(obstacles, conflicts) {
                        Ok(summary) => plans.push((scout.id.clone(), summary)),
                        Err(error) => {
                            failure = error.to_string();
                            break;
                        }
                    }
                    advanced = scout.advance_to_next_waypoint();
                }
                if !advanced {
                    stalled.push((scout.id.clone(), attempts, failure));
                    continue;
                }
            }
            agents_moved += 1;
        }

        if self.adversary_patrol_enabled {
            for adversary in self.adversaries.iter_mut() {
                if adversary.advance_patrol(
                    self.patrol_range,
                    self.adversary_turn_increment,
                    obstacles,
                    &self.bounds,
                ) {
                    agents_moved += 1;
                }
            }
        }

        self.time_step += 1;
        let time_step = self.time_step;
        let plans_built = plans.len();

        for (agent_id, summary) in plans {
            let event = WorldEvent::PathPlanned {
                world_id: self.id.clone(),
                agent_id,
                node_count: summary.node_count,
                waypoint_count: summary.waypoint_count,
                goal_reached: summary.goal_reached,
                timestamp: chrono::Utc::now(),
            };
            self.add_event(event);
        }
        let stalled_agents: Vec<String> = stalled.iter().map(|(id, _, _)| id.clone()).collect();
        for (agent_id, attempts, reason) in stalled {
            let event = WorldEvent::AgentStalled {
                world_id: self.id.clone(),
                agent_id,
                attempts,
                reason,
                timestamp: chrono::Utc::now(),
            };
            self.add_event(event);
        }
        let event = WorldEvent::SimulationTicked {
            world_id: self.id.clone(),
            time_step,
            agents_moved,
            timestamp: chrono::Utc::now(),
        };
        self.add_event(event);

        TickOutcome {
            time_step,
            agents_moved,
            plans_built,
            stalled_agents,
        }
    }

    pub fn agents(&self) -> impl Iterator<Item = &AerialAgent> {
        self.scouts
            .iter()
            .chain(self.attackers.iter())
            .chain(self.adversaries.iter())
    }

    pub fn agents_mut(&mut self) -> impl Iterator<Item = &mut AerialAgent> {
        self.scouts
            .iter_mut()
            .chain(self.attackers.iter_mut())
            .chain(self.adversaries.iter_mut())
    }
}

impl AggregateRoot for World {
    type Event = WorldEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            WorldEvent::WorldInitialized { world_id, .. } => {
                self.id = world_id.clone();
            }
            WorldEvent::SimulationTicked { time_step, .. } => {
                self.time_step = *time_step;
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
