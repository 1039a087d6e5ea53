use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domains::airspace::{Obstacle, WorkspaceBounds};
use crate::domains::planning::{Position2D, RrtParams};
use crate::domains::world::WorldInit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub planner: PlannerConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub bound_width: f64,
    pub bound_height: f64,
    pub scout_count: usize,
    pub attacker_count: usize,
    pub adversary_count: usize,
    pub target_count: usize,
    pub initial_energy: f64,
    pub patrol_range: f64,
    pub adversary_turn_increment: f64,
    pub adversary_patrol_enabled: bool,
    pub base: BaseConfig,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

/// The launch pad rectangle; scouts and attackers start at its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BaseConfig {
    pub fn center(&self) -> Position2D {
        Position2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub goal_bias: f64,
    pub max_step_length: f64,
    pub max_turn_angle: f64,
    pub max_iterations: u32,
    pub sample_retry_limit: u32,
    pub goal_tolerance: Option<f64>,
    pub seed: Option<u64>,
}

impl PlannerConfig {
    pub fn to_params(&self, bound_width: f64, bound_height: f64) -> RrtParams {
        RrtParams {
            bound_width,
            bound_height,
            goal_bias: self.goal_bias,
            max_step_length: self.max_step_length,
            max_turn_angle: self.max_turn_angle,
            max_iterations: self.max_iterations,
            goal_tolerance: self.goal_tolerance,
            sample_retry_limit: self.sample_retry_limit,
            ..RrtParams::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub tick_count: u64,
    pub tick_interval_ms: u64,
    pub max_replan_attempts: u32,
    pub log_file: Option<String>,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_world_init(&self) -> WorldInit {
        WorldInit {
            bounds: WorkspaceBounds::from_extent(self.world.bound_width, self.world.bound_height),
            obstacles: self.world.obstacles.clone(),
            scout_count: self.world.scout_count,
            attacker_count: self.world.attacker_count,
            adversary_count: self.world.adversary_count,
            target_count: self.world.target_count,
            base_center: self.world.base.center(),
            initial_energy: self.world.initial_energy,
            patrol_range: self.world.patrol_range,
            adversary_turn_increment: self.world.adversary_turn_increment,
            adversary_patrol_enabled: self.world.adversary_patrol_enabled,
            max_replan_attempts: self.simulation.max_replan_attempts,
            planner_params: self
                .planner
                .to_params(self.world.bound_width, self.world.bound_height),
            seed: self.planner.seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                bound_width: 800.0,
                bound_height: 600.0,
                scout_count: 2,
                attacker_count: 0,
                adversary_count: 1,
                target_count: 1,
                initial_energy: 2000.0,
                patrol_range: 100.0,
                adversary_turn_increment: std::f64::consts::PI / 40.0,
                adversary_patrol_enabled: true,
                base: BaseConfig {
                    x: 0.0,
                    y: 0.0,
                    width: 100.0,
                    height: 100.0,
                },
                obstacles: Vec::new(),
            },
            planner: PlannerConfig {
                goal_bias: 0.6,
                max_step_length: 5.0,
                max_turn_angle: std::f64::consts::FRAC_PI_6,
                max_iterations: 200,
                sample_retry_limit: 1000,
                goal_tolerance: None,
                seed: None,
            },
            simulation: SimulationConfig {
                tick_count: 100,
                tick_interval_ms: 50,
                max_replan_attempts: 5,
                log_file: None,
            },
        }
    }
}
