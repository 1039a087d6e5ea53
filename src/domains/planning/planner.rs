use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};
use crate::domains::airspace::{Conflict, Obstacle};

use super::feasibility::{
    node_in_obstacles, point_in_obstacles, violates_agent_conflicts, ConflictPolicy,
};
use super::geometry::{angular_difference, bearing_between, distance_between, normalize_angle};
use super::tree::{RrtNode, RrtTree};
use super::types::{Orientation2D, Position2D};

/// Tunable parameters of one tree growth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RrtParams {
    /// Sampling region, [0, bound_width] x [0, bound_height].
    pub bound_width: f64,
    pub bound_height: f64,
    /// Probability that a sampling round draws the goal itself.
    pub goal_bias: f64,
    /// Maximum Euclidean extension per tree edge.
    pub max_step_length: f64,
    /// Maximum heading change per step, radians.
    pub max_turn_angle: f64,
    /// Hard budget of sampling rounds per `build_tree` call.
    pub max_iterations: u32,
    /// Distance under which the goal counts as reached. When unset the
    /// planner falls back to `max_step_length`, which is also the
    /// threshold the short-circuit check uses.
    pub goal_tolerance: Option<f64>,
    /// Cap on rejection-sampling retries before the call fails with
    /// `NoFeasibleSample`.
    pub sample_retry_limit: u32,
    pub conflict_policy: ConflictPolicy,
}

impl Default for RrtParams {
    fn default() -> Self {
        Self {
            bound_width: 800.0,
            bound_height: 600.0,
            goal_bias: 0.6,
            max_step_length: 5.0,
            max_turn_angle: std::f64::consts::FRAC_PI_6,
            max_iterations: 200,
            goal_tolerance: None,
            sample_retry_limit: 1000,
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

/// One-shot, goal-biased RRT planner with a bounded per-step turn.
///
/// Stateless across calls: every `build_tree` invocation takes the current
/// start configuration fresh and returns a complete new tree. The random
/// source is owned per planner so concurrent agents stay reproducible
/// under fixed seeds.
#[derive(Debug, Clone)]
pub struct RrtPlanner {
    params: RrtParams,
    rng: StdRng,
}

impl Default for RrtPlanner {
    fn default() -> Self {
        Self::new(RrtParams::default())
    }
}

impl RrtPlanner {
    pub fn new(params: RrtParams) -> Self {
        Self {
            params,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(params: RrtParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn params(&self) -> &RrtParams {
        &self.params
    }

    /// Grow a tree from `start` toward `goal`, honoring obstacles and the
    /// conflicts applicable to `agent_index` under the configured policy.
    ///
    /// Always returns within `max_iterations` sampling rounds. The returned
    /// tree carries a found path; when the goal was not reached the path is
    /// the best-effort backward walk from the last accepted node and does
    /// not end at the goal. A root-only path means no progress was possible
    /// this cycle, which callers must treat as "retry later", not an error.
    pub fn build_tree(
        &mut self,
        start: Position2D,
        start_orientation: Orientation2D,
        goal: Position2D,
        agent_index: usize,
        obstacles: &[Obstacle],
        conflicts: &[Conflict],
    ) -> DomainResult<RrtTree> {
        let mut tree = RrtTree::new();
        tree.add_node(RrtNode::new(start, start_orientation, 0), None);

        let goal_threshold = self
            .params
            .goal_tolerance
            .unwrap_or(self.params.max_step_length);

        // Already near the goal: no sampling needed.
        if distance_between(&start, &goal) < goal_threshold {
            tree.generate_path();
            tree.append_goal_waypoint(goal);
            return Ok(tree);
        }

        for _ in 0..self.params.max_iterations {
            let sample = self.sample_toward(&goal, obstacles)?;

            let Some(nearest_index) = Self::nearest_vertex(&tree, &sample) else {
                continue;
            };
            let Some(nearest) = tree.node_at(nearest_index).copied() else {
                continue;
            };

            let candidate = Self::extend_with_dynamics(&nearest, &sample, &self.params);

            if node_in_obstacles(obstacles, &candidate)
                || violates_agent_conflicts(
                    &candidate,
                    conflicts,
                    agent_index,
                    self.params.conflict_policy,
                )
            {
                continue;
            }

            tree.add_node(candidate, Some(nearest_index));

            if distance_between(&candidate.position, &goal) < goal_threshold {
                tree.generate_path();
                tree.append_goal_waypoint(goal);
                return Ok(tree);
            }
        }

        // Budget exhausted: hand back whatever was grown.
        tree.generate_path();
        Ok(tree)
    }

    /// Draw the goal with probability `goal_bias`, otherwise a uniform
    /// point inside the bounds that does not land in an obstacle.
    fn sample_toward(
        &mut self,
        goal: &Position2D,
        obstacles: &[Obstacle],
    ) -> DomainResult<Position2D> {
        if self.rng.gen::<f64>() <= self.params.goal_bias {
            return Ok(*goal);
        }
        for _ in 0..self.params.sample_retry_limit {
            let x = self.rng.gen::<f64>() * self.params.bound_width;
            let y = self.rng.gen::<f64>() * self.params.bound_height;
            if !point_in_obstacles(obstacles, x, y) {
                return Ok(Position2D::new(x, y));
            }
        }
        Err(DomainError::NoFeasibleSample {
            attempts: self.params.sample_retry_limit,
        })
    }

    /// Linear scan for the node closest to the sample. Ties resolve to the
    /// earliest-inserted node, keeping growth deterministic for a fixed
    /// sampling sequence.
    fn nearest_vertex(tree: &RrtTree, sample: &Position2D) -> Option<usize> {
        tree.nodes()
            .iter()
            .enumerate()
            .min_by_key(|(_, node)| OrderedFloat(distance_between(&node.position, sample)))
            .map(|(index, _)| index)
    }

    /// Extend from the nearest node toward the sample under the turn
    /// constraint. When the desired bearing exceeds the allowed turn, the
    /// heading clamps to the nearer turn limit and the step is capped at
    /// the distance to the sample so a clamped turn never overshoots.
    fn extend_with_dynamics(nearest: &RrtNode, sample: &Position2D, params: &RrtParams) -> RrtNode {
        let current_angle = nearest.orientation.angle;
        let mut toward_angle = bearing_between(&nearest.position, sample);
        let mut step_length = params.max_step_length;

        if angular_difference(toward_angle, current_angle) > params.max_turn_angle {
            let turn_left = normalize_angle(current_angle - params.max_turn_angle);
            let turn_right = normalize_angle(current_angle + params.max_turn_angle);
            toward_angle =
                if angular_difference(toward_angle, turn_left)
                    < angular_difference(toward_angle, turn_right)
                {
                    turn_left
                } else {
                    turn_right
                };
            step_length = step_length.min(distance_between(&nearest.position, sample));
        }

        RrtNode::new(
            Position2D::new(
                nearest.position.x + toward_angle.cos() * step_length,
                nearest.position.y + toward_angle.sin() * step_length,
            ),
            Orientation2D::new(toward_angle),
            nearest.expected_time_step + 1,
        )
    }
}
