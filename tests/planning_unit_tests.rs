use kestrel_sim::domains::airspace::{Conflict, Obstacle};
use kestrel_sim::domains::planning::geometry::{angular_difference, bearing_between};
use kestrel_sim::domains::planning::{
    node_conflicts_with, point_in_obstacles, violates_agent_conflicts, ConflictPolicy,
    Orientation2D, Position2D, RrtNode, RrtParams, RrtPlanner, RrtTree, TreeSnapshot,
};

fn planner_with(params: RrtParams, seed: u64) -> RrtPlanner {
    RrtPlanner::with_seed(params, seed)
}

#[cfg(test)]
mod tree_tests {
    use super::*;

    #[test]
    fn test_add_node_returns_sequential_handles() {
        let mut tree = RrtTree::new();
        let root = tree.add_node(
            RrtNode::new(Position2D::new(0.0, 0.0), Orientation2D::default(), 0),
            None,
        );
        let child = tree.add_node(
            RrtNode::new(Position2D::new(1.0, 0.0), Orientation2D::default(), 1),
            Some(root),
        );
        assert_eq!(root, 0);
        assert_eq!(child, 1);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.parent_of(child), Some(root));
        assert_eq!(tree.parent_of(root), None);
    }

    #[test]
    fn test_generate_path_walks_back_to_root() {
        let mut tree = RrtTree::new();
        let root = tree.add_node(
            RrtNode::new(Position2D::new(0.0, 0.0), Orientation2D::default(), 0),
            None,
        );
        let a = tree.add_node(
            RrtNode::new(Position2D::new(1.0, 0.0), Orientation2D::default(), 1),
            Some(root),
        );
        tree.add_node(
            RrtNode::new(Position2D::new(2.0, 0.0), Orientation2D::default(), 2),
            Some(a),
        );
        let path = tree.generate_path().clone();
        assert_eq!(path.len(), 3);
        assert_eq!(path.waypoints[0].position, Position2D::new(0.0, 0.0));
        assert_eq!(path.waypoints[1].position, Position2D::new(1.0, 0.0));
        assert_eq!(path.waypoints[2].position, Position2D::new(2.0, 0.0));
    }

    #[test]
    fn test_generate_path_on_root_only_tree() {
        let mut tree = RrtTree::new();
        tree.add_node(
            RrtNode::new(Position2D::new(7.0, 8.0), Orientation2D::default(), 0),
            None,
        );
        let path = tree.generate_path();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_append_goal_waypoint_appends_exact_coordinate() {
        let mut tree = RrtTree::new();
        tree.add_node(
            RrtNode::new(Position2D::new(0.0, 0.0), Orientation2D::default(), 0),
            None,
        );
        tree.generate_path();
        tree.append_goal_waypoint(Position2D::new(3.0, 0.0));
        let path = tree.path_found().expect("path generated");
        assert_eq!(path.len(), 2);
        assert_eq!(path.waypoints[1].position, Position2D::new(3.0, 0.0));
    }

    #[test]
    fn test_snapshot_round_trips_through_bincode() {
        let mut tree = RrtTree::new();
        let root = tree.add_node(
            RrtNode::new(Position2D::new(0.0, 0.0), Orientation2D::default(), 0),
            None,
        );
        tree.add_node(
            RrtNode::new(Position2D::new(4.0, 1.0), Orientation2D::new(0.3), 1),
            Some(root),
        );
        tree.generate_path();

        let snapshot = TreeSnapshot::of(&tree);
        let bytes = snapshot.to_bytes().expect("encodes");
        let restored = TreeSnapshot::from_bytes(&bytes).expect("decodes");
        assert_eq!(restored.nodes, snapshot.nodes);
        assert_eq!(restored.parents, snapshot.parents);
        assert_eq!(restored.path, snapshot.path);
    }
}

#[cfg(test)]
mod conflict_check_tests {
    use super::*;

    fn node_at(x: f64, y: f64, time_step: u32) -> RrtNode {
        RrtNode::new(Position2D::new(x, y), Orientation2D::default(), time_step)
    }

    #[test]
    fn test_conflict_requires_matching_time_step() {
        let conflict = Conflict::new(3, Position2D::new(10.0, 10.0), 1, 5.0);
        assert!(node_conflicts_with(&node_at(10.0, 10.0, 1), &conflict));
        assert!(!node_conflicts_with(&node_at(10.0, 10.0, 2), &conflict));
    }

    #[test]
    fn test_conflict_requires_proximity() {
        let conflict = Conflict::new(3, Position2D::new(10.0, 10.0), 1, 5.0);
        assert!(node_conflicts_with(&node_at(14.0, 10.0, 1), &conflict));
        // the exclusion disc is boundary-inclusive
        assert!(node_conflicts_with(&node_at(15.0, 10.0, 1), &conflict));
        assert!(!node_conflicts_with(&node_at(15.1, 10.0, 1), &conflict));
    }

    #[test]
    fn test_priority_only_yields_to_higher_indexed_owners() {
        let higher = Conflict::new(3, Position2D::new(10.0, 10.0), 1, 5.0);
        let lower = Conflict::new(1, Position2D::new(10.0, 10.0), 1, 5.0);
        let node = node_at(10.0, 10.0, 1);
        let policy = ConflictPolicy::YieldToHigherIndex;

        assert!(violates_agent_conflicts(&node, &[higher.clone()], 2, policy));
        assert!(!violates_agent_conflicts(&node, &[lower.clone()], 2, policy));
        assert!(violates_agent_conflicts(
            &node,
            &[lower.clone(), higher.clone()],
            2,
            policy
        ));
        // an agent never yields to its own conflicts
        assert!(!violates_agent_conflicts(&node, &[higher], 3, policy));
    }

    #[test]
    fn test_reversed_priority_policy() {
        let higher = Conflict::new(3, Position2D::new(10.0, 10.0), 1, 5.0);
        let lower = Conflict::new(1, Position2D::new(10.0, 10.0), 1, 5.0);
        let node = node_at(10.0, 10.0, 1);
        let policy = ConflictPolicy::YieldToLowerIndex;

        assert!(!violates_agent_conflicts(&node, &[higher], 2, policy));
        assert!(violates_agent_conflicts(&node, &[lower], 2, policy));
    }
}

#[cfg(test)]
mod planner_tests {
    use super::*;

    #[test]
    fn test_short_circuit_when_already_near_goal() {
        let mut planner = planner_with(RrtParams::default(), 7);
        let start = Position2D::new(0.0, 0.0);
        let goal = Position2D::new(2.0, 0.0);
        let tree = planner
            .build_tree(start, Orientation2D::default(), goal, 0, &[], &[])
            .expect("planning succeeds");

        assert_eq!(tree.node_count(), 1);
        let path = tree.path_found().expect("path generated");
        assert_eq!(path.len(), 2);
        assert_eq!(path.waypoints[0].position, start);
        assert_eq!(path.waypoints[1].position, goal);
    }

    #[test]
    fn test_zero_iteration_budget_yields_root_only_tree() {
        let params = RrtParams {
            max_iterations: 0,
            ..RrtParams::default()
        };
        let mut planner = planner_with(params, 7);
        let tree = planner
            .build_tree(
                Position2D::new(0.0, 0.0),
                Orientation2D::default(),
                Position2D::new(100.0, 100.0),
                0,
                &[],
                &[],
            )
            .expect("planning succeeds");

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.path_found().map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_build_tree_terminates_within_iteration_budget() {
        let params = RrtParams {
            max_iterations: 50,
            ..RrtParams::default()
        };
        let mut planner = planner_with(params, 11);
        // goal buried inside an obstacle is never reachable
        let obstacles = vec![Obstacle::circle(
            "shield",
            Position2D::new(700.0, 500.0),
            40.0,
        )];
        let tree = planner
            .build_tree(
                Position2D::new(10.0, 10.0),
                Orientation2D::default(),
                Position2D::new(700.0, 500.0),
                0,
                &obstacles,
                &[],
            )
            .expect("planning succeeds");

        // at most root + one node per iteration
        assert!(tree.node_count() <= 51);
        let path = tree.path_found().expect("best-effort path generated");
        assert!(path.len() >= 1);
        let reached = path
            .last()
            .map(|w| w.position == Position2D::new(700.0, 500.0))
            .unwrap_or(false);
        assert!(!reached);
    }

    #[test]
    fn test_accepted_nodes_never_lie_inside_obstacles() {
        let obstacles = vec![
            Obstacle::circle("tower", Position2D::new(60.0, 60.0), 25.0),
            Obstacle::rectangle("wall", Position2D::new(150.0, 100.0), 30.0, 120.0),
        ];
        let params = RrtParams {
            bound_width: 300.0,
            bound_height: 300.0,
            max_iterations: 400,
            ..RrtParams::default()
        };
        let mut planner = planner_with(params, 23);
        let tree = planner
            .build_tree(
                Position2D::new(5.0, 5.0),
                Orientation2D::default(),
                Position2D::new(280.0, 280.0),
                0,
                &obstacles,
                &[],
            )
            .expect("planning succeeds");

        for node in tree.nodes().iter().skip(1) {
            assert!(
                !point_in_obstacles(&obstacles, node.position.x, node.position.y),
                "accepted node at ({}, {}) lies inside an obstacle",
                node.position.x,
                node.position.y
            );
        }
    }

    #[test]
    fn test_every_edge_respects_the_turn_bound() {
        let params = RrtParams {
            bound_width: 200.0,
            bound_height: 200.0,
            max_iterations: 300,
            ..RrtParams::default()
        };
        let max_turn = params.max_turn_angle;
        let mut planner = planner_with(params, 31);
        let tree = planner
            .build_tree(
                Position2D::new(10.0, 10.0),
                Orientation2D::default(),
                Position2D::new(180.0, 180.0),
                0,
                &[],
                &[],
            )
            .expect("planning succeeds");

        for (index, node) in tree.nodes().iter().enumerate().skip(1) {
            let parent_index = tree.parent_of(index).expect("non-root node has a parent");
            let parent = tree.node_at(parent_index).expect("parent exists");
            let traversal = bearing_between(&parent.position, &node.position);
            assert!(
                angular_difference(traversal, parent.orientation.angle) <= max_turn + 1e-9,
                "edge {} -> {} turns more than the bound",
                parent_index,
                index
            );
        }
    }

    #[test]
    fn test_time_steps_increase_by_one_along_edges() {
        let params = RrtParams {
            max_iterations: 100,
            ..RrtParams::default()
        };
        let mut planner = planner_with(params, 5);
        let tree = planner
            .build_tree(
                Position2D::new(10.0, 10.0),
                Orientation2D::default(),
                Position2D::new(400.0, 300.0),
                0,
                &[],
                &[],
            )
            .expect("planning succeeds");

        assert_eq!(tree.node_at(0).map(|n| n.expected_time_step), Some(0));
        for (index, node) in tree.nodes().iter().enumerate().skip(1) {
            let parent_index = tree.parent_of(index).expect("non-root node has a parent");
            let parent = tree.node_at(parent_index).expect("parent exists");
            assert_eq!(node.expected_time_step, parent.expected_time_step + 1);
        }
    }

    #[test]
    fn test_parent_relation_is_acyclic_with_single_root() {
        let params = RrtParams {
            max_iterations: 150,
            ..RrtParams::default()
        };
        let mut planner = planner_with(params, 13);
        let tree = planner
            .build_tree(
                Position2D::new(20.0, 20.0),
                Orientation2D::default(),
                Position2D::new(500.0, 400.0),
                0,
                &[],
                &[],
            )
            .expect("planning succeeds");

        let mut rootless = 0;
        for index in 0..tree.node_count() {
            match tree.parent_of(index) {
                None => rootless += 1,
                // parents always precede children in the arena, so no walk
                // can ever revisit a node
                Some(parent) => assert!(parent < index),
            }
        }
        assert_eq!(rootless, 1);
    }

    #[test]
    fn test_fully_blocked_sampling_region_fails_explicitly() {
        let params = RrtParams {
            goal_bias: 0.0,
            sample_retry_limit: 50,
            ..RrtParams::default()
        };
        let mut planner = planner_with(params, 17);
        // one obstacle swallowing the entire sampling region
        let obstacles = vec![Obstacle::circle(
            "everything",
            Position2D::new(400.0, 300.0),
            10_000.0,
        )];
        let result = planner.build_tree(
            Position2D::new(0.0, 0.0),
            Orientation2D::default(),
            Position2D::new(100.0, 100.0),
            0,
            &obstacles,
            &[],
        );
        assert!(matches!(
            result,
            Err(kestrel_sim::common::DomainError::NoFeasibleSample { .. })
        ));
    }

    #[test]
    fn test_blocked_corridor_is_never_crossed() {
        // a wall over the whole corridor between x = 40 and x = 60
        let obstacles = vec![Obstacle::rectangle(
            "wall",
            Position2D::new(50.0, 0.0),
            20.0,
            100_000.0,
        )];
        let params = RrtParams {
            bound_width: 800.0,
            bound_height: 600.0,
            goal_bias: 0.6,
            max_step_length: 5.0,
            max_turn_angle: std::f64::consts::FRAC_PI_6,
            max_iterations: 200,
            ..RrtParams::default()
        };
        let goal = Position2D::new(100.0, 0.0);
        let mut planner = planner_with(params, 3);
        let tree = planner
            .build_tree(
                Position2D::new(0.0, 0.0),
                Orientation2D::default(),
                goal,
                0,
                &obstacles,
                &[],
            )
            .expect("planning succeeds");

        let path = tree.path_found().expect("best-effort path generated");
        for waypoint in &path.waypoints {
            let blocked = waypoint.position.x >= 40.0 && waypoint.position.x <= 60.0;
            assert!(
                !blocked,
                "waypoint at ({}, {}) crosses the blocked corridor",
                waypoint.position.x,
                waypoint.position.y
            );
        }
        if let Some(last) = path.last() {
            if last.position == goal {
                assert_eq!(last.position, Position2D::new(100.0, 0.0));
            }
        }
    }

    #[test]
    fn test_identical_seeds_grow_identical_trees() {
        let params = RrtParams {
            max_iterations: 120,
            ..RrtParams::default()
        };
        let build = |seed: u64| {
            let mut planner = planner_with(params.clone(), seed);
            planner
                .build_tree(
                    Position2D::new(10.0, 10.0),
                    Orientation2D::default(),
                    Position2D::new(600.0, 400.0),
                    0,
                    &[],
                    &[],
                )
                .expect("planning succeeds")
        };
        let first = build(99);
        let second = build(99);
        assert_eq!(first.node_count(), second.node_count());
        assert_eq!(first.nodes(), second.nodes());
    }

    #[test]
    fn test_conflicting_region_is_avoided_at_the_matching_time_step() {
        let start = Position2D::new(0.0, 0.0);
        // a higher-priority agent owns the disc directly ahead at step 1
        let conflict = Conflict::new(5, Position2D::new(5.0, 0.0), 1, 8.0);
        let params = RrtParams {
            goal_bias: 1.0,
            max_iterations: 40,
            ..RrtParams::default()
        };
        let mut planner = planner_with(params, 19);
        let tree = planner
            .build_tree(
                start,
                Orientation2D::default(),
                Position2D::new(200.0, 0.0),
                0,
                &[],
                std::slice::from_ref(&conflict),
            )
            .expect("planning succeeds");

        for node in tree.nodes().iter().skip(1) {
            assert!(
                !node_conflicts_with(node, &conflict),
                "accepted node at ({}, {}) step {} violates the conflict",
                node.position.x,
                node.position.y,
                node.expected_time_step
            );
        }
    }
}
