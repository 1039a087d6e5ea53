use serde::{Deserialize, Serialize};

use super::geometry::normalize_angle;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A heading in the field plane, kept normalized to (-pi, pi].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation2D {
    pub angle: f64,
}

impl Orientation2D {
    pub fn new(angle: f64) -> Self {
        Self {
            angle: normalize_angle(angle),
        }
    }
}

impl Default for Orientation2D {
    fn default() -> Self {
        Self { angle: 0.0 }
    }
}

/// One step of an extracted route: where to be and which way to face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Position2D,
    pub orientation: Orientation2D,
}

/// An ordered root-to-goal sequence of waypoints, consumed one per tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub waypoints: Vec<Waypoint>,
}

impl Path {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    pub fn append_waypoint(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoint_at(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn last(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }
}
