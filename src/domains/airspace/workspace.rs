use serde::{Deserialize, Serialize};

use crate::domains::planning::geometry::distance_between;
use crate::domains::planning::types::Position2D;

/// The static environment all planners share: field bounds plus the
/// obstacle set. Immutable during a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub bounds: WorkspaceBounds,
    pub obstacles: Vec<Obstacle>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorkspaceBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl WorkspaceBounds {
    /// Field-origin bounds, [0, width] x [0, height].
    pub fn from_extent(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            max_x: width,
            min_y: 0.0,
            max_y: height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, position: &Position2D) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    pub shape: ObstacleShape,
    pub position: Position2D,
}

/// Obstacle footprints. Rectangle is centered on the obstacle position;
/// polygon vertices are offsets from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObstacleShape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
    Polygon { vertices: Vec<Position2D> },
}

impl Obstacle {
    pub fn new(id: impl Into<String>, shape: ObstacleShape, position: Position2D) -> Self {
        Self {
            id: id.into(),
            shape,
            position,
        }
    }

    pub fn circle(id: impl Into<String>, position: Position2D, radius: f64) -> Self {
        Self::new(id, ObstacleShape::Circle { radius }, position)
    }

    pub fn rectangle(id: impl Into<String>, position: Position2D, width: f64, height: f64) -> Self {
        Self::new(id, ObstacleShape::Rectangle { width, height }, position)
    }

    /// Containment test for a field point. Circle and rectangle are
    /// boundary-inclusive; polygons follow the even-odd rule, so points
    /// exactly on a polygon edge are unspecified.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let point = Position2D::new(x, y);
        match &self.shape {
            ObstacleShape::Circle { radius } => {
                distance_between(&self.position, &point) <= *radius
            }
            ObstacleShape::Rectangle { width, height } => {
                (point.x - self.position.x).abs() <= width / 2.0
                    && (point.y - self.position.y).abs() <= height / 2.0
            }
            ObstacleShape::Polygon { vertices } => self.polygon_contains(vertices, &point),
        }
    }

    fn polygon_contains(&self, vertices: &[Position2D], point: &Position2D) -> bool {
        if vertices.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = vertices.len() - 1;
        for i in 0..vertices.len() {
            let vi = Position2D::new(
                self.position.x + vertices[i].x,
                self.position.y + vertices[i].y,
            );
            let vj = Position2D::new(
                self.position.x + vertices[j].x,
                self.position.y + vertices[j].y,
            );
            if (vi.y > point.y) != (vj.y > point.y)
                && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
