//! Geometry value types shared by the ruler and its host collaborators
//!
//! This module provides:
//! - Canvas pixel positions ([`Point`])
//! - Grid cell offsets ([`GridOffset`])
//! - Measurement results ([`Measurement`])
//! - The single waypoint record that flows through every ruler stage ([`Waypoint`])

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canvas position in pixels.
///
/// Equality is coordinate-exact; the ruler relies on this to suppress
/// redundant updates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether the segment from `self` to `other` changes both axes
    pub fn is_diagonal_to(&self, other: &Point) -> bool {
        self.x != other.x && self.y != other.y
    }

    /// Translate by the given offsets
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// Grid cell offset: `i` is the row, `j` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridOffset {
    /// Row index
    pub i: i32,
    /// Column index
    pub j: i32,
}

impl GridOffset {
    /// Create a new grid offset
    pub fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }
}

impl fmt::Display for GridOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.i, self.j)
    }
}

/// Result of measuring the path between two points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// Distance in grid distance units (e.g. feet)
    pub distance: f64,
    /// Movement cost, which may differ from distance under game rules
    pub cost: f64,
}

/// A single grid-aligned point along a route.
///
/// Every field is always present; stages of the ruler set the rendering
/// hints and cost instead of attaching fields ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    /// Horizontal pixel coordinate (cell reference corner)
    pub x: f64,
    /// Vertical pixel coordinate (cell reference corner)
    pub y: f64,
    /// Elevation of the waypoint
    pub elevation: f64,
    /// A deliberate stop: route endpoint or direction change
    pub checkpoint: bool,
    /// Filler point inserted only to make a straight run explicit
    pub intermediate: bool,
    /// Whether the coordinates are already snapped to the grid
    pub snapped: bool,
    /// Backward cumulative movement cost, once measured
    pub cost: Option<f64>,
}

impl Waypoint {
    /// Create a checkpoint waypoint at a position
    pub fn new(position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            elevation: 0.0,
            checkpoint: true,
            intermediate: false,
            snapped: true,
            cost: None,
        }
    }

    /// Create an intermediate filler waypoint at a position
    pub fn intermediate(position: Point) -> Self {
        Self {
            checkpoint: false,
            intermediate: true,
            ..Self::new(position)
        }
    }

    /// Position of the waypoint
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Mark as a route endpoint
    pub fn mark_checkpoint(&mut self) {
        self.checkpoint = true;
        self.intermediate = false;
    }

    /// Mark as filler between checkpoints
    pub fn mark_intermediate(&mut self) {
        self.checkpoint = false;
        self.intermediate = true;
    }
}

impl From<Point> for Waypoint {
    fn from(p: Point) -> Self {
        Self::new(p)
    }
}
