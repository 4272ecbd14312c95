//! Host capability interfaces
//!
//! The ruler never computes canvas geometry or paths itself. Everything it
//! needs from the virtual tabletop is consumed through these traits:
//! - [`GeometryOracle`]: grid measurement and coordinate conversion
//! - [`PathPlanner`]: asynchronous cell-to-cell path planning
//! - [`MovementPathService`]: the host's own token movement path API
//! - [`RulerView`] / [`RulerViewFactory`]: the drawable ruler object
//! - [`Token`]: the token being dragged
//! - [`TokenDirectory`]: token lookup on the current scene

use crate::geometry::{GridOffset, Measurement, Point, Waypoint};
use crate::render::RenderRecord;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Grid measurement and coordinate conversion provided by the host canvas.
pub trait GeometryOracle: Send + Sync {
    /// Measure the path between two pixel positions
    fn measure(&self, from: Point, to: Point) -> Result<Measurement>;

    /// Measure an ordered route in one call.
    ///
    /// Returns the backward cumulative cost of every waypoint, in order, so
    /// rules that depend on the whole route (alternating diagonals) apply
    /// consistently.
    fn measure_path(&self, waypoints: &[Waypoint]) -> Result<Vec<Option<f64>>>;

    /// Grid cell containing a pixel position
    fn pixel_to_grid(&self, point: Point) -> GridOffset;

    /// Reference corner (top-left) of a grid cell in pixels
    fn grid_to_pixel(&self, offset: GridOffset) -> Point;

    /// Size of one grid cell in pixels
    fn grid_size(&self) -> f64;

    /// Distance units covered by one grid cell
    fn grid_distance(&self) -> f64;
}

/// A single cell of a planned path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Grid cell
    pub offset: GridOffset,
    /// Movement cost to enter this cell
    pub cost: f64,
}

impl PathSegment {
    /// Create a new path segment
    pub fn new(offset: GridOffset, cost: f64) -> Self {
        Self { offset, cost }
    }
}

/// Result of a [`PathPlanner`] request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannedPath {
    /// Ordered cells from start to target
    pub path: Vec<PathSegment>,
    /// Total cost of the path
    pub cost: f64,
}

/// Obstacle-aware path planner over grid cells.
#[async_trait]
pub trait PathPlanner: Send + Sync {
    /// Whether the planner can currently serve requests
    fn is_ready(&self) -> bool {
        true
    }

    /// Compute an optimal path between two cells
    async fn calculate_path(&self, from: GridOffset, to: GridOffset) -> Result<PlannedPath>;
}

/// Options passed to [`MovementPathService::find_path`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindPathOptions {
    /// Compute a preview path without committing movement
    pub preview: bool,
    /// Take the token's movement history into account
    pub history: bool,
}

impl Default for FindPathOptions {
    fn default() -> Self {
        Self {
            preview: true,
            history: true,
        }
    }
}

/// A token on the host canvas.
pub trait Token: Send + Sync + fmt::Debug {
    /// Host identifier
    fn id(&self) -> &str;

    /// Current position (reference corner) in pixels
    fn position(&self) -> Point;

    /// Movement already recorded for this token
    fn movement_history(&self) -> Vec<Waypoint> {
        Vec::new()
    }
}

/// Token lookup on the host's current scene.
pub trait TokenDirectory: Send + Sync {
    /// Name of the scene being viewed
    fn scene_name(&self) -> String;

    /// First token whose actor is named `actor_name`
    fn token_by_actor(&self, actor_name: &str) -> Option<Arc<dyn Token>>;

    /// First token named `token_name` on the current scene
    fn token_by_name(&self, token_name: &str) -> Option<Arc<dyn Token>>;
}

/// The host's token movement path API.
#[async_trait]
pub trait MovementPathService: Send + Sync {
    /// Find the longest reachable path for `token` from `from` to `to`.
    ///
    /// A result with fewer than two waypoints means no path was found.
    async fn find_path(
        &self,
        token: &dyn Token,
        from: Point,
        to: Point,
        options: FindPathOptions,
    ) -> Result<Vec<Waypoint>>;

    /// Every grid cell between two waypoints, both ends included
    fn expand_complete(&self, token: &dyn Token, from: Point, to: Point) -> Result<Vec<Waypoint>>;
}

/// A drawn ruler segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RulerSegment {
    /// Start of the segment
    pub start: Point,
    /// End of the segment
    pub end: Point,
}

/// Drawable ruler object on the host canvas.
pub trait RulerView: Send {
    /// Render the ruler
    fn draw(&mut self) -> Result<()>;

    /// Remove every waypoint and segment
    fn clear(&mut self);

    /// Put the ruler in its starting state
    fn set_start_state(&mut self);

    /// Append a waypoint
    fn add_waypoint(&mut self, point: Point);

    /// Remove the waypoint at `point`
    fn remove_waypoint(&mut self, point: Point);

    /// Measure from the last waypoint to `destination` along `path`
    fn measure(&mut self, destination: Point, path: &[Point]) -> Result<()>;

    /// Replace the planned movement shown by the ruler
    fn refresh(&mut self, record: &RenderRecord) -> Result<()>;

    /// Show or hide the ruler
    fn set_visible(&mut self, visible: bool);

    /// Whether the ruler is visible
    fn is_visible(&self) -> bool;

    /// Segments currently drawn
    fn segments(&self) -> &[RulerSegment];
}

/// Compatibility layer that allocates ruler views for the running host.
#[async_trait]
pub trait RulerViewFactory: Send + Sync {
    /// Allocate a fresh view for a new session
    async fn acquire(&self) -> Result<Box<dyn RulerView>>;
}
