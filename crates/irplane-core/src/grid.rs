//! Square grid reference collaborators
//!
//! Offline implementations of the host capabilities over a plain square
//! grid. They back the demo binary and tests, and document the contracts
//! the real host adapters have to meet.

use crate::error::{GeometryError, PlannerError};
use crate::geometry::{GridOffset, Measurement, Point, Waypoint};
use crate::host::{
    FindPathOptions, GeometryOracle, MovementPathService, PathPlanner, PathSegment, PlannedPath,
    Token,
};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// How diagonal steps are charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagonalRule {
    /// Every step costs one cell
    #[default]
    Equidistant,
    /// Every second diagonal step costs two cells
    Alternating,
}

/// Square grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquareGrid {
    /// Cell size in pixels
    pub size: f64,
    /// Distance units per cell
    pub distance: f64,
    /// Diagonal movement rule
    pub diagonals: DiagonalRule,
}

impl Default for SquareGrid {
    fn default() -> Self {
        Self {
            size: 100.0,
            distance: 5.0,
            diagonals: DiagonalRule::Equidistant,
        }
    }
}

impl SquareGrid {
    /// Create a grid with the given cell size and distance per cell
    pub fn new(size: f64, distance: f64) -> Self {
        Self {
            size,
            distance,
            ..Default::default()
        }
    }

    /// Use a different diagonal rule
    pub fn with_diagonals(mut self, diagonals: DiagonalRule) -> Self {
        self.diagonals = diagonals;
        self
    }

    /// Cost in cells of moving between two cells, given how many diagonal
    /// steps were already taken on the route.
    fn step_cells(&self, from: GridOffset, to: GridOffset, diagonals_before: u32) -> (f64, u32) {
        let di = (to.i - from.i).unsigned_abs();
        let dj = (to.j - from.j).unsigned_abs();
        let diagonal = di.min(dj);
        let straight = di.max(dj) - diagonal;
        let cells = match self.diagonals {
            DiagonalRule::Equidistant => diagonal + straight,
            DiagonalRule::Alternating => {
                let total = diagonals_before + diagonal;
                let extra = total / 2 - diagonals_before / 2;
                diagonal + straight + extra
            }
        };
        (f64::from(cells), diagonal)
    }
}

impl GeometryOracle for SquareGrid {
    fn measure(&self, from: Point, to: Point) -> Result<Measurement> {
        if self.size <= 0.0 {
            return Err(GeometryError::NoGrid.into());
        }
        let (cells, _) = self.step_cells(self.pixel_to_grid(from), self.pixel_to_grid(to), 0);
        let distance = cells * self.distance;
        Ok(Measurement {
            distance,
            cost: distance,
        })
    }

    fn measure_path(&self, waypoints: &[Waypoint]) -> Result<Vec<Option<f64>>> {
        if self.size <= 0.0 {
            return Err(GeometryError::NoGrid.into());
        }
        let mut costs = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        let mut diagonals = 0;
        let mut previous: Option<GridOffset> = None;
        for waypoint in waypoints {
            let cell = self.pixel_to_grid(waypoint.position());
            if let Some(prev) = previous {
                let (cells, diagonal) = self.step_cells(prev, cell, diagonals);
                diagonals += diagonal;
                total += cells * self.distance;
            }
            costs.push(Some(total));
            previous = Some(cell);
        }
        Ok(costs)
    }

    fn pixel_to_grid(&self, point: Point) -> GridOffset {
        GridOffset::new(
            (point.y / self.size).floor() as i32,
            (point.x / self.size).floor() as i32,
        )
    }

    fn grid_to_pixel(&self, offset: GridOffset) -> Point {
        Point::new(
            f64::from(offset.j) * self.size,
            f64::from(offset.i) * self.size,
        )
    }

    fn grid_size(&self) -> f64 {
        self.size
    }

    fn grid_distance(&self) -> f64 {
        self.distance
    }
}

/// Cells on the line from `from` to `to`, both ends included.
///
/// Diagonal steps are taken first, then straight steps.
pub fn grid_line(from: GridOffset, to: GridOffset) -> Vec<GridOffset> {
    let mut cells = vec![from];
    let mut current = from;
    while current != to {
        current.i += (to.i - current.i).signum();
        current.j += (to.j - current.j).signum();
        cells.push(current);
    }
    cells
}

/// Planner that walks the straight grid line towards the target and stops
/// in front of the first blocked cell.
#[derive(Debug, Default)]
pub struct StraightLinePlanner {
    blocked: HashSet<GridOffset>,
    unavailable: AtomicBool,
}

impl StraightLinePlanner {
    /// Create a planner with no obstacles
    pub fn new() -> Self {
        Self::default()
    }

    /// Block a cell
    pub fn with_blocked(mut self, cells: impl IntoIterator<Item = GridOffset>) -> Self {
        self.blocked.extend(cells);
        self
    }

    /// Toggle planner availability
    pub fn set_ready(&self, ready: bool) {
        self.unavailable.store(!ready, Ordering::SeqCst);
    }
}

#[async_trait]
impl PathPlanner for StraightLinePlanner {
    fn is_ready(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }

    async fn calculate_path(&self, from: GridOffset, to: GridOffset) -> Result<PlannedPath> {
        if self.blocked.contains(&from) {
            return Err(PlannerError::RequestFailed {
                from_i: from.i,
                from_j: from.j,
                to_i: to.i,
                to_j: to.j,
                reason: "start cell is blocked".to_string(),
            }
            .into());
        }
        let path: Vec<PathSegment> = grid_line(from, to)
            .into_iter()
            .take_while(|cell| !self.blocked.contains(cell))
            .map(|cell| PathSegment::new(cell, 1.0))
            .collect();
        let cost = path.len().saturating_sub(1) as f64;
        Ok(PlannedPath { path, cost })
    }
}

/// Movement path service over a [`SquareGrid`] with blocked cells.
#[derive(Debug, Default)]
pub struct GridMovementService {
    grid: SquareGrid,
    blocked: HashSet<GridOffset>,
}

impl GridMovementService {
    /// Create a service for a grid
    pub fn new(grid: SquareGrid) -> Self {
        Self {
            grid,
            blocked: HashSet::new(),
        }
    }

    /// Block cells
    pub fn with_blocked(mut self, cells: impl IntoIterator<Item = GridOffset>) -> Self {
        self.blocked.extend(cells);
        self
    }

    fn waypoint(&self, cell: GridOffset) -> Waypoint {
        Waypoint::new(self.grid.grid_to_pixel(cell))
    }
}

#[async_trait]
impl MovementPathService for GridMovementService {
    async fn find_path(
        &self,
        _token: &dyn Token,
        from: Point,
        to: Point,
        _options: FindPathOptions,
    ) -> Result<Vec<Waypoint>> {
        let start = self.grid.pixel_to_grid(from);
        let target = self.grid.pixel_to_grid(to);
        let reachable: Vec<GridOffset> = grid_line(start, target)
            .into_iter()
            .take_while(|cell| !self.blocked.contains(cell))
            .collect();

        if start == target {
            return Ok(vec![self.waypoint(start), self.waypoint(start)]);
        }
        let mut waypoints = vec![self.waypoint(start)];
        if let Some(&last) = reachable.last() {
            if last != start {
                waypoints.push(self.waypoint(last));
            }
        }
        Ok(waypoints)
    }

    fn expand_complete(&self, _token: &dyn Token, from: Point, to: Point) -> Result<Vec<Waypoint>> {
        let cells = grid_line(self.grid.pixel_to_grid(from), self.grid.pixel_to_grid(to));
        Ok(cells.into_iter().map(|cell| self.waypoint(cell)).collect())
    }
}
