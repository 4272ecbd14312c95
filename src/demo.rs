//! Offline host used by the `irplane` binary
//!
//! Replays a scripted drag against the square-grid reference collaborators
//! and logs every call the ruler makes on its view.

use async_trait::async_trait;
use irplane_core::{
    GridMovementService, GridOffset, Point, RenderRecord, Result, RulerSegment, RulerView,
    RulerViewFactory, SquareGrid, StraightLinePlanner, Token,
};
use irplane_ruler::{RulerHost, TrackerTable};
use irplane_settings::Config;
use std::sync::Arc;

/// Grid cell size of the demo canvas in pixels
pub const DEMO_GRID_SIZE: f64 = 100.0;

/// View that logs instead of drawing
#[derive(Debug, Default)]
pub struct LoggingView {
    waypoints: Vec<Point>,
    segments: Vec<RulerSegment>,
    visible: bool,
}

impl LoggingView {
    /// Waypoints currently placed
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }
}

impl RulerView for LoggingView {
    fn draw(&mut self) -> Result<()> {
        tracing::info!("draw {} waypoints", self.waypoints.len());
        Ok(())
    }

    fn clear(&mut self) {
        self.waypoints.clear();
        self.segments.clear();
    }

    fn set_start_state(&mut self) {}

    fn add_waypoint(&mut self, point: Point) {
        tracing::info!("waypoint {}", point);
        self.waypoints.push(point);
    }

    fn remove_waypoint(&mut self, point: Point) {
        tracing::info!("remove waypoint {}", point);
        if let Some(idx) = self.waypoints.iter().rposition(|w| *w == point) {
            self.waypoints.remove(idx);
        }
    }

    fn measure(&mut self, destination: Point, path: &[Point]) -> Result<()> {
        self.segments = self
            .waypoints
            .iter()
            .copied()
            .chain(std::iter::once(destination))
            .collect::<Vec<_>>()
            .windows(2)
            .map(|pair| RulerSegment {
                start: pair[0],
                end: pair[1],
            })
            .collect();
        tracing::info!(
            "measure to {} over {} path points, {} segments",
            destination,
            path.len(),
            self.segments.len()
        );
        Ok(())
    }

    fn refresh(&mut self, record: &RenderRecord) -> Result<()> {
        for (user, movement) in &record.planned_movement {
            tracing::info!(
                "planned movement for {}: {} reachable, {} unreachable",
                user,
                movement.found_path.len(),
                movement.unreachable_waypoints.len()
            );
        }
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn segments(&self) -> &[RulerSegment] {
        &self.segments
    }
}

/// Factory handing out [`LoggingView`]s
#[derive(Debug, Default)]
pub struct LoggingViewFactory;

#[async_trait]
impl RulerViewFactory for LoggingViewFactory {
    async fn acquire(&self) -> Result<Box<dyn RulerView>> {
        Ok(Box::new(LoggingView::default()))
    }
}

/// Token standing still at a fixed position
#[derive(Debug, Clone)]
pub struct DemoToken {
    id: String,
    position: Point,
}

impl DemoToken {
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

impl Token for DemoToken {
    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Point {
        self.position
    }
}

/// Host over a square grid with a wall across column 4
pub fn demo_host() -> RulerHost {
    let grid = SquareGrid::new(DEMO_GRID_SIZE, 5.0);
    let wall: Vec<GridOffset> = (0..3).map(|i| GridOffset::new(i, 4)).collect();
    RulerHost::new(
        Arc::new(grid),
        Arc::new(GridMovementService::new(grid).with_blocked(wall.clone())),
        Arc::new(LoggingViewFactory),
        "demo",
    )
    .with_planner(Arc::new(StraightLinePlanner::new().with_blocked(wall)))
}

/// Pointer positions of the scripted drag, at cell centres
pub fn demo_drag() -> Vec<Point> {
    let centre = DEMO_GRID_SIZE / 2.0;
    [(1, 0), (2, 0), (3, 1), (3, 2), (2, 2), (5, 2)]
        .into_iter()
        .map(|(col, row)| {
            Point::new(
                f64::from(col) * DEMO_GRID_SIZE + centre,
                f64::from(row) * DEMO_GRID_SIZE + centre,
            )
        })
        .collect()
}

/// Replay [`demo_drag`] on channel 0 of a tracker table built from `config`.
///
/// Returns the number of ruler events published.
pub async fn replay(config: &Config) -> anyhow::Result<usize> {
    let host = demo_host();
    let mut events = host.events.subscribe();
    let mut table = TrackerTable::from_config(host, config);

    let token: Arc<dyn Token> = Arc::new(DemoToken::new("demo-token", Point::new(0.0, 0.0)));
    let origin = Point::new(DEMO_GRID_SIZE / 2.0, DEMO_GRID_SIZE / 2.0);
    table.grab(0, token, origin).await?;
    for position in demo_drag() {
        table.track(0, position).await?;
    }
    table.release(0)?;
    table.ruler_test_end(0)?;

    let mut published = 0;
    while let Ok(event) = events.try_recv() {
        tracing::info!("{}", event);
        published += 1;
    }
    Ok(published)
}
