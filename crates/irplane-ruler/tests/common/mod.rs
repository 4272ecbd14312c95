#![allow(dead_code)]

use async_trait::async_trait;
use irplane_core::{
    GeometryOracle, GridMovementService, GridOffset, Point, RenderRecord, Result, RulerSegment,
    RulerView, RulerViewFactory, SquareGrid, StraightLinePlanner, Token, Waypoint,
};
use irplane_ruler::{DragRuler, RulerHost};
use irplane_settings::{RulerMode, RulerSettings};
use parking_lot::RwLock;
use std::sync::{Arc, Mutex};

pub const USER: &str = "gamemaster";

pub fn grid() -> SquareGrid {
    SquareGrid::new(50.0, 5.0)
}

pub fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Clear,
    SetStartState,
    AddWaypoint(Point),
    RemoveWaypoint(Point),
    Measure(Point, Vec<Point>),
    Refresh(RenderRecord),
    SetVisible(bool),
    Draw,
}

/// What every view handed out by a [`RecordingFactory`] did
#[derive(Debug, Default)]
pub struct ViewLog {
    pub calls: Vec<ViewCall>,
    pub waypoints: Vec<Point>,
    pub acquired: usize,
    pub released: usize,
}

impl ViewLog {
    pub fn count(&self, matches: impl Fn(&ViewCall) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }

    pub fn added(&self) -> Vec<Point> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::AddWaypoint(point) => Some(*point),
                _ => None,
            })
            .collect()
    }

    pub fn measures(&self) -> usize {
        self.count(|call| matches!(call, ViewCall::Measure(..)))
    }

    pub fn last_refresh(&self) -> Option<&RenderRecord> {
        self.calls.iter().rev().find_map(|call| match call {
            ViewCall::Refresh(record) => Some(record),
            _ => None,
        })
    }
}

/// View that records calls and draws segments between its waypoints and the
/// measured destination
pub struct RecordingView {
    log: Arc<Mutex<ViewLog>>,
    waypoints: Vec<Point>,
    segments: Vec<RulerSegment>,
    visible: bool,
}

impl RecordingView {
    fn record(&self, call: ViewCall) {
        let mut log = self.log.lock().unwrap();
        log.calls.push(call);
        log.waypoints = self.waypoints.clone();
    }
}

impl RulerView for RecordingView {
    fn draw(&mut self) -> Result<()> {
        self.record(ViewCall::Draw);
        Ok(())
    }

    fn clear(&mut self) {
        self.waypoints.clear();
        self.segments.clear();
        self.record(ViewCall::Clear);
    }

    fn set_start_state(&mut self) {
        self.record(ViewCall::SetStartState);
    }

    fn add_waypoint(&mut self, point: Point) {
        self.waypoints.push(point);
        self.record(ViewCall::AddWaypoint(point));
    }

    fn remove_waypoint(&mut self, point: Point) {
        if let Some(idx) = self.waypoints.iter().rposition(|w| *w == point) {
            self.waypoints.remove(idx);
        }
        self.record(ViewCall::RemoveWaypoint(point));
    }

    fn measure(&mut self, destination: Point, path: &[Point]) -> Result<()> {
        let mut points = self.waypoints.clone();
        points.push(destination);
        self.segments = points
            .windows(2)
            .map(|pair| RulerSegment {
                start: pair[0],
                end: pair[1],
            })
            .collect();
        self.record(ViewCall::Measure(destination, path.to_vec()));
        Ok(())
    }

    fn refresh(&mut self, record: &RenderRecord) -> Result<()> {
        self.record(ViewCall::Refresh(record.clone()));
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.record(ViewCall::SetVisible(visible));
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn segments(&self) -> &[RulerSegment] {
        &self.segments
    }
}

impl Drop for RecordingView {
    fn drop(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.released += 1;
        }
    }
}

#[derive(Default)]
pub struct RecordingFactory {
    pub log: Arc<Mutex<ViewLog>>,
}

#[async_trait]
impl RulerViewFactory for RecordingFactory {
    async fn acquire(&self) -> Result<Box<dyn RulerView>> {
        self.log.lock().unwrap().acquired += 1;
        Ok(Box::new(RecordingView {
            log: self.log.clone(),
            waypoints: Vec::new(),
            segments: Vec::new(),
            visible: false,
        }))
    }
}

#[derive(Debug)]
pub struct StaticToken {
    pub id: String,
    pub position: Point,
    pub history: Vec<Waypoint>,
}

impl StaticToken {
    pub fn at(id: &str, position: Point) -> Arc<dyn Token> {
        Arc::new(Self {
            id: id.to_string(),
            position,
            history: Vec::new(),
        })
    }
}

impl Token for StaticToken {
    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn movement_history(&self) -> Vec<Waypoint> {
        self.history.clone()
    }
}

/// Ruler wired to a recording view over a 50px grid with 5 units per cell
pub struct Fixture {
    pub ruler: DragRuler,
    pub settings: Arc<RwLock<RulerSettings>>,
    pub log: Arc<Mutex<ViewLog>>,
    pub host: RulerHost,
}

impl Fixture {
    pub fn new(mode: RulerMode) -> Self {
        Self::build(mode, None, Vec::new())
    }

    pub fn with_planner(mode: RulerMode, planner: StraightLinePlanner) -> Self {
        Self::build(mode, Some(planner), Vec::new())
    }

    pub fn with_blocked(mode: RulerMode, blocked: Vec<GridOffset>) -> Self {
        Self::build(mode, None, blocked)
    }

    fn build(
        mode: RulerMode,
        planner: Option<StraightLinePlanner>,
        blocked: Vec<GridOffset>,
    ) -> Self {
        let factory = RecordingFactory::default();
        let log = factory.log.clone();
        let geometry: Arc<dyn GeometryOracle> = Arc::new(grid());
        let movement = Arc::new(GridMovementService::new(grid()).with_blocked(blocked));
        let mut host = RulerHost::new(geometry, movement, Arc::new(factory), USER);
        if let Some(planner) = planner {
            host = host.with_planner(Arc::new(planner));
        }
        let settings = Arc::new(RwLock::new(RulerSettings {
            mode,
            ..RulerSettings::default()
        }));
        Self {
            ruler: DragRuler::new(host.clone(), settings.clone()),
            settings,
            log,
            host,
        }
    }

    pub fn log(&self) -> std::sync::MutexGuard<'_, ViewLog> {
        self.log.lock().unwrap()
    }

    pub fn clear_log(&self) {
        self.log().calls.clear();
    }
}
