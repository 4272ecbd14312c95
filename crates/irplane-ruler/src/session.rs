//! Drag session state
//!
//! All state threaded between `move` calls lives here. Fields are private;
//! the ruler mutates them through methods so the path and pathfinding
//! frontier invariants are kept in one place.

use irplane_core::{GridOffset, PathSegment, Point, Token, Waypoint};
use std::sync::Arc;

/// State of one drag session
#[derive(Debug, Clone, Default)]
pub struct RulerSession {
    active: bool,
    token: Option<Arc<dyn Token>>,
    origin: Option<Point>,
    previous_position: Option<Point>,
    path: Vec<Point>,
    last_segment_origin: Option<Point>,
    pathfinder_segments: Vec<PathSegment>,
    pathfinder_segments_previous: Vec<PathSegment>,
    pathfinder_start: Option<GridOffset>,
    found_path: Vec<Waypoint>,
}

impl RulerSession {
    /// Open a session for `token` starting at `origin`
    pub(crate) fn begin(&mut self, token: Arc<dyn Token>, origin: Point) {
        self.active = true;
        self.token = Some(token);
        self.origin = Some(origin);
        self.previous_position = Some(origin);
    }

    /// Release the token and drawn path, keeping the pathfinding caches
    pub(crate) fn release(&mut self) {
        self.active = false;
        self.token = None;
        self.path.clear();
    }

    /// Return every field to its initial state
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a session is open
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Token being dragged
    pub fn token(&self) -> Option<&Arc<dyn Token>> {
        self.token.as_ref()
    }

    /// Drag origin
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// Last position fed to `move`
    pub fn previous_position(&self) -> Option<Point> {
        self.previous_position
    }

    pub(crate) fn set_previous_position(&mut self, position: Point) {
        self.previous_position = Some(position);
    }

    /// Committed route
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Seed an empty path with the origin. Returns the origin when seeded.
    pub(crate) fn seed_path(&mut self) -> Option<Point> {
        if !self.path.is_empty() {
            return None;
        }
        let origin = self.origin?;
        self.path.push(origin);
        Some(origin)
    }

    pub(crate) fn set_path(&mut self, path: Vec<Point>) {
        self.path = path;
    }

    pub(crate) fn clear_path(&mut self) {
        self.path.clear();
    }

    pub(crate) fn extend_path(&mut self, position: Point) {
        self.path.push(position);
    }

    /// Drop the last path element when `position` is the element before it.
    ///
    /// The origin and first step are never retracted.
    pub(crate) fn retract_to(&mut self, position: Point) -> bool {
        let len = self.path.len();
        if len > 2 && self.path[len - 2] == position {
            self.path.pop();
            true
        } else {
            false
        }
    }

    /// Path element `n` positions from the end (`n = 1` is the last)
    pub fn path_from_end(&self, n: usize) -> Option<Point> {
        self.path
            .len()
            .checked_sub(n)
            .and_then(|idx| self.path.get(idx).copied())
    }

    /// Anchor remembered for diagonal commits in follow mode
    pub fn last_segment_origin(&self) -> Option<Point> {
        self.last_segment_origin
    }

    pub(crate) fn set_last_segment_origin(&mut self, position: Point) {
        self.last_segment_origin = Some(position);
    }

    /// Locked pathfinding segments
    pub fn pathfinder_segments(&self) -> &[PathSegment] {
        &self.pathfinder_segments
    }

    /// Speculative segments from the latest planner call
    pub fn pathfinder_segments_previous(&self) -> &[PathSegment] {
        &self.pathfinder_segments_previous
    }

    /// Cell the next planner request starts from
    pub fn pathfinder_start(&self) -> Option<GridOffset> {
        self.pathfinder_start
    }

    /// Current frontier, initialising it to `origin` when unset
    pub(crate) fn frontier_or(&mut self, origin: GridOffset) -> GridOffset {
        *self.pathfinder_start.get_or_insert(origin)
    }

    /// Step the frontier back onto the last locked segment.
    ///
    /// Returns the segment that was unlocked.
    pub(crate) fn rewind_frontier(&mut self) -> Option<PathSegment> {
        let segment = self.pathfinder_segments.pop()?;
        self.pathfinder_start = Some(segment.offset);
        Some(segment)
    }

    /// Move the frontier forward to speculative segment `idx`, locking every
    /// speculative segment before it that is not locked yet. Returns the
    /// newly locked segments.
    pub(crate) fn advance_frontier(&mut self, idx: usize) -> Vec<PathSegment> {
        let Some(&frontier) = self.pathfinder_segments_previous.get(idx) else {
            return Vec::new();
        };
        self.pathfinder_start = Some(frontier.offset);
        let mut promoted = Vec::with_capacity(idx);
        for segment in &self.pathfinder_segments_previous[..idx] {
            let locked = self
                .pathfinder_segments
                .iter()
                .any(|cell| cell.offset == segment.offset);
            if !locked && segment.offset != frontier.offset {
                self.pathfinder_segments.push(*segment);
                promoted.push(*segment);
            }
        }
        promoted
    }

    pub(crate) fn replace_speculative(&mut self, segments: Vec<PathSegment>) {
        self.pathfinder_segments_previous = segments;
    }

    /// Reachable waypoints last published in delegated mode
    pub fn found_path(&self) -> &[Waypoint] {
        &self.found_path
    }

    pub(crate) fn set_found_path(&mut self, waypoints: Vec<Waypoint>) {
        self.found_path = waypoints;
    }

    /// Whether every field holds its initial value
    pub fn is_reset(&self) -> bool {
        !self.active
            && self.token.is_none()
            && self.origin.is_none()
            && self.previous_position.is_none()
            && self.path.is_empty()
            && self.last_segment_origin.is_none()
            && self.pathfinder_segments.is_empty()
            && self.pathfinder_segments_previous.is_empty()
            && self.pathfinder_start.is_none()
            && self.found_path.is_empty()
    }
}

/// Whether a waypoint list starts and ends on checkpoints.
pub fn is_properly_tagged(waypoints: &[Waypoint]) -> bool {
    match (waypoints.first(), waypoints.last()) {
        (Some(first), Some(last)) => {
            first.checkpoint && !first.intermediate && last.checkpoint && !last.intermediate
        }
        _ => true,
    }
}
