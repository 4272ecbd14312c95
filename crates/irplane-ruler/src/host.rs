//! Bundle of host collaborators shared by every ruler.

use irplane_core::{
    GeometryOracle, MovementPathService, PathPlanner, RulerEventDispatcher, RulerViewFactory,
};
use std::sync::Arc;

/// Host capabilities a [`DragRuler`](crate::DragRuler) consumes.
///
/// Cheap to clone; every tracker channel gets its own copy.
#[derive(Clone)]
pub struct RulerHost {
    /// Grid measurement and coordinate conversion
    pub geometry: Arc<dyn GeometryOracle>,
    /// Optional external path planner; absent when the host has none
    pub planner: Option<Arc<dyn PathPlanner>>,
    /// Host token movement path API
    pub movement: Arc<dyn MovementPathService>,
    /// Allocates ruler views
    pub views: Arc<dyn RulerViewFactory>,
    /// Ruler events and user-facing warnings
    pub events: RulerEventDispatcher,
    /// User the planned movement is published for
    pub user_id: String,
}

impl RulerHost {
    /// Create a host bundle without a path planner
    pub fn new(
        geometry: Arc<dyn GeometryOracle>,
        movement: Arc<dyn MovementPathService>,
        views: Arc<dyn RulerViewFactory>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            geometry,
            planner: None,
            movement,
            views,
            events: RulerEventDispatcher::default(),
            user_id: user_id.into(),
        }
    }

    /// Attach a path planner
    pub fn with_planner(mut self, planner: Arc<dyn PathPlanner>) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Publish events on an existing dispatcher
    pub fn with_events(mut self, events: RulerEventDispatcher) -> Self {
        self.events = events;
        self
    }
}

impl std::fmt::Debug for RulerHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulerHost")
            .field("planner", &self.planner.is_some())
            .field("events", &self.events)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
