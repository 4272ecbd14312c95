//! Render records pushed to a ruler view in delegated pathfinding mode.

use crate::geometry::Waypoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Planned movement for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMovement {
    /// Movement already recorded for the token
    pub history: Vec<Waypoint>,
    /// Hide the planned movement
    pub hidden: bool,
    /// Whether a path search is still running
    pub searching: bool,
    /// Whether the whole requested route can be traversed
    pub reachable: bool,
    /// Portion of the route that cannot be traversed, drawn distinctly
    pub unreachable_waypoints: Vec<Waypoint>,
    /// Reachable portion of the route with costs attached
    pub found_path: Vec<Waypoint>,
}

/// Complete state handed to [`RulerView::refresh`](crate::host::RulerView::refresh)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRecord {
    /// Waypoints already passed
    pub passed_waypoints: Vec<Waypoint>,
    /// Waypoints awaiting movement
    pub pending_waypoints: Vec<Waypoint>,
    /// Planned movement keyed by user id
    pub planned_movement: HashMap<String, PlannedMovement>,
}

impl RenderRecord {
    /// Record holding a single user's planned movement
    pub fn planned(user_id: impl Into<String>, movement: PlannedMovement) -> Self {
        let mut planned_movement = HashMap::new();
        planned_movement.insert(user_id.into(), movement);
        Self {
            passed_waypoints: Vec::new(),
            pending_waypoints: Vec::new(),
            planned_movement,
        }
    }

    /// Planned movement for a user
    pub fn movement_for(&self, user_id: &str) -> Option<&PlannedMovement> {
        self.planned_movement.get(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_planned_record_keyed_by_user() {
        let movement = PlannedMovement {
            reachable: true,
            found_path: vec![Waypoint::new(Point::new(0.0, 0.0))],
            ..Default::default()
        };
        let record = RenderRecord::planned("gm", movement);

        assert!(record.passed_waypoints.is_empty());
        assert!(record.pending_waypoints.is_empty());
        assert_eq!(record.movement_for("gm").unwrap().found_path.len(), 1);
        assert!(record.movement_for("player").is_none());
    }

    #[test]
    fn test_record_json_shape() {
        let record = RenderRecord::planned("gm", PlannedMovement::default());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["plannedMovement"]["gm"]["unreachableWaypoints"].is_array());
        assert!(json["passedWaypoints"].is_array());
    }
}
