//! Pathfinding mode with backtracking.
//!
//! The planner proposes a route from the frontier cell to the pointer.
//! Speculative cells the pointer has moved more than the backtrack distance
//! away from are locked; returning to within that distance of the frontier
//! unlocks the last locked cell again.

use crate::DragRuler;
use irplane_core::{GeometryOracle, PathSegment, Point, Result};
use irplane_settings::RulerSettings;

impl DragRuler {
    /// Run one pathfinding update. Returns `false` when the update was
    /// dropped because no planner is available.
    pub(crate) async fn pathfind(
        &mut self,
        position: Point,
        settings: &RulerSettings,
    ) -> Result<bool> {
        let planner = self.host.planner.clone().filter(|planner| planner.is_ready());
        let Some(planner) = planner else {
            self.warn_planner_unavailable(settings);
            return Ok(false);
        };
        let geometry = self.host.geometry.clone();

        let Some(origin) = self.session.origin() else {
            return Ok(false);
        };
        let start = self.session.frontier_or(geometry.pixel_to_grid(origin));

        let threshold = settings.distance * geometry.grid_distance();
        if threshold > 0.0 {
            let from_start = geometry
                .measure(geometry.grid_to_pixel(start), position)?
                .distance;
            if from_start <= threshold {
                if let Some(unlocked) = self.session.rewind_frontier() {
                    tracing::debug!("unlocked cell {}", unlocked.offset);
                }
            }

            if let Some(idx) = self.lock_frontier(position, threshold)? {
                let locked = self.session.advance_frontier(idx);
                tracing::debug!("locked {} cells", locked.len());
            }
        }

        let from = self.session.frontier_or(geometry.pixel_to_grid(origin));
        let to = geometry.pixel_to_grid(position);
        tracing::debug!("calculating {} to {}", from, to);
        let planned = planner.calculate_path(from, to).await?;
        self.session.replace_speculative(planned.path);

        if let Some(view) = self.view.as_mut() {
            view.clear();
            let cells = self
                .session
                .pathfinder_segments()
                .iter()
                .chain(self.session.pathfinder_segments_previous());
            for segment in cells {
                let corner = geometry.grid_to_pixel(segment.offset);
                tracing::trace!("segment is {}", corner);
                view.add_waypoint(corner);
            }
        }
        Ok(true)
    }

    /// Index of the new frontier among the speculative segments.
    ///
    /// The leading speculative cells farther than `threshold` from the
    /// pointer are left behind; the last of them becomes the frontier. The
    /// run only counts when a later cell is within `threshold`, i.e. the
    /// pointer is still ahead on the proposed path. A pointer that moved
    /// back past the frontier locks nothing.
    fn lock_frontier(&self, position: Point, threshold: f64) -> Result<Option<usize>> {
        let geometry = &self.host.geometry;
        let mut frontier = None;
        for (idx, segment) in self.session.pathfinder_segments_previous().iter().enumerate() {
            if distance_to(geometry.as_ref(), segment, position)? > threshold {
                frontier = Some(idx);
            } else {
                return Ok(frontier);
            }
        }
        Ok(None)
    }
}

fn distance_to(
    geometry: &dyn GeometryOracle,
    segment: &PathSegment,
    position: Point,
) -> Result<f64> {
    Ok(geometry
        .measure(geometry.grid_to_pixel(segment.offset), position)?
        .distance)
}
