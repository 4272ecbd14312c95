//! Free-follow mode: the path tracks the pointer cell by cell.

use crate::DragRuler;
use irplane_core::{Point, Result};
use irplane_settings::RulerSettings;

impl DragRuler {
    /// Grow or shrink the path with `position`, committing a view waypoint
    /// once a diagonal run gets long enough.
    pub(crate) fn follow(&mut self, position: Point, settings: &RulerSettings) -> Result<()> {
        if self.session.retract_to(position) {
            if let Some(view) = self.view.as_mut() {
                let starts_here = view
                    .segments()
                    .last()
                    .is_some_and(|segment| segment.start == position);
                if starts_here {
                    view.remove_waypoint(position);
                    self.session.set_last_segment_origin(position);
                }
            }
        } else {
            self.session.extend_path(position);
        }

        let Some(view) = self.view.as_mut() else {
            return Ok(());
        };
        let Some(last_segment) = view.segments().last().copied() else {
            return Ok(());
        };

        let anchor = self
            .session
            .last_segment_origin()
            .unwrap_or(last_segment.start);
        let distance = self.host.geometry.measure(anchor, position)?.distance;

        if anchor.is_diagonal_to(&position) && distance > settings.diagonal_commit_distance {
            tracing::trace!("committing diagonal from {} to {}", anchor, position);
            if let Some(corner) = self.session.path_from_end(3) {
                view.add_waypoint(corner);
            }
            view.add_waypoint(position);
            self.session.set_last_segment_origin(position);
        }
        Ok(())
    }
}
