//! Delegated mode: the host's movement path service plans the route.
//!
//! The service returns the longest reachable path as a few waypoints. The
//! view needs every cell, so each leg is expanded and tagged; the part of
//! the route the service could not reach is expanded into an unreachable
//! tail that the view draws distinctly. Costs for both come from a single
//! batched measurement so route-wide rules (alternating diagonals) apply.

use crate::DragRuler;
use irplane_core::{
    FindPathOptions, GeometryError, PlannedMovement, Point, RenderRecord, Result, RulerEvent,
    Waypoint,
};

/// Tag one expanded leg: the first cell is a checkpoint, the last is not
/// intermediate, every cell between is intermediate filler.
pub fn tag_expansion(leg: &mut [Waypoint]) {
    for waypoint in leg.iter_mut() {
        waypoint.mark_intermediate();
    }
    if let Some(last) = leg.last_mut() {
        last.intermediate = false;
    }
    if let Some(first) = leg.first_mut() {
        first.mark_checkpoint();
    }
}

impl DragRuler {
    pub(crate) async fn find_movement_path(&mut self, position: Point) -> Result<()> {
        let Some(token) = self.session.token().cloned() else {
            return Ok(());
        };
        let geometry = self.host.geometry.clone();
        let half = geometry.grid_size() / 2.0;
        let target = position.offset(-half, -half);
        let from = token.position();

        tracing::debug!("finding movement path from {} to {}", from, target);
        let mut waypoints = self
            .host
            .movement
            .find_path(token.as_ref(), from, target, FindPathOptions::default())
            .await?;
        // a target in the token's own cell is a zero-length route, not a blocked one
        if waypoints.len() < 2 && geometry.pixel_to_grid(from) == geometry.pixel_to_grid(target) {
            waypoints = vec![Waypoint::new(from), Waypoint::new(from)];
        }

        let mut segments: Vec<Waypoint> = Vec::new();
        let mut unreachable: Vec<Waypoint> = Vec::new();

        if waypoints.len() < 2 {
            tracing::debug!("no movement path from {} to {}", from, target);
            self.session.clear_path();
            unreachable = self.host.movement.expand_complete(token.as_ref(), from, target)?;
        } else {
            self.session
                .set_path(waypoints.iter().map(Waypoint::position).collect());

            for leg in waypoints.windows(2) {
                let mut cells = self.host.movement.expand_complete(
                    token.as_ref(),
                    leg[0].position(),
                    leg[1].position(),
                )?;
                tag_expansion(&mut cells);
                segments.extend(cells);
            }

            let last = segments.last().map_or(from, Waypoint::position);
            if geometry.pixel_to_grid(last) != geometry.pixel_to_grid(target) {
                tracing::debug!("path is blocked at {}, target is {}", last, target);
                unreachable = self
                    .host
                    .movement
                    .expand_complete(token.as_ref(), last, target)?;
            }
        }

        let route: Vec<Waypoint> = segments.iter().chain(&unreachable).copied().collect();
        let costs = geometry.measure_path(&route)?;
        if costs.len() != route.len() {
            return Err(GeometryError::WaypointCountMismatch {
                expected: route.len(),
                actual: costs.len(),
            }
            .into());
        }
        let (reachable_costs, tail_costs) = costs.split_at(segments.len());
        for (waypoint, cost) in segments.iter_mut().zip(reachable_costs) {
            waypoint.cost = *cost;
        }
        for (waypoint, cost) in unreachable.iter_mut().zip(tail_costs) {
            waypoint.cost = *cost;
            waypoint.elevation = 0.0;
            waypoint.mark_intermediate();
        }

        if segments.is_empty() {
            if let Some(first) = unreachable.first_mut() {
                first.mark_checkpoint();
            }
        }
        if let Some(last) = unreachable.last_mut() {
            last.mark_checkpoint();
        }

        let reachable = unreachable.is_empty();
        if reachable {
            if let Some(last) = segments.last_mut() {
                last.mark_checkpoint();
            }
        } else {
            self.host.events.publish(RulerEvent::PathBlocked {
                token_id: token.id().to_string(),
                reachable_end: segments.last().map(Waypoint::position),
                target,
            });
        }
        self.session.set_found_path(segments.clone());

        if let Some(view) = self.view.as_mut() {
            let movement = PlannedMovement {
                history: token.movement_history(),
                hidden: false,
                searching: false,
                reachable,
                unreachable_waypoints: unreachable,
                found_path: segments,
            };
            view.refresh(&RenderRecord::planned(self.host.user_id.clone(), movement))?;
            view.set_visible(true);
            view.draw()?;
        }
        Ok(())
    }
}
