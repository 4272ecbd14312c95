//! Movement ruler state machine
//!
//! A [`DragRuler`] draws a ruler between a token's origin and the position an
//! IR base (or any pointer) is currently at. Positions arrive as a stream of
//! noisy updates; the ruler reconciles them with the host grid in one of the
//! modes selected by [`RulerMode`]:
//! - `follow`: the path grows and shrinks with the pointer
//! - `pathfinding`: an external planner proposes the route, cells the
//!   pointer has moved well past are locked, and hovering back near the
//!   frontier unlocks them again
//! - `findMovementPath`: the host's own movement path service plans the
//!   route, including the unreachable tail when the way is blocked
//!
//! Calls are serialized by `&mut self`. Share a ruler between tasks through
//! [`SharedRuler`](crate::SharedRuler), which queues updates in order.

use crate::host::RulerHost;
use crate::session::RulerSession;
use crate::throttle::WarningThrottle;
use irplane_core::{Point, Result, RulerEvent, RulerView, Token};
use irplane_settings::{RulerMode, RulerSettings, StopTrigger};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Draws a ruler between a token's origin and its current position.
pub struct DragRuler {
    pub(crate) host: RulerHost,
    settings: Arc<RwLock<RulerSettings>>,
    pub(crate) session: RulerSession,
    pub(crate) view: Option<Box<dyn RulerView>>,
    planner_warning: WarningThrottle,
}

impl DragRuler {
    /// Create a ruler reading `settings` on every call
    pub fn new(host: RulerHost, settings: Arc<RwLock<RulerSettings>>) -> Self {
        Self {
            host,
            settings,
            session: RulerSession::default(),
            view: None,
            planner_warning: WarningThrottle::new(),
        }
    }

    /// Wrap in a mutex so tasks can share the ruler
    pub fn into_shared(self) -> crate::SharedRuler {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    /// Current session state
    pub fn session(&self) -> &RulerSession {
        &self.session
    }

    /// Whether a session is open
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Whether a view is held
    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    fn settings(&self) -> RulerSettings {
        self.settings.read().clone()
    }

    /// Start a session for `token` at `position`.
    ///
    /// Ends the open session first, so at most one is ever active.
    pub async fn start(&mut self, token: Arc<dyn Token>, position: Point) -> Result<()> {
        if self.settings().mode == RulerMode::Disabled {
            return Ok(());
        }

        if self.session.is_active() || self.view.is_some() {
            self.end();
        }

        let view = self.host.views.acquire().await?;
        tracing::info!("Ruler started for {} at {}", token.id(), position);
        self.host.events.publish(RulerEvent::SessionStarted {
            token_id: token.id().to_string(),
            origin: position,
        });
        self.session.begin(token, position);
        self.view = Some(view);
        Ok(())
    }

    /// Move the ruler end point to `position`.
    ///
    /// Repeating the previous position is a no-op, as is moving without an
    /// open session.
    pub async fn move_to(&mut self, position: Point) -> Result<()> {
        let settings = self.settings();
        if settings.mode == RulerMode::Disabled {
            return Ok(());
        }
        if !self.session.is_active() {
            tracing::debug!("Ignoring ruler move to {} without a session", position);
            return Ok(());
        }

        tracing::debug!("move ruler to {}", position);
        if self.session.previous_position() == Some(position) {
            return Ok(());
        }
        self.session.set_previous_position(position);

        match settings.mode {
            RulerMode::Disabled => return Ok(()),
            RulerMode::FindMovementPath => self.find_movement_path(position).await?,
            RulerMode::Follow => {
                self.seed_path();
                self.follow(position, &settings)?;
            }
            RulerMode::Pathfinding => {
                self.seed_path();
                if !self.pathfind(position, &settings).await? {
                    return Ok(());
                }
            }
        }

        if let Some(view) = self.view.as_mut() {
            view.measure(position, self.session.path())?;
        }
        Ok(())
    }

    /// End the session and release the view.
    ///
    /// Safe to call without a session.
    pub fn end(&mut self) {
        let mode = self.settings.read().mode;
        let was_active = self.session.is_active();
        let token_id = self.session.token().map(|t| t.id().to_string());

        if let Some(mut view) = self.view.take() {
            view.clear();
        }

        match mode {
            RulerMode::FindMovementPath => self.session.release(),
            RulerMode::Disabled | RulerMode::Follow | RulerMode::Pathfinding => {
                self.session.reset()
            }
        }

        if was_active {
            tracing::info!("Ruler ended for {}", token_id.as_deref().unwrap_or("<none>"));
            self.host
                .events
                .publish(RulerEvent::SessionEnded { token_id });
        }
    }

    /// The token was released by the user
    pub fn token_drop(&mut self) {
        let settings = self.settings();
        if settings.mode != RulerMode::Disabled && settings.stop == StopTrigger::TokenDrop {
            self.end();
        }
    }

    /// Seed an empty path with the origin and restart the view from it
    fn seed_path(&mut self) {
        if let Some(origin) = self.session.seed_path() {
            if let Some(view) = self.view.as_mut() {
                view.clear();
                view.set_start_state();
                view.add_waypoint(origin);
            }
        }
    }

    /// Warn that the planner is missing, at most once per interval
    pub(crate) fn warn_planner_unavailable(&mut self, settings: &RulerSettings) {
        let interval = Duration::from_millis(settings.planner_warning_interval_ms);
        if self.planner_warning.should_warn(interval) {
            let message = "Path planner is not available; the pathfinding ruler is inactive";
            tracing::warn!("{}", message);
            self.host
                .events
                .publish(RulerEvent::PlannerUnavailable(message.to_string()));
        }
    }
}

impl std::fmt::Debug for DragRuler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragRuler")
            .field("host", &self.host)
            .field("session", &self.session)
            .field("has_view", &self.view.is_some())
            .finish_non_exhaustive()
    }
}
