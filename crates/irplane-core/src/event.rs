//! Event system for ruler sessions
//!
//! Provides:
//! - Event types for ruler lifecycle and user-facing warnings
//! - Event dispatcher for publishing events to subscribers

use crate::geometry::Point;
use tokio::sync::broadcast;

/// Ruler event types
#[derive(Debug, Clone, PartialEq)]
pub enum RulerEvent {
    /// A drag session started for a token
    SessionStarted {
        /// Token being dragged.
        token_id: String,
        /// Drag origin in pixels.
        origin: Point,
    },
    /// The active drag session ended
    SessionEnded {
        /// Token that was being dragged, if any.
        token_id: Option<String>,
    },
    /// Part of the requested route cannot be traversed
    PathBlocked {
        /// Token being dragged.
        token_id: String,
        /// Last reachable position.
        reachable_end: Option<Point>,
        /// Requested target.
        target: Point,
    },
    /// The path planner is not available; shown to the user as a warning
    PlannerUnavailable(String),
}

impl std::fmt::Display for RulerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulerEvent::SessionStarted { token_id, origin } => {
                write!(f, "Ruler started for {} at {}", token_id, origin)
            }
            RulerEvent::SessionEnded { token_id } => match token_id {
                Some(id) => write!(f, "Ruler ended for {}", id),
                None => write!(f, "Ruler ended"),
            },
            RulerEvent::PathBlocked {
                token_id,
                reachable_end,
                target,
            } => match reachable_end {
                Some(end) => write!(
                    f,
                    "Path for {} blocked at {}, target {}",
                    token_id, end, target
                ),
                None => write!(f, "No path for {} to {}", token_id, target),
            },
            RulerEvent::PlannerUnavailable(msg) => write!(f, "Warning: {}", msg),
        }
    }
}

/// Event dispatcher for publishing ruler events to subscribers
#[derive(Clone)]
pub struct RulerEventDispatcher {
    /// Broadcast sender channel for ruler events.
    tx: broadcast::Sender<RulerEvent>,
}

impl RulerEventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer (default 100)
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<RulerEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Returns the number of subscribers reached; zero when nobody listens.
    pub fn publish(&self, event: RulerEvent) -> usize {
        match self.tx.send(event) {
            Ok(count) => count,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!("No subscribers for ruler event: {}", event);
                0
            }
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RulerEventDispatcher {
    fn default() -> Self {
        Self::new(100)
    }
}

impl std::fmt::Debug for RulerEventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulerEventDispatcher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
