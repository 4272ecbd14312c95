//! # irplane ruler
//!
//! Movement ruler for tokens driven by an IR tracking device.
//!
//! A [`DragRuler`] turns a stream of pointer positions into a ruler drawn on
//! the host canvas, in free-follow, pathfinding, or delegated
//! movement-path mode. A [`TrackerTable`] owns one ruler per IR channel.
//! Host capabilities are injected through [`RulerHost`].

pub mod drag_ruler;
pub mod host;
pub mod modes;
pub mod session;
pub mod throttle;
pub mod tracker;

pub use drag_ruler::DragRuler;
pub use host::RulerHost;
pub use modes::tag_expansion;
pub use session::{is_properly_tagged, RulerSession};
pub use throttle::WarningThrottle;
pub use tracker::{resolve_base, ChannelTracker, TrackerTable, DEFAULT_CHANNELS};

/// A ruler shared between tasks; the mutex queues updates in arrival order
pub type SharedRuler = std::sync::Arc<tokio::sync::Mutex<DragRuler>>;
