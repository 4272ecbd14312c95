//! Error handling for irplane
//!
//! Provides error types for the layers a ruler session touches:
//! - Geometry errors (the host grid/measurement oracle)
//! - Planner errors (path planning and the movement path service)
//!
//! Host views and tokens report their own failures through [`Error::other`].
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by a [`GeometryOracle`](crate::host::GeometryOracle) when the host
/// grid cannot answer a measurement or coordinate conversion.
#[derive(Error, Debug, Clone)]
pub enum GeometryError {
    /// The host canvas has no grid configured
    #[error("No grid available on the canvas")]
    NoGrid,

    /// Batched measurement returned a different number of waypoints than requested
    #[error("Measurement returned {actual} waypoints, expected {expected}")]
    WaypointCountMismatch {
        /// Number of waypoints sent to the oracle.
        expected: usize,
        /// Number of waypoint costs returned.
        actual: usize,
    },
}

/// Planner error type
///
/// Raised by a [`PathPlanner`](crate::host::PathPlanner) or a
/// [`MovementPathService`](crate::host::MovementPathService).
#[derive(Error, Debug, Clone)]
pub enum PlannerError {
    /// The planner rejected the request
    #[error("Path request from ({from_i}, {from_j}) to ({to_i}, {to_j}) failed: {reason}")]
    RequestFailed {
        /// Start row.
        from_i: i32,
        /// Start column.
        from_j: i32,
        /// Target row.
        to_i: i32,
        /// Target column.
        to_j: i32,
        /// The reason the request failed.
        reason: String,
    },
}

/// Main error type for irplane
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Planner error
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// Tracker channel index past the end of the table
    #[error("channel {channel} out of range (0..{channels})")]
    ChannelOutOfRange {
        /// Requested channel.
        channel: usize,
        /// Number of channels in the table.
        channels: usize,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a planner error
    pub fn is_planner_error(&self) -> bool {
        matches!(self, Error::Planner(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
