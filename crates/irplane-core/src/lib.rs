//! # irplane Core
//!
//! Core types, traits, and utilities for irplane.
//! Provides the geometry value types, the host capability traits the
//! movement ruler consumes, render records, events, and offline square
//! grid implementations of the host capabilities.

pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod render;

pub use error::{Error, GeometryError, PlannerError, Result};

pub use event::{RulerEvent, RulerEventDispatcher};

pub use geometry::{GridOffset, Measurement, Point, Waypoint};

pub use grid::{grid_line, DiagonalRule, GridMovementService, SquareGrid, StraightLinePlanner};

pub use host::{
    FindPathOptions, GeometryOracle, MovementPathService, PathPlanner, PathSegment, PlannedPath,
    RulerSegment, RulerView, RulerViewFactory, Token, TokenDirectory,
};

pub use render::{PlannedMovement, RenderRecord};
