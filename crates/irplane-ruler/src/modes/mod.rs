//! Ruler algorithms, one per [`RulerMode`](irplane_settings::RulerMode).
//!
//! Each module adds an `impl DragRuler` block; [`DragRuler::move_to`]
//! dispatches to exactly one of them.
//!
//! [`DragRuler::move_to`]: crate::DragRuler::move_to

mod follow;
mod movement_path;
mod pathfinding;

pub use movement_path::tag_expansion;
