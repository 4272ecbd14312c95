//! # irplane
//!
//! Movement ruler for virtual tabletop tokens moved with an infrared
//! tracking device. Tracker positions are noisy and continuous; the ruler
//! reconciles them with the host's grid and pathfinding in one of three
//! modes.
//!
//! ## Architecture
//!
//! irplane is organized as a workspace with multiple crates:
//!
//! 1. **irplane-core** - Geometry, waypoint records, host capability traits, events
//! 2. **irplane-settings** - Ruler and tracker configuration, JSON/TOML persistence
//! 3. **irplane-ruler** - The `DragRuler` state machine and per-channel trackers
//! 4. **irplane** - Logging setup, re-exports, and the demo binary

pub mod demo;

pub use irplane_core::{
    Error, FindPathOptions, GeometryOracle, GridMovementService, GridOffset, Measurement,
    MovementPathService, PathPlanner, PathSegment, PlannedMovement, PlannedPath, Point,
    RenderRecord, Result, RulerEvent, RulerEventDispatcher, RulerSegment, RulerView,
    RulerViewFactory, SquareGrid, StraightLinePlanner, Token, Waypoint,
};

pub use irplane_settings::{Config, RulerMode, RulerSettings, StopTrigger, TrackerSettings};

pub use irplane_ruler::{DragRuler, RulerHost, RulerSession, SharedRuler, TrackerTable};

use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable selecting JSON log output
pub const LOG_FORMAT_ENV: &str = "IRPLANE_LOG_FORMAT";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting, or JSON lines when
///   `IRPLANE_LOG_FORMAT=json`
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .pretty();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Load the configuration from `path`, or from the platform config file
/// when it exists, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    use anyhow::Context;

    if let Some(path) = path {
        return Config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()));
    }

    match Config::default_path() {
        Ok(default) if default.exists() => Config::load_from_file(&default)
            .with_context(|| format!("loading config from {}", default.display())),
        _ => {
            tracing::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
