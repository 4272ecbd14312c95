//! irplane Settings Crate
//!
//! Handles application configuration: ruler and tracker settings, file
//! persistence, and validation.

pub mod config;
pub mod error;

pub use config::{BaseSetup, Config, RulerMode, RulerSettings, StopTrigger, TrackerSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
