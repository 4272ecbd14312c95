//! Configuration and settings management for irplane
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Ruler settings (mode, backtrack distance, stop trigger)
//! - Tracker settings (channel count, active user, base to token table)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Movement ruler mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RulerMode {
    /// No ruler is drawn
    Disabled,
    /// Delegate path computation to the host movement path service
    FindMovementPath,
    /// Follow the pointer freely
    Follow,
    /// Plan paths with an external path planner, with backtracking
    Pathfinding,
}

impl Default for RulerMode {
    fn default() -> Self {
        Self::Follow
    }
}

impl fmt::Display for RulerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::FindMovementPath => write!(f, "findMovementPath"),
            Self::Follow => write!(f, "follow"),
            Self::Pathfinding => write!(f, "pathfinding"),
        }
    }
}

impl FromStr for RulerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(Self::Disabled),
            "findMovementPath" => Ok(Self::FindMovementPath),
            "follow" => Ok(Self::Follow),
            "pathfinding" => Ok(Self::Pathfinding),
            other => Err(ConfigError::ValueOutOfRange {
                key: "ruler.mode".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// What ends a ruler session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopTrigger {
    /// End when the token is released
    TokenDrop,
    /// Only end on an explicit call
    Manual,
}

impl Default for StopTrigger {
    fn default() -> Self {
        Self::TokenDrop
    }
}

impl fmt::Display for StopTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenDrop => write!(f, "tokenDrop"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Movement ruler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulerSettings {
    /// Ruler mode
    pub mode: RulerMode,
    /// Backtrack distance in grid cells (pathfinding mode); 0 disables locking
    pub distance: f64,
    /// What ends a session
    pub stop: StopTrigger,
    /// Distance a diagonal follow-mode drag must exceed before it is
    /// committed as two waypoints, in grid distance units
    pub diagonal_commit_distance: f64,
    /// Minimum time between "planner unavailable" warnings
    pub planner_warning_interval_ms: u64,
}

impl Default for RulerSettings {
    fn default() -> Self {
        Self {
            mode: RulerMode::default(),
            distance: 1.0,
            stop: StopTrigger::default(),
            diagonal_commit_distance: 5.0,
            planner_warning_interval_ms: 10_000,
        }
    }
}

/// Token assigned to one physical base.
///
/// A linked base follows the actor wherever its token is placed; an unlinked
/// base names a token on one scene.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseSetup {
    /// Identifier the base transmits
    pub base_id: u32,
    /// Look the token up by actor name instead of token name
    pub link_actor: bool,
    pub actor_name: String,
    pub token_name: String,
    /// Scene the named token lives on
    pub scene_name: String,
}

/// IR tracker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerSettings {
    /// Number of IR channels tracked
    pub channels: usize,
    /// User whose client handles tracker input and owns the rulers
    pub active_user: String,
    /// Base to token assignments
    pub bases: Vec<BaseSetup>,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            channels: 16,
            active_user: "gamemaster".to_string(),
            bases: Vec::new(),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Ruler settings
    #[serde(default)]
    pub ruler: RulerSettings,
    /// Tracker settings
    #[serde(default)]
    pub tracker: TrackerSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location (`<config dir>/irplane/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("irplane").join("config.toml"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Load(format!("{}: {}", path.display(), e)))?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::Save(e.to_string()))?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDir(e.to_string()))?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !self.ruler.distance.is_finite() || self.ruler.distance < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "ruler.distance".to_string(),
                value: self.ruler.distance.to_string(),
            }
            .into());
        }

        if !self.ruler.diagonal_commit_distance.is_finite()
            || self.ruler.diagonal_commit_distance < 0.0
        {
            return Err(ConfigError::ValueOutOfRange {
                key: "ruler.diagonalCommitDistance".to_string(),
                value: self.ruler.diagonal_commit_distance.to_string(),
            }
            .into());
        }

        if self.tracker.channels == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "tracker.channels".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        if self.tracker.active_user.trim().is_empty() {
            return Err(ConfigError::MissingKey("tracker.activeUser".to_string()).into());
        }

        let mut seen = std::collections::HashSet::new();
        for base in &self.tracker.bases {
            if !seen.insert(base.base_id) {
                return Err(SettingsError::InvalidSetting {
                    key: "tracker.bases".to_string(),
                    reason: format!("base ID {} is assigned twice", base.base_id),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.ruler.mode, RulerMode::Follow);
        assert_eq!(config.ruler.stop, StopTrigger::TokenDrop);
        assert_eq!(config.ruler.planner_warning_interval_ms, 10_000);
        assert_eq!(config.tracker.channels, 16);
    }

    #[test]
    fn test_mode_names() {
        for mode in [
            RulerMode::Disabled,
            RulerMode::FindMovementPath,
            RulerMode::Follow,
            RulerMode::Pathfinding,
        ] {
            assert_eq!(mode.to_string().parse::<RulerMode>().unwrap(), mode);
        }
        assert!("teleport".parse::<RulerMode>().is_err());
    }

    #[test]
    fn test_mode_deserializes_from_host_names() {
        let settings: RulerSettings = serde_json::from_str(
            r#"{"mode":"findMovementPath","distance":2,"stop":"tokenDrop",
                "diagonalCommitDistance":5,"plannerWarningIntervalMs":10000}"#,
        )
        .unwrap();
        assert_eq!(settings.mode, RulerMode::FindMovementPath);
        assert_eq!(settings.distance, 2.0);
    }

    #[test]
    fn test_validate_rejects_negative_distance() {
        let mut config = Config::new();
        config.ruler.distance = -1.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Config(ConfigError::ValueOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_channels() {
        let mut config = Config::new();
        config.tracker.channels = 0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_base_setup_from_host_names() {
        let tracker: TrackerSettings = serde_json::from_str(
            r#"{"bases":[{"baseId":1234,"linkActor":true,"actorName":"Goblin"},
                {"baseId":7,"tokenName":"Orc","sceneName":"Cave"}]}"#,
        )
        .unwrap();
        assert_eq!(tracker.channels, 16);
        assert_eq!(tracker.bases.len(), 2);
        assert!(tracker.bases[0].link_actor);
        assert_eq!(tracker.bases[0].actor_name, "Goblin");
        assert!(!tracker.bases[1].link_actor);
        assert_eq!(tracker.bases[1].scene_name, "Cave");
    }

    #[test]
    fn test_validate_rejects_duplicate_base_ids() {
        let mut config = Config::new();
        let base = BaseSetup {
            base_id: 3,
            ..BaseSetup::default()
        };
        config.tracker.bases = vec![base.clone(), base];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base ID 3"));
    }
}
