//! Errors raised while reading, writing, or checking the irplane config.

use std::io;
use thiserror::Error;

/// Failure to load, save, or accept a config file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Config file unreadable; carries the path and the cause
    #[error("cannot read config {0}")]
    Load(String),

    /// Config could not be encoded for writing
    #[error("cannot write config: {0}")]
    Save(String),

    /// A tracker or ruler value that fails validation
    #[error("invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// Directory holding the config file could not be created
    #[error("cannot create config directory: {0}")]
    ConfigDir(String),

    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A config file that parsed but cannot drive the ruler.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required key left empty, e.g. `tracker.activeUser`
    #[error("missing config key {0}")]
    MissingKey(String),

    /// File extension other than `.json` or `.toml`
    #[error("unsupported config format '{0}', expected json or toml")]
    UnsupportedFormat(String),

    /// Unknown ruler mode or a negative distance
    #[error("{key} = {value} is out of range")]
    ValueOutOfRange { key: String, value: String },

    /// No platform config directory for this OS
    #[error("no config directory on {0}")]
    UnsupportedPlatform(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_name_the_key() {
        let err = SettingsError::InvalidSetting {
            key: "tracker.bases".to_string(),
            reason: "base ID 7 is assigned twice".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid setting 'tracker.bases': base ID 7 is assigned twice"
        );

        let err: SettingsError = ConfigError::ValueOutOfRange {
            key: "ruler.mode".to_string(),
            value: "teleport".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "ruler.mode = teleport is out of range");
    }

    #[test]
    fn test_unsupported_format() {
        let err: SettingsError = ConfigError::UnsupportedFormat("yaml".to_string()).into();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
        assert_eq!(
            err.to_string(),
            "unsupported config format 'yaml', expected json or toml"
        );
    }

    #[test]
    fn test_parse_failures_convert() {
        let err: SettingsError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, SettingsError::Json(_)));

        let err: SettingsError = toml::from_str::<toml::Table>("ruler = ").unwrap_err().into();
        assert!(matches!(err, SettingsError::Toml(_)));
        assert!(err.to_string().starts_with("malformed TOML config"));
    }
}
