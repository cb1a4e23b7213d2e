//! Board configuration.
//!
//! # Responsibility
//! - Hold logging settings and the input form constraints.
//! - Reject configurations the board cannot run with.
//!
//! # Invariants
//! - Defaults reproduce the standard form bounds: title >= 6 chars,
//!   description 5..=20 chars, people 1..=5.

use crate::logging::{default_log_level, normalize_level};
use crate::validation::FieldRules;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Constraint sets for the three input form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRules {
    pub title: FieldRules,
    pub description: FieldRules,
    pub people: FieldRules,
}

impl Default for InputRules {
    fn default() -> Self {
        Self {
            title: FieldRules::required().min_length(6),
            description: FieldRules::required().min_length(5).max_length(20),
            people: FieldRules::required().min(1.0).max(5.0),
        }
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling logs; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    pub rules: InputRules,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            rules: InputRules::default(),
        }
    }
}

impl BoardConfig {
    /// Checks log settings and bound ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if normalize_level(&self.log_level).is_none() {
            return Err(ConfigError::UnsupportedLogLevel(self.log_level.clone()));
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }

        for (field, rules) in [
            ("title", &self.rules.title),
            ("description", &self.rules.description),
            ("people", &self.rules.people),
        ] {
            check_bounds(field, rules)?;
        }
        Ok(())
    }
}

fn check_bounds(field: &'static str, rules: &FieldRules) -> Result<(), ConfigError> {
    if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
        if min > max {
            return Err(ConfigError::InvertedBounds { field });
        }
    }
    if let (Some(min), Some(max)) = (rules.min, rules.max) {
        if min > max {
            return Err(ConfigError::InvertedBounds { field });
        }
    }
    Ok(())
}

/// Configuration rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLogLevel(String),
    RelativeLogDir(PathBuf),
    InvertedBounds { field: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(dir) => {
                write!(f, "log_dir must be an absolute path, got `{}`", dir.display())
            }
            Self::InvertedBounds { field } => {
                write!(f, "`{field}` minimum bound exceeds its maximum")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{BoardConfig, ConfigError};
    use crate::validation::FieldRules;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        BoardConfig::default()
            .validate()
            .expect("defaults should validate");
    }

    #[test]
    fn rejects_unknown_level_and_relative_dir() {
        let config = BoardConfig {
            log_level: "loud".to_string(),
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedLogLevel(_))
        ));

        let config = BoardConfig {
            log_dir: Some(PathBuf::from("logs")),
            ..BoardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::RelativeLogDir(_))));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut config = BoardConfig::default();
        config.rules.people = FieldRules::required().min(5.0).max(1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedBounds { field: "people" })
        );
    }
}
