//! User configuration.
//!
//! Settings live in a TOML file, by default
//! `<config dir>/keycalc/config.toml`:
//!
//! ```toml
//! log = "info"
//! history_limit = 50
//!
//! [aliases]
//! x = "*"
//! c = "clear"
//! ```
//!
//! Every field is optional. All invalid settings are reported together.

pub mod validate;

pub use validate::ConfigViolation;

use crate::core::DEFAULT_TAPE_LIMIT;
use crate::input::InputHandler;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {}", describe(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Calculator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Log filter directive used when `RUST_LOG` is unset
    pub log: String,

    /// Number of calculations kept on the tape
    pub history_limit: usize,

    /// Extra single-character key bindings: key -> action name
    pub aliases: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: "warn".to_string(),
            history_limit: DEFAULT_TAPE_LIMIT,
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keycalc").join("config.toml"))
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else the default file if
    /// it exists, else the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Check every setting, reporting all violations together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate(self)
            .map(|_| ())
            .map_err(ConfigError::Invalid)
    }

    /// Build an input handler carrying the configured aliases.
    pub fn input_handler(&self) -> Result<InputHandler, ConfigError> {
        let aliases = validate::validate(self).map_err(ConfigError::Invalid)?;
        Ok(InputHandler::with_aliases(aliases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;
    use crate::input::{Action, Key};
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log, "warn");
        assert_eq!(config.history_limit, DEFAULT_TAPE_LIMIT);
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::from_toml(
            r#"
            log = "keycalc=debug"
            history_limit = 5

            [aliases]
            x = "*"
            c = "clear"
            "#,
        )
        .unwrap();

        assert_eq!(config.log, "keycalc=debug");
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.aliases.get("x").map(String::as_str), Some("*"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = Config::from_toml("colour = true");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_settings_are_reported_together() {
        let result = Config::from_toml(
            r#"
            history_limit = 0

            [aliases]
            ab = "+"
            "#,
        );

        match result {
            Err(ConfigError::Invalid(violations)) => assert_eq!(violations.len(), 2),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn input_handler_uses_aliases() {
        let config = Config::from_toml("[aliases]\nx = \"*\"\n").unwrap();
        let handler = config.input_handler().unwrap();
        assert_eq!(
            handler.handle_key(Key::Char('x')),
            Action::Operator(Operator::Multiply)
        );
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "history_limit = 7").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.history_limit, 7);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = Config::load_or_default(Some(path.as_path()));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
