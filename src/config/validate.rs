//! Configuration checks that report every violation at once.
//!
//! Each check yields a `Validation`; failures are accumulated instead of
//! stopping at the first bad setting.

use crate::config::Config;
use crate::input::Action;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single invalid configuration setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("history_limit must be at least 1")]
    HistoryLimitZero,

    #[error("log filter must not be empty")]
    EmptyLogFilter,

    #[error("alias key '{key}' must be exactly one character")]
    AliasKeyNotSingleChar { key: String },

    #[error("alias '{key}' maps to unknown action '{action}'")]
    AliasUnknownAction { key: String, action: String },
}

type Check<T> = Validation<T, NonEmptyVec<ConfigViolation>>;

fn check_history_limit(limit: usize) -> Check<()> {
    if limit == 0 {
        Validation::fail(ConfigViolation::HistoryLimitZero)
    } else {
        Validation::success(())
    }
}

fn check_log_filter(filter: &str) -> Check<()> {
    if filter.trim().is_empty() {
        Validation::fail(ConfigViolation::EmptyLogFilter)
    } else {
        Validation::success(())
    }
}

fn check_alias(key: &str, action: &str) -> Check<(char, Action)> {
    let mut chars = key.chars();
    let Some(c) = chars.next().filter(|_| chars.next().is_none()) else {
        return Validation::fail(ConfigViolation::AliasKeyNotSingleChar {
            key: key.to_string(),
        });
    };
    match action.parse::<Action>() {
        Ok(action) => Validation::success((c, action)),
        Err(_) => Validation::fail(ConfigViolation::AliasUnknownAction {
            key: key.to_string(),
            action: action.to_string(),
        }),
    }
}

fn violations<T>(check: Check<T>) -> Vec<ConfigViolation> {
    match check {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

/// Validate `config`, returning the resolved alias table or every
/// violation found.
pub fn validate(config: &Config) -> Result<HashMap<char, Action>, Vec<ConfigViolation>> {
    let settings = Validation::all_vec(vec![
        check_history_limit(config.history_limit),
        check_log_filter(&config.log),
    ]);
    let aliases = Validation::all_vec(
        config
            .aliases
            .iter()
            .map(|(key, action)| check_alias(key, action))
            .collect(),
    );

    match (settings, aliases) {
        (Validation::Success(_), Validation::Success(aliases)) => {
            Ok(aliases.into_iter().collect())
        }
        (settings, aliases) => {
            let mut found = violations(settings);
            found.extend(violations(aliases));
            Err(found)
        }
    }
}
