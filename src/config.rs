//! Environment configuration.

use std::env;

/// Default number of options past which a dropdown becomes filterable.
pub const DEFAULT_FILTER_THRESHOLD: usize = 10;

/// Default typeahead buffer lifetime in milliseconds.
pub const DEFAULT_TYPEAHEAD_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub debug: bool,
    pub filter_threshold: Option<usize>,
    pub typeahead_timeout_ms: Option<u64>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            debug: env_flag("PICKER_DEBUG"),
            filter_threshold: env_usize_opt("PICKER_FILTER_THRESHOLD"),
            typeahead_timeout_ms: env_u64_opt("PICKER_TYPEAHEAD_TIMEOUT_MS"),
        }
    }

    /// Effective auto-filterable threshold, preferring an explicit override.
    pub fn effective_filter_threshold(&self, per_control: Option<usize>) -> usize {
        per_control
            .or(self.filter_threshold)
            .unwrap_or(DEFAULT_FILTER_THRESHOLD)
    }

    /// Effective typeahead timeout in milliseconds.
    pub fn effective_typeahead_timeout_ms(&self, per_control: Option<u64>) -> u64 {
        per_control
            .or(self.typeahead_timeout_ms)
            .unwrap_or(DEFAULT_TYPEAHEAD_TIMEOUT_MS)
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_usize_opt(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

fn env_u64_opt(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
