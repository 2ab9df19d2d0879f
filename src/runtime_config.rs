//! # Runtime Configuration Module
//!
//! Environment variable-based tuning for dispatchers. Routes
//! themselves are registered in code; only operational knobs live here.
//!
//! ## Environment Variables
//!
//! ### `SEGROUTER_SLOW_MATCH_US`
//!
//! Route lookups slower than this many microseconds are logged at `warn`
//! level by the dispatcher.
//!
//! Default: `1000` (1 ms)
//!
//! Unparsable values fall back to the default.
//!
//! ## Usage
//!
//! ```rust
//! use segrouter::{Dispatcher, Router, RuntimeConfig};
//!
//! let config = RuntimeConfig::from_env();
//! let dispatcher = Dispatcher::build_with_config([Router::new("/api")], &config);
//! # let _ = dispatcher;
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Lookups slower than this are reported (default: 1 ms)
    pub slow_match_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let slow_match_us = lookup("SEGROUTER_SLOW_MATCH_US")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);

        RuntimeConfig {
            slow_match_threshold: Duration::from_micros(slow_match_us),
        }
    }
}
