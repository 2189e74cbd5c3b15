//! Runtime configuration
//!
//! Every setting has a default and can be overridden through an
//! environment variable.

use std::time::Duration;

use crate::error::{CheckupError, Result};

pub const RANGE_URL_VAR: &str = "PWD_CHECKUP_RANGE_URL";
pub const PROBE_TIMEOUT_VAR: &str = "PWD_CHECKUP_PROBE_TIMEOUT_SECS";
pub const BREACH_TIMEOUT_VAR: &str = "PWD_CHECKUP_BREACH_TIMEOUT_SECS";

pub const DEFAULT_RANGE_URL: &str = "https://api.pwnedpasswords.com/range";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckupConfig {
    /// Base of the range endpoint; the hash prefix is appended as a path segment.
    pub range_url: String,
    pub probe_timeout: Duration,
    /// `None` leaves the breach lookup without a timeout.
    pub breach_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for CheckupConfig {
    fn default() -> Self {
        Self {
            range_url: DEFAULT_RANGE_URL.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            breach_timeout: None,
            user_agent: format!("pwd-checkup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CheckupConfig {
    /// Builds the configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `PWD_CHECKUP_RANGE_URL` (default: `https://api.pwnedpasswords.com/range`)
    /// - `PWD_CHECKUP_PROBE_TIMEOUT_SECS` (default: `5`)
    /// - `PWD_CHECKUP_BREACH_TIMEOUT_SECS` (default: unset, no timeout)
    ///
    /// # Errors
    ///
    /// Returns [`CheckupError::Config`] if a timeout is not a whole number
    /// of seconds or is zero.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            range_url: get_range_url(),
            probe_timeout: read_secs(PROBE_TIMEOUT_VAR)?.unwrap_or(defaults.probe_timeout),
            breach_timeout: read_secs(BREACH_TIMEOUT_VAR)?,
            user_agent: defaults.user_agent,
        })
    }
}

/// Returns the range endpoint base URL without a trailing slash.
///
/// Priority:
/// 1. Environment variable `PWD_CHECKUP_RANGE_URL`
/// 2. Default `https://api.pwnedpasswords.com/range`
pub fn get_range_url() -> String {
    std::env::var(RANGE_URL_VAR)
        .ok()
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_RANGE_URL.to_string())
}

fn read_secs(var: &'static str) -> Result<Option<Duration>> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let secs: u64 = trimmed.parse().map_err(|e: std::num::ParseIntError| CheckupError::Config {
        var,
        value: raw.clone(),
        reason: e.to_string(),
    })?;
    if secs == 0 {
        return Err(CheckupError::Config {
            var,
            value: raw,
            reason: "timeout must be at least one second".to_string(),
        });
    }
    Ok(Some(Duration::from_secs(secs)))
}
