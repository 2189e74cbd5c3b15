//! Website reachability probe.

use std::fmt;

use crate::config::CheckupConfig;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The host answered; any status code counts.
    Reachable { status: u16 },
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable { .. })
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Reachable { status } => {
                write!(f, "✅ Website is reachable. Status: {status}")
            }
            ProbeOutcome::Unreachable(e) => {
                write!(f, "⚠️ Could not reach the website. Error: {e}")
            }
        }
    }
}

/// Prefixes `http://` when the input carries no `scheme://`.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    let has_scheme = trimmed.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });
    if has_scheme {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

#[derive(Debug, Clone)]
pub struct Probe {
    client: reqwest::Client,
}

impl Probe {
    pub fn new(config: &CheckupConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.probe_timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Sends one GET to `url`. Never fails: errors of every kind become
    /// [`ProbeOutcome::Unreachable`].
    pub async fn check(&self, url: &str) -> ProbeOutcome {
        let url = normalize_url(url);

        #[cfg(feature = "tracing")]
        tracing::debug!(url = %url, "probing website");

        let outcome = match self.client.get(&url).send().await {
            Ok(response) => ProbeOutcome::Reachable {
                status: response.status().as_u16(),
            },
            Err(e) => ProbeOutcome::Unreachable(e.to_string()),
        };

        #[cfg(feature = "tracing")]
        tracing::info!(url = %url, reachable = outcome.is_reachable(), "probe finished");

        outcome
    }
}
