//! Breach lookup against a k-anonymity hash range endpoint.
//!
//! Only the first five hex characters of the SHA-1 digest leave the
//! process. The endpoint answers with every known suffix sharing that
//! prefix and the match happens locally.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};

use crate::config::CheckupConfig;
use crate::error::Result;

pub const PREFIX_LEN: usize = 5;
pub const SUFFIX_LEN: usize = 35;

/// Uppercase SHA-1 hex digest split into the part sent out and the part kept.
#[derive(Clone, PartialEq, Eq)]
pub struct HashRange {
    pub prefix: String,
    pub suffix: String,
}

impl HashRange {
    pub fn from_password(password: &SecretString) -> Self {
        let digest = format!("{:X}", Sha1::digest(password.expose_secret().as_bytes()));
        let (prefix, suffix) = digest.split_at(PREFIX_LEN);
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }
}

// The suffix identifies the password as well as the full hash does.
impl fmt::Debug for HashRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRange")
            .field("prefix", &self.prefix)
            .field("suffix", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreachOutcome {
    NotFound,
    Found { count: u64 },
    /// The endpoint answered with something other than 200.
    Unavailable { status: u16 },
    /// Transport or body error.
    Failed(String),
}

impl BreachOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, BreachOutcome::Unavailable { .. } | BreachOutcome::Failed(_))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BreachOutcome::NotFound => "not_found",
            BreachOutcome::Found { .. } => "found",
            BreachOutcome::Unavailable { .. } => "unavailable",
            BreachOutcome::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for BreachOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreachOutcome::NotFound => {
                write!(f, "✅ This password was not found in any known data breaches.")
            }
            BreachOutcome::Found { count } => write!(
                f,
                "🔒 This password has been found in data breaches {count} times. Please change it."
            ),
            BreachOutcome::Unavailable { .. } => write!(f, "⚠️ Error checking breach database."),
            BreachOutcome::Failed(e) => write!(f, "⚠️ Error: {e}"),
        }
    }
}

/// Scans a range response for `suffix`.
///
/// Each line is a `SUFFIX:COUNT` record. Lines without a `:` are skipped.
/// The first record matching `suffix` decides the outcome; an unreadable
/// count on that record is a [`BreachOutcome::Failed`], never `NotFound`.
pub fn parse_range_response(body: &str, suffix: &str) -> BreachOutcome {
    for line in body.lines() {
        let Some((candidate, count)) = line.trim().split_once(':') else {
            continue;
        };
        if !candidate.trim().eq_ignore_ascii_case(suffix) {
            continue;
        }
        let count = count.trim();
        return match count.parse() {
            Ok(count) => BreachOutcome::Found { count },
            Err(_) => BreachOutcome::Failed(format!("malformed breach count {count:?}")),
        };
    }
    BreachOutcome::NotFound
}

/// Issues range queries. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct BreachChecker {
    client: reqwest::Client,
    range_url: String,
}

impl BreachChecker {
    /// No timeout is set unless `breach_timeout` is configured.
    pub fn new(config: &CheckupConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.breach_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            range_url: config.range_url.trim_end_matches('/').to_string(),
        })
    }

    /// Looks the password up. Never fails: every problem becomes an outcome.
    pub async fn check(&self, password: &SecretString) -> BreachOutcome {
        let range = HashRange::from_password(password);
        let url = format!("{}/{}", self.range_url, range.prefix);

        #[cfg(feature = "tracing")]
        tracing::debug!(prefix = %range.prefix, "querying breach range");

        let outcome = self.query(&url, &range.suffix).await;

        #[cfg(feature = "tracing")]
        {
            match &outcome {
                BreachOutcome::Failed(e) => tracing::warn!("breach lookup failed: {}", e),
                BreachOutcome::Unavailable { status } => {
                    tracing::warn!("breach endpoint answered with status {}", status)
                }
                other => tracing::info!(outcome = other.kind(), "breach lookup finished"),
            }
        }

        outcome
    }

    async fn query(&self, url: &str, suffix: &str) -> BreachOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return BreachOutcome::Failed(e.to_string()),
        };
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return BreachOutcome::Unavailable {
                status: status.as_u16(),
            };
        }
        match response.text().await {
            Ok(body) => parse_range_response(&body, suffix),
            Err(e) => BreachOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    // SHA-1("password") = 5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8
    const PASSWORD_PREFIX: &str = "5BAA6";
    const PASSWORD_SUFFIX: &str = "1E4C9B93F3F0682250B6CF8331B7EE68FD8";

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn checker_for(server: &MockServer) -> BreachChecker {
        let config = CheckupConfig {
            range_url: server.url("/range"),
            ..CheckupConfig::default()
        };
        BreachChecker::new(&config).unwrap()
    }

    #[test]
    fn test_hash_range_known_digest() {
        let range = HashRange::from_password(&secret("password"));
        assert_eq!(range.prefix, PASSWORD_PREFIX);
        assert_eq!(range.suffix, PASSWORD_SUFFIX);
    }

    #[test]
    fn test_hash_range_lengths() {
        let long = "x".repeat(1000);
        for pwd in ["", "a", "Abcd1234!", "pässwörd", long.as_str()] {
            let range = HashRange::from_password(&secret(pwd));
            assert_eq!(range.prefix.len(), PREFIX_LEN);
            assert_eq!(range.suffix.len(), SUFFIX_LEN);
            assert!(range
                .prefix
                .chars()
                .chain(range.suffix.chars())
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_hash_range_debug_redacts_suffix() {
        let debug = format!("{:?}", HashRange::from_password(&secret("password")));
        assert!(debug.contains(PASSWORD_PREFIX));
        assert!(!debug.contains(PASSWORD_SUFFIX));
    }

    #[test]
    fn test_parse_range_response_match() {
        let body = format!(
            "0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n\
             {PASSWORD_SUFFIX}:3861493\r\n\
             011053FD0102E94D6AE2F8B83D76FAF94F6:1"
        );
        assert_eq!(
            parse_range_response(&body, PASSWORD_SUFFIX),
            BreachOutcome::Found { count: 3861493 }
        );
    }

    #[test]
    fn test_parse_range_response_no_match() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:1\n011053FD0102E94D6AE2F8B83D76FAF94F6:4";
        assert_eq!(parse_range_response(body, PASSWORD_SUFFIX), BreachOutcome::NotFound);
        assert_eq!(parse_range_response("", PASSWORD_SUFFIX), BreachOutcome::NotFound);
    }

    #[test]
    fn test_parse_range_response_skips_malformed_lines() {
        let body = format!("garbage\n\n{PASSWORD_SUFFIX}\n{PASSWORD_SUFFIX}:12");
        assert_eq!(
            parse_range_response(&body, PASSWORD_SUFFIX),
            BreachOutcome::Found { count: 12 }
        );
    }

    #[test]
    fn test_parse_range_response_unreadable_count_on_match_is_error() {
        let body = format!("{PASSWORD_SUFFIX}:3,861,493\r\n{PASSWORD_SUFFIX}:5\r\n");
        let outcome = parse_range_response(&body, PASSWORD_SUFFIX);
        assert_eq!(
            outcome,
            BreachOutcome::Failed("malformed breach count \"3,861,493\"".to_string())
        );
        assert!(outcome.to_string().starts_with("⚠️ Error: "));
    }

    #[test]
    fn test_parse_range_response_unreadable_count_elsewhere_is_ignored() {
        let body = format!("0018A45C4D1DEF81644B54AB7F969B88D65:n/a\n{PASSWORD_SUFFIX}:2");
        assert_eq!(
            parse_range_response(&body, PASSWORD_SUFFIX),
            BreachOutcome::Found { count: 2 }
        );
    }

    #[test]
    fn test_parse_range_response_case_insensitive() {
        let body = format!("{}:7", PASSWORD_SUFFIX.to_lowercase());
        assert_eq!(
            parse_range_response(&body, PASSWORD_SUFFIX),
            BreachOutcome::Found { count: 7 }
        );
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            BreachOutcome::Found { count: 42 }.to_string(),
            "🔒 This password has been found in data breaches 42 times. Please change it."
        );
        assert_eq!(
            BreachOutcome::NotFound.to_string(),
            "✅ This password was not found in any known data breaches."
        );
        assert_eq!(
            BreachOutcome::Unavailable { status: 503 }.to_string(),
            "⚠️ Error checking breach database."
        );
        assert!(BreachOutcome::Failed("boom".into()).is_error());
        assert!(!BreachOutcome::NotFound.is_error());
    }

    #[tokio::test]
    async fn test_check_found() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/range/{PASSWORD_PREFIX}"));
                then.status(200).body(format!(
                    "0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n{PASSWORD_SUFFIX}:3861493\r\n"
                ));
            })
            .await;

        let outcome = checker_for(&server).check(&secret("password")).await;

        mock.assert_async().await;
        assert_eq!(outcome, BreachOutcome::Found { count: 3861493 });
    }

    #[tokio::test]
    async fn test_check_not_found() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/range/{PASSWORD_PREFIX}"));
                then.status(200).body("0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n");
            })
            .await;

        let outcome = checker_for(&server).check(&secret("password")).await;

        mock.assert_async().await;
        assert_eq!(outcome, BreachOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_check_only_sends_prefix() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/range/{PASSWORD_PREFIX}"));
                then.status(200).body("");
            })
            .await;

        checker_for(&server).check(&secret("password")).await;

        // Exactly one request, addressed by prefix only.
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_check_non_200_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(503);
            })
            .await;

        let outcome = checker_for(&server).check(&secret("password")).await;
        assert_eq!(outcome, BreachOutcome::Unavailable { status: 503 });
    }

    #[tokio::test]
    async fn test_check_network_failure_is_outcome() {
        let config = CheckupConfig {
            range_url: "http://127.0.0.1:1/range".to_string(),
            ..CheckupConfig::default()
        };
        let outcome = BreachChecker::new(&config).unwrap().check(&secret("password")).await;
        assert!(matches!(outcome, BreachOutcome::Failed(_)));
        assert!(outcome.to_string().starts_with("⚠️ Error: "));
    }

    #[tokio::test]
    async fn test_check_configured_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).body("").delay(std::time::Duration::from_secs(3));
            })
            .await;

        let config = CheckupConfig {
            range_url: server.url("/range"),
            breach_timeout: Some(std::time::Duration::from_secs(1)),
            ..CheckupConfig::default()
        };
        let outcome = BreachChecker::new(&config).unwrap().check(&secret("password")).await;
        assert!(matches!(outcome, BreachOutcome::Failed(_)));
    }
}
