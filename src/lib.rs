//! Password checkup library
//!
//! Three small tools sharing one application core:
//!
//! - password strength evaluation against a fixed rule set,
//! - breach lookup through a k-anonymity hash range endpoint
//!   (only a 5 character SHA-1 prefix leaves the process),
//! - website reachability probing.
//!
//! A secure password generator and a short password guide round it off.
//!
//! # Features
//!
//! - `tracing`: Enables logging via tracing crate
//! - `cli` (default): Builds the `pwd-checkup` binary (implies `tracing`)
//!
//! # Environment Variables
//!
//! - `PWD_CHECKUP_RANGE_URL`: Range endpoint base
//!   (default: `https://api.pwnedpasswords.com/range`)
//! - `PWD_CHECKUP_PROBE_TIMEOUT_SECS`: Probe timeout (default: `5`)
//! - `PWD_CHECKUP_BREACH_TIMEOUT_SECS`: Breach lookup timeout (default: none)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_checkup::{evaluate_password_strength, BreachChecker, CheckupConfig};
//! use secrecy::SecretString;
//!
//! # async fn run() -> pwd_checkup::Result<()> {
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! let report = evaluate_password_strength(&password);
//! println!("{report}");
//!
//! let checker = BreachChecker::new(&CheckupConfig::from_env()?)?;
//! println!("{}", checker.check(&password).await);
//! # Ok(())
//! # }
//! ```

mod app;
mod breach;
mod config;
mod error;
mod evaluator;
mod generator;
mod guide;
mod probe;
mod sections;
mod task;

#[cfg(feature = "cli")]
pub mod logger;

// Public API
pub use app::{App, AppState, Event};
pub use breach::{
    parse_range_response, BreachChecker, BreachOutcome, HashRange, PREFIX_LEN, SUFFIX_LEN,
};
pub use config::{get_range_url, CheckupConfig};
pub use error::{CheckupError, Result};
pub use evaluator::{evaluate_password_strength, StrengthReport, Violation};
pub use generator::{generate_password, generate_password_with_len, ALPHABET};
pub use guide::PASSWORD_GUIDE;
pub use probe::{normalize_url, Probe, ProbeOutcome};
pub use task::{run_breach_lookup, BreachDelivery, BreachTask};
