//! Character variety sections - digit, uppercase, lowercase and symbol checks.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;
use crate::evaluator::Violation;

/// Punctuation accepted by the symbol rule.
pub const SYMBOLS: &str = "!@#$%^&*()_+=-{}[]:;\"'<>,.?/";

fn missing_when(
    password: &SecretString,
    pred: impl Fn(char) -> bool,
    violation: Violation,
) -> SectionResult {
    if password.expose_secret().chars().any(pred) {
        None
    } else {
        Some(violation)
    }
}

pub fn digit_section(password: &SecretString) -> SectionResult {
    missing_when(password, |c| c.is_ascii_digit(), Violation::MissingDigit)
}

pub fn uppercase_section(password: &SecretString) -> SectionResult {
    missing_when(password, |c| c.is_ascii_uppercase(), Violation::MissingUppercase)
}

pub fn lowercase_section(password: &SecretString) -> SectionResult {
    missing_when(password, |c| c.is_ascii_lowercase(), Violation::MissingLowercase)
}

/// Only characters from [`SYMBOLS`] count; `|`, `~` and non-ASCII
/// punctuation do not.
pub fn symbol_section(password: &SecretString) -> SectionResult {
    missing_when(password, |c| SYMBOLS.contains(c), Violation::MissingSymbol)
}
