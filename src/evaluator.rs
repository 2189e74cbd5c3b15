//! Password strength evaluator - main evaluation logic.

use std::fmt;

use secrecy::SecretString;

use crate::sections::{
    digit_section, length_section, lowercase_section, symbol_section, uppercase_section,
    SectionResult,
};

/// A single failed strength rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    TooShort,
    MissingDigit,
    MissingUppercase,
    MissingLowercase,
    MissingSymbol,
}

impl Violation {
    pub fn message(&self) -> &'static str {
        match self {
            Violation::TooShort => "Password must be at least 8 characters.",
            Violation::MissingDigit => "Add at least one digit.",
            Violation::MissingUppercase => "Add at least one uppercase letter.",
            Violation::MissingLowercase => "Add at least one lowercase letter.",
            Violation::MissingSymbol => "Add at least one special character (!@#$ etc.).",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Ordered list of rule violations. Empty means the password is strong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrengthReport {
    pub violations: Vec<Violation>,
}

impl StrengthReport {
    pub fn is_strong(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn contains(&self, violation: Violation) -> bool {
        self.violations.contains(&violation)
    }

    /// Human-readable messages in rule order.
    pub fn messages(&self) -> Vec<&'static str> {
        self.violations.iter().map(Violation::message).collect()
    }

    /// Lines as shown in the results panel.
    pub fn lines(&self) -> Vec<String> {
        if self.is_strong() {
            return vec!["✅ Password is strong!".to_string()];
        }
        let mut lines = Vec::with_capacity(self.violations.len() + 1);
        lines.push("❌ Weak password:".to_string());
        lines.extend(self.violations.iter().map(|v| format!("- {v}")));
        lines
    }
}

impl fmt::Display for StrengthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Evaluates password strength against the fixed rule set.
///
/// Rules run in a fixed order (length, digit, uppercase, lowercase, symbol)
/// and every failed rule is reported, so the report order is stable.
pub fn evaluate_password_strength(password: &SecretString) -> StrengthReport {
    // Orchestrator: execute sections in sequence
    let sections: [(&str, fn(&SecretString) -> SectionResult); 5] = [
        ("length", length_section),
        ("digit", digit_section),
        ("uppercase", uppercase_section),
        ("lowercase", lowercase_section),
        ("symbol", symbol_section),
    ];

    let mut violations = Vec::new();
    for (_section_name, section_fn) in sections {
        if let Some(violation) = section_fn(password) {
            #[cfg(feature = "tracing")]
            tracing::trace!("section {} failed", _section_name);
            violations.push(violation);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("strength evaluation finished with {} violation(s)", violations.len());

    StrengthReport { violations }
}
