//! Password evaluation sections
//!
//! Each section checks a single rule and reports at most one violation.

mod length;
mod variety;

pub use length::length_section;
pub use variety::{digit_section, lowercase_section, symbol_section, uppercase_section};

use crate::evaluator::Violation;

/// Result type for section evaluation functions.
/// - `Some(violation)` - Section failed
/// - `None` - Section passed
pub type SectionResult = Option<Violation>;
