use std::fmt;

use vault_core::{Bps, ParamRange};

use crate::{ValidationError, ValidationResult};

/// Required relation between two parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingRule {
    /// lower < upper
    StrictlyLess,
    /// lower <= upper
    LessOrEqual,
}

impl OrderingRule {
    fn holds(&self, lower: Bps, upper: Bps) -> bool {
        match self {
            OrderingRule::StrictlyLess => lower < upper,
            OrderingRule::LessOrEqual => lower <= upper,
        }
    }
}

impl fmt::Display for OrderingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingRule::StrictlyLess => write!(f, "less than"),
            OrderingRule::LessOrEqual => write!(f, "less than or equal to"),
        }
    }
}

/// Check a field against its closed range
pub fn check_range(field: &'static str, value: Bps, range: ParamRange) -> ValidationResult<()> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: range.min,
            max: range.max,
        })
    }
}

/// Check that two fields satisfy an ordering rule
pub fn check_ordering(
    lower: (&'static str, Bps),
    upper: (&'static str, Bps),
    rule: OrderingRule,
) -> ValidationResult<()> {
    if rule.holds(lower.1, upper.1) {
        Ok(())
    } else {
        Err(ValidationError::Ordering {
            lower: lower.0,
            upper: upper.0,
            lower_value: lower.1,
            upper_value: upper.1,
            rule,
        })
    }
}
