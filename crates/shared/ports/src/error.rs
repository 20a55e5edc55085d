use thiserror::Error;
use vault_core::Bps;

use crate::OrderingRule;

/// Parameter validation failure
///
/// Names the offending field and the bound or ordering rule it violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: Bps,
        min: Bps,
        max: Bps,
    },

    #[error("{lower} ({lower_value}) must be {rule} {upper} ({upper_value})")]
    Ordering {
        lower: &'static str,
        upper: &'static str,
        lower_value: Bps,
        upper_value: Bps,
        rule: OrderingRule,
    },
}

impl ValidationError {
    /// Field the error is reported against (the lower field for ordering errors)
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::Ordering { lower, .. } => lower,
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(self, ValidationError::Ordering { .. })
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
