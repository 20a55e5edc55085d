//! Vault Ports
//!
//! Error taxonomy and constraint checks shared by the model layer and its
//! consumers. Every failure the model layer can signal is defined here.

mod constraint;
mod error;

pub use constraint::{OrderingRule, check_ordering, check_range};
pub use error::{ValidationError, ValidationResult};
