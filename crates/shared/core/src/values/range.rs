use serde::{Deserialize, Serialize};

use super::Bps;

/// Closed basis-point interval `[min, max]` for a model parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: Bps,
    pub max: Bps,
}

impl ParamRange {
    pub const fn new(min: Bps, max: Bps) -> Self {
        Self { min, max }
    }

    /// Is the value inside the interval (bounds inclusive)?
    pub fn contains(&self, value: Bps) -> bool {
        value >= self.min && value <= self.max
    }

    /// Force the value into the interval
    pub fn clamp(&self, value: Bps) -> Bps {
        value.max(self.min).min(self.max)
    }
}
