// Sub-score calculators and the aggregator that combines them.
// Calculators are independent of each other; the only shared state is the
// read-only ModelHandle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod achievements;
pub mod aggregator;
pub mod completeness;
pub mod experience;
pub mod projects;
pub mod role;
pub mod semantic;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Sub-score '{name}' is not a finite number")]
    NonFinite { name: &'static str },

    #[error("Invalid weight set: {0}")]
    InvalidWeights(String),
}

/// A calculator output, clamped to `[0, 100]` on construction.
/// NaN is kept as-is so the aggregator can reject it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubScore(f64);

impl SubScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn new(value: f64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Nearest integer, for display.
    pub fn rounded(self) -> u32 {
        self.0.round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscore_clamps() {
        assert_eq!(SubScore::new(-5.0).value(), 0.0);
        assert_eq!(SubScore::new(150.0).value(), 100.0);
        assert_eq!(SubScore::new(42.5).value(), 42.5);
    }

    #[test]
    fn test_subscore_keeps_nan_for_rejection() {
        assert!(SubScore::new(f64::NAN).value().is_nan());
    }

    #[test]
    fn test_subscore_rounding() {
        assert_eq!(SubScore::new(33.5).rounded(), 34);
        assert_eq!(SubScore::new(33.49).rounded(), 33);
    }
}
