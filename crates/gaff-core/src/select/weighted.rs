//! Weighted boolean sampling.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{ConfigError, MAX_WEIGHT_TOTAL};
use crate::ports::RandomSource;

/// A validated pair of weights.
///
/// Construction rejects a zero total and a total above [`MAX_WEIGHT_TOTAL`],
/// so `sample` itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(u64, u64)", into = "(u64, u64)")]
pub struct WeightedBool {
    true_weight: u64,
    false_weight: u64,
}

impl WeightedBool {
    pub fn new(true_weight: u64, false_weight: u64) -> Result<Self, ConfigError> {
        let total = true_weight
            .checked_add(false_weight)
            .filter(|total| *total <= MAX_WEIGHT_TOTAL)
            .ok_or(ConfigError::WeightOverflow {
                true_weight,
                false_weight,
            })?;
        if total == 0 {
            return Err(ConfigError::ZeroWeights);
        }
        Ok(Self {
            true_weight,
            false_weight,
        })
    }

    pub fn true_weight(&self) -> u64 {
        self.true_weight
    }

    pub fn false_weight(&self) -> u64 {
        self.false_weight
    }

    /// One draw: `true` with probability `t / (t + f)`.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> bool {
        rng.next_below(self.true_weight + self.false_weight) < self.true_weight
    }
}

impl TryFrom<(u64, u64)> for WeightedBool {
    type Error = ConfigError;

    fn try_from((t, f): (u64, u64)) -> Result<Self, Self::Error> {
        Self::new(t, f)
    }
}

impl From<WeightedBool> for (u64, u64) {
    fn from(w: WeightedBool) -> Self {
        (w.true_weight, w.false_weight)
    }
}

/// Validate and draw in one step.
pub fn sample(
    rng: &mut dyn RandomSource,
    true_weight: u64,
    false_weight: u64,
) -> Result<bool, ConfigError> {
    Ok(WeightedBool::new(true_weight, false_weight)?.sample(rng))
}
