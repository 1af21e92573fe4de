//! Sequence state for multi-decision sequences.
//!
//! State transitions:
//! - (none) -> InSequence(0): first accepted call builds the mask
//! - InSequence(p) -> InSequence(p + 1): every further accepted call
//! - InSequence(last) is Complete; one more call is rejected as over capacity
//!
//! The driver owns the state between calls. Each call reads the current value
//! and hands back a replacement; nothing here is mutated in place.
//!
//! Invariants (checked again when a persisted state is deserialized):
//! - `mask` is not empty
//! - `position < mask.len()`
//! - `contexts.len() == mask.len()`

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, GaffError};
use crate::ports::RandomSource;

/// Where the special positions of a mask are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskStrategy {
    /// First `count` positions.
    Left,
    /// Last `count` positions.
    Right,
    /// `count` distinct positions chosen uniformly.
    #[default]
    Any,
}

/// Which decisions of a sequence must satisfy the symbol condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceMask(Vec<bool>);

impl SequenceMask {
    /// Build a mask of `expected_decisions` entries with `count` true positions.
    ///
    /// `count` is capped at `expected_decisions`.
    pub fn build(
        expected_decisions: usize,
        count: usize,
        strategy: MaskStrategy,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let count = count.min(expected_decisions);
        let mut mask = vec![false; expected_decisions];
        match strategy {
            MaskStrategy::Left => mask[..count].fill(true),
            MaskStrategy::Right => mask[expected_decisions - count..].fill(true),
            MaskStrategy::Any => {
                // Partial Fisher-Yates: the first `count` entries end up distinct.
                let mut positions: Vec<usize> = (0..expected_decisions).collect();
                for i in 0..count {
                    let j = i + rng.index_below(expected_decisions - i);
                    positions.swap(i, j);
                    mask[positions[i]] = true;
                }
            }
        }
        Self(mask)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_special(&self, position: usize) -> bool {
        self.0.get(position).copied().unwrap_or(false)
    }

    /// Number of special positions.
    pub fn specials(&self) -> usize {
        self.0.iter().filter(|special| **special).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Phase of a sequence that has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
    InSequence(usize),
    /// The current decision is the last one the mask covers.
    Complete,
}

/// Mask plus position plus the context seen at each position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSequenceState")]
pub struct SequenceState {
    mask: SequenceMask,
    position: usize,
    contexts: Vec<Option<String>>,
}

/// Unchecked wire form of [`SequenceState`].
#[derive(Deserialize)]
struct RawSequenceState {
    mask: SequenceMask,
    position: usize,
    contexts: Vec<Option<String>>,
}

impl TryFrom<RawSequenceState> for SequenceState {
    type Error = ConfigError;

    fn try_from(raw: RawSequenceState) -> Result<Self, Self::Error> {
        let expected = raw.mask.len();
        if expected == 0 {
            return Err(ConfigError::InvalidSequenceState("mask is empty".to_string()));
        }
        if raw.position >= expected {
            return Err(ConfigError::InvalidSequenceState(format!(
                "position {} is outside a sequence of {expected}",
                raw.position
            )));
        }
        if raw.contexts.len() != expected {
            return Err(ConfigError::InvalidSequenceState(format!(
                "{} contexts recorded for a sequence of {expected}",
                raw.contexts.len()
            )));
        }
        Ok(Self {
            mask: raw.mask,
            position: raw.position,
            contexts: raw.contexts,
        })
    }
}

impl SequenceState {
    /// Start a sequence at position 0.
    pub fn start(mask: SequenceMask, context: &str) -> Self {
        let mut contexts = vec![None; mask.len()];
        if let Some(slot) = contexts.first_mut() {
            *slot = Some(context.to_string());
        }
        Self {
            mask,
            position: 0,
            contexts,
        }
    }

    /// Replacement state one position further on.
    ///
    /// Fails when the sequence has no position left; the position is never clamped.
    pub fn advance(&self, context: &str) -> Result<Self, GaffError> {
        let next = self.position + 1;
        if next >= self.mask.len() {
            return Err(GaffError::SequenceOverCapacity {
                expected_decisions: self.mask.len(),
            });
        }
        let mut contexts = self.contexts.clone();
        let slot = contexts.get_mut(next).ok_or_else(|| {
            ConfigError::InvalidSequenceState(format!("no context slot for position {next}"))
        })?;
        *slot = Some(context.to_string());
        Ok(Self {
            mask: self.mask.clone(),
            position: next,
            contexts,
        })
    }

    pub fn mask(&self) -> &SequenceMask {
        &self.mask
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn expected_decisions(&self) -> usize {
        self.mask.len()
    }

    /// Whether the current decision must satisfy the symbol condition.
    pub fn is_special(&self) -> bool {
        self.mask.is_special(self.position)
    }

    pub fn context_at(&self, position: usize) -> Option<&str> {
        self.contexts.get(position).and_then(|c| c.as_deref())
    }

    pub fn phase(&self) -> SequencePhase {
        if self.position + 1 >= self.mask.len() {
            SequencePhase::Complete
        } else {
            SequencePhase::InSequence(self.position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{ScriptedRandom, StdRandom};
    use rstest::rstest;

    #[rstest]
    #[case::left(MaskStrategy::Left, vec![true, true, false, false, false])]
    #[case::right(MaskStrategy::Right, vec![false, false, false, true, true])]
    fn fixed_strategies(#[case] strategy: MaskStrategy, #[case] expected: Vec<bool>) {
        let mut rng = ScriptedRandom::zeros();
        let mask = SequenceMask::build(5, 2, strategy, &mut rng);
        assert_eq!(mask.as_slice(), expected.as_slice());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn any_strategy_places_exact_count() {
        for seed in 0..50 {
            let mut rng = StdRandom::from_seed_u64(seed);
            let mask = SequenceMask::build(5, 2, MaskStrategy::Any, &mut rng);
            assert_eq!(mask.len(), 5);
            assert_eq!(mask.specials(), 2);
        }
    }

    #[test]
    fn any_strategy_follows_draws() {
        // positions [0,1,2,3,4]: swap(0, 3) -> 3 special; swap(1, 1 + 2) -> 0 special
        let mut rng = ScriptedRandom::new(vec![3, 2]);
        let mask = SequenceMask::build(5, 2, MaskStrategy::Any, &mut rng);
        assert_eq!(mask.as_slice(), &[true, false, false, true, false]);
    }

    #[test]
    fn advance_records_context_and_rejects_overflow() {
        let mask = SequenceMask::build(3, 1, MaskStrategy::Left, &mut ScriptedRandom::zeros());
        let s0 = SequenceState::start(mask, "reel_1");
        assert!(s0.is_special());
        assert_eq!(s0.phase(), SequencePhase::InSequence(0));

        let s1 = s0.advance("reel_2").unwrap();
        let s2 = s1.advance("reel_3").unwrap();
        assert_eq!(s2.position(), 2);
        assert!(!s2.is_special());
        assert_eq!(s2.context_at(1), Some("reel_2"));
        assert_eq!(s2.phase(), SequencePhase::Complete);

        assert_eq!(
            s2.advance("reel_4").unwrap_err(),
            GaffError::SequenceOverCapacity {
                expected_decisions: 3
            }
        );
        // the original state is untouched
        assert_eq!(s0.position(), 0);
    }

    #[test]
    fn persisted_state_survives_json() {
        let mask = SequenceMask::build(3, 1, MaskStrategy::Right, &mut ScriptedRandom::zeros());
        let state = SequenceState::start(mask, "reel_1").advance("reel_2").unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: SequenceState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert!(back.advance("reel_3").unwrap().is_special());
    }

    #[rstest]
    #[case::missing_contexts(r#"{"mask":[false,true,false],"position":0,"contexts":[]}"#)]
    #[case::position_past_end(r#"{"mask":[true],"position":7,"contexts":[null]}"#)]
    #[case::empty_mask(r#"{"mask":[],"position":0,"contexts":[]}"#)]
    fn malformed_persisted_state_is_rejected(#[case] json: &str) {
        let err = serde_json::from_str::<SequenceState>(json).unwrap_err();
        assert!(err.to_string().contains("invalid sequence state"), "{err}");
    }
}
