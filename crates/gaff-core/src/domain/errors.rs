//! Errors - エラー型と分類
//!
//! - **ConfigError**: 構築時に検出される設定ミス（致命的、リトライしない）
//! - **GaffError**: 決定時の失敗（回復可能、失敗 Outcome に変換される）

use thiserror::Error;

use super::shape::ShapeKind;

/// Upper bound for the sum of two sampler weights (2^53).
pub const MAX_WEIGHT_TOTAL: u64 = 1 << 53;

/// Configuration errors raised while building samplers, shapes and decision makers.
///
/// These abort construction; nothing substitutes a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("weights must not both be zero")]
    ZeroWeights,

    #[error("weights {true_weight} + {false_weight} exceed the ceiling of {}", MAX_WEIGHT_TOTAL)]
    WeightOverflow { true_weight: u64, false_weight: u64 },

    #[error("symbol window must be at least 1")]
    ZeroWindow,

    #[error("domain size must be positive")]
    EmptyDomain,

    #[error("symbol table has {len} entries but the domain needs {domain_size}")]
    SymbolTableTooShort { len: usize, domain_size: usize },

    #[error("fail budget must be positive")]
    ZeroFailBudget,

    #[error("malformed selection token '{0}'")]
    MalformedToken(String),

    #[error("slot {slot} is pinned more than once")]
    DuplicatePin { slot: usize },

    #[error("invalid count range {min_count}..={max_count}")]
    InvalidCountRange { min_count: usize, max_count: usize },

    #[error("sequence of {expected_decisions} decisions cannot hold {max_count} special positions")]
    SequenceTooShort {
        expected_decisions: usize,
        max_count: usize,
    },

    #[error("invalid sequence state: {0}")]
    InvalidSequenceState(String),
}

/// Decision-time failures.
///
/// `valid()` should filter shape mismatches before `create()` runs; when one
/// slips through it is reported here instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GaffError {
    #[error("unsupported decision shape: {0}")]
    UnsupportedShape(ShapeKind),

    #[error("requested {requested} indexes but this decision maker supports {supported}")]
    CountMismatch { requested: usize, supported: usize },

    #[error("could not find the requested symbol")]
    SymbolNotFound { fallback: usize },

    #[error("could not find symbol '{symbol}'")]
    NamedSymbolNotFound { symbol: String },

    #[error("symbol '{symbol}' is pinned to slot {slot} but only {count} slots were requested")]
    PinOutOfRange {
        symbol: String,
        slot: usize,
        count: usize,
    },

    #[error("no free slot left for symbol '{symbol}'")]
    SlotsExhausted { symbol: String },

    #[error("bag of {domain_size} indexes is exhausted")]
    BagExhausted { domain_size: usize },

    #[error("gave up after {attempts} attempts")]
    RetriesExhausted { attempts: usize },

    #[error("no sequence state; valid() must run before create()")]
    MissingSequence,

    #[error("sequence of {expected_decisions} decisions is over capacity")]
    SequenceOverCapacity { expected_decisions: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GaffError {
    /// Domain-valid index the caller may accept instead, when the failure has one.
    pub fn fallback(&self) -> Option<usize> {
        match self {
            GaffError::SymbolNotFound { fallback } => Some(*fallback),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_search_misses_carry_a_fallback() {
        assert_eq!(GaffError::SymbolNotFound { fallback: 3 }.fallback(), Some(3));
        assert_eq!(GaffError::BagExhausted { domain_size: 3 }.fallback(), None);
    }

    #[test]
    fn named_symbol_message_contains_symbol() {
        let e = GaffError::NamedSymbolNotFound {
            symbol: "Wild".to_string(),
        };
        assert!(e.to_string().contains("Wild"));
    }
}
