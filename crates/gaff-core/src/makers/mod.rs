//! Decision makers: the strategies a driver chooses between.
//!
//! Every maker follows the same contract:
//! - `valid()` gates: does this maker apply to this context and shape?
//! - `create()` acts: produce an [`Outcome`] for the shape
//! - `describe()` explains the rule, without side effects
//!
//! Only [`MultiStripFinder`] uses sequence state. The driver owns it and passes
//! the current value in; `valid()` hands back the replacement.

mod chosen;
mod multi_strip;
mod select_symbols;
mod simple;
mod strip_finder;

pub use chosen::SelectChosenSymbols;
pub use multi_strip::MultiStripFinder;
pub use select_symbols::SelectSymbols;
pub use simple::SimpleDecisionMaker;
pub use strip_finder::StripFinder;

use crate::domain::{DecisionShape, Domain, GaffError, Outcome, SequenceState};
use crate::ports::RandomSource;

/// Verdict of a `valid()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    /// The maker applies. `state` replaces the driver's sequence state.
    Valid { state: Option<SequenceState> },
    /// The maker does not apply; the driver should try another.
    Invalid,
}

impl Validity {
    /// Valid without any sequence state.
    pub fn stateless() -> Self {
        Validity::Valid { state: None }
    }

    pub fn gate(condition: bool) -> Self {
        if condition {
            Self::stateless()
        } else {
            Validity::Invalid
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid { .. })
    }
}

/// A strategy that turns a decision shape into a gaffed outcome.
pub trait DecisionMaker: Send + Sync {
    fn name(&self) -> &str;

    /// Human-readable rule.
    fn describe(&self) -> String;

    fn valid(
        &self,
        context: &str,
        shape: &DecisionShape,
        state: Option<&SequenceState>,
        rng: &mut dyn RandomSource,
    ) -> Validity;

    fn create(
        &self,
        shape: &DecisionShape,
        state: Option<&SequenceState>,
        rng: &mut dyn RandomSource,
    ) -> Outcome;
}

/// Domain of a shape that asks for exactly one index.
pub(crate) fn single_index_domain(shape: &DecisionShape) -> Result<Domain<'_>, GaffError> {
    let domain = shape
        .domain()
        .ok_or(GaffError::UnsupportedShape(shape.kind()))?;
    if !shape.accepts_single_index() {
        let requested = match shape {
            DecisionShape::PickIndexes(r) => r.min_count(),
            other => other.fixed_count().unwrap_or_default(),
        };
        return Err(GaffError::CountMismatch {
            requested,
            supported: 1,
        });
    }
    Ok(domain)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use crate::domain::{DecisionShape, IndexRequest, PickRequest, WeightsRequest};
    use crate::ports::SymbolTable;

    pub fn strip() -> Arc<dyn SymbolTable> {
        Arc::new(vec![
            "Cherry", "Bar", "Seven", "Wild", "Bar", "Cherry", "Bell", "Bar",
        ])
    }

    pub fn indexes(count: usize, allow_duplicates: bool) -> DecisionShape {
        DecisionShape::Indexes(IndexRequest::over(strip(), count, allow_duplicates).unwrap())
    }

    pub fn weighted(count: usize) -> DecisionShape {
        DecisionShape::WeightedIndexes(IndexRequest::over(strip(), count, true).unwrap())
    }

    pub fn weights(count: usize) -> DecisionShape {
        DecisionShape::WeightsIndexes(
            WeightsRequest::new(vec![1; 8], count, true, strip()).unwrap(),
        )
    }

    pub fn pick(min: usize, max: usize) -> DecisionShape {
        DecisionShape::PickIndexes(PickRequest::new(8, min, max, false, strip()).unwrap())
    }
}
