use super::{DecisionMaker, Validity, single_index_domain};
use crate::domain::{
    ConfigError, DecisionShape, GaffError, MaskStrategy, Outcome, SequenceMask, SequenceState,
};
use crate::ports::{Condition, RandomSource};
use crate::select::{ConditionalSearch, SearchResult};

/// Spreads a symbol across a sequence of single-strip decisions.
///
/// The first accepted call of a sequence decides how many of the
/// `expected_decisions` land on the symbol and where (the mask). Every call
/// then stops its strip on the symbol when the mask says so, and anywhere else
/// otherwise.
pub struct MultiStripFinder {
    name: String,
    context: Box<dyn Condition>,
    symbol: Box<dyn Condition>,
    expected_decisions: usize,
    min_count: usize,
    max_count: usize,
    strategy: MaskStrategy,
    window: usize,
}

impl MultiStripFinder {
    pub fn new(
        context: impl Condition + 'static,
        symbol: impl Condition + 'static,
        expected_decisions: usize,
        min_count: usize,
        max_count: usize,
        strategy: MaskStrategy,
        window: usize,
    ) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if expected_decisions == 0 {
            return Err(ConfigError::EmptyDomain);
        }
        if min_count > max_count {
            return Err(ConfigError::InvalidCountRange {
                min_count,
                max_count,
            });
        }
        if max_count > expected_decisions {
            return Err(ConfigError::SequenceTooShort {
                expected_decisions,
                max_count,
            });
        }
        Ok(Self {
            name: "multi_strip_finder".to_string(),
            context: Box::new(context),
            symbol: Box::new(symbol),
            expected_decisions,
            min_count,
            max_count,
            strategy,
            window,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn expected_decisions(&self) -> usize {
        self.expected_decisions
    }

    fn start(&self, context: &str, rng: &mut dyn RandomSource) -> SequenceState {
        let count = rng.between(self.min_count, self.max_count);
        let mask = SequenceMask::build(self.expected_decisions, count, self.strategy, rng);
        tracing::debug!(
            maker = %self.name,
            count,
            mask = ?mask.as_slice(),
            "sequence started"
        );
        SequenceState::start(mask, context)
    }

    fn find(
        &self,
        shape: &DecisionShape,
        state: Option<&SequenceState>,
        rng: &mut dyn RandomSource,
    ) -> Result<usize, GaffError> {
        let state = state.ok_or(GaffError::MissingSequence)?;
        let domain = single_index_domain(shape)?;
        let special = state.is_special();
        let search = ConditionalSearch::over(domain, self.window)?;
        match search.find(rng, |name| self.symbol.check(name) == special, None) {
            SearchResult::Hit(index) => Ok(index),
            SearchResult::Miss { fallback } => Err(GaffError::SymbolNotFound { fallback }),
        }
    }
}

impl DecisionMaker for MultiStripFinder {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "{}: in context '{}' land '{}' on {}..={} of {} decisions ({:?})",
            self.name,
            self.context.describe(),
            self.symbol.describe(),
            self.min_count,
            self.max_count,
            self.expected_decisions,
            self.strategy
        )
    }

    fn valid(
        &self,
        context: &str,
        shape: &DecisionShape,
        state: Option<&SequenceState>,
        rng: &mut dyn RandomSource,
    ) -> Validity {
        if !shape.is_countable() || !self.context.check(context) {
            return Validity::Invalid;
        }
        match state {
            None => Validity::Valid {
                state: Some(self.start(context, rng)),
            },
            Some(current) => match current.advance(context) {
                Ok(next) => Validity::Valid { state: Some(next) },
                Err(error) => {
                    tracing::debug!(maker = %self.name, %error, "sequence rejected");
                    Validity::Invalid
                }
            },
        }
    }

    fn create(
        &self,
        shape: &DecisionShape,
        state: Option<&SequenceState>,
        rng: &mut dyn RandomSource,
    ) -> Outcome {
        self.find(shape, state, rng).map(|index| vec![index]).into()
    }
}
