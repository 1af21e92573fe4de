use super::{DecisionMaker, Validity, single_index_domain};
use crate::domain::{ConfigError, DecisionShape, GaffError, Outcome, SequenceState};
use crate::ports::{Condition, RandomSource};
use crate::select::{ConditionalSearch, SearchResult};

/// Stops a single strip on a symbol matching the symbol condition.
pub struct StripFinder {
    name: String,
    context: Box<dyn Condition>,
    symbol: Box<dyn Condition>,
    window: usize,
}

impl StripFinder {
    pub fn new(
        context: impl Condition + 'static,
        symbol: impl Condition + 'static,
        window: usize,
    ) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(Self {
            name: "strip_finder".to_string(),
            context: Box::new(context),
            symbol: Box::new(symbol),
            window,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn find(&self, shape: &DecisionShape, rng: &mut dyn RandomSource) -> Result<usize, GaffError> {
        let domain = single_index_domain(shape)?;
        let search = ConditionalSearch::over(domain, self.window)?;
        match search.find(rng, |name| self.symbol.check(name), None) {
            SearchResult::Hit(index) => Ok(index),
            SearchResult::Miss { fallback } => Err(GaffError::SymbolNotFound { fallback }),
        }
    }
}

impl DecisionMaker for StripFinder {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "{}: in context '{}' stop on '{}' within a window of {}",
            self.name,
            self.context.describe(),
            self.symbol.describe(),
            self.window
        )
    }

    fn valid(
        &self,
        context: &str,
        shape: &DecisionShape,
        _state: Option<&SequenceState>,
        _rng: &mut dyn RandomSource,
    ) -> Validity {
        Validity::gate(shape.accepts_single_index() && self.context.check(context))
    }

    fn create(
        &self,
        shape: &DecisionShape,
        _state: Option<&SequenceState>,
        rng: &mut dyn RandomSource,
    ) -> Outcome {
        self.find(shape, rng).map(|index| vec![index]).into()
    }
}
