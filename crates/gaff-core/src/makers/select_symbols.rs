use super::{DecisionMaker, Validity};
use crate::domain::{ConfigError, DecisionShape, GaffError, Outcome, SequenceState};
use crate::ports::{Condition, RandomSource};
use crate::select::{BulkFill, ConditionalSearch, DEFAULT_REDRAW_CAP, WeightedBool};

/// Fills a fixed-count index request where each item independently satisfies
/// or violates the symbol condition, with odds `true_weight : false_weight`.
pub struct SelectSymbols {
    name: String,
    context: Box<dyn Condition>,
    symbol: Box<dyn Condition>,
    odds: WeightedBool,
    window: usize,
    redraw_cap: usize,
}

impl SelectSymbols {
    pub fn new(
        context: impl Condition + 'static,
        symbol: impl Condition + 'static,
        odds: WeightedBool,
        window: usize,
    ) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(Self {
            name: "select_symbols".to_string(),
            context: Box::new(context),
            symbol: Box::new(symbol),
            odds,
            window,
            redraw_cap: DEFAULT_REDRAW_CAP,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_redraw_cap(mut self, redraw_cap: usize) -> Result<Self, ConfigError> {
        if redraw_cap == 0 {
            return Err(ConfigError::ZeroFailBudget);
        }
        self.redraw_cap = redraw_cap;
        Ok(self)
    }

    fn supports(shape: &DecisionShape) -> bool {
        match shape {
            DecisionShape::Indexes(_)
            | DecisionShape::WeightedIndexes(_)
            | DecisionShape::WeightsIndexes(_) => true,
            DecisionShape::Simple | DecisionShape::PickIndexes(_) => false,
        }
    }

    fn select(&self, shape: &DecisionShape, rng: &mut dyn RandomSource) -> Result<Vec<usize>, GaffError> {
        let unsupported = || GaffError::UnsupportedShape(shape.kind());
        if !Self::supports(shape) {
            return Err(unsupported());
        }
        let domain = shape.domain().ok_or_else(unsupported)?;
        let count = shape.fixed_count().ok_or_else(unsupported)?;

        let search = ConditionalSearch::over(domain, self.window)?;
        let fill = BulkFill::new(search, domain.allow_duplicates, self.redraw_cap)?;

        let mut out = Vec::with_capacity(count);
        for slot in 0..count {
            let satisfy = self.odds.sample(rng);
            let symbol = self.symbol.as_ref();
            fill.fill(rng, |name| symbol.check(name) == satisfy, &mut out, slot + 1)?;
        }
        Ok(out)
    }
}

impl DecisionMaker for SelectSymbols {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "{}: in context '{}' each index lands on '{}' with odds {}:{}",
            self.name,
            self.context.describe(),
            self.symbol.describe(),
            self.odds.true_weight(),
            self.odds.false_weight()
        )
    }

    fn valid(
        &self,
        context: &str,
        shape: &DecisionShape,
        _state: Option<&SequenceState>,
        _rng: &mut dyn RandomSource,
    ) -> Validity {
        Validity::gate(Self::supports(shape) && self.context.check(context))
    }

    fn create(
        &self,
        shape: &DecisionShape,
        _state: Option<&SequenceState>,
        rng: &mut dyn RandomSource,
    ) -> Outcome {
        self.select(shape, rng).into()
    }
}
