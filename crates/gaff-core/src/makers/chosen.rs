use super::{DecisionMaker, Validity};
use crate::domain::{ConfigError, DecisionShape, GaffError, Outcome, Selection, SequenceState};
use crate::ports::{Condition, RandomSource};
use crate::select::{Bag, DEFAULT_FAIL_BUDGET};

/// Places the symbols named by a selection string into the requested slots.
///
/// Pinned tokens (`Name:slot`) are placed first, then plain and repeated
/// tokens fill the free slots in ascending order, then whatever is left is
/// drawn without constraint. All draws share one bag, so the request's
/// duplicate policy holds across the whole outcome.
pub struct SelectChosenSymbols {
    name: String,
    context: Box<dyn Condition>,
    source: String,
    selection: Selection,
    window: usize,
    fail_budget: usize,
}

impl SelectChosenSymbols {
    pub fn new(
        context: impl Condition + 'static,
        selection: &str,
        window: usize,
    ) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(Self {
            name: "select_chosen_symbols".to_string(),
            context: Box::new(context),
            source: selection.trim().to_string(),
            selection: selection.parse()?,
            window,
            fail_budget: DEFAULT_FAIL_BUDGET,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_fail_budget(mut self, fail_budget: usize) -> Result<Self, ConfigError> {
        if fail_budget == 0 {
            return Err(ConfigError::ZeroFailBudget);
        }
        self.fail_budget = fail_budget;
        Ok(self)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn choose(
        &self,
        shape: &DecisionShape,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<usize>, GaffError> {
        let unsupported = || GaffError::UnsupportedShape(shape.kind());
        let domain = shape.domain().ok_or_else(unsupported)?;
        let count = shape.resolve_count(rng).ok_or_else(unsupported)?;

        let mut bag = Bag::new(rng, domain, self.fail_budget)?;
        let mut slots: Vec<Option<usize>> = vec![None; count];
        let not_found = |symbol: &str| GaffError::NamedSymbolNotFound {
            symbol: symbol.to_string(),
        };

        for (symbol, slot) in self.selection.pinned() {
            if slot >= count {
                return Err(GaffError::PinOutOfRange {
                    symbol: symbol.to_string(),
                    slot,
                    count,
                });
            }
            let index = bag
                .next_symbol(symbol, self.window)
                .map_err(|_| not_found(symbol))?;
            slots[slot] = Some(index);
        }

        let mut free = (0..count)
            .filter(|slot| slots[*slot].is_none())
            .collect::<Vec<_>>()
            .into_iter();
        for symbol in self.selection.plain() {
            let Some(slot) = free.next() else {
                return Err(GaffError::SlotsExhausted {
                    symbol: symbol.to_string(),
                });
            };
            let index = bag
                .next_symbol(symbol, self.window)
                .map_err(|_| not_found(symbol))?;
            slots[slot] = Some(index);
        }

        for slot in free {
            slots[slot] = Some(bag.next()?);
        }

        tracing::debug!(maker = %self.name, count, taken = bag.taken().len(), "chosen symbols placed");
        Ok(slots.into_iter().flatten().collect())
    }
}

impl DecisionMaker for SelectChosenSymbols {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "{}: in context '{}' place '{}'",
            self.name,
            self.context.describe(),
            self.source
        )
    }

    fn valid(
        &self,
        context: &str,
        shape: &DecisionShape,
        _state: Option<&SequenceState>,
        _rng: &mut dyn RandomSource,
    ) -> Validity {
        Validity::gate(shape.is_countable() && self.context.check(context))
    }

    fn create(
        &self,
        shape: &DecisionShape,
        _state: Option<&SequenceState>,
        rng: &mut dyn RandomSource,
    ) -> Outcome {
        self.choose(shape, rng).into()
    }
}
