use super::{DecisionMaker, Validity};
use crate::domain::{DecisionShape, GaffError, Outcome, SequenceState};
use crate::ports::{Condition, RandomSource};

/// Answers every simple (yes/no) decision in a matching context with a fixed value.
pub struct SimpleDecisionMaker {
    name: String,
    context: Box<dyn Condition>,
    value: bool,
}

impl SimpleDecisionMaker {
    pub fn new(context: impl Condition + 'static, value: bool) -> Self {
        Self {
            name: "simple".to_string(),
            context: Box::new(context),
            value,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl DecisionMaker for SimpleDecisionMaker {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "{}: in context '{}' decide {}",
            self.name,
            self.context.describe(),
            self.value
        )
    }

    fn valid(
        &self,
        context: &str,
        shape: &DecisionShape,
        _state: Option<&SequenceState>,
        _rng: &mut dyn RandomSource,
    ) -> Validity {
        Validity::gate(matches!(shape, DecisionShape::Simple) && self.context.check(context))
    }

    fn create(
        &self,
        shape: &DecisionShape,
        _state: Option<&SequenceState>,
        _rng: &mut dyn RandomSource,
    ) -> Outcome {
        match shape {
            DecisionShape::Simple => Outcome::decided(self.value),
            other => GaffError::UnsupportedShape(other.kind()).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{NameMatcher, ScriptedRandom};
    use crate::makers::fixtures::indexes;

    fn maker() -> SimpleDecisionMaker {
        SimpleDecisionMaker::new("feature_trigger".parse::<NameMatcher>().unwrap(), true)
    }

    #[test]
    fn valid_only_for_simple_shape_in_context() {
        let mut rng = ScriptedRandom::zeros();
        let m = maker();
        assert!(m.valid("feature_trigger", &DecisionShape::Simple, None, &mut rng).is_valid());
        assert!(!m.valid("other", &DecisionShape::Simple, None, &mut rng).is_valid());
        assert!(!m.valid("feature_trigger", &indexes(1, true), None, &mut rng).is_valid());
    }

    #[test]
    fn create_returns_configured_value() {
        let mut rng = ScriptedRandom::zeros();
        let outcome = maker().create(&DecisionShape::Simple, None, &mut rng);
        assert_eq!(outcome.as_bool(), Some(true));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn create_on_wrong_shape_reports_instead_of_panicking() {
        let mut rng = ScriptedRandom::zeros();
        let outcome = maker().create(&indexes(1, true), None, &mut rng);
        assert!(!outcome.success);
        assert!(outcome.message.contains("indexes"));
    }

    #[test]
    fn describe_names_context() {
        assert_eq!(
            maker().with_name("always").describe(),
            "always: in context 'feature_trigger' decide true"
        );
    }
}
