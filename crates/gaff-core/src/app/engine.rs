//! GaffEngine: the driver that owns the random source and sequence states.

use serde::{Deserialize, Serialize};

use crate::domain::{DecisionShape, Outcome, SequenceState};
use crate::makers::{DecisionMaker, Validity};
use crate::ports::RandomSource;

/// One decision and the maker that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// `None` when no maker accepted the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,
    pub context: String,
    pub outcome: Outcome,
}

/// Tries decision makers in order until one produces a successful outcome.
///
/// - Every maker gets its own sequence slot; `valid()` replaces it
/// - A maker whose `create()` fails is logged and skipped
/// - When nothing succeeds, the last failure is returned
pub struct GaffEngine<R> {
    rng: R,
    makers: Vec<Box<dyn DecisionMaker>>,
    sequences: Vec<Option<SequenceState>>,
}

impl<R: RandomSource> GaffEngine<R> {
    pub(crate) fn new(rng: R, makers: Vec<Box<dyn DecisionMaker>>) -> Self {
        let sequences = vec![None; makers.len()];
        Self {
            rng,
            makers,
            sequences,
        }
    }

    pub fn decide(&mut self, context: &str, shape: &DecisionShape) -> Decision {
        let mut last_failure: Option<(String, Outcome)> = None;

        for (slot, maker) in self.makers.iter().enumerate() {
            let state = match maker.valid(context, shape, self.sequences[slot].as_ref(), &mut self.rng) {
                Validity::Valid { state } => state,
                Validity::Invalid => continue,
            };
            self.sequences[slot] = state;

            let outcome = maker.create(shape, self.sequences[slot].as_ref(), &mut self.rng);
            if outcome.success {
                tracing::debug!(maker = maker.name(), context, shape = %shape.kind(), "decision made");
                return Decision {
                    maker: Some(maker.name().to_string()),
                    context: context.to_string(),
                    outcome,
                };
            }

            tracing::warn!(
                maker = maker.name(),
                context,
                reason = %outcome.message,
                "decision maker failed; trying the next one"
            );
            last_failure = Some((maker.name().to_string(), outcome));
        }

        match last_failure {
            Some((maker, outcome)) => Decision {
                maker: Some(maker),
                context: context.to_string(),
                outcome,
            },
            None => Decision {
                maker: None,
                context: context.to_string(),
                outcome: Outcome::failure(format!(
                    "no decision maker accepts context '{context}' with a {} shape",
                    shape.kind()
                )),
            },
        }
    }

    /// Current sequence state of the named maker.
    pub fn sequence(&self, maker: &str) -> Option<&SequenceState> {
        self.makers
            .iter()
            .position(|m| m.name() == maker)
            .and_then(|slot| self.sequences[slot].as_ref())
    }

    /// Discard every sequence state; the next call starts fresh sequences.
    pub fn end_sequences(&mut self) {
        self.sequences.iter_mut().for_each(|s| *s = None);
    }

    pub fn maker_names(&self) -> Vec<&str> {
        self.makers.iter().map(|m| m.name()).collect()
    }

    /// One line per maker, in the order they are tried.
    pub fn describe(&self) -> Vec<String> {
        self.makers.iter().map(|m| m.describe()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::{EngineBuilder, GaffConfig};
    use crate::domain::{IndexRequest, Payload};
    use crate::impls::{ScriptedRandom, StdRandom};
    use crate::ports::SymbolTable;

    fn strip() -> Arc<dyn SymbolTable> {
        Arc::new(vec!["Cherry", "Bar", "Wild", "Bell", "Bar"])
    }

    fn one_stop() -> DecisionShape {
        DecisionShape::Indexes(IndexRequest::over(strip(), 1, true).unwrap())
    }

    fn engine(json: &str, seed: u64) -> GaffEngine<StdRandom> {
        let config = GaffConfig::from_json(json).unwrap();
        EngineBuilder::from_config(&config)
            .unwrap()
            .build(StdRandom::from_seed_u64(seed))
            .unwrap()
    }

    #[test]
    fn first_valid_maker_wins() {
        let mut e = engine(
            r#"{ "makers": [
                { "kind": "simple", "context": "feature", "value": true },
                { "kind": "strip_finder", "context": "reel_*", "symbol": "Wild" }
            ] }"#,
            1,
        );
        let d = e.decide("feature", &DecisionShape::Simple);
        assert_eq!(d.maker.as_deref(), Some("simple"));
        assert_eq!(d.outcome.payload, Payload::Bool(true));

        let d = e.decide("reel_1", &one_stop());
        assert_eq!(d.maker.as_deref(), Some("strip_finder"));
        assert_eq!(d.outcome.as_indexes(), Some(&[2][..]));
    }

    #[test]
    fn failing_maker_falls_through() {
        let mut e = engine(
            r#"{ "makers": [
                { "kind": "strip_finder", "name": "lemons", "symbol": "Lemon" },
                { "kind": "strip_finder", "name": "bells", "symbol": "Bell" }
            ] }"#,
            2,
        );
        let d = e.decide("reel_1", &one_stop());
        assert_eq!(d.maker.as_deref(), Some("bells"));
        assert_eq!(d.outcome.as_indexes(), Some(&[3][..]));
    }

    #[test]
    fn last_failure_is_returned() {
        let mut e = engine(
            r#"{ "makers": [ { "kind": "strip_finder", "symbol": "Lemon" } ] }"#,
            3,
        );
        let d = e.decide("reel_1", &one_stop());
        assert_eq!(d.maker.as_deref(), Some("strip_finder"));
        assert!(!d.outcome.success);
        assert!(d.outcome.fallback.is_some());
    }

    #[test]
    fn nothing_accepts() {
        let config = GaffConfig::default();
        let mut e = EngineBuilder::from_config(&config)
            .unwrap()
            .build(ScriptedRandom::zeros())
            .unwrap();
        let d = e.decide("reel_1", &DecisionShape::Simple);
        assert_eq!(d.maker, None);
        assert!(d.outcome.message.contains("reel_1"));
    }

    #[test]
    fn sequence_state_is_kept_between_calls() {
        let mut e = engine(
            r#"{ "makers": [
                { "kind": "multi_strip_finder", "context": "reel_*", "symbol": "Wild",
                  "expected_decisions": 3, "min_count": 1, "max_count": 1, "strategy": "right" }
            ] }"#,
            4,
        );
        let names = strip();
        let mut wilds = Vec::new();
        for reel in 1..=3 {
            let d = e.decide(&format!("reel_{reel}"), &one_stop());
            let stop = d.outcome.as_indexes().unwrap()[0];
            wilds.push(names.name_of(stop) == "Wild");
        }
        assert_eq!(wilds, vec![false, false, true]);
        assert_eq!(e.sequence("multi_strip_finder").unwrap().position(), 2);

        // over capacity until the driver ends the sequence
        assert!(!e.decide("reel_4", &one_stop()).outcome.success);
        e.end_sequences();
        assert!(e.decide("reel_1", &one_stop()).outcome.success);
        assert_eq!(e.sequence("multi_strip_finder").unwrap().position(), 0);
    }

    #[test]
    fn describe_lists_makers_in_order() {
        let e = engine(
            r#"{ "makers": [
                { "kind": "simple", "value": false },
                { "kind": "select_symbols", "symbol": "Bar", "true_weight": 3 }
            ] }"#,
            5,
        );
        assert_eq!(e.maker_names(), vec!["simple", "select_symbols"]);
        let lines = e.describe();
        assert!(lines[1].contains("odds 3:1"));
    }
}
