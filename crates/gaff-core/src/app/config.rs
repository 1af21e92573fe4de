//! Engine configuration (decision makers and sampler budgets).
//!
//! Read from JSON the same way a job spec is: every optional field has a
//! documented default so small configs stay small.

use serde::{Deserialize, Serialize};

use crate::domain::{ConfigError, MaskStrategy};
use crate::impls::NameMatcher;
use crate::makers::{
    DecisionMaker, MultiStripFinder, SelectChosenSymbols, SelectSymbols, SimpleDecisionMaker,
    StripFinder,
};
use crate::select::{DEFAULT_FAIL_BUDGET, DEFAULT_REDRAW_CAP, WeightedBool};

fn default_fail_budget() -> usize {
    DEFAULT_FAIL_BUDGET
}

fn default_redraw_cap() -> usize {
    DEFAULT_REDRAW_CAP
}

fn default_window() -> usize {
    1
}

fn default_weight() -> u64 {
    1
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaffConfig {
    /// Draws a single bag operation may spend.
    #[serde(default = "default_fail_budget")]
    pub fail_budget: usize,

    /// Duplicate redraws a single bulk fill may spend.
    #[serde(default = "default_redraw_cap")]
    pub redraw_cap: usize,

    /// Seed for the random source; entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Decision makers, tried in order.
    #[serde(default)]
    pub makers: Vec<MakerSpec>,
}

impl Default for GaffConfig {
    fn default() -> Self {
        Self {
            fail_budget: DEFAULT_FAIL_BUDGET,
            redraw_cap: DEFAULT_REDRAW_CAP,
            seed: None,
            makers: Vec::new(),
        }
    }
}

impl GaffConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One decision maker. `context` defaults to matching everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MakerSpec {
    Simple {
        #[serde(default)]
        name: Option<String>,
        #[serde(default = "NameMatcher::any")]
        context: NameMatcher,
        value: bool,
    },
    StripFinder {
        #[serde(default)]
        name: Option<String>,
        #[serde(default = "NameMatcher::any")]
        context: NameMatcher,
        symbol: NameMatcher,
        #[serde(default = "default_window")]
        window: usize,
    },
    SelectSymbols {
        #[serde(default)]
        name: Option<String>,
        #[serde(default = "NameMatcher::any")]
        context: NameMatcher,
        symbol: NameMatcher,
        #[serde(default = "default_weight")]
        true_weight: u64,
        #[serde(default = "default_weight")]
        false_weight: u64,
        #[serde(default = "default_window")]
        window: usize,
    },
    SelectChosenSymbols {
        #[serde(default)]
        name: Option<String>,
        #[serde(default = "NameMatcher::any")]
        context: NameMatcher,
        selection: String,
        #[serde(default = "default_window")]
        window: usize,
    },
    MultiStripFinder {
        #[serde(default)]
        name: Option<String>,
        #[serde(default = "NameMatcher::any")]
        context: NameMatcher,
        symbol: NameMatcher,
        expected_decisions: usize,
        min_count: usize,
        max_count: usize,
        #[serde(default)]
        strategy: MaskStrategy,
        #[serde(default = "default_window")]
        window: usize,
    },
}

impl MakerSpec {
    /// Build the decision maker this spec describes.
    pub fn build(
        &self,
        fail_budget: usize,
        redraw_cap: usize,
    ) -> Result<Box<dyn DecisionMaker>, ConfigError> {
        let maker: Box<dyn DecisionMaker> = match self.clone() {
            MakerSpec::Simple {
                name,
                context,
                value,
            } => {
                let maker = SimpleDecisionMaker::new(context, value);
                Box::new(match name {
                    Some(name) => maker.with_name(name),
                    None => maker,
                })
            }
            MakerSpec::StripFinder {
                name,
                context,
                symbol,
                window,
            } => {
                let maker = StripFinder::new(context, symbol, window)?;
                Box::new(match name {
                    Some(name) => maker.with_name(name),
                    None => maker,
                })
            }
            MakerSpec::SelectSymbols {
                name,
                context,
                symbol,
                true_weight,
                false_weight,
                window,
            } => {
                let odds = WeightedBool::new(true_weight, false_weight)?;
                let maker =
                    SelectSymbols::new(context, symbol, odds, window)?.with_redraw_cap(redraw_cap)?;
                Box::new(match name {
                    Some(name) => maker.with_name(name),
                    None => maker,
                })
            }
            MakerSpec::SelectChosenSymbols {
                name,
                context,
                selection,
                window,
            } => {
                let maker = SelectChosenSymbols::new(context, &selection, window)?
                    .with_fail_budget(fail_budget)?;
                Box::new(match name {
                    Some(name) => maker.with_name(name),
                    None => maker,
                })
            }
            MakerSpec::MultiStripFinder {
                name,
                context,
                symbol,
                expected_decisions,
                min_count,
                max_count,
                strategy,
                window,
            } => {
                let maker = MultiStripFinder::new(
                    context,
                    symbol,
                    expected_decisions,
                    min_count,
                    max_count,
                    strategy,
                    window,
                )?;
                Box::new(match name {
                    Some(name) => maker.with_name(name),
                    None => maker,
                })
            }
        };
        Ok(maker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let json = r#"
        {
          "makers": [
            { "kind": "strip_finder", "symbol": "Wild" },
            { "kind": "multi_strip_finder", "symbol": "Scatter",
              "expected_decisions": 5, "min_count": 3, "max_count": 3 }
          ]
        }"#;
        let config = GaffConfig::from_json(json).expect("deserialize");
        assert_eq!(config.fail_budget, DEFAULT_FAIL_BUDGET);
        assert_eq!(config.seed, None);
        match &config.makers[1] {
            MakerSpec::MultiStripFinder {
                strategy, window, ..
            } => {
                assert_eq!(*strategy, MaskStrategy::Any);
                assert_eq!(*window, 1);
            }
            other => panic!("unexpected spec {other:?}"),
        }
    }

    #[test]
    fn builds_named_makers() {
        let json = r#"
        {
          "makers": [
            { "kind": "simple", "name": "trigger", "context": "feature", "value": true },
            { "kind": "select_chosen_symbols", "selection": "Wild:0 Bar?2" }
          ]
        }"#;
        let config = GaffConfig::from_json(json).unwrap();
        let trigger = config.makers[0].build(10, 10).unwrap();
        assert_eq!(trigger.name(), "trigger");
        let chosen = config.makers[1].build(10, 10).unwrap();
        assert_eq!(chosen.name(), "select_chosen_symbols");
    }

    #[test]
    fn bad_weights_fail_at_build() {
        let json = r#"{ "kind": "select_symbols", "symbol": "Bar", "true_weight": 0, "false_weight": 0 }"#;
        let spec: MakerSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.build(10, 10).err(), Some(ConfigError::ZeroWeights));
    }

    #[test]
    fn malformed_matcher_fails_to_deserialize() {
        let json = r#"{ "kind": "strip_finder", "symbol": "Wild||Bar" }"#;
        assert!(serde_json::from_str::<MakerSpec>(json).is_err());
    }
}
