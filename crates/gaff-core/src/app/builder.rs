//! EngineBuilder - エンジンの構築とワイヤリング
//!
//! # 設計
//! - Builder パターン
//! - 起動時検証（Fail-fast 設計）: 設定ミスは build() で検出し、決定時には持ち込まない

use std::collections::HashSet;

use super::config::GaffConfig;
use super::engine::GaffEngine;
use crate::domain::ConfigError;
use crate::makers::DecisionMaker;
use crate::ports::RandomSource;

/// EngineBuilder は decision maker を登録し、GaffEngine を構築
///
/// # 使用例
/// ```ignore
/// let engine = EngineBuilder::new()
///     .register(StripFinder::new(NameMatcher::any(), wild, 1)?)?
///     .expect_makers(&["strip_finder"])
///     .build(StdRandom::from_seed_u64(7))?;
/// ```
pub struct EngineBuilder {
    makers: Vec<Box<dyn DecisionMaker>>,
    expected_makers: Option<Vec<String>>,
}

/// BuildError はエンジン構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("decision maker #{index} is misconfigured: {source}")]
    InvalidMaker {
        index: usize,
        #[source]
        source: ConfigError,
    },

    #[error("decision maker '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Missing decision makers: {0:?}. These were expected but not registered.")]
    MissingMakers(Vec<String>),
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            makers: Vec::new(),
            expected_makers: None,
        }
    }

    /// Builder with every maker of `config`, in order.
    pub fn from_config(config: &GaffConfig) -> Result<Self, BuildError> {
        let mut builder = Self::new();
        for (index, spec) in config.makers.iter().enumerate() {
            let maker = spec
                .build(config.fail_budget, config.redraw_cap)
                .map_err(|source| BuildError::InvalidMaker { index, source })?;
            builder = builder.register_boxed(maker)?;
        }
        Ok(builder)
    }

    /// Register a decision maker. Makers are tried in registration order.
    pub fn register(self, maker: impl DecisionMaker + 'static) -> Result<Self, BuildError> {
        self.register_boxed(Box::new(maker))
    }

    pub fn register_boxed(mut self, maker: Box<dyn DecisionMaker>) -> Result<Self, BuildError> {
        if self.makers.iter().any(|m| m.name() == maker.name()) {
            return Err(BuildError::AlreadyRegistered(maker.name().to_string()));
        }
        self.makers.push(maker);
        Ok(self)
    }

    /// Names that must be registered by the time `build()` runs.
    pub fn expect_makers(mut self, names: &[&str]) -> Self {
        self.expected_makers = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Build the engine around `rng`.
    ///
    /// Fails with `MissingMakers` when an expected maker was never registered.
    pub fn build<R: RandomSource>(self, rng: R) -> Result<GaffEngine<R>, BuildError> {
        if let Some(expected) = &self.expected_makers {
            let registered: HashSet<&str> = self.makers.iter().map(|m| m.name()).collect();
            let missing: Vec<String> = expected
                .iter()
                .filter(|name| !registered.contains(name.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingMakers(missing));
            }
        }
        Ok(GaffEngine::new(rng, self.makers))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
