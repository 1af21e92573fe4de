//! gaff-core
//!
//! Constrained weighted-outcome selection ("gaffing"): decision makers that
//! turn an abstract decision shape into a concrete outcome biased to satisfy,
//! or deliberately violate, symbol predicates within bounded retries.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（shape, outcome, sequence, selection, errors）
//! - **ports**: 抽象化レイヤー（RandomSource, SymbolTable, Condition）
//! - **impls**: ports の実装（StdRandom, ScriptedRandom, NameMatcher）
//! - **select**: サンプラー（WeightedBool, ConditionalSearch, BulkFill, Bag）
//! - **makers**: DecisionMaker と 5 つの戦略
//! - **app**: 設定、EngineBuilder、GaffEngine

pub mod app;
pub mod domain;
pub mod impls;
pub mod makers;
pub mod ports;
pub mod select;

pub use app::{BuildError, Decision, EngineBuilder, GaffConfig, GaffEngine, MakerSpec};
pub use domain::{ConfigError, DecisionShape, GaffError, Outcome, Payload, SequenceState};
pub use makers::{DecisionMaker, Validity};
