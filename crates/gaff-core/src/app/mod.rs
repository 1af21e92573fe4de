//! App - エンジンの構築と実行
//!
//! - **config**: JSON から読める設定（GaffConfig, MakerSpec）
//! - **builder**: 起動時検証つきの EngineBuilder
//! - **engine**: decision maker を順に試すドライバ（GaffEngine）

pub mod builder;
pub mod config;
pub mod engine;

pub use self::builder::{BuildError, EngineBuilder};
pub use self::config::{GaffConfig, MakerSpec};
pub use self::engine::{Decision, GaffEngine};
