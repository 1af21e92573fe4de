//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **StdRandom**: `rand` ベースの RandomSource
//! - **ScriptedRandom**: テスト用の決定的な RandomSource
//! - **NameMatcher**: 設定ファイルから読める簡易 Condition

pub mod matcher;
pub mod random;

// 主要な型を再エクスポート
pub use self::matcher::NameMatcher;
pub use self::random::{ScriptedRandom, StdRandom};
