//! Ports - 外部コラボレータの抽象化レイヤー
//!
//! このコアが外部から受け取るものを trait として定義します。
//! 各 trait は実装の詳細（乱数生成器、リールストリップ、条件言語）を隠蔽します。
//!
//! # 設計原則
//! - 乱数はすべて RandomSource を経由する（グローバルな RNG は使わない）
//! - テストでは決定的な実装に差し替える

pub mod condition;
pub mod random;
pub mod symbols;

// 主要な trait を再エクスポート
pub use self::condition::Condition;
pub use self::random::RandomSource;
pub use self::symbols::SymbolTable;
