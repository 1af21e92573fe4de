//! RandomSource port - 乱数の抽象化
//!
//! # 実装
//! - **StdRandom**: `rand` の StdRng（本番用、シード指定可）
//! - **ScriptedRandom**: 固定値の再生（テスト用）

/// RandomSource は `[0, bound)` の一様な整数を提供
///
/// # テスト容易性
/// - trait により乱数を差し替え可能
/// - テストでは ScriptedRandom を使用
pub trait RandomSource {
    /// Uniform draw in `[0, bound)`. `bound` is always positive.
    fn next_below(&mut self, bound: u64) -> u64;

    /// Uniform index in `[0, bound)`.
    fn index_below(&mut self, bound: usize) -> usize {
        self.next_below(bound as u64) as usize
    }

    /// Uniform value in `[low, high]`.
    ///
    /// A range spanning every `usize` cannot be counted; it draws from
    /// `[low, high)` instead.
    fn between(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = high - low;
        low + self.index_below(span.checked_add(1).unwrap_or(span))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u64) -> u64 {
        (**self).next_below(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_below(&mut self, bound: u64) -> u64 {
        (**self).next_below(bound)
    }
}
