//! Condition port - 文字列に対する述語
//!
//! context（どの決定点か）と symbol（どの候補が受け入れ可能か）の
//! 両方に使われます。マッチング言語そのものはこのコアの外側です。

/// An opaque predicate over a context label or symbol name.
pub trait Condition: Send + Sync {
    fn check(&self, text: &str) -> bool;

    /// Human-readable form used by `describe()`.
    fn describe(&self) -> String {
        "<condition>".to_string()
    }
}

impl<F> Condition for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn check(&self, text: &str) -> bool {
        self(text)
    }
}
