//! Outcome model: common result format for decision makers.
//!
//! This module does not assume anything about how the caller applies the
//! result to game state. It only defines the "shape" of what was decided.

use serde::{Deserialize, Serialize};

use super::errors::GaffError;

/// What a decision maker produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    None,
    Bool(bool),
    Indexes(Vec<usize>),
}

/// Result of one `create()` call.
///
/// - success: `payload` holds the decision.
/// - failure: `payload` is always `Payload::None`; `fallback` may carry a
///   domain-valid index the caller can choose to accept instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    pub payload: Payload,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<usize>,
}

impl Outcome {
    pub fn decided(value: bool) -> Self {
        Self {
            success: true,
            message: String::new(),
            payload: Payload::Bool(value),
            fallback: None,
        }
    }

    pub fn indexes(indexes: Vec<usize>) -> Self {
        Self {
            success: true,
            message: String::new(),
            payload: Payload::Indexes(indexes),
            fallback: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: Payload::None,
            fallback: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_fallback(mut self, fallback: usize) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn as_bool(&self) -> Option<bool> {
        match (&self.payload, self.success) {
            (Payload::Bool(value), true) => Some(*value),
            _ => None,
        }
    }

    pub fn as_indexes(&self) -> Option<&[usize]> {
        match (&self.payload, self.success) {
            (Payload::Indexes(indexes), true) => Some(indexes.as_slice()),
            _ => None,
        }
    }
}

impl From<GaffError> for Outcome {
    fn from(error: GaffError) -> Self {
        let outcome = Outcome::failure(error.to_string());
        match error.fallback() {
            Some(fallback) => outcome.with_fallback(fallback),
            None => outcome,
        }
    }
}

impl From<Result<Vec<usize>, GaffError>> for Outcome {
    fn from(result: Result<Vec<usize>, GaffError>) -> Self {
        match result {
            Ok(indexes) => Outcome::indexes(indexes),
            Err(error) => error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_from_search_miss_keeps_fallback() {
        let o: Outcome = GaffError::SymbolNotFound { fallback: 4 }.into();
        assert!(!o.success);
        assert_eq!(o.payload, Payload::None);
        assert_eq!(o.fallback, Some(4));
        assert_eq!(o.message, "could not find the requested symbol");
        assert_eq!(o.as_indexes(), None);
    }

    #[test]
    fn payload_is_tagged_enum() {
        let s = serde_json::to_string(&Payload::Indexes(vec![1, 2])).unwrap();
        let v: serde_json::Value = serde_json::from_str(&s).unwrap();
        assert_eq!(v["kind"], "indexes");
        assert_eq!(v["value"], serde_json::json!([1, 2]));
    }

    #[test]
    fn outcome_roundtrip_json() {
        let o = Outcome::decided(true).with_message("forced");
        let s = serde_json::to_string(&o).unwrap();
        let back: Outcome = serde_json::from_str(&s).unwrap();
        assert_eq!(back, o);
        assert_eq!(back.as_bool(), Some(true));
    }
}
