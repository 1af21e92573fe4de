//! NameMatcher: a small Condition parsed from text.
//!
//! Grammar: `[!]alt|alt|...` where an alternative is `*` (anything),
//! `Prefix*` (prefix match) or an exact name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigError;
use crate::ports::Condition;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Alternative {
    Any,
    Prefix(String),
    Exact(String),
}

impl Alternative {
    fn matches(&self, text: &str) -> bool {
        match self {
            Alternative::Any => true,
            Alternative::Prefix(prefix) => text.starts_with(prefix.as_str()),
            Alternative::Exact(name) => text == name,
        }
    }
}

/// Matches context labels or symbol names against `|`-separated alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NameMatcher {
    source: String,
    negated: bool,
    alternatives: Vec<Alternative>,
}

impl NameMatcher {
    /// Matcher that accepts every string.
    pub fn any() -> Self {
        Self {
            source: "*".to_string(),
            negated: false,
            alternatives: vec![Alternative::Any],
        }
    }
}

impl FromStr for NameMatcher {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = s.trim().to_string();
        let (negated, body) = match source.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, source.as_str()),
        };

        let mut alternatives = Vec::new();
        for part in body.split('|') {
            let part = part.trim();
            let alternative = match part {
                "" => return Err(ConfigError::MalformedToken(source.clone())),
                "*" => Alternative::Any,
                _ => match part.strip_suffix('*') {
                    Some(prefix) => Alternative::Prefix(prefix.to_string()),
                    None => Alternative::Exact(part.to_string()),
                },
            };
            alternatives.push(alternative);
        }

        Ok(Self {
            source,
            negated,
            alternatives,
        })
    }
}

impl TryFrom<String> for NameMatcher {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NameMatcher> for String {
    fn from(value: NameMatcher) -> Self {
        value.source
    }
}

impl fmt::Display for NameMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Condition for NameMatcher {
    fn check(&self, text: &str) -> bool {
        self.alternatives.iter().any(|a| a.matches(text)) != self.negated
    }

    fn describe(&self) -> String {
        self.source.clone()
    }
}
