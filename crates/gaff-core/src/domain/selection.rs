//! Selection strings for chosen-symbol decisions.
//!
//! Space-separated tokens:
//! - `Name`      one occurrence of `Name` in any free slot
//! - `Name:3`    `Name` pinned to output slot 3
//! - `Name?2`    two plain occurrences of `Name`
//!
//! `Name` may list alternatives as `A|B`.

use std::collections::HashSet;
use std::str::FromStr;

use super::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionToken {
    Plain(String),
    Pinned { symbol: String, slot: usize },
    Repeat { symbol: String, times: usize },
}

impl FromStr for SelectionToken {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedToken(token.to_string());
        let symbol = |name: &str| {
            if name.is_empty() || name.contains([':', '?']) || name.split('|').any(str::is_empty) {
                Err(malformed())
            } else {
                Ok(name.to_string())
            }
        };

        if let Some((name, times)) = token.split_once('?') {
            let times: usize = times.parse().map_err(|_| malformed())?;
            if times == 0 {
                return Err(malformed());
            }
            return Ok(SelectionToken::Repeat {
                symbol: symbol(name)?,
                times,
            });
        }
        if let Some((name, slot)) = token.split_once(':') {
            let slot = slot.parse().map_err(|_| malformed())?;
            return Ok(SelectionToken::Pinned {
                symbol: symbol(name)?,
                slot,
            });
        }
        Ok(SelectionToken::Plain(symbol(token)?))
    }
}

/// A parsed selection string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    tokens: Vec<SelectionToken>,
}

impl Selection {
    pub fn tokens(&self) -> &[SelectionToken] {
        &self.tokens
    }

    /// Pinned `(symbol, slot)` pairs in the order they were written.
    pub fn pinned(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            SelectionToken::Pinned { symbol, slot } => Some((symbol.as_str(), *slot)),
            _ => None,
        })
    }

    /// Plain symbols with repeats expanded, in written order.
    pub fn plain(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for token in &self.tokens {
            match token {
                SelectionToken::Plain(symbol) => out.push(symbol.as_str()),
                SelectionToken::Repeat { symbol, times } => {
                    out.extend(std::iter::repeat_n(symbol.as_str(), *times))
                }
                SelectionToken::Pinned { .. } => {}
            }
        }
        out
    }
}

impl FromStr for Selection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<SelectionToken>, _>>()?;

        let mut pinned = HashSet::new();
        for token in &tokens {
            if let SelectionToken::Pinned { slot, .. } = token {
                if !pinned.insert(*slot) {
                    return Err(ConfigError::DuplicatePin { slot: *slot });
                }
            }
        }
        Ok(Self { tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_all_token_kinds() {
        let sel: Selection = "A:0 B C?2 Wild|Bonus".parse().unwrap();
        assert_eq!(sel.pinned().collect::<Vec<_>>(), vec![("A", 0)]);
        assert_eq!(sel.plain(), vec!["B", "C", "C", "Wild|Bonus"]);
    }

    #[test]
    fn empty_selection_is_allowed() {
        let sel: Selection = "   ".parse().unwrap();
        assert!(sel.tokens().is_empty());
    }

    #[rstest]
    #[case::bad_slot("A:x")]
    #[case::negative_slot("A:-1")]
    #[case::empty_name(":1")]
    #[case::zero_repeat("A?0")]
    #[case::bad_repeat("A?")]
    #[case::mixed("A:1?2")]
    #[case::empty_alternative("A||B")]
    fn malformed_tokens(#[case] text: &str) {
        assert!(matches!(
            text.parse::<Selection>(),
            Err(ConfigError::MalformedToken(_))
        ));
    }

    #[test]
    fn slot_pinned_twice_is_rejected() {
        assert_eq!(
            "A:1 B:1".parse::<Selection>().unwrap_err(),
            ConfigError::DuplicatePin { slot: 1 }
        );
    }
}
