//! Bag: a request-scoped index sampler with a duplicate policy.
//!
//! Design:
//! - One bag per top-level selection request, dropped when the request returns
//! - Invariant: `taken.len() <= domain_size`
//! - Without duplicates, an exhausted bag fails before drawing anything

use std::collections::HashSet;

use super::search::smear;
use crate::domain::Domain;
use crate::domain::errors::{ConfigError, GaffError};
use crate::ports::{RandomSource, SymbolTable};

/// Default number of draws a single bag operation may spend.
pub const DEFAULT_FAIL_BUDGET: usize = 10_000;

pub struct Bag<'a, R: ?Sized> {
    rng: &'a mut R,
    names: &'a dyn SymbolTable,
    domain_size: usize,
    allow_duplicates: bool,
    fail_budget: usize,
    taken: HashSet<usize>,
}

impl<'a, R: RandomSource + ?Sized> Bag<'a, R> {
    pub fn new(rng: &'a mut R, domain: Domain<'a>, fail_budget: usize) -> Result<Self, ConfigError> {
        if domain.size == 0 {
            return Err(ConfigError::EmptyDomain);
        }
        if fail_budget == 0 {
            return Err(ConfigError::ZeroFailBudget);
        }
        Ok(Self {
            rng,
            names: domain.names,
            domain_size: domain.size,
            allow_duplicates: domain.allow_duplicates,
            fail_budget,
            taken: HashSet::new(),
        })
    }

    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Indexes handed out so far (only tracked without duplicates).
    pub fn taken(&self) -> &HashSet<usize> {
        &self.taken
    }

    pub fn is_exhausted(&self) -> bool {
        !self.allow_duplicates && self.taken.len() >= self.domain_size
    }

    fn exhausted(&self) -> GaffError {
        tracing::debug!(domain_size = self.domain_size, "bag exhausted");
        GaffError::BagExhausted {
            domain_size: self.domain_size,
        }
    }

    /// Unconstrained draw.
    ///
    /// With duplicates this always succeeds. Without, collisions with taken
    /// values are redrawn within the fail budget.
    pub fn next(&mut self) -> Result<usize, GaffError> {
        if self.allow_duplicates {
            return Ok(self.rng.index_below(self.domain_size));
        }
        if self.is_exhausted() {
            return Err(self.exhausted());
        }
        for _ in 0..self.fail_budget {
            let candidate = self.rng.index_below(self.domain_size);
            if self.taken.insert(candidate) {
                return Ok(candidate);
            }
        }
        Err(GaffError::RetriesExhausted {
            attempts: self.fail_budget,
        })
    }

    /// Draw an index whose symbol is one of the `|`-separated names in
    /// `symbol_text`, then smear it backwards by `random(window)`.
    ///
    /// Without duplicates, candidates already taken or already rejected during
    /// this call are skipped. A smeared value that is already taken falls back
    /// to the unsmeared hit.
    pub fn next_symbol(&mut self, symbol_text: &str, window: usize) -> Result<usize, GaffError> {
        if self.is_exhausted() {
            return Err(self.exhausted());
        }
        let wanted: Vec<&str> = symbol_text.split('|').collect();
        let not_found = || GaffError::NamedSymbolNotFound {
            symbol: symbol_text.to_string(),
        };

        if self.allow_duplicates {
            for _ in 0..self.fail_budget {
                let candidate = self.rng.index_below(self.domain_size);
                if wanted.contains(&self.names.name_of(candidate)) {
                    return Ok(smear(self.rng, candidate, self.domain_size, window));
                }
            }
            return Err(not_found());
        }

        let mut visited = self.taken.clone();
        for _ in 0..self.fail_budget {
            if visited.len() >= self.domain_size {
                break;
            }
            let candidate = self.rng.index_below(self.domain_size);
            if visited.contains(&candidate) {
                continue;
            }
            if wanted.contains(&self.names.name_of(candidate)) {
                let smeared = smear(self.rng, candidate, self.domain_size, window);
                let value = if self.taken.contains(&smeared) {
                    candidate
                } else {
                    smeared
                };
                self.taken.insert(value);
                return Ok(value);
            }
            visited.insert(candidate);
        }
        Err(not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{ScriptedRandom, StdRandom};
    use rstest::rstest;

    fn domain<'a>(names: &'a Vec<&'static str>, allow_duplicates: bool) -> Domain<'a> {
        Domain {
            size: names.len(),
            allow_duplicates,
            names,
        }
    }

    #[rstest]
    #[case(1, 0)]
    #[case(7, 1)]
    #[case(50, 99)]
    fn with_duplicates_always_in_range(#[case] n: usize, #[case] seed: u64) {
        let names: Vec<&'static str> = vec!["X"; n];
        let mut rng = StdRandom::from_seed_u64(seed);
        let mut bag = Bag::new(&mut rng, domain(&names, true), DEFAULT_FAIL_BUDGET).unwrap();
        assert!(bag.allows_duplicates());
        for _ in 0..(3 * n) {
            let index = bag.next().unwrap();
            assert!(index < n);
        }
    }

    #[test]
    fn without_duplicates_never_repeats_and_fails_fast() {
        let names: Vec<&'static str> = vec!["X"; 8];
        let mut rng = StdRandom::from_seed_u64(1);
        let mut bag = Bag::new(&mut rng, domain(&names, false), DEFAULT_FAIL_BUDGET).unwrap();
        assert_eq!(bag.domain_size(), 8);
        assert!(!bag.allows_duplicates());
        let mut seen = HashSet::new();
        for _ in 0..8 {
            assert!(seen.insert(bag.next().unwrap()));
        }
        assert!(bag.is_exhausted());
        assert_eq!(bag.next(), Err(GaffError::BagExhausted { domain_size: 8 }));
    }

    #[test]
    fn exhausted_bag_does_not_draw() {
        let names: Vec<&'static str> = vec!["X"; 2];
        let mut rng = ScriptedRandom::new(vec![0, 1]);
        {
            let mut bag = Bag::new(&mut rng, domain(&names, false), 5).unwrap();
            bag.next().unwrap();
            bag.next().unwrap();
            assert!(bag.next().is_err());
            assert!(bag.next_symbol("X", 1).is_err());
        }
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn collisions_are_bounded_by_fail_budget() {
        let names: Vec<&'static str> = vec!["X"; 3];
        // always draws 0
        let mut rng = ScriptedRandom::zeros();
        let mut bag = Bag::new(&mut rng, domain(&names, false), 4).unwrap();
        assert_eq!(bag.next(), Ok(0));
        assert_eq!(bag.next(), Err(GaffError::RetriesExhausted { attempts: 4 }));
    }

    #[test]
    fn symbol_draw_matches_alternatives() {
        let names = vec!["A", "B", "C", "D"];
        let mut rng = ScriptedRandom::new(vec![0, 1, 2, 0]);
        let mut bag = Bag::new(&mut rng, domain(&names, true), 10).unwrap();
        // 0 -> A rejected, 1 -> B rejected, 2 -> C accepted, window draw 0
        assert_eq!(bag.next_symbol("C|D", 1), Ok(2));
    }

    #[test]
    fn symbol_draw_without_duplicates_skips_taken() {
        let names = vec!["A", "B", "A", "B"];
        let mut rng = StdRandom::from_seed_u64(17);
        let mut bag = Bag::new(&mut rng, domain(&names, false), 100).unwrap();
        let first = bag.next_symbol("A", 1).unwrap();
        let second = bag.next_symbol("A", 1).unwrap();
        let mut got = vec![first, second];
        got.sort();
        assert_eq!(got, vec![0, 2]);
        assert_eq!(
            bag.next_symbol("A", 1),
            Err(GaffError::NamedSymbolNotFound {
                symbol: "A".to_string()
            })
        );
    }

    #[test]
    fn missing_symbol_stops_once_domain_is_visited() {
        let names = vec!["A", "B", "C"];
        let mut rng = StdRandom::from_seed_u64(4);
        let mut bag = Bag::new(&mut rng, domain(&names, false), DEFAULT_FAIL_BUDGET).unwrap();
        let err = bag.next_symbol("Wild", 1).unwrap_err();
        assert!(err.to_string().contains("Wild"));
        assert!(bag.taken().is_empty());
    }

    #[test]
    fn smear_never_hands_out_a_taken_value() {
        let names = vec!["A", "B", "C", "D"];
        // candidate 1 is "B", window draw 1 smears it back to 0
        let mut rng = ScriptedRandom::new(vec![1, 1]);
        let mut bag = Bag::new(&mut rng, domain(&names, false), 6).unwrap();
        assert_eq!(bag.next_symbol("B", 2), Ok(0));
        // B itself (1) remains free
        assert!(!bag.taken().contains(&1));
        assert!(bag.taken().contains(&0));
    }

    #[test]
    fn zero_fail_budget_is_a_config_error() {
        let names = vec!["A"];
        let mut rng = ScriptedRandom::zeros();
        assert!(matches!(
            Bag::new(&mut rng, domain(&names, true), 0),
            Err(ConfigError::ZeroFailBudget)
        ));
    }
}
