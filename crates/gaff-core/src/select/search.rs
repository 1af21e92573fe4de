//! Conditional search: cyclic bounded scan for a matching index.

use crate::domain::Domain;
use crate::domain::errors::ConfigError;
use crate::ports::{RandomSource, SymbolTable};

/// Result of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// Window-smeared index of the first match.
    Hit(usize),
    /// Nothing in the domain matched; `fallback` is the starting point.
    Miss { fallback: usize },
}

impl SearchResult {
    pub fn found(&self) -> bool {
        matches!(self, SearchResult::Hit(_))
    }

    /// The reported index, hit or fallback. Always inside the domain.
    pub fn index(&self) -> usize {
        match self {
            SearchResult::Hit(index) => *index,
            SearchResult::Miss { fallback } => *fallback,
        }
    }
}

/// Move `hit` back by `random(window)` positions, wrapping around the domain.
///
/// The original hit stays within `window` positions forward of the result.
pub(crate) fn smear<R: RandomSource + ?Sized>(
    rng: &mut R,
    hit: usize,
    domain_size: usize,
    window: usize,
) -> usize {
    let back = rng.index_below(window.max(1)) % domain_size;
    (domain_size + hit - back) % domain_size
}

/// Scans `[0, domain_size)` from a starting point for the first index whose
/// symbol name satisfies a predicate.
///
/// The scan never takes more than `domain_size` steps.
#[derive(Clone, Copy)]
pub struct ConditionalSearch<'a> {
    names: &'a dyn SymbolTable,
    domain_size: usize,
    window: usize,
}

impl<'a> ConditionalSearch<'a> {
    pub fn new(
        names: &'a dyn SymbolTable,
        domain_size: usize,
        window: usize,
    ) -> Result<Self, ConfigError> {
        if domain_size == 0 {
            return Err(ConfigError::EmptyDomain);
        }
        if window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(Self {
            names,
            domain_size,
            window,
        })
    }

    pub fn over(domain: Domain<'a>, window: usize) -> Result<Self, ConfigError> {
        Self::new(domain.names, domain.size, window)
    }

    /// Scan for the first match starting at `starting_point`, or at a uniform
    /// draw when none is given.
    pub fn find<R, P>(&self, rng: &mut R, predicate: P, starting_point: Option<usize>) -> SearchResult
    where
        R: RandomSource + ?Sized,
        P: Fn(&str) -> bool,
    {
        let start = match starting_point {
            Some(start) => start % self.domain_size,
            None => rng.index_below(self.domain_size),
        };

        let hit = (0..self.domain_size)
            .map(|i| (start + i) % self.domain_size)
            .find(|candidate| predicate(self.names.name_of(*candidate)));

        match hit {
            Some(hit) => SearchResult::Hit(smear(rng, hit, self.domain_size, self.window)),
            None => {
                tracing::debug!(
                    domain_size = self.domain_size,
                    start,
                    "conditional search exhausted the domain"
                );
                SearchResult::Miss { fallback: start }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{ScriptedRandom, StdRandom};

    fn strip() -> Vec<&'static str> {
        vec!["A", "B", "C", "Wild", "E", "F"]
    }

    #[test]
    fn finds_first_match_from_start() {
        let names = strip();
        let search = ConditionalSearch::new(&names, 6, 1).unwrap();
        let mut rng = ScriptedRandom::zeros();
        assert_eq!(search.find(&mut rng, |n| n == "Wild", Some(1)), SearchResult::Hit(3));
    }

    #[test]
    fn wraps_around_the_domain() {
        let names = strip();
        let search = ConditionalSearch::new(&names, 6, 1).unwrap();
        let mut rng = ScriptedRandom::zeros();
        assert_eq!(search.find(&mut rng, |n| n == "A", Some(4)), SearchResult::Hit(0));
    }

    #[test]
    fn window_smears_backwards_with_wrap() {
        let names = strip();
        let search = ConditionalSearch::new(&names, 6, 3).unwrap();
        // start drawn as 0, then a window draw of 2: hit 0 -> 4
        let mut rng = ScriptedRandom::new(vec![0, 2]);
        assert_eq!(search.find(&mut rng, |n| n == "A", None), SearchResult::Hit(4));
    }

    #[test]
    fn miss_returns_exact_starting_point() {
        let names = strip();
        let search = ConditionalSearch::new(&names, 6, 2).unwrap();
        let mut rng = ScriptedRandom::new(vec![5]);
        let result = search.find(&mut rng, |n| n == "Nope", None);
        assert_eq!(result, SearchResult::Miss { fallback: 5 });
        assert!(!result.found());
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn hit_stays_within_window_of_report() {
        let names = strip();
        let window = 3;
        let search = ConditionalSearch::new(&names, 6, window).unwrap();
        let mut rng = StdRandom::from_seed_u64(11);
        for _ in 0..200 {
            let reported = search.find(&mut rng, |n| n == "Wild", None).index();
            let forward = (3 + 6 - reported) % 6;
            assert!(forward < window, "reported {reported}");
        }
    }

    #[test]
    fn zero_window_is_a_config_error() {
        let names = strip();
        assert!(matches!(
            ConditionalSearch::new(&names, 6, 0),
            Err(ConfigError::ZeroWindow)
        ));
    }
}
