//! Bulk fill: repeated conditional searches into an output list.

use std::collections::HashSet;

use super::search::{ConditionalSearch, SearchResult};
use crate::domain::errors::{ConfigError, GaffError};
use crate::ports::RandomSource;

/// Default cap on duplicate redraws per `fill` call.
pub const DEFAULT_REDRAW_CAP: usize = 10_000;

/// Populates a list of indexes with conditional searches.
///
/// Without duplicates, a search landing on a value already in the list is
/// redrawn; redraws are capped so a restrictive predicate cannot spin forever.
pub struct BulkFill<'a> {
    search: ConditionalSearch<'a>,
    allow_duplicates: bool,
    redraw_cap: usize,
}

impl<'a> BulkFill<'a> {
    pub fn new(
        search: ConditionalSearch<'a>,
        allow_duplicates: bool,
        redraw_cap: usize,
    ) -> Result<Self, ConfigError> {
        if redraw_cap == 0 {
            return Err(ConfigError::ZeroFailBudget);
        }
        Ok(Self {
            search,
            allow_duplicates,
            redraw_cap,
        })
    }

    /// Append matches of `predicate` until `out.len() == count`.
    ///
    /// Values already in `out` count as taken. On error `out` keeps whatever
    /// was appended before the failure.
    pub fn fill<R, P>(
        &self,
        rng: &mut R,
        predicate: P,
        out: &mut Vec<usize>,
        count: usize,
    ) -> Result<(), GaffError>
    where
        R: RandomSource + ?Sized,
        P: Fn(&str) -> bool,
    {
        let mut seen: HashSet<usize> = if self.allow_duplicates {
            HashSet::new()
        } else {
            out.iter().copied().collect()
        };
        let mut redraws = 0;

        while out.len() < count {
            let index = match self.search.find(rng, &predicate, None) {
                SearchResult::Hit(index) => index,
                SearchResult::Miss { fallback } => {
                    return Err(GaffError::SymbolNotFound { fallback });
                }
            };

            if self.allow_duplicates || seen.insert(index) {
                out.push(index);
                continue;
            }

            redraws += 1;
            if redraws >= self.redraw_cap {
                tracing::debug!(
                    redraws,
                    filled = out.len(),
                    count,
                    "bulk fill gave up on duplicate redraws"
                );
                return Err(GaffError::RetriesExhausted { attempts: redraws });
            }
        }
        Ok(())
    }
}
