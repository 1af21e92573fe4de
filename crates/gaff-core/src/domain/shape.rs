//! Decision shapes: what is being chosen.
//!
//! A shape is a closed set of variants so every decision maker can match it
//! exhaustively. Every non-simple variant resolves to a [`Domain`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::ports::{RandomSource, SymbolTable};

/// Discriminant of a [`DecisionShape`], used in messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Simple,
    Indexes,
    WeightedIndexes,
    WeightsIndexes,
    PickIndexes,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Simple => "simple",
            ShapeKind::Indexes => "indexes",
            ShapeKind::WeightedIndexes => "weighted_indexes",
            ShapeKind::WeightsIndexes => "weights_indexes",
            ShapeKind::PickIndexes => "pick_indexes",
        };
        f.write_str(name)
    }
}

fn check_domain(domain_size: usize, names: &dyn SymbolTable) -> Result<(), ConfigError> {
    if domain_size == 0 {
        return Err(ConfigError::EmptyDomain);
    }
    if names.len() < domain_size {
        return Err(ConfigError::SymbolTableTooShort {
            len: names.len(),
            domain_size,
        });
    }
    Ok(())
}

/// A fixed number of indexes from `[0, domain_size)`.
#[derive(Clone)]
pub struct IndexRequest {
    domain_size: usize,
    count: usize,
    allow_duplicates: bool,
    names: Arc<dyn SymbolTable>,
}

impl IndexRequest {
    pub fn new(
        domain_size: usize,
        count: usize,
        allow_duplicates: bool,
        names: Arc<dyn SymbolTable>,
    ) -> Result<Self, ConfigError> {
        check_domain(domain_size, names.as_ref())?;
        Ok(Self {
            domain_size,
            count,
            allow_duplicates,
            names,
        })
    }

    /// Request covering the whole symbol table.
    pub fn over(
        names: Arc<dyn SymbolTable>,
        count: usize,
        allow_duplicates: bool,
    ) -> Result<Self, ConfigError> {
        Self::new(names.len(), count, allow_duplicates, names)
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl fmt::Debug for IndexRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexRequest")
            .field("domain_size", &self.domain_size)
            .field("count", &self.count)
            .field("allow_duplicates", &self.allow_duplicates)
            .finish_non_exhaustive()
    }
}

/// A fixed number of indexes, one per weight.
#[derive(Clone)]
pub struct WeightsRequest {
    weights: Vec<u64>,
    count: usize,
    allow_duplicates: bool,
    names: Arc<dyn SymbolTable>,
}

impl WeightsRequest {
    pub fn new(
        weights: Vec<u64>,
        count: usize,
        allow_duplicates: bool,
        names: Arc<dyn SymbolTable>,
    ) -> Result<Self, ConfigError> {
        check_domain(weights.len(), names.as_ref())?;
        Ok(Self {
            weights,
            count,
            allow_duplicates,
            names,
        })
    }

    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl fmt::Debug for WeightsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightsRequest")
            .field("weights", &self.weights)
            .field("count", &self.count)
            .field("allow_duplicates", &self.allow_duplicates)
            .finish_non_exhaustive()
    }
}

/// Between `min_count` and `max_count` indexes.
#[derive(Clone)]
pub struct PickRequest {
    domain_size: usize,
    min_count: usize,
    max_count: usize,
    allow_duplicates: bool,
    names: Arc<dyn SymbolTable>,
}

impl PickRequest {
    pub fn new(
        domain_size: usize,
        min_count: usize,
        max_count: usize,
        allow_duplicates: bool,
        names: Arc<dyn SymbolTable>,
    ) -> Result<Self, ConfigError> {
        check_domain(domain_size, names.as_ref())?;
        if min_count > max_count {
            return Err(ConfigError::InvalidCountRange {
                min_count,
                max_count,
            });
        }
        Ok(Self {
            domain_size,
            min_count,
            max_count,
            allow_duplicates,
            names,
        })
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }
}

impl fmt::Debug for PickRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickRequest")
            .field("domain_size", &self.domain_size)
            .field("min_count", &self.min_count)
            .field("max_count", &self.max_count)
            .field("allow_duplicates", &self.allow_duplicates)
            .finish_non_exhaustive()
    }
}

/// Description of what is being chosen.
#[derive(Debug, Clone)]
pub enum DecisionShape {
    /// A single yes/no decision.
    Simple,
    Indexes(IndexRequest),
    WeightedIndexes(IndexRequest),
    WeightsIndexes(WeightsRequest),
    PickIndexes(PickRequest),
}

/// The index domain a countable shape draws from.
#[derive(Clone, Copy)]
pub struct Domain<'a> {
    pub size: usize,
    pub allow_duplicates: bool,
    pub names: &'a dyn SymbolTable,
}

impl fmt::Debug for Domain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("size", &self.size)
            .field("allow_duplicates", &self.allow_duplicates)
            .finish_non_exhaustive()
    }
}

impl Domain<'_> {
    pub fn name_of(&self, index: usize) -> &str {
        self.names.name_of(index)
    }
}

impl DecisionShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            DecisionShape::Simple => ShapeKind::Simple,
            DecisionShape::Indexes(_) => ShapeKind::Indexes,
            DecisionShape::WeightedIndexes(_) => ShapeKind::WeightedIndexes,
            DecisionShape::WeightsIndexes(_) => ShapeKind::WeightsIndexes,
            DecisionShape::PickIndexes(_) => ShapeKind::PickIndexes,
        }
    }

    /// True for the four index-producing variants.
    pub fn is_countable(&self) -> bool {
        !matches!(self, DecisionShape::Simple)
    }

    /// Index domain, `None` for `Simple`.
    pub fn domain(&self) -> Option<Domain<'_>> {
        let (size, allow_duplicates, names) = match self {
            DecisionShape::Simple => return None,
            DecisionShape::Indexes(r) | DecisionShape::WeightedIndexes(r) => {
                (r.domain_size, r.allow_duplicates, r.names.as_ref())
            }
            DecisionShape::WeightsIndexes(r) => {
                (r.weights.len(), r.allow_duplicates, r.names.as_ref())
            }
            DecisionShape::PickIndexes(r) => (r.domain_size, r.allow_duplicates, r.names.as_ref()),
        };
        Some(Domain {
            size,
            allow_duplicates,
            names,
        })
    }

    /// Requested count when it does not depend on a draw.
    pub fn fixed_count(&self) -> Option<usize> {
        match self {
            DecisionShape::Simple => None,
            DecisionShape::Indexes(r) | DecisionShape::WeightedIndexes(r) => Some(r.count),
            DecisionShape::WeightsIndexes(r) => Some(r.count),
            DecisionShape::PickIndexes(r) => (r.min_count == r.max_count).then_some(r.min_count),
        }
    }

    /// Whether a single index satisfies the request.
    pub fn accepts_single_index(&self) -> bool {
        match self {
            DecisionShape::PickIndexes(r) => r.min_count <= 1 && 1 <= r.max_count,
            other => other.fixed_count() == Some(1),
        }
    }

    /// Resolve the requested count, drawing uniformly in `[min, max]` for picks.
    pub fn resolve_count(&self, rng: &mut dyn RandomSource) -> Option<usize> {
        match self {
            DecisionShape::PickIndexes(r) => Some(rng.between(r.min_count, r.max_count)),
            other => other.fixed_count(),
        }
    }
}
