//! Select module: the samplers every decision maker delegates to.

mod bag;
mod fill;
mod search;
mod weighted;

pub use bag::{Bag, DEFAULT_FAIL_BUDGET};
pub use fill::{BulkFill, DEFAULT_REDRAW_CAP};
pub use search::{ConditionalSearch, SearchResult};
pub use weighted::{WeightedBool, sample};
