//! Domain model (shapes, outcomes, sequence state, selection strings, errors).

pub mod errors;
pub mod outcome;
pub mod selection;
pub mod sequence;
pub mod shape;

pub use self::errors::{ConfigError, GaffError, MAX_WEIGHT_TOTAL};
pub use self::outcome::{Outcome, Payload};
pub use self::selection::{Selection, SelectionToken};
pub use self::sequence::{MaskStrategy, SequenceMask, SequencePhase, SequenceState};
pub use self::shape::{DecisionShape, Domain, IndexRequest, PickRequest, ShapeKind, WeightsRequest};
