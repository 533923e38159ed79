//! Query-time projection of the trace index onto a current task

mod context;
mod projection;

pub use context::{ProjectedContext, SimilarDecision};
pub use projection::{ProjectionFunction, Query};
