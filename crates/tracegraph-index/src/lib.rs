//! Cross-session aggregation of decision traces into a searchable index

mod aggregator;
mod index;

pub use aggregator::{aggregate, SessionAggregator};
pub use index::{IndexStats, SessionSummary, TraceIndex};
