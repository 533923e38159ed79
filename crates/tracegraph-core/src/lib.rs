//! Decision-trace data model, keyword normalization, configuration and errors

mod config;
mod error;
mod keywords;
mod types;

pub use config::Config;
pub use error::{Result, TraceError};
pub use keywords::{
    extract_keywords, jaccard_similarity, normalize_text, truncate_chars, unique_keywords,
};
pub use types::{DecisionTrace, DecisionType, SessionTraces};
