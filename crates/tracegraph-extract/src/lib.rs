//! Per-session decision-trace extraction: segmentation, classification, tool association

mod associator;
mod classifier;
mod extractor;
mod segment;

pub use associator::ToolAssociator;
pub use classifier::{classify, TraceClassifier};
pub use extractor::{BatchExtraction, Extraction, TraceExtractor};
pub use segment::{segment, split_sentences, summarize, Segments};
