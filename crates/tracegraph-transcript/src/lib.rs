//! Session transcript decoding, discovery and file I/O

mod discovery;
mod io;
mod paths;
mod record;

pub use discovery::{discover_sessions, SessionSource};
pub use io::{atomic_write, read_transcript};
pub use paths::Paths;
pub use record::{parse_record, parse_transcript, ReasoningSegment, ToolInvocation, Transcript, TranscriptEvent};
