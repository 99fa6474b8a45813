//! Cart-pole keyframe module.
//!
//! Converts the line-oriented log of a cart-pole control run into typed
//! keyframes and derives the chapter boundaries between sub-episodes.
//!
//! # Architecture
//!
//! Three pure stages, each depending only on the one before it:
//! - **parser**: header check and tokenization of data lines
//! - **validator**: structural and range checks producing a `Keyframe`
//! - **chapters**: chapter boundaries from a complete keyframe sequence
//!
//! The first error anywhere aborts the parse; no partial sequence is
//! returned alongside it.
//!
//! # Usage
//!
//! ```
//! use bigtop_core::keyframes::{chapters_from_keyframes, parse_lines, Action};
//!
//! let lines = [
//!     "new state,previous state,action,reward",
//!     "[0 -1.0 0.1 0.2], [0 0 0 0], 1, 0",
//!     "[0.5 -1.0 0.1 0.2], [0 -1.0 0.1 0.2], 0, -1",
//! ];
//!
//! let keyframes = parse_lines(&lines).unwrap();
//! assert_eq!(keyframes[0].action, Action::Right);
//!
//! // The last frame is rewarded, so the final boundary is one past the end.
//! assert_eq!(chapters_from_keyframes(&keyframes), vec![0, 2]);
//! ```

mod chapters;
mod episode;
mod error;
mod parser;
mod types;
mod validator;

// Re-export types
pub use types::{
    Action, FieldValue, HeaderRecord, Keyframe, RawRecord, Reward, MAX_CART_X, MAX_POLE_THETA,
    MIN_CART_X, MIN_POLE_THETA, STATE_LEN,
};

// Re-export errors
pub use error::{ErrorKind, ParseError, ParseResult, RecordError};

// Re-export parser
pub use parser::{
    parse_content, parse_content_with, parse_header, parse_lines, parse_lines_with,
    parse_records, parse_records_with, split_fields, tokenize_line, HeaderCheck, ParseOptions,
    CANONICAL_HEADER, MAX_HEADER_FIELDS, MIN_HEADER_FIELDS, MIN_LINE_FIELDS,
};

// Re-export validator
pub use validator::{
    keyframe_from_fields, keyframe_from_record, MAX_RECORD_FIELDS, MIN_RECORD_FIELDS,
};

// Re-export chapters
pub use chapters::{chapters_from_keyframes, ChapterIndex};

pub use episode::{Episode, EpisodeSummary};
