use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid row filter: {0}")]
    InvalidFilter(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("stream separator cannot be empty")]
    EmptySeparator,

    #[error("filter index {index} is out of range for a row with {width} field(s)")]
    FilterIndexOutOfRange { index: isize, width: usize },

    #[error("index {index} is out of range for a sequence of {len} element(s)")]
    IndexOutOfRange { index: isize, len: usize },
}
