use regex::Regex;

use crate::error::PipelineError;
use crate::matcher::MatcherSet;
use crate::range::RangeSpec;

/// Cell extraction pattern used when no override is given: runs of
/// non-whitespace that may contain single interior spaces, so `used memory`
/// stays one cell while double-spaced columns split.
pub const DEFAULT_CELL_PATTERN: &str = r"\S+(?: \S+)*";

/// Clear-screen control sequence, the usual boundary between refreshes of
/// watch-style command output.
pub const DEFAULT_SEPARATOR: &str = "\x1b[2J\x1b[H";

pub const DEFAULT_COLUMN_SEP: &str = " | ";

/// Fully-parsed pipeline configuration. Built once before any stream
/// processing starts, then shared read-only by every segment.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub separator: String,
    pub header_pattern: Regex,
    pub row_pattern: Regex,
    pub row_range: RangeSpec,
    pub column_range: RangeSpec,
    pub row_filter: MatcherSet,
    pub hide_header: bool,
    pub borders: bool,
    pub column_sep: String,
    pub max_lines_per_row: usize,
}

impl StreamOptions {
    /// Baseline configuration: word tokenization, full row and column
    /// ranges, no filtering, borderless single-line cells, clear-screen
    /// separator.
    pub fn defaults() -> Result<Self, PipelineError> {
        let cell_pattern = Regex::new(DEFAULT_CELL_PATTERN)?;
        Ok(Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            header_pattern: cell_pattern.clone(),
            row_pattern: cell_pattern,
            row_range: RangeSpec::full(),
            column_range: RangeSpec::full(),
            row_filter: MatcherSet::default(),
            hide_header: false,
            borders: false,
            column_sep: DEFAULT_COLUMN_SEP.to_string(),
            max_lines_per_row: 1,
        })
    }
}
