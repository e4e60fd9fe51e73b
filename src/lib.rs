mod error;
mod matcher;
mod model;
mod options;
mod range;
mod render;
mod segment;
mod table;
mod tokenize;

use std::io::{self, BufRead, Write};

use crate::render::render_table;
use crate::segment::SegmentStream;
use crate::table::assemble;
use crate::tokenize::tokenize_segment;

pub use error::PipelineError;
pub use matcher::{IndexMatcher, MatcherSet};
pub use model::{Segment, StreamReport, TokenTable};
pub use options::{DEFAULT_CELL_PATTERN, DEFAULT_SEPARATOR, StreamOptions};
pub use range::RangeSpec;
pub use segment::decode_escapes;
pub use table::NOT_FOUND;

/// Runs the whole pipeline: segments the input stream, tokenizes and
/// filters each content segment, reconciles widths, applies row/column
/// selection and writes one rendered table per segment. Separator segments
/// are copied to the output verbatim.
pub fn process_stream(
    reader: impl BufRead,
    mut writer: impl Write,
    options: &StreamOptions,
) -> Result<StreamReport, PipelineError> {
    if options.separator.is_empty() {
        return Err(PipelineError::EmptySeparator);
    }

    let mut report = StreamReport::default();
    for segment in SegmentStream::new(reader, options.separator.clone()) {
        match segment? {
            Segment::Separator(sep) => write!(writer, "{sep}")?,
            Segment::Content(text) => process_segment(&text, &mut writer, options, &mut report)?,
        }
    }

    // A run that boiled down to a single table gets a closing newline.
    if report.table_count == 1 {
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(report)
}

/// In-memory convenience wrapper around [`process_stream`].
pub fn process_string(
    input: &str,
    options: &StreamOptions,
) -> Result<(String, StreamReport), PipelineError> {
    let mut output = Vec::new();
    let report = process_stream(input.as_bytes(), &mut output, options)?;
    let text = String::from_utf8(output)
        .map_err(|error| PipelineError::Io(io::Error::new(io::ErrorKind::InvalidData, error)))?;
    Ok((text, report))
}

fn process_segment(
    text: &str,
    writer: &mut impl Write,
    options: &StreamOptions,
    report: &mut StreamReport,
) -> Result<(), PipelineError> {
    let raw = tokenize_segment(text, &options.header_pattern, &options.row_pattern);

    let mut rows = Vec::with_capacity(raw.rows.len());
    for row in raw.rows {
        if options.row_filter.accepts(&row)? {
            rows.push(row);
        }
    }

    tracing::debug!(header = ?raw.header, "tokenized segment");
    for (index, row) in rows.iter().enumerate() {
        tracing::debug!(index, row = ?row, "surviving row");
    }

    let table = TokenTable {
        header: raw.header,
        rows,
    };
    let assembled = assemble(
        table,
        &options.row_range,
        &options.column_range,
        options.hide_header,
    )?;

    if let Some(table) = assembled {
        let header = (!options.hide_header).then_some(table.header.as_slice());
        let rendered = render_table(
            header,
            &table.rows,
            options.borders,
            &options.column_sep,
            options.max_lines_per_row,
        );
        write!(writer, "{rendered}")?;
        report.row_count += table.rows.len();
    }

    report.table_count += 1;
    Ok(())
}
