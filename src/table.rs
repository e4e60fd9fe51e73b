use crate::error::PipelineError;
use crate::model::TokenTable;
use crate::range::RangeSpec;

/// Placeholder written into cells a short row is missing relative to the
/// header, and into the fallback row shown when a filtered table is empty.
pub const NOT_FOUND: &str = "tp:NOTFOUND";

/// Pads a row with the sentinel or truncates it so it is exactly `width`
/// fields wide. Column indices then mean the same position in every row.
pub(crate) fn reconcile_width(mut row: Vec<String>, width: usize) -> Vec<String> {
    if row.len() < width {
        row.resize_with(width, || NOT_FOUND.to_string());
    } else {
        row.truncate(width);
    }
    row
}

/// Applies row selection, width reconciliation and column selection,
/// producing the rectangular grid handed to the renderer. Returns `None`
/// when the segment yields no output at all: zero surviving rows with the
/// header hidden.
pub(crate) fn assemble(
    table: TokenTable,
    row_range: &RangeSpec,
    column_range: &RangeSpec,
    hide_header: bool,
) -> Result<Option<TokenTable>, PipelineError> {
    let TokenTable { header, rows } = table;

    let selected = row_range.select(&rows)?;
    let mut data = Vec::with_capacity(selected.len());
    for row in selected {
        let reconciled = reconcile_width(row, header.len());
        data.push(column_range.select(&reconciled)?);
    }

    let header = column_range.select(&header)?;

    if data.is_empty() {
        if hide_header {
            return Ok(None);
        }
        // Keep the column headings visible even when everything was
        // filtered away.
        data.push(vec![NOT_FOUND.to_string(); header.len()]);
    }

    Ok(Some(TokenTable { header, rows: data }))
}
