use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Lays out a rectangular grid as column-aligned text. Each column is as
/// wide as its widest cell needs to be within the `max_lines` allowance;
/// wider cells wrap onto continuation lines of the same logical row, and
/// content past the allowance is dropped. With borders the table is framed
/// with rule lines around the header and every row; without them columns
/// are delimited by `column_sep` and line ends are trimmed.
pub(crate) fn render_table(
    header: Option<&[String]>,
    rows: &[Vec<String>],
    borders: bool,
    column_sep: &str,
    max_lines: usize,
) -> String {
    let max_lines = max_lines.max(1);
    let columns = header
        .map_or(0, <[String]>::len)
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let widths = column_widths(header, rows, columns, max_lines);

    let mut out = String::new();
    if borders {
        let rule = rule_line(&widths);
        out.push_str(&rule);
        out.push('\n');
        if let Some(header) = header {
            for line in row_lines(header, &widths, max_lines) {
                out.push_str(&bordered_line(&line, &widths));
                out.push('\n');
            }
            out.push_str(&rule);
            out.push('\n');
        }
        for row in rows {
            for line in row_lines(row, &widths, max_lines) {
                out.push_str(&bordered_line(&line, &widths));
                out.push('\n');
            }
            out.push_str(&rule);
            out.push('\n');
        }
    } else {
        if let Some(header) = header {
            for line in row_lines(header, &widths, max_lines) {
                out.push_str(&plain_line(&line, &widths, column_sep));
                out.push('\n');
            }
        }
        for row in rows {
            for line in row_lines(row, &widths, max_lines) {
                out.push_str(&plain_line(&line, &widths, column_sep));
                out.push('\n');
            }
        }
    }
    out
}

fn column_widths(
    header: Option<&[String]>,
    rows: &[Vec<String>],
    columns: usize,
    max_lines: usize,
) -> Vec<usize> {
    let mut widths = vec![0_usize; columns];
    {
        let mut measure = |row: &[String]| {
            for (index, cell) in row.iter().enumerate() {
                let needed = UnicodeWidthStr::width(cell.as_str()).div_ceil(max_lines);
                widths[index] = widths[index].max(needed);
            }
        };
        if let Some(header) = header {
            measure(header);
        }
        for row in rows {
            measure(row);
        }
    }
    widths
}

/// One logical row as physical output lines: every cell wrapped to its
/// column width, then transposed so continuation lines stay aligned.
fn row_lines(row: &[String], widths: &[usize], max_lines: usize) -> Vec<Vec<String>> {
    let wrapped = widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            wrap_cell(row.get(index).map_or("", String::as_str), *width, max_lines)
        })
        .collect::<Vec<_>>();

    let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
    (0..height)
        .map(|line_no| {
            wrapped
                .iter()
                .map(|cell| cell.get(line_no).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

fn wrap_cell(cell: &str, width: usize, max_lines: usize) -> Vec<String> {
    if max_lines <= 1 || UnicodeWidthStr::width(cell) <= width {
        return vec![cell.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0_usize;

    for ch in cell.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
            if lines.len() == max_lines {
                // Line allowance exhausted; remaining content is dropped.
                return lines;
            }
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn pad_cell(cell: &str, width: usize) -> String {
    let pad = width.saturating_sub(UnicodeWidthStr::width(cell));
    format!("{cell}{}", " ".repeat(pad))
}

fn plain_line(cells: &[String], widths: &[usize], column_sep: &str) -> String {
    let mut line = String::new();
    for (index, width) in widths.iter().enumerate() {
        if index > 0 {
            line.push_str(column_sep);
        }
        line.push_str(&pad_cell(
            cells.get(index).map_or("", String::as_str),
            *width,
        ));
    }
    line.trim_end().to_string()
}

fn bordered_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (index, width) in widths.iter().enumerate() {
        line.push(' ');
        line.push_str(&pad_cell(
            cells.get(index).map_or("", String::as_str),
            *width,
        ));
        line.push_str(" |");
    }
    line
}

fn rule_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{render_table, wrap_cell};

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let header = row(&["name", "up"]);
        let rows = vec![row(&["alpha", "3d"]), row(&["b", "12h"])];
        let rendered = render_table(Some(&header), &rows, false, " | ", 1);
        assert_eq!(rendered, "name  | up\nalpha | 3d\nb     | 12h\n");
    }

    #[test]
    fn hidden_header_still_sizes_from_rows_only() {
        let rows = vec![row(&["a", "bb"])];
        let rendered = render_table(None, &rows, false, " | ", 1);
        assert_eq!(rendered, "a | bb\n");
    }

    #[test]
    fn borders_frame_header_and_every_row() {
        let header = row(&["h1", "h2"]);
        let rows = vec![row(&["r1", "r2"])];
        let rendered = render_table(Some(&header), &rows, true, " | ", 1);
        assert_eq!(
            rendered,
            "+----+----+\n\
             | h1 | h2 |\n\
             +----+----+\n\
             | r1 | r2 |\n\
             +----+----+\n"
        );
    }

    #[test]
    fn long_cells_wrap_within_the_line_allowance() {
        let header = row(&["h"]);
        let rows = vec![row(&["abcdef"])];
        let rendered = render_table(Some(&header), &rows, false, " | ", 2);
        assert_eq!(rendered, "h\nabc\ndef\n");
    }

    #[test]
    fn wrapped_rows_keep_sibling_columns_aligned() {
        let header = row(&["k", "v"]);
        let rows = vec![row(&["x", "abcd"])];
        let rendered = render_table(Some(&header), &rows, false, " | ", 2);
        assert_eq!(rendered, "k | v\nx | ab\n  | cd\n");
    }

    #[test]
    fn wrap_cell_drops_content_past_the_allowance() {
        assert_eq!(wrap_cell("abcdef", 2, 2), vec!["ab", "cd"]);
        assert_eq!(wrap_cell("abcd", 2, 3), vec!["ab", "cd"]);
        assert_eq!(wrap_cell("", 4, 2), vec![""]);
    }

    #[test]
    fn wide_characters_count_by_display_width() {
        let header = row(&["名前", "n"]);
        let rows = vec![row(&["ab", "1"])];
        let rendered = render_table(Some(&header), &rows, false, " | ", 1);
        assert_eq!(rendered, "名前 | n\nab   | 1\n");
    }
}
