use regex::Regex;

use crate::model::TokenTable;

pub(crate) const NO_HEADERS: &str = "NO HEADERS";
pub(crate) const NO_ROWS: &str = "NO ROWS";

/// All non-overlapping matches of `pattern` in `line`, left to right, empty
/// matches included.
pub(crate) fn tokenize_line(pattern: &Regex, line: &str) -> Vec<String> {
    pattern
        .find_iter(line)
        .map(|found| found.as_str().to_string())
        .collect()
}

/// Tokenizes one content segment into a header row and data rows. Blank
/// lines never contribute rows; segments left with zero or one line get the
/// synthetic `NO HEADERS` / `NO ROWS` substitutes, so every segment has a
/// header and at least one row.
pub(crate) fn tokenize_segment(
    content: &str,
    header_pattern: &Regex,
    row_pattern: &Regex,
) -> TokenTable {
    let mut lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>();

    if lines.is_empty() {
        lines.push(NO_HEADERS);
    }
    if lines.len() == 1 {
        lines.push(NO_ROWS);
    }

    let header = tokenize_line(header_pattern, lines[0]);
    let rows = lines[1..]
        .iter()
        .map(|line| tokenize_line(row_pattern, line))
        .collect();

    TokenTable { header, rows }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::{tokenize_line, tokenize_segment};
    use crate::options::DEFAULT_CELL_PATTERN;

    fn word_pattern() -> Regex {
        Regex::new(DEFAULT_CELL_PATTERN).expect("default pattern should compile")
    }

    #[test]
    fn words_may_contain_single_interior_spaces() {
        let pattern = word_pattern();
        assert_eq!(tokenize_line(&pattern, "a  bb cc"), vec!["a", "bb cc"]);
        assert_eq!(tokenize_line(&pattern, "NO HEADERS"), vec!["NO HEADERS"]);
    }

    #[test]
    fn blank_lines_contribute_no_rows() {
        let pattern = word_pattern();
        let table = tokenize_segment("h1 h2\n\n   \nr1 r2\n", &pattern, &pattern);
        assert_eq!(table.header, vec!["h1", "h2"]);
        assert_eq!(table.rows, vec![vec!["r1", "r2"]]);
    }

    #[test]
    fn empty_content_gets_synthetic_header_and_row() {
        let pattern = word_pattern();
        let table = tokenize_segment("\n\n", &pattern, &pattern);
        assert_eq!(table.header, vec!["NO HEADERS"]);
        assert_eq!(table.rows, vec![vec!["NO ROWS"]]);
    }

    #[test]
    fn single_line_content_gets_synthetic_row() {
        let pattern = word_pattern();
        let table = tokenize_segment("only header\n", &pattern, &pattern);
        assert_eq!(table.header, vec!["only header"]);
        assert_eq!(table.rows, vec![vec!["NO ROWS"]]);
    }

    #[test]
    fn custom_pattern_drives_field_extraction() {
        let digits = Regex::new(r"\d+").expect("pattern should compile");
        assert_eq!(tokenize_line(&digits, "a1 b22 c333"), vec!["1", "22", "333"]);
    }
}
