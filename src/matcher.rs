use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use crate::error::PipelineError;
use crate::range::resolve_index;

/// One `index:pattern[:flags]` filter rule: the pattern is searched for in
/// the row field at `index`, with the result optionally inverted.
#[derive(Debug, Clone)]
pub struct IndexMatcher {
    index: isize,
    pattern: Regex,
    invert: bool,
}

impl IndexMatcher {
    fn parse(rule: &str) -> Result<Self, String> {
        let parts = split_unescaped(rule, ':');
        if parts.len() < 2 {
            return Err(format!(
                "invalid filter rule '{rule}', expected index:pattern[:flags]"
            ));
        }

        let index = parts[0]
            .trim()
            .parse::<isize>()
            .map_err(|_| format!("invalid filter index: '{}'", parts[0]))?;

        let mut builder = RegexBuilder::new(&parts[1]);
        let mut invert = false;
        for flag in &parts[2..] {
            match flag.trim().to_ascii_lowercase().as_str() {
                "i" => {
                    builder.case_insensitive(true);
                }
                "m" => {
                    builder.multi_line(true);
                }
                "s" => {
                    builder.dot_matches_new_line(true);
                }
                "x" => {
                    builder.ignore_whitespace(true);
                }
                "v" => invert = true,
                other => return Err(format!("unknown filter flag: '{other}'")),
            }
        }

        let pattern = builder
            .build()
            .map_err(|error| format!("invalid filter pattern '{}': {error}", parts[1]))?;

        Ok(Self {
            index,
            pattern,
            invert,
        })
    }

    /// Whether `row` survives this rule. A row too short for the configured
    /// index is a hard error: the tokenization pattern disagrees with the
    /// observed data, and skipping would mask the misconfiguration.
    pub fn matches(&self, row: &[String]) -> Result<bool, PipelineError> {
        let position = resolve_index(self.index, row.len()).ok_or(
            PipelineError::FilterIndexOutOfRange {
                index: self.index,
                width: row.len(),
            },
        )?;
        let found = self.pattern.is_match(&row[position]);
        Ok(if self.invert { !found } else { found })
    }
}

/// Conjunction of filter rules. The empty set accepts every row.
#[derive(Debug, Clone, Default)]
pub struct MatcherSet {
    matchers: Vec<IndexMatcher>,
}

impl MatcherSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn accepts(&self, row: &[String]) -> Result<bool, PipelineError> {
        for matcher in &self.matchers {
            if !matcher.matches(row)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl FromStr for MatcherSet {
    type Err = PipelineError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        parse_spec(spec).map_err(PipelineError::InvalidFilter)
    }
}

fn parse_spec(spec: &str) -> Result<MatcherSet, String> {
    let matchers = spec
        .split(',')
        .filter(|rule| !rule.trim().is_empty())
        .map(IndexMatcher::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if matchers.is_empty() {
        return Err("filter spec cannot be empty".to_string());
    }

    Ok(MatcherSet { matchers })
}

/// Splits on unescaped occurrences of `delimiter`, decoding `\<delimiter>`
/// back to the literal delimiter. Any other backslash sequence is kept as-is
/// so regex escapes pass through untouched.
fn split_unescaped(input: &str, delimiter: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&delimiter) {
            current.push(delimiter);
            chars.next();
        } else if ch == delimiter {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    parts.push(current);
    parts
}
