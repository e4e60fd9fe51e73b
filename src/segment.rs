use std::io::BufRead;

use crate::error::PipelineError;
use crate::model::Segment;

/// Lazy splitter over an input stream: content runs and separator
/// occurrences come out as distinct segments in stream order. Empty content
/// runs are dropped; trailing content without a closing separator is
/// emitted once the stream ends.
pub(crate) struct SegmentStream<R> {
    reader: R,
    separator: String,
    buffer: String,
    done: bool,
}

impl<R: BufRead> SegmentStream<R> {
    pub(crate) fn new(reader: R, separator: impl Into<String>) -> Self {
        Self {
            reader,
            separator: separator.into(),
            buffer: String::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for SegmentStream<R> {
    type Item = Result<Segment, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(found) = self.buffer.find(&self.separator) {
                if found == 0 {
                    self.buffer.drain(..self.separator.len());
                    return Some(Ok(Segment::Separator(self.separator.clone())));
                }
                let content = self.buffer.drain(..found).collect::<String>();
                return Some(Ok(Segment::Content(content)));
            }

            if self.done {
                if self.buffer.is_empty() {
                    return None;
                }
                return Some(Ok(Segment::Content(std::mem::take(&mut self.buffer))));
            }

            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => self.done = true,
                Ok(_) => {}
                Err(error) => {
                    self.done = true;
                    self.buffer.clear();
                    return Some(Err(error.into()));
                }
            }
        }
    }
}

/// Decodes textual escape sequences in a separator spec, so `\x1b[2J` on the
/// command line becomes the actual control bytes. Recognizes `\n`, `\r`,
/// `\t`, `\0`, `\\`, `\xHH` and `\uHHHH`; unknown escapes pass through
/// verbatim.
pub fn decode_escapes(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('x') => out.push(hex_escape(&mut chars, 2)?),
            Some('u') => out.push(hex_escape(&mut chars, 4)?),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return Err("dangling escape at end of input".to_string()),
        }
    }

    Ok(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: u32) -> Result<char, String> {
    let mut value = 0_u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|ch| ch.to_digit(16))
            .ok_or_else(|| format!("truncated hex escape, expected {digits} digit(s)"))?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or_else(|| format!("invalid character code {value:#x}"))
}
