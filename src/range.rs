use std::str::FromStr;

use crate::error::PipelineError;

/// A parsed row or column selection: either one absolute index or a
/// half-open `start:stop[:step]` slice. Bounds may be negative (counted from
/// the end) or omitted (open); both forms resolve against the target
/// sequence's length at selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    Index(isize),
    Slice {
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    },
}

impl RangeSpec {
    /// The `0:` selection that keeps every element.
    #[must_use]
    pub const fn full() -> Self {
        Self::Slice {
            start: Some(0),
            stop: None,
            step: None,
        }
    }

    /// Positions selected out of a sequence of `len` elements, in selection
    /// order. A single index yields exactly one position or fails; a slice
    /// clamps its bounds and may yield nothing.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>, PipelineError> {
        match *self {
            Self::Index(index) => {
                let resolved = resolve_index(index, len)
                    .ok_or(PipelineError::IndexOutOfRange { index, len })?;
                Ok(vec![resolved])
            }
            Self::Slice { start, stop, step } => {
                Ok(slice_positions(start, stop, step.unwrap_or(1), len))
            }
        }
    }

    pub fn select<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, PipelineError> {
        Ok(self
            .positions(items.len())?
            .into_iter()
            .map(|position| items[position].clone())
            .collect())
    }
}

impl FromStr for RangeSpec {
    type Err = PipelineError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        parse_spec(spec).map_err(PipelineError::InvalidRange)
    }
}

fn parse_spec(spec: &str) -> Result<RangeSpec, String> {
    if !spec.contains(':') {
        let index = spec
            .trim()
            .parse::<isize>()
            .map_err(|_| format!("invalid index: '{spec}'"))?;
        return Ok(RangeSpec::Index(index));
    }

    let parts = spec.split(':').collect::<Vec<_>>();
    if parts.len() > 3 {
        return Err(format!(
            "invalid range '{spec}', expected start:stop or start:stop:step"
        ));
    }

    let parse_bound = |part: &str| -> Result<Option<isize>, String> {
        let part = part.trim();
        if part.is_empty() {
            return Ok(None);
        }
        part.parse::<isize>()
            .map(Some)
            .map_err(|_| format!("invalid range bound: '{part}'"))
    };

    let start = parse_bound(parts[0])?;
    let stop = parse_bound(parts[1])?;
    let step = match parts.get(2) {
        Some(part) => parse_bound(part)?,
        None => None,
    };

    if step == Some(0) {
        return Err("range step cannot be zero".to_string());
    }

    Ok(RangeSpec::Slice { start, stop, step })
}

/// Resolves a possibly-negative index against `len`, or `None` when it falls
/// outside the sequence.
pub(crate) fn resolve_index(index: isize, len: usize) -> Option<usize> {
    let len = isize::try_from(len).ok()?;
    let resolved = if index < 0 { index + len } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

fn slice_positions(
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
    len: usize,
) -> Vec<usize> {
    let len = isize::try_from(len).unwrap_or(isize::MAX);
    let (default_start, default_stop) = if step > 0 { (0, len) } else { (len - 1, -1) };

    // Standard half-open slice clamping: negative bounds count from the end,
    // out-of-range bounds saturate instead of failing.
    let clamp_bound = |bound: Option<isize>, default: isize| -> isize {
        let Some(mut value) = bound else {
            return default;
        };
        if value < 0 {
            value += len;
        }
        if step > 0 {
            value.clamp(0, len)
        } else {
            value.clamp(-1, len - 1)
        }
    };

    let start = clamp_bound(start, default_start);
    let stop = clamp_bound(stop, default_stop);

    let mut positions = Vec::new();
    let mut cursor = start;
    while (step > 0 && cursor < stop) || (step < 0 && cursor > stop) {
        if let Ok(position) = usize::try_from(cursor) {
            positions.push(position);
        }
        cursor += step;
    }
    positions
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{RangeSpec, resolve_index};

    fn letters() -> Vec<String> {
        ["a", "b", "c", "d"].iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parse_single_index_and_ranges() {
        assert_eq!(RangeSpec::from_str("2").expect("index"), RangeSpec::Index(2));
        assert_eq!(
            RangeSpec::from_str("-1").expect("negative index"),
            RangeSpec::Index(-1)
        );
        assert_eq!(
            RangeSpec::from_str("1:").expect("open range"),
            RangeSpec::Slice {
                start: Some(1),
                stop: None,
                step: None
            }
        );
        assert_eq!(
            RangeSpec::from_str("::2").expect("stepped range"),
            RangeSpec::Slice {
                start: None,
                stop: None,
                step: Some(2)
            }
        );
    }

    #[test]
    fn reject_malformed_specs() {
        assert!(RangeSpec::from_str("").is_err());
        assert!(RangeSpec::from_str("a:b").is_err());
        assert!(RangeSpec::from_str("1:2:3:4").is_err());
        assert!(RangeSpec::from_str("::0").is_err());
    }

    #[test]
    fn open_range_selects_tail() {
        let selected = RangeSpec::from_str("1:")
            .expect("range")
            .select(&letters())
            .expect("selection");
        assert_eq!(selected, vec!["b", "c", "d"]);
    }

    #[test]
    fn single_index_selects_one_element() {
        let selected = RangeSpec::Index(1).select(&letters()).expect("selection");
        assert_eq!(selected, vec!["b"]);
    }

    #[test]
    fn negative_stop_drops_last_element() {
        let selected = RangeSpec::from_str(":-1")
            .expect("range")
            .select(&letters())
            .expect("selection");
        assert_eq!(selected, vec!["a", "b", "c"]);
    }

    #[test]
    fn negative_step_reverses() {
        let selected = RangeSpec::from_str("::-1")
            .expect("range")
            .select(&letters())
            .expect("selection");
        assert_eq!(selected, vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn out_of_range_bounds_saturate() {
        let selected = RangeSpec::from_str("-100:100")
            .expect("range")
            .select(&letters())
            .expect("selection");
        assert_eq!(selected, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn out_of_range_index_fails() {
        let error = RangeSpec::Index(4).select(&letters()).expect_err("must fail");
        assert!(error.to_string().contains("out of range"));
    }

    #[test]
    fn resolve_index_wraps_negatives() {
        assert_eq!(resolve_index(-1, 4), Some(3));
        assert_eq!(resolve_index(0, 4), Some(0));
        assert_eq!(resolve_index(4, 4), None);
        assert_eq!(resolve_index(-5, 4), None);
    }
}
