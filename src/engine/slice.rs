//! Multi-select over sequences with `start:stop:step` segments.
//!
//! When a slice segment meets a sequence, the remainder of the path is
//! applied to every selected element and the results are gathered into a
//! new sequence, so `items.:.name` yields the `name` of every item.

use super::step;
use crate::document::{Node, Shape};
use crate::error::{DottyError, Result};

/// A parsed `start:stop[:step]` segment. Each bound is optional and may be
/// negative, counting back from the end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

fn parse_bound(part: &str) -> Option<Option<i64>> {
    if part.is_empty() {
        return Some(None);
    }
    let digits = part.strip_prefix('-').unwrap_or(part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<i64>().ok().map(Some)
}

impl SliceSpec {
    /// Parses a segment such as `:`, `2:`, `:2`, `1:3` or `::2`.
    ///
    /// Returns `None` for anything that is not slice syntax.
    pub fn parse(token: &str) -> Option<Self> {
        let parts: Vec<&str> = token.split(':').collect();
        let (start, stop, step) = match parts.as_slice() {
            [start, stop] => (*start, *stop, ""),
            [start, stop, step] => (*start, *stop, *step),
            _ => return None,
        };
        Some(Self {
            start: parse_bound(start)?,
            stop: parse_bound(stop)?,
            step: parse_bound(step)?,
        })
    }

    /// Lists the positions this slice selects from a sequence of `len`.
    ///
    /// Bounds are clamped, never out of range. Returns `None` for a zero step.
    pub fn indices(&self, len: usize) -> Option<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return None;
        }

        let len = len as i64;
        let resolve = |bound: i64, low: i64, high: i64| {
            let bound = if bound < 0 { bound + len } else { bound };
            bound.clamp(low, high)
        };

        let mut picked = Vec::new();
        if step > 0 {
            let start = self.start.map_or(0, |s| resolve(s, 0, len));
            let stop = self.stop.map_or(len, |s| resolve(s, 0, len));
            let mut position = start;
            while position < stop {
                picked.push(position as usize);
                match position.checked_add(step) {
                    Some(next) => position = next,
                    None => break,
                }
            }
        } else {
            let start = self.start.map_or(len - 1, |s| resolve(s, -1, len - 1));
            let stop = self.stop.map_or(-1, |s| resolve(s, -1, len - 1));
            let mut position = start;
            while position > stop {
                picked.push(position as usize);
                match position.checked_add(step) {
                    Some(next) => position = next,
                    None => break,
                }
            }
        }
        Some(picked)
    }
}

/// Resolves `tokens` like [`super::get`], expanding slice segments.
///
/// The result is owned, since a slice builds a new sequence. Segments that
/// are not slices, or slices applied to anything but a sequence, follow the
/// ordinary lookup rules.
pub fn select<N: Node + Clone, S: AsRef<str>>(root: &N, tokens: &[S]) -> Result<N> {
    let mut current = root;
    for (position, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        if let Shape::Seq(items) = current.shape() {
            if let Some(slice) = SliceSpec::parse(token) {
                let rest = &tokens[position + 1..];
                let indices = slice.indices(items.len()).ok_or_else(|| {
                    DottyError::type_mismatch(token, "a slice with a non-zero step")
                })?;
                let selected = indices
                    .into_iter()
                    .map(|index| select(&items[index], rest))
                    .collect::<Result<Vec<N>>>()?;
                return Ok(N::from_seq(selected));
            }
        }
        current = step(current, token)?;
    }
    Ok(current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Value;
    use serde_json::json;

    fn records() -> Value {
        Value::from(json!({
            "field1": [
                {"subfield1": "value01"},
                {"subfield1": "value11"},
                {"subfield1": "value21"},
                {"subfield1": "value31"},
            ],
            "field2": [
                {"subfield1": [{"nested": "n00"}, {"nested": "n01"}]},
                {"subfield1": [{"nested": "n10"}, {"nested": "n11"}]},
            ],
        }))
    }

    fn strings(values: &[&str]) -> Value {
        Value::Seq(values.iter().map(|s| Value::from(*s)).collect())
    }

    #[test]
    fn test_parse_slice_forms() {
        assert_eq!(
            SliceSpec::parse(":"),
            Some(SliceSpec {
                start: None,
                stop: None,
                step: None,
            })
        );
        assert_eq!(
            SliceSpec::parse("1:3"),
            Some(SliceSpec {
                start: Some(1),
                stop: Some(3),
                step: None,
            })
        );
        assert_eq!(
            SliceSpec::parse("::2"),
            Some(SliceSpec {
                start: None,
                stop: None,
                step: Some(2),
            })
        );
        assert_eq!(
            SliceSpec::parse("-2:"),
            Some(SliceSpec {
                start: Some(-2),
                stop: None,
                step: None,
            })
        );
        assert_eq!(SliceSpec::parse("3"), None);
        assert_eq!(SliceSpec::parse("a:b"), None);
        assert_eq!(SliceSpec::parse("1:2:3:4"), None);
        assert_eq!(SliceSpec::parse("-:1"), None);
    }

    #[test]
    fn test_indices_follow_slice_rules() {
        let all = SliceSpec::parse(":").unwrap();
        assert_eq!(all.indices(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(SliceSpec::parse("1:3").unwrap().indices(4).unwrap(), vec![1, 2]);
        assert_eq!(SliceSpec::parse("::2").unwrap().indices(4).unwrap(), vec![0, 2]);
        assert_eq!(SliceSpec::parse("-1:").unwrap().indices(4).unwrap(), vec![3]);
        assert_eq!(SliceSpec::parse("::-1").unwrap().indices(3).unwrap(), vec![2, 1, 0]);
        assert_eq!(SliceSpec::parse("5:9").unwrap().indices(4).unwrap(), Vec::<usize>::new());
        assert_eq!(SliceSpec::parse("::0").unwrap().indices(4), None);
    }

    #[test]
    fn test_select_whole_list() {
        let root = records();
        assert_eq!(
            select(&root, &["field1", ":", "subfield1"]).unwrap(),
            strings(&["value01", "value11", "value21", "value31"])
        );
    }

    #[test]
    fn test_select_partial_slices() {
        let root = records();
        assert_eq!(
            select(&root, &["field1", "2:", "subfield1"]).unwrap(),
            strings(&["value21", "value31"])
        );
        assert_eq!(
            select(&root, &["field1", ":2", "subfield1"]).unwrap(),
            strings(&["value01", "value11"])
        );
        assert_eq!(
            select(&root, &["field1", "1:3", "subfield1"]).unwrap(),
            strings(&["value11", "value21"])
        );
        assert_eq!(
            select(&root, &["field1", "::2", "subfield1"]).unwrap(),
            strings(&["value01", "value21"])
        );
    }

    #[test]
    fn test_select_nested_slices() {
        let root = records();
        assert_eq!(
            select(&root, &["field2", ":", "subfield1", ":", "nested"]).unwrap(),
            Value::Seq(vec![strings(&["n00", "n01"]), strings(&["n10", "n11"])])
        );
    }

    #[test]
    fn test_select_without_slices_matches_get() {
        let root = records();
        assert_eq!(
            select(&root, &["field1", "0", "subfield1"]).unwrap(),
            Value::from("value01")
        );
        assert!(matches!(
            select(&root, &["field1", "9"]),
            Err(DottyError::IndexOutOfRange { index: 9, len: 4 })
        ));
    }

    #[test]
    fn test_slice_token_on_map_is_a_key() {
        let root = Value::from(json!({"a": {"1:2": "colon key"}}));
        assert_eq!(select(&root, &["a", "1:2"]).unwrap(), Value::from("colon key"));
    }

    #[test]
    fn test_select_zero_step_is_mismatch() {
        let root = records();
        assert!(matches!(
            select(&root, &["field1", "::0"]),
            Err(DottyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_select_propagates_element_errors() {
        let root = records();
        assert!(matches!(
            select(&root, &["field1", ":", "missing"]),
            Err(DottyError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_indices_stop_when_step_runs_past_range() {
        let forward = SliceSpec::parse("1::9223372036854775807").unwrap();
        assert_eq!(forward.indices(4).unwrap(), vec![1]);

        let backward = SliceSpec::parse("::-9223372036854775808").unwrap();
        assert_eq!(backward.indices(4).unwrap(), vec![3]);
    }
}
