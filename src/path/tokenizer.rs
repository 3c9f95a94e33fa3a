//! Dotted path tokenizer.

/// Default segment separator.
pub const DEFAULT_SEPARATOR: char = '.';

/// Default escape marker.
pub const DEFAULT_ESCAPE: char = '\\';

/// Splits path strings into unescaped segments.
///
/// Only two escape sequences are recognised:
///
/// - `escape` + `separator` embeds a literal separator in the current segment
/// - `escape` + `escape` + `separator` embeds a literal escape and then splits
///
/// Every other escape character is kept as-is.
///
/// # Example
///
/// ```
/// use dotquill::path::Tokenizer;
///
/// let tokenizer = Tokenizer::default();
/// assert_eq!(tokenizer.tokenize(r"a\.b.c"), vec!["a.b", "c"]);
/// assert_eq!(tokenizer.tokenize(r"a\\.b"), vec!["a\\", "b"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    separator: char,
    escape: char,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR, DEFAULT_ESCAPE)
    }
}

impl Tokenizer {
    /// Creates a tokenizer with the given separator and escape marker.
    pub fn new(separator: char, escape: char) -> Self {
        Self { separator, escape }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn escape(&self) -> char {
        self.escape
    }

    /// Splits `path` into segments, resolving escape sequences.
    ///
    /// An empty path yields a single empty segment, and consecutive
    /// separators yield empty segments rather than being collapsed.
    pub fn tokenize(&self, path: &str) -> Vec<String> {
        let chars: Vec<char> = path.chars().collect();
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut position = 0;

        while position < chars.len() {
            let ch = chars[position];
            let next = chars.get(position + 1).copied();
            let after_next = chars.get(position + 2).copied();

            if ch == self.escape && next == Some(self.separator) {
                current.push(self.separator);
                position += 2;
            } else if ch == self.escape
                && next == Some(self.escape)
                && after_next == Some(self.separator)
            {
                current.push(self.escape);
                tokens.push(std::mem::take(&mut current));
                position += 3;
            } else if ch == self.separator {
                tokens.push(std::mem::take(&mut current));
                position += 1;
            } else {
                current.push(ch);
                position += 1;
            }
        }

        tokens.push(current);
        tokens
    }

    /// Re-escapes a single segment so it survives `tokenize` unchanged.
    ///
    /// `followed_by_separator` must be true for every segment except the
    /// last one of a path, since a trailing escape marker only needs
    /// doubling when a separator comes right after it.
    ///
    /// Returns `None` when the segment holds an escape marker directly in
    /// front of a separator; the path syntax has no spelling for that.
    pub fn escape_segment(&self, segment: &str, followed_by_separator: bool) -> Option<String> {
        let mut escaped = String::with_capacity(segment.len());
        let mut previous: Option<char> = None;

        for ch in segment.chars() {
            if ch == self.separator {
                if previous == Some(self.escape) {
                    return None;
                }
                escaped.push(self.escape);
            }
            escaped.push(ch);
            previous = Some(ch);
        }

        if followed_by_separator && previous == Some(self.escape) {
            escaped.push(self.escape);
        }

        Some(escaped)
    }

    /// Joins segments back into a path string.
    ///
    /// This is the inverse of [`Tokenizer::tokenize`]: for any segments it
    /// accepts, `tokenize(&join(segments)?)` returns the same segments.
    pub fn join<S: AsRef<str>>(&self, segments: &[S]) -> Option<String> {
        let mut path = String::new();
        for (idx, segment) in segments.iter().enumerate() {
            if idx > 0 {
                path.push(self.separator);
            }
            let trailing = idx + 1 < segments.len();
            path.push_str(&self.escape_segment(segment.as_ref(), trailing)?);
        }
        Some(path)
    }
}

/// Splits `path` with an explicit separator and escape marker.
pub fn tokenize(path: &str, separator: char, escape: char) -> Vec<String> {
    Tokenizer::new(separator, escape).tokenize(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain_path() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("chain.of.keys"), vec!["chain", "of", "keys"]);
    }

    #[test]
    fn test_tokenize_escaped_separator() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize(r"a\.b.c"), vec!["a.b", "c"]);
        assert_eq!(
            tokenizer.tokenize(r"key\.with\.dot.deeper"),
            vec!["key.with.dot", "deeper"]
        );
    }

    #[test]
    fn test_tokenize_escaped_escape() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("a\\\\.b"), vec!["a\\", "b"]);
        assert_eq!(
            tokenizer.tokenize(r"key\.with_backslash\\.deeper"),
            vec!["key.with_backslash\\", "deeper"]
        );
    }

    #[test]
    fn test_tokenize_lone_escape_is_literal() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize(r"a\b.c"), vec![r"a\b", "c"]);
        assert_eq!(tokenizer.tokenize(r"trailing\"), vec![r"trailing\"]);
        assert_eq!(tokenizer.tokenize(r"a\\b"), vec![r"a\\b"]);
    }

    #[test]
    fn test_tokenize_empty_path() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize(""), vec![""]);
    }

    #[test]
    fn test_tokenize_keeps_empty_segments() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("a..b"), vec!["a", "", "b"]);
        assert_eq!(tokenizer.tokenize(".a."), vec!["", "a", ""]);
    }

    #[test]
    fn test_tokenize_custom_separator_and_escape() {
        let tokenizer = Tokenizer::new(',', '$');
        assert_eq!(tokenizer.tokenize("abcd,efg$,hij"), vec!["abcd", "efg,hij"]);
        assert_eq!(
            tokenizer.tokenize("abcd,efg$$,hij"),
            vec!["abcd", "efg$", "hij"]
        );
        assert_eq!(tokenizer.tokenize("a.b,c"), vec!["a.b", "c"]);
    }

    #[test]
    fn test_tokenize_free_function() {
        assert_eq!(tokenize("chain#of#keys", '#', '\\'), vec!["chain", "of", "keys"]);
    }

    #[test]
    fn test_join_plain_round_trip() {
        let tokenizer = Tokenizer::default();
        for path in ["a", "a.b.c", "", "a..b", "deep.nested.0.key"] {
            let tokens = tokenizer.tokenize(path);
            assert_eq!(tokenizer.join(&tokens).as_deref(), Some(path));
        }
    }

    #[test]
    fn test_join_reescapes_segments() {
        let tokenizer = Tokenizer::default();
        let segments = vec!["a.b".to_string(), "c\\".to_string(), "d".to_string()];
        let path = tokenizer.join(&segments).unwrap();
        assert_eq!(path, r"a\.b.c\\.d");
        assert_eq!(tokenizer.tokenize(&path), segments);
    }

    #[test]
    fn test_join_rejects_unspellable_segment() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.join(&[r"a\.b"]), None);
    }
}
