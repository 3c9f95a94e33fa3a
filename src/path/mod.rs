//! Path handling: tokenizing dotted strings into segments.
//!
//! A path such as `deep.nested.0.key` is split on the separator into
//! segments that the engine consumes one at a time. String paths go through
//! the [`Tokenizer`]; integers and pre-split segment lists are taken
//! verbatim.
//!
//! # Example
//!
//! ```
//! use dotquill::path::{PathArg, Tokenizer};
//!
//! let tokenizer = Tokenizer::default();
//! assert_eq!("a.b".to_tokens(&tokenizer), vec!["a", "b"]);
//! assert_eq!(7usize.to_tokens(&tokenizer), vec!["7"]);
//! assert_eq!(["a.b", "c"].to_tokens(&tokenizer), vec!["a.b", "c"]);
//! ```

pub mod tokenizer;

pub use tokenizer::{tokenize, Tokenizer, DEFAULT_ESCAPE, DEFAULT_SEPARATOR};

/// Anything that can address a location in a nested structure.
pub trait PathArg {
    /// Produces the segment list for this path.
    fn to_tokens(&self, tokenizer: &Tokenizer) -> Vec<String>;
}

impl PathArg for str {
    fn to_tokens(&self, tokenizer: &Tokenizer) -> Vec<String> {
        tokenizer.tokenize(self)
    }
}

impl PathArg for String {
    fn to_tokens(&self, tokenizer: &Tokenizer) -> Vec<String> {
        tokenizer.tokenize(self)
    }
}

impl<T: PathArg + ?Sized> PathArg for &T {
    fn to_tokens(&self, tokenizer: &Tokenizer) -> Vec<String> {
        (**self).to_tokens(tokenizer)
    }
}

macro_rules! verbatim_integer_path {
    ($($ty:ty),*) => {
        $(
            impl PathArg for $ty {
                fn to_tokens(&self, _tokenizer: &Tokenizer) -> Vec<String> {
                    vec![self.to_string()]
                }
            }
        )*
    };
}

verbatim_integer_path!(usize, u32, u64, i32, i64);

impl PathArg for [&str] {
    fn to_tokens(&self, _tokenizer: &Tokenizer) -> Vec<String> {
        self.iter().map(|segment| segment.to_string()).collect()
    }
}

impl PathArg for [String] {
    fn to_tokens(&self, _tokenizer: &Tokenizer) -> Vec<String> {
        self.to_vec()
    }
}

impl<const N: usize> PathArg for [&str; N] {
    fn to_tokens(&self, tokenizer: &Tokenizer) -> Vec<String> {
        self.as_slice().to_tokens(tokenizer)
    }
}

impl PathArg for Vec<String> {
    fn to_tokens(&self, tokenizer: &Tokenizer) -> Vec<String> {
        self.as_slice().to_tokens(tokenizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_paths_are_tokenized() {
        let tokenizer = Tokenizer::default();
        assert_eq!("a.b".to_string().to_tokens(&tokenizer), vec!["a", "b"]);
        assert_eq!((&"x.y").to_tokens(&tokenizer), vec!["x", "y"]);
    }

    #[test]
    fn test_integer_paths_are_verbatim() {
        let tokenizer = Tokenizer::default();
        assert_eq!(42usize.to_tokens(&tokenizer), vec!["42"]);
        assert_eq!((-1i64).to_tokens(&tokenizer), vec!["-1"]);
    }

    #[test]
    fn test_segment_lists_skip_tokenizing() {
        let tokenizer = Tokenizer::default();
        let segments = vec!["a.b".to_string(), "c".to_string()];
        assert_eq!(segments.to_tokens(&tokenizer), vec!["a.b", "c"]);
        assert_eq!(["x.y"].to_tokens(&tokenizer), vec!["x.y"]);
    }
}
