//! DotQuill - read, write, test and delete deeply nested values with dotted paths.
//!
//! Instead of chained indexing, a single path string such as `"a.b.c"`
//! addresses a location inside nested maps and sequences:
//!
//! - [`path`] splits path strings into segments, honouring escapes
//! - [`engine`] walks a structure with those segments (get, set, contains, delete)
//! - [`dotty`] wraps a map-like root behind a convenient accessor
//! - [`cache`] memoizes reads outside the engine
//!
//! # Example
//!
//! ```
//! use dotquill::{Dotty, Value};
//!
//! let mut dot: Dotty = Dotty::from_json_str(r#"{"data": {"items": [10, 20, 30]}}"#).unwrap();
//!
//! assert_eq!(dot.get("data.items.1").unwrap(), &Value::from(20));
//! assert!(!dot.contains("data.items.5"));
//!
//! dot.set(r"data.key\.with\.dots", true).unwrap();
//! assert_eq!(dot.get("data").unwrap().as_map().unwrap()["key.with.dots"], Value::from(true));
//!
//! dot.delete("data.items.0").unwrap();
//! assert_eq!(dot.select("data.items").unwrap(), Value::from(vec![Value::from(20), Value::from(30)]));
//! ```

pub mod cache;
pub mod config;
pub mod document;
pub mod dotty;
pub mod engine;
pub mod error;
pub mod path;

pub use config::{Config, LeafPolicy};
pub use document::{Node, Value};
pub use dotty::Dotty;
pub use error::{DottyError, Result};
pub use path::{tokenize, PathArg, Tokenizer};
