//! Dotted-path accessor over a map-like root.
//!
//! [`Dotty`] pairs a root structure with a [`Config`] and forwards every
//! call to the traversal engine. The root is either owned by the accessor
//! or borrowed from the caller as a live view, in which case every write
//! lands directly in the caller's structure.
//!
//! # Example
//!
//! ```
//! use dotquill::{Dotty, Value};
//!
//! let mut dot = Dotty::new();
//! dot.set("deep_key.new_nested.very.deep.key", "wow!").unwrap();
//!
//! assert_eq!(dot.get("deep_key.new_nested.very.deep.key").unwrap(), &Value::from("wow!"));
//! assert!(dot.contains("deep_key.new_nested"));
//! assert_eq!(dot.get_opt("deep_key.something").unwrap(), None);
//! ```

use std::borrow::Cow;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::config::Config;
use crate::document::{MapLike, Node, Shape, Value};
use crate::engine;
use crate::error::{DottyError, Result};
use crate::path::{PathArg, Tokenizer};

#[derive(Debug)]
enum Root<'a, N> {
    Owned(N),
    Borrowed(&'a mut N),
}

/// A dotted-path accessor over a map-like root.
///
/// The root always stays map-like: it is checked at construction, and no
/// path addresses the root itself, so writes can only replace its children.
#[derive(Debug)]
pub struct Dotty<'a, N = Value> {
    root: Root<'a, N>,
    config: Config,
    tokenizer: Tokenizer,
}

/// Rejects roots that are not maps.
fn check_root<N: Node>(root: &N, config: &Config) -> Result<()> {
    config.validate()?;
    if !matches!(root.shape(), Shape::Map(_)) {
        debug!(
            target: "dotquill::engine",
            found = root.kind_name(),
            "Rejecting non-map root"
        );
        return Err(DottyError::Construction {
            found: root.kind_name().to_string(),
        });
    }
    Ok(())
}

impl Dotty<'static, Value> {
    /// Creates an accessor over a fresh, empty map.
    pub fn new() -> Self {
        Self {
            root: Root::Owned(Value::empty_map()),
            config: Config::default(),
            tokenizer: Tokenizer::default(),
        }
    }
}

impl Default for Dotty<'static, Value> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> Dotty<'static, N> {
    /// Takes ownership of `root`, which must be map-like.
    pub fn from_value(root: N) -> Result<Self> {
        Self::with_config(root, Config::default())
    }

    /// Takes ownership of `root` and uses custom settings.
    pub fn with_config(root: N, config: Config) -> Result<Self> {
        check_root(&root, &config)?;
        Ok(Self {
            tokenizer: config.tokenizer(),
            root: Root::Owned(root),
            config,
        })
    }

    /// Creates an accessor over an empty map with custom settings.
    pub fn empty(config: Config) -> Result<Self> {
        Self::with_config(N::empty_map(), config)
    }

    /// Builds an accessor whose every key path holds a copy of `value`.
    ///
    /// Keys are paths, so a dotted key produces nested maps.
    pub fn from_keys<I, P>(keys: I, value: N) -> Result<Self>
    where
        N: Clone,
        I: IntoIterator<Item = P>,
        P: PathArg,
    {
        let mut dotty = Self::empty(Config::default())?;
        for key in keys {
            dotty.set(key, value.clone())?;
        }
        Ok(dotty)
    }

    /// Parses YAML text into an owned accessor.
    pub fn from_yaml_str(contents: &str) -> anyhow::Result<Self>
    where
        N: DeserializeOwned,
    {
        let root: N = serde_yaml::from_str(contents).context("Failed to parse YAML")?;
        Ok(Self::from_value(root)?)
    }

    /// Parses JSON text into an owned accessor.
    pub fn from_json_str(contents: &str) -> anyhow::Result<Self>
    where
        N: DeserializeOwned,
    {
        let root: N = serde_json::from_str(contents).context("Failed to parse JSON")?;
        Ok(Self::from_value(root)?)
    }
}

impl<'a, N: Node> Dotty<'a, N> {
    /// Wraps the caller's `root` in place; writes go straight into it.
    pub fn wrap(root: &'a mut N) -> Result<Self> {
        Self::wrap_with_config(root, Config::default())
    }

    /// Wraps the caller's `root` in place with custom settings.
    pub fn wrap_with_config(root: &'a mut N, config: Config) -> Result<Self> {
        check_root(root, &config)?;
        Ok(Self {
            tokenizer: config.tokenizer(),
            root: Root::Borrowed(root),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Returns the wrapped root.
    pub fn as_value(&self) -> &N {
        match &self.root {
            Root::Owned(root) => root,
            Root::Borrowed(root) => &**root,
        }
    }

    fn root_mut(&mut self) -> &mut N {
        match &mut self.root {
            Root::Owned(root) => root,
            Root::Borrowed(root) => &mut **root,
        }
    }

    /// Splits a path using this accessor's separator and escape marker.
    pub fn tokens<P: PathArg>(&self, path: P) -> Vec<String> {
        path.to_tokens(&self.tokenizer)
    }

    /// Returns the value at `path`.
    pub fn get<P: PathArg>(&self, path: P) -> Result<&N> {
        let tokens = self.tokens(path);
        engine::get(self.as_value(), &tokens)
    }

    /// Returns the value at `path` for in-place mutation.
    pub fn get_mut<P: PathArg>(&mut self, path: P) -> Result<&mut N> {
        let tokens = self.tokens(path);
        if tokens.is_empty() {
            return Err(DottyError::EmptyPath);
        }
        engine::get_mut(self.root_mut(), &tokens)
    }

    /// Returns the value at `path`, or `None` if a key or index is missing.
    pub fn get_opt<P: PathArg>(&self, path: P) -> Result<Option<&N>> {
        let tokens = self.tokens(path);
        engine::get_opt(self.as_value(), &tokens)
    }

    /// Returns the value at `path`, or `default` if a key or index is missing.
    pub fn get_or<'s, P: PathArg>(&'s self, path: P, default: &'s N) -> Result<&'s N> {
        let tokens = self.tokens(path);
        engine::get_or_default(self.as_value(), &tokens, default)
    }

    /// Returns an owned copy of the value at `path`, expanding slices.
    ///
    /// `items.:.name` collects `name` from every element of `items`.
    pub fn select<P: PathArg>(&self, path: P) -> Result<N>
    where
        N: Clone,
    {
        let tokens = self.tokens(path);
        engine::select(self.as_value(), &tokens)
    }

    /// Returns true if every segment of `path` resolves.
    pub fn contains<P: PathArg>(&self, path: P) -> bool {
        let tokens = self.tokens(path);
        engine::contains(self.as_value(), &tokens)
    }

    /// Writes `value` at `path`, creating intermediate containers.
    pub fn set<P: PathArg, V: Into<N>>(&mut self, path: P, value: V) -> Result<()> {
        let tokens = self.tokens(path);
        trace!(target: "dotquill::engine", path = ?tokens, "set");
        let policy = self.config.leaf_policy;
        engine::set(self.root_mut(), &tokens, value.into(), policy)
    }

    /// Deletes the value at `path`.
    pub fn delete<P: PathArg>(&mut self, path: P) -> Result<()> {
        self.pop(path).map(|_| ())
    }

    /// Removes and returns the value at `path`.
    pub fn pop<P: PathArg>(&mut self, path: P) -> Result<N> {
        let tokens = self.tokens(path);
        trace!(target: "dotquill::engine", path = ?tokens, "remove");
        engine::remove(self.root_mut(), &tokens)
    }

    /// Removes and returns the value at `path`, or `default` if missing.
    pub fn pop_or<P: PathArg>(&mut self, path: P, default: N) -> Result<N> {
        match self.pop(path) {
            Ok(value) => Ok(value),
            Err(err) if err.is_missing() => Ok(default),
            Err(err) => Err(err),
        }
    }

    /// Returns the value at `path`, first storing `default` there if missing.
    pub fn setdefault<P: PathArg>(&mut self, path: P, default: N) -> Result<&N> {
        let tokens = self.tokens(path);
        if engine::get_opt(self.as_value(), &tokens)?.is_none() {
            let policy = self.config.leaf_policy;
            engine::set(self.root_mut(), &tokens, default, policy)?;
        }
        engine::get(self.as_value(), &tokens)
    }

    /// Iterates over the top-level entries.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &N)> + '_> {
        match self.as_value().shape() {
            Shape::Map(map) => map.entries(),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Iterates over the top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        match self.as_value().shape() {
            Shape::Map(map) => map.entry_count(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a deep copy of the wrapped root.
    pub fn to_value(&self) -> N
    where
        N: Clone,
    {
        self.as_value().clone()
    }

    /// Copies the root into a new accessor that owns it.
    ///
    /// Unlike `clone`, the result no longer carries the borrow of a
    /// wrapped view, so the original structure is free again.
    pub fn detach(&self) -> Dotty<'static, N>
    where
        N: Clone,
    {
        Dotty {
            root: Root::Owned(self.to_value()),
            config: self.config.clone(),
            tokenizer: self.tokenizer,
        }
    }

    /// Consumes the accessor and returns the root.
    ///
    /// A borrowed root is copied; the caller still owns the original.
    pub fn into_value(self) -> N
    where
        N: Clone,
    {
        match self.root {
            Root::Owned(root) => root,
            Root::Borrowed(root) => root.clone(),
        }
    }

    /// Serializes the root as compact JSON.
    pub fn to_json_string(&self) -> anyhow::Result<String>
    where
        N: Serialize,
    {
        serde_json::to_string(self.as_value()).context("Failed to serialize JSON")
    }

    /// Serializes the root as YAML.
    pub fn to_yaml_string(&self) -> anyhow::Result<String>
    where
        N: Serialize,
    {
        serde_yaml::to_string(self.as_value()).context("Failed to serialize YAML")
    }
}

/// Cloning always yields an owned, detached copy, even of a borrowed view.
impl<N: Node + Clone> Clone for Dotty<'_, N> {
    fn clone(&self) -> Self {
        Self {
            root: Root::Owned(self.as_value().clone()),
            config: self.config.clone(),
            tokenizer: self.tokenizer,
        }
    }
}

impl<'b, N: Node + PartialEq> PartialEq<Dotty<'b, N>> for Dotty<'_, N> {
    fn eq(&self, other: &Dotty<'b, N>) -> bool {
        self.as_value() == other.as_value()
    }
}

macro_rules! eq_with_raw_node {
    ($($node:ty),*) => {
        $(
            impl PartialEq<$node> for Dotty<'_, $node> {
                fn eq(&self, other: &$node) -> bool {
                    self.as_value() == other
                }
            }
        )*
    };
}

eq_with_raw_node!(Value, serde_json::Value, serde_yaml::Value);

impl<N: Node + Serialize> Serialize for Dotty<'_, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.as_value().serialize(serializer)
    }
}
