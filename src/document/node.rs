//! Value representation and the container capabilities the engine relies on.
//!
//! The engine never inspects a concrete type directly. Each step asks the
//! current node for its [`Shape`], a closed variant of map, sequence or
//! leaf, and then works through the capabilities of that variant. `Value`
//! is the crate's own tree; `serde_yaml::Value` and `serde_json::Value` get
//! the same treatment in [`super::interop`].
//!
//! # Example
//!
//! ```
//! use dotquill::document::node::{Node, Shape, Value};
//! use indexmap::IndexMap;
//!
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), Value::from("dotquill"));
//! let root = Value::Map(fields);
//!
//! assert!(matches!(root.shape(), Shape::Map(_)));
//! assert!(matches!(Value::from(3).shape(), Shape::Leaf));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Key/value capabilities of a map-like container.
pub trait MapLike<V> {
    /// Looks up the value stored under `key`.
    fn lookup(&self, key: &str) -> Option<&V>;

    /// Looks up the value stored under `key` for mutation.
    fn lookup_mut(&mut self, key: &str) -> Option<&mut V>;

    /// Inserts or overwrites the value stored under `key`.
    fn assign(&mut self, key: &str, value: V);

    /// Removes `key`, returning its value if it was present.
    fn remove_key(&mut self, key: &str) -> Option<V>;

    fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of entries.
    fn entry_count(&self) -> usize;

    /// Iterates over entries in the container's own order.
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &V)> + '_>;
}

/// Read-only view of a node's container kind.
pub enum Shape<'a, N: Node> {
    Map(&'a N::Map),
    Seq(&'a [N]),
    Leaf,
}

/// Mutable view of a node's container kind.
pub enum ShapeMut<'a, N: Node> {
    Map(&'a mut N::Map),
    Seq(&'a mut Vec<N>),
    Leaf,
}

/// A value that may hold nested maps and sequences.
pub trait Node: Sized {
    /// The map-like container type this node uses.
    type Map: MapLike<Self>;

    fn shape(&self) -> Shape<'_, Self>;

    fn shape_mut(&mut self) -> ShapeMut<'_, Self>;

    /// A fresh, empty map-like node.
    fn empty_map() -> Self;

    /// A sequence-like node holding `items`.
    fn from_seq(items: Vec<Self>) -> Self;

    /// A fresh, empty sequence-like node.
    fn empty_seq() -> Self {
        Self::from_seq(Vec::new())
    }

    /// The placeholder used to pad sequences up to a written index.
    fn absent() -> Self;

    /// Returns true if this node is the padding placeholder.
    fn is_absent(&self) -> bool;

    /// Short human-readable name of this node's kind, used in errors.
    fn kind_name(&self) -> &'static str;
}

/// A nested value: maps, sequences and scalar leaves.
///
/// Maps keep insertion order. `Null` is also the placeholder used when a
/// sequence is padded out to a written index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null, or an unfilled sequence slot
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Ordered, integer-indexed values
    Seq(Vec<Value>),
    /// Unique string keys mapped to values
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns true if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns true if this value is a sequence.
    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    /// Returns true if this value is a map or a sequence.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Seq(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric value as f64, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Node for Value {
    type Map = IndexMap<String, Value>;

    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Value::Map(map) => Shape::Map(map),
            Value::Seq(items) => Shape::Seq(items),
            _ => Shape::Leaf,
        }
    }

    fn shape_mut(&mut self) -> ShapeMut<'_, Self> {
        match self {
            Value::Map(map) => ShapeMut::Map(map),
            Value::Seq(items) => ShapeMut::Seq(items),
            _ => ShapeMut::Leaf,
        }
    }

    fn empty_map() -> Self {
        Value::Map(IndexMap::new())
    }

    fn from_seq(items: Vec<Self>) -> Self {
        Value::Seq(items)
    }

    fn absent() -> Self {
        Value::Null
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
        }
    }
}

impl<V> MapLike<V> for IndexMap<String, V> {
    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }

    fn lookup_mut(&mut self, key: &str) -> Option<&mut V> {
        self.get_mut(key)
    }

    fn assign(&mut self, key: &str, value: V) {
        self.insert(key.to_string(), value);
    }

    fn remove_key(&mut self, key: &str) -> Option<V> {
        self.shift_remove(key)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &V)> + '_> {
        Box::new(self.iter().map(|(key, value)| (Cow::Borrowed(key.as_str()), value)))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}
