//! Nested value model.
//!
//! This module defines the crate's own [`Value`] tree together with the
//! [`Node`] trait that lets the engine walk any value tree that can describe
//! itself as a map, a sequence or a leaf.

pub mod interop;
pub mod node;

pub use node::{MapLike, Node, Shape, ShapeMut, Value};
