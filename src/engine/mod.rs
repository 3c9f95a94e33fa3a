//! Traversal engine: get, set, contains and delete over nested nodes.
//!
//! Every operation is a single walk from the root, one token at a time.
//! At each step the current node reports its [`Shape`]:
//!
//! - a map treats the token as a key
//! - a sequence treats the token as an index, but only when it is made of
//!   decimal digits; any other token is a type mismatch
//! - a leaf cannot be descended into
//!
//! Reads never mutate. `set` auto-vivifies missing intermediates and pads
//! sequences with the node type's absent placeholder. `delete` never
//! creates anything.

pub mod slice;

use tracing::{debug, trace};

use crate::config::LeafPolicy;
use crate::document::{MapLike, Node, Shape, ShapeMut};
use crate::error::{DottyError, Result};

pub use slice::{select, SliceSpec};

/// Returns true if `token` can index a sequence: one or more decimal digits.
pub fn is_index_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a token used against a sequence.
fn parse_index(token: &str, len: usize) -> Result<usize> {
    if !is_index_token(token) {
        return Err(DottyError::type_mismatch(token, "a sequence index"));
    }
    // Digit strings too long for usize are past the end of any sequence.
    token
        .parse::<usize>()
        .map_err(|_| DottyError::IndexOutOfRange {
            index: usize::MAX,
            len,
        })
}

/// Resolves one token against `node` without mutating anything.
fn step<'a, N: Node>(node: &'a N, token: &str) -> Result<&'a N> {
    match node.shape() {
        Shape::Map(map) => map
            .lookup(token)
            .ok_or_else(|| DottyError::key_not_found(token)),
        Shape::Seq(items) => {
            let index = parse_index(token, items.len())?;
            items.get(index).ok_or(DottyError::IndexOutOfRange {
                index,
                len: items.len(),
            })
        }
        Shape::Leaf => Err(DottyError::NotTraversable {
            token: token.to_string(),
        }),
    }
}

/// Mutable counterpart of [`step`].
fn step_mut<'a, N: Node>(node: &'a mut N, token: &str) -> Result<&'a mut N> {
    match node.shape_mut() {
        ShapeMut::Map(map) => map
            .lookup_mut(token)
            .ok_or_else(|| DottyError::key_not_found(token)),
        ShapeMut::Seq(items) => {
            let len = items.len();
            let index = parse_index(token, len)?;
            items
                .get_mut(index)
                .ok_or(DottyError::IndexOutOfRange { index, len })
        }
        ShapeMut::Leaf => Err(DottyError::NotTraversable {
            token: token.to_string(),
        }),
    }
}

/// Resolves `tokens` against `root` and returns the node found there.
///
/// An empty token list resolves to the root itself.
///
/// # Errors
///
/// - `KeyNotFound` if a map lacks a key
/// - `IndexOutOfRange` if a sequence is too short
/// - `TypeMismatch` if a non-digit token meets a sequence
/// - `NotTraversable` if tokens remain at a leaf
pub fn get<'a, N: Node, S: AsRef<str>>(root: &'a N, tokens: &[S]) -> Result<&'a N> {
    let mut current = root;
    for token in tokens {
        current = step(current, token.as_ref())?;
    }
    Ok(current)
}

/// Like [`get`], but yields a mutable reference.
pub fn get_mut<'a, N: Node, S: AsRef<str>>(root: &'a mut N, tokens: &[S]) -> Result<&'a mut N> {
    let mut current = root;
    for token in tokens {
        current = step_mut(current, token.as_ref())?;
    }
    Ok(current)
}

/// Like [`get`], but a missing key or index yields `Ok(None)`.
///
/// Type mismatches and leaf descents are still reported as errors.
pub fn get_opt<'a, N: Node, S: AsRef<str>>(root: &'a N, tokens: &[S]) -> Result<Option<&'a N>> {
    match get(root, tokens) {
        Ok(node) => Ok(Some(node)),
        Err(err) if err.is_missing() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Like [`get`], but a missing key or index yields `default`.
pub fn get_or_default<'a, N: Node, S: AsRef<str>>(
    root: &'a N,
    tokens: &[S],
    default: &'a N,
) -> Result<&'a N> {
    Ok(get_opt(root, tokens)?.unwrap_or(default))
}

/// Returns true only if every token resolves.
pub fn contains<N: Node, S: AsRef<str>>(root: &N, tokens: &[S]) -> bool {
    get(root, tokens).is_ok()
}

/// Makes `slot` able to take `token`, replacing vacant or leaf nodes.
///
/// A fresh sequence is created when `token` is an index, a fresh map
/// otherwise. Existing containers are left alone.
fn ensure_container<N: Node>(slot: &mut N, token: &str, policy: LeafPolicy) -> Result<()> {
    if !matches!(slot.shape(), Shape::Leaf) {
        return Ok(());
    }

    if !slot.is_absent() {
        match policy {
            LeafPolicy::Strict => {
                return Err(DottyError::TypeMismatch {
                    token: token.to_string(),
                    expected: format!("a map or sequence, found {}", slot.kind_name()),
                });
            }
            LeafPolicy::Overwrite => {
                debug!(
                    target: "dotquill::engine",
                    token,
                    replaced = slot.kind_name(),
                    "Overwriting leaf with container"
                );
            }
        }
    }

    *slot = if is_index_token(token) {
        trace!(target: "dotquill::engine", token, "Creating sequence");
        N::empty_seq()
    } else {
        trace!(target: "dotquill::engine", token, "Creating map");
        N::empty_map()
    };
    Ok(())
}

/// Grows `items` with absent placeholders until `index` is valid.
///
/// Fails without touching `items` when `index` has no following length.
fn pad_to<N: Node>(items: &mut Vec<N>, index: usize) -> Result<()> {
    let len = items.len();
    if index < len {
        return Ok(());
    }
    let new_len = index
        .checked_add(1)
        .ok_or(DottyError::IndexOutOfRange { index, len })?;
    debug!(
        target: "dotquill::engine",
        from = len,
        to = new_len,
        "Padding sequence"
    );
    items.resize_with(new_len, N::absent);
    Ok(())
}

/// Returns the child slot for `token`, creating a vacant one if missing.
fn vivify_child<'a, N: Node>(node: &'a mut N, token: &str) -> Result<&'a mut N> {
    match node.shape_mut() {
        ShapeMut::Map(map) => {
            if !map.contains_key(token) {
                debug!(target: "dotquill::engine", key = token, "Auto-vivifying key");
                map.assign(token, N::absent());
            }
            map.lookup_mut(token)
                .ok_or_else(|| DottyError::key_not_found(token))
        }
        ShapeMut::Seq(items) => {
            let index = parse_index(token, items.len())?;
            pad_to(items, index)?;
            let len = items.len();
            items
                .get_mut(index)
                .ok_or(DottyError::IndexOutOfRange { index, len })
        }
        ShapeMut::Leaf => Err(DottyError::NotTraversable {
            token: token.to_string(),
        }),
    }
}

/// Stores `value` under the final `token` of `node`.
fn assign_child<N: Node>(node: &mut N, token: &str, value: N) -> Result<()> {
    match node.shape_mut() {
        ShapeMut::Map(map) => {
            map.assign(token, value);
            Ok(())
        }
        ShapeMut::Seq(items) => {
            let index = parse_index(token, items.len())?;
            pad_to(items, index)?;
            items[index] = value;
            Ok(())
        }
        ShapeMut::Leaf => Err(DottyError::NotTraversable {
            token: token.to_string(),
        }),
    }
}

/// Writes `value` at `tokens`, creating intermediate containers as needed.
///
/// Missing intermediates become maps, or sequences when the token applied
/// to them is an index. Writing past the end of a sequence pads it with
/// absent placeholders. What happens to a leaf found mid-path depends on
/// `policy`.
pub fn set<N: Node, S: AsRef<str>>(
    root: &mut N,
    tokens: &[S],
    value: N,
    policy: LeafPolicy,
) -> Result<()> {
    let (last, parents) = tokens.split_last().ok_or(DottyError::EmptyPath)?;

    let mut current = root;
    for token in parents {
        let token = token.as_ref();
        ensure_container(current, token, policy)?;
        current = vivify_child(current, token)?;
    }

    let last = last.as_ref();
    ensure_container(current, last, policy)?;
    assign_child(current, last, value)
}

/// Removes the node at `tokens` and returns it.
///
/// Intermediates are never created. Removing from a sequence shifts the
/// following elements down.
pub fn remove<N: Node, S: AsRef<str>>(root: &mut N, tokens: &[S]) -> Result<N> {
    let (last, parents) = tokens.split_last().ok_or(DottyError::EmptyPath)?;
    let last = last.as_ref();
    let parent = get_mut(root, parents)?;

    match parent.shape_mut() {
        ShapeMut::Map(map) => map
            .remove_key(last)
            .ok_or_else(|| DottyError::key_not_found(last)),
        ShapeMut::Seq(items) => {
            let len = items.len();
            let index = parse_index(last, len)?;
            if index >= len {
                return Err(DottyError::IndexOutOfRange { index, len });
            }
            Ok(items.remove(index))
        }
        ShapeMut::Leaf => Err(DottyError::NotTraversable {
            token: last.to_string(),
        }),
    }
}

/// Removes the node at `tokens`, discarding it.
pub fn delete<N: Node, S: AsRef<str>>(root: &mut N, tokens: &[S]) -> Result<()> {
    remove(root, tokens).map(|_| ())
}
