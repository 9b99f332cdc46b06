//! Row key derivation.
//!
//! Every flattened row carries a [`RowKey`] identifying the record it was
//! built from. Keys must be stable across re-renders for the same logical
//! record so that hover fan-out and expansion toggles keep addressing the
//! same row; a deterministic caller-supplied key function guarantees this,
//! and the positional fallback guarantees it for static datasets.

use std::fmt;
use std::sync::Arc;

/// A value uniquely identifying a record among its siblings.
///
/// Keys are produced either by a caller-supplied [`RowKeyFn`] or positionally
/// by [`KeyResolver`]. Two distinct siblings resolving to the same key is a
/// caller error: flattening continues, but hover and expansion fan-out for
/// that key becomes ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Positional fallback: the record's index among its siblings.
    Index(usize),
    /// Integer key, typically a record id.
    Int(i64),
    /// String key.
    Text(String),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<usize> for RowKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<i64> for RowKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Caller-supplied key function: `(record, sibling_index) -> key`.
///
/// Must be deterministic and must not collide for distinct siblings.
pub type RowKeyFn<R> = Arc<dyn Fn(&R, usize) -> RowKey + Send + Sync>;

/// Resolves the key for a record at a given sibling position.
///
/// Delegates to the configured key function when one exists, otherwise falls
/// back to the positional index at that depth. Resolution is pure; duplicate
/// detection is the flattener's job.
pub struct KeyResolver<R> {
    key_fn: Option<RowKeyFn<R>>,
}

impl<R> KeyResolver<R> {
    /// Creates a resolver, optionally wrapping a caller key function.
    pub fn new(key_fn: Option<RowKeyFn<R>>) -> Self {
        Self { key_fn }
    }

    /// Derives the key for `record` at sibling position `index`.
    pub fn resolve(&self, record: &R, index: usize) -> RowKey {
        match &self.key_fn {
            Some(key_fn) => key_fn(record, index),
            None => RowKey::Index(index),
        }
    }
}

impl<R> Clone for KeyResolver<R> {
    fn clone(&self) -> Self {
        Self {
            key_fn: self.key_fn.clone(),
        }
    }
}
