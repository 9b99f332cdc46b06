//! Row expansion.
//!
//! Whether and how a record reveals descendant rows is the expander's
//! decision, not the engine's. The flattener hands each visited record to a
//! [`RowExpander`] along with a [`Traversal`] handle; whatever descriptor
//! sequence the expander returns is spliced in immediately after the parent.
//! Expansion state lives entirely inside the expander.
//!
//! [`ExpandedRows`] is the stock expander: a set of expanded keys with
//! toggle operations and change signals, revealing a record's children when
//! its key is in the set.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use trellis_grid_core::Signal;

use crate::column::Region;
use crate::flatten::{RowDescriptor, RowFlattener};
use crate::key::RowKey;
use crate::record::RowRecord;

/// Everything an expander learns about the record being visited.
pub struct ExpandContext<'a, R> {
    /// The record the flattener just emitted a descriptor for.
    pub record: &'a R,
    /// The record's index among its siblings.
    pub index: usize,
    /// The record's depth; its children render at `depth + 1`.
    pub depth: usize,
    /// The region of the current pass.
    pub region: Region,
    /// The key the flattener resolved for this record.
    pub parent_key: RowKey,
    /// Key chain from the root down to this record's parent.
    pub ancestor_keys: Arc<[RowKey]>,
}

/// The traversal continuation for one flatten pass.
///
/// An expander that decides to reveal descendants recurses back into the
/// flattener through this handle; the engine supplies the same flatten
/// procedure at every level, so recursion depth equals tree depth.
pub struct Traversal<'t, 'g, R> {
    pub(crate) flattener: &'t RowFlattener<'g, R>,
    pub(crate) expander: &'t dyn RowExpander<R>,
}

impl<'t, 'g, R: RowRecord> Traversal<'t, 'g, R> {
    /// The record's children under the configured children field.
    pub fn children_of<'a>(&self, record: &'a R) -> Option<&'a [R]> {
        record.child_rows(self.flattener.children_field())
    }

    /// Flattens `children` one level below the context's record.
    ///
    /// The returned descriptors carry the context's ancestor chain extended
    /// with the record's own key, preserving document order when the caller
    /// splices them after the parent.
    pub fn descend<'a>(
        &self,
        children: &'a [R],
        ctx: &ExpandContext<'a, R>,
    ) -> Vec<RowDescriptor<'a, R>> {
        let mut chain = Vec::with_capacity(ctx.ancestor_keys.len() + 1);
        chain.extend_from_slice(&ctx.ancestor_keys);
        chain.push(ctx.parent_key.clone());

        let mut out = Vec::new();
        self.flattener
            .flatten_level(children, ctx.depth + 1, chain.into(), self.expander, &mut out);
        out
    }
}

/// Decides, per record, whether and how descendant rows are revealed.
///
/// Returning an empty sequence reveals nothing. Implementors own whatever
/// expansion state they consult; the engine only splices in what comes back.
pub trait RowExpander<R: RowRecord>: Send + Sync {
    /// Produces the descendant descriptors for the context's record.
    fn expand_rows<'a>(
        &self,
        traversal: &Traversal<'_, '_, R>,
        ctx: ExpandContext<'a, R>,
    ) -> Vec<RowDescriptor<'a, R>>;
}

/// Stock expander: reveal a record's children while its key is expanded.
///
/// # Example
///
/// ```
/// use trellis_grid::{ExpandedRows, RowKey};
///
/// let expanded = ExpandedRows::new();
/// expanded.expand(RowKey::Int(1));
/// assert!(expanded.is_expanded(&RowKey::Int(1)));
///
/// expanded.collapse(RowKey::Int(1));
/// assert!(!expanded.is_expanded(&RowKey::Int(1)));
/// ```
pub struct ExpandedRows {
    expanded: RwLock<HashSet<RowKey>>,
    /// Emitted when a key becomes expanded.
    pub row_expanded: Signal<RowKey>,
    /// Emitted when a key becomes collapsed.
    pub row_collapsed: Signal<RowKey>,
}

impl ExpandedRows {
    /// Creates an expander with nothing expanded.
    pub fn new() -> Self {
        Self {
            expanded: RwLock::new(HashSet::new()),
            row_expanded: Signal::new(),
            row_collapsed: Signal::new(),
        }
    }

    /// Creates an expander with the given keys already expanded.
    ///
    /// No signals fire for the initial set.
    pub fn with_expanded(keys: impl IntoIterator<Item = RowKey>) -> Self {
        let expander = Self::new();
        *expander.expanded.write() = keys.into_iter().collect();
        expander
    }

    /// Marks `key` expanded.
    pub fn expand(&self, key: RowKey) {
        if self.expanded.write().insert(key.clone()) {
            self.row_expanded.emit(key);
        }
    }

    /// Marks `key` collapsed.
    pub fn collapse(&self, key: RowKey) {
        if self.expanded.write().remove(&key) {
            self.row_collapsed.emit(key);
        }
    }

    /// Flips the expansion of `key`, returning the new state.
    pub fn toggle(&self, key: RowKey) -> bool {
        let expanded = self.expanded.write().insert(key.clone());
        if expanded {
            self.row_expanded.emit(key);
            true
        } else {
            self.expanded.write().remove(&key);
            self.row_collapsed.emit(key);
            false
        }
    }

    /// Sets the expansion of `key` explicitly.
    pub fn set_expanded(&self, key: RowKey, expanded: bool) {
        if expanded {
            self.expand(key);
        } else {
            self.collapse(key);
        }
    }

    /// Returns `true` if `key` is expanded.
    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.read().contains(key)
    }

    /// The currently expanded keys, in no particular order.
    pub fn expanded_keys(&self) -> Vec<RowKey> {
        self.expanded.read().iter().cloned().collect()
    }

    /// Collapses everything. No signals fire.
    pub fn clear(&self) {
        self.expanded.write().clear();
    }
}

impl Default for ExpandedRows {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(ExpandedRows: Send, Sync);

impl<R: RowRecord> RowExpander<R> for ExpandedRows {
    fn expand_rows<'a>(
        &self,
        traversal: &Traversal<'_, '_, R>,
        ctx: ExpandContext<'a, R>,
    ) -> Vec<RowDescriptor<'a, R>> {
        if !self.is_expanded(&ctx.parent_key) {
            return Vec::new();
        }
        match traversal.children_of(ctx.record) {
            Some(children) if !children.is_empty() => traversal.descend(children, &ctx),
            _ => Vec::new(),
        }
    }
}
