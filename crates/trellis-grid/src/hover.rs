//! Hover state shared across duplicated row instances.
//!
//! A grid with pinned columns draws one logical row up to three times, once
//! per region. Pointer events land on a single instance, but all instances
//! sharing the row key must style consistently, so hover travels through a
//! shared store: a single-writer, multi-reader cell holding at most one
//! hovered key, with a change signal observers subscribe to for the pass.
//!
//! When no columns are pinned there is exactly one instance per row and
//! native per-row pointer state suffices; the [`HoverBridge`] is inert in
//! that case to avoid store churn.

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_grid_core::Signal;

use crate::key::RowKey;

/// The shared hover cell.
///
/// Holds the currently hovered row key, if any. Mutation is synchronous on
/// the calling thread; [`HoverStore::changed`] fires after the cell actually
/// changes, carrying the new value, so every observing row instance settles
/// within the same update.
pub struct HoverStore {
    current: Mutex<Option<RowKey>>,
    /// Emitted with the new hover value whenever it changes.
    pub changed: Signal<Option<RowKey>>,
}

impl HoverStore {
    /// Creates an empty store (nothing hovered).
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            changed: Signal::new(),
        }
    }

    /// Records `key` as hovered.
    pub fn hover_enter(&self, key: RowKey) {
        let mut current = self.current.lock();
        if current.as_ref() == Some(&key) {
            return;
        }
        *current = Some(key.clone());
        drop(current);
        self.changed.emit(Some(key));
    }

    /// Clears the hover, but only if `key` is still the hovered one.
    ///
    /// A leave event for a row the pointer already left is stale: an enter
    /// for the next row may have arrived first, and clearing unconditionally
    /// would wipe that newer hover out.
    pub fn hover_leave(&self, key: &RowKey) {
        let mut current = self.current.lock();
        if current.as_ref() != Some(key) {
            return;
        }
        *current = None;
        drop(current);
        self.changed.emit(None);
    }

    /// Clears the hover unconditionally.
    pub fn clear(&self) {
        let mut current = self.current.lock();
        if current.is_none() {
            return;
        }
        *current = None;
        drop(current);
        self.changed.emit(None);
    }

    /// The currently hovered key, if any.
    pub fn current(&self) -> Option<RowKey> {
        self.current.lock().clone()
    }

    /// Returns `true` if `key` is the hovered key.
    pub fn is_hovered(&self, key: &RowKey) -> bool {
        self.current.lock().as_ref() == Some(key)
    }
}

impl Default for HoverStore {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(HoverStore: Send, Sync);

/// The hover callback pair handed to rendered row instances.
///
/// Active only when the grid has pinned columns; otherwise every operation is
/// a no-op and a row's own pointer state drives its styling.
#[derive(Clone)]
pub struct HoverBridge {
    store: Arc<HoverStore>,
    active: bool,
}

impl HoverBridge {
    pub(crate) fn new(store: Arc<HoverStore>, active: bool) -> Self {
        Self { store, active }
    }

    /// Returns `true` if hover events are routed through the shared store.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Row instance callback: pointer entered the row.
    pub fn on_hover_enter(&self, key: RowKey) {
        if self.active {
            self.store.hover_enter(key);
        }
    }

    /// Row instance callback: pointer left the row.
    pub fn on_hover_leave(&self, key: &RowKey) {
        if self.active {
            self.store.hover_leave(key);
        }
    }

    /// Returns `true` if this bridge's store marks `key` hovered.
    pub fn is_hovered(&self, key: &RowKey) -> bool {
        self.active && self.store.is_hovered(key)
    }

    /// The underlying shared store.
    pub fn store(&self) -> &Arc<HoverStore> {
        &self.store
    }
}
