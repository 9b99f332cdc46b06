//! Grid facade.
//!
//! [`Grid`] ties one configuration, one column tree, and one hover store
//! together and produces the flatten passes a renderer consumes. With pinned
//! columns the grid renders as up to three structurally parallel passes over
//! the same records; the passes share nothing but the hover store and the
//! key semantics, which is what keeps a logical row consistent across its
//! duplicated instances.

use std::sync::Arc;

use trellis_grid_core::Signal;

use crate::column::{ColumnManager, ColumnNode, Region};
use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::expand::RowExpander;
use crate::flatten::{RowDescriptor, RowFlattener};
use crate::hover::{HoverBridge, HoverStore};
use crate::key::RowKey;
use crate::record::RowRecord;

/// A configured grid over records of type `R`.
///
/// # Signals
///
/// - `row_clicked(RowKey)`: Emitted when a row is clicked
/// - `row_double_clicked(RowKey)`: Emitted when a row is double-clicked
/// - `row_context_menu(RowKey)`: Emitted when a row's context menu is requested
///
/// The rendering layer emits these from its pointer handling; they are
/// keyed, not positional, so a handler addresses the same logical row
/// whichever region instance was hit.
///
/// # Example
///
/// ```
/// use trellis_grid::{ColumnNode, ExpandedRows, FixedSide, Grid, GridConfig, RowKey, RowRecord};
///
/// struct Task { id: i64, subtasks: Vec<Task> }
///
/// impl RowRecord for Task {
///     fn child_rows(&self, field: &str) -> Option<&[Task]> {
///         match field {
///             "subtasks" => Some(&self.subtasks),
///             _ => None,
///         }
///     }
/// }
///
/// let config = GridConfig::builder()
///     .with_children_field("subtasks")
///     .with_key_fn(|task: &Task, _| RowKey::Int(task.id))
///     .build()
///     .unwrap();
///
/// let grid = Grid::new(config, vec![
///     ColumnNode::leaf("id").with_fixed(FixedSide::Left),
///     ColumnNode::leaf("title"),
/// ]).unwrap();
///
/// let data = vec![Task { id: 1, subtasks: vec![] }];
/// let expanded = ExpandedRows::new();
/// for region in grid.render_passes() {
///     let rows = grid.rows(region, &data, &expanded);
///     // hand `rows` to the painting layer…
/// }
/// ```
pub struct Grid<R> {
    config: GridConfig<R>,
    columns: Arc<ColumnManager>,
    hover: Arc<HoverStore>,

    /// Emitted when a row is clicked.
    pub row_clicked: Signal<RowKey>,
    /// Emitted when a row is double-clicked.
    pub row_double_clicked: Signal<RowKey>,
    /// Emitted when a row's context menu is requested.
    pub row_context_menu: Signal<RowKey>,
}

impl<R> std::fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R: RowRecord> Grid<R> {
    /// Creates a grid from a configuration and a column tree.
    ///
    /// Fails with [`Error::NoColumns`] when the tree is empty: a grid with
    /// no columns has nothing to resolve rows against.
    pub fn new(config: GridConfig<R>, columns: Vec<ColumnNode>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }

        Ok(Self {
            config,
            columns: Arc::new(ColumnManager::new(columns)),
            hover: Arc::new(HoverStore::new()),
            row_clicked: Signal::new(),
            row_double_clicked: Signal::new(),
            row_context_menu: Signal::new(),
        })
    }

    /// The regions this grid renders, in paint order.
    ///
    /// `[Center]` when nothing is pinned; otherwise the fixed passes wrap the
    /// center pass, each present only when its side actually has leaves.
    pub fn render_passes(&self) -> Vec<Region> {
        if !self.columns.is_any_fixed() {
            return vec![Region::Center];
        }

        let mut passes = Vec::with_capacity(3);
        if self.columns.is_any_fixed_left() {
            passes.push(Region::FixedLeft);
        }
        passes.push(Region::Center);
        if self.columns.is_any_fixed_right() {
            passes.push(Region::FixedRight);
        }
        passes
    }

    /// Builds the flatten pass for one region.
    pub fn flattener(&self, region: Region) -> RowFlattener<'_, R> {
        RowFlattener::new(&self.config, &self.columns, region)
    }

    /// Flattens `records` for one region in a single call.
    pub fn rows<'a>(
        &self,
        region: Region,
        records: &'a [R],
        expander: &dyn RowExpander<R>,
    ) -> Vec<RowDescriptor<'a, R>> {
        self.flattener(region).flatten(records, expander)
    }

    /// The hover callback pair for rendered row instances.
    ///
    /// Active only when the grid has pinned columns; otherwise rows style
    /// themselves from native pointer state and the bridge is inert.
    pub fn hover_bridge(&self) -> HoverBridge {
        HoverBridge::new(self.hover.clone(), self.columns.is_any_fixed())
    }

    /// The grid's configuration.
    pub fn config(&self) -> &GridConfig<R> {
        &self.config
    }

    /// The grid's column manager.
    pub fn columns(&self) -> &Arc<ColumnManager> {
        &self.columns
    }

    /// The grid's shared hover store.
    pub fn hover(&self) -> &Arc<HoverStore> {
        &self.hover
    }
}
