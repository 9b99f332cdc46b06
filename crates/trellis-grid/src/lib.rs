//! Row-flattening and column-selection engine for data grids.
//!
//! This crate turns a hierarchical, possibly-expandable dataset into the
//! ordered sequence of row descriptors a grid renderer paints, with support
//! for pinned (fixed) column groups. It owns the traversal and identity
//! bookkeeping; painting, cell sizing, and scroll handling are the
//! renderer's business.
//!
//! # Core Types
//!
//! - [`RowKey`] / [`KeyResolver`]: Stable per-row identity
//! - [`ColumnNode`] / [`ColumnManager`]: Column tree and per-region leaf selection
//! - [`RowRecord`]: The dataset contract (records may hold child records)
//! - [`RowExpander`] / [`ExpandedRows`]: Descendant-row revelation
//! - [`RowFlattener`] / [`RowDescriptor`]: The flatten pass and its output
//! - [`HoverStore`] / [`HoverBridge`]: Hover fan-out across duplicated rows
//! - [`Grid`]: Facade wiring one grid's passes together
//!
//! # Example
//!
//! ```
//! use trellis_grid::{ColumnNode, ExpandedRows, Grid, GridConfig, RowKey, RowRecord};
//!
//! struct File { id: i64, entries: Vec<File> }
//!
//! impl RowRecord for File {
//!     fn child_rows(&self, field: &str) -> Option<&[File]> {
//!         match field {
//!             "entries" => Some(&self.entries),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let config = GridConfig::builder()
//!     .with_children_field("entries")
//!     .with_key_fn(|file: &File, _| RowKey::Int(file.id))
//!     .build()
//!     .unwrap();
//!
//! let grid = Grid::new(config, vec![
//!     ColumnNode::leaf("name"),
//!     ColumnNode::leaf("size"),
//! ]).unwrap();
//!
//! let data = vec![
//!     File { id: 1, entries: vec![File { id: 2, entries: vec![] }] },
//! ];
//!
//! let expanded = ExpandedRows::with_expanded([RowKey::Int(1)]);
//! for region in grid.render_passes() {
//!     let rows = grid.rows(region, &data, &expanded);
//!     assert_eq!(rows.len(), 2);
//! }
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌───────────────┐
//! │   Dataset    │───>│ RowFlattener │───>│ RowDescriptor │──> renderer
//! │ (RowRecord)  │    │  (per pass)  │    │   sequence    │
//! └──────────────┘    └──────┬───────┘    └───────────────┘
//!                            │
//!              ┌─────────────┼──────────────┐
//!              │             │              │
//!       ┌──────┴──────┐ ┌────┴─────┐ ┌──────┴──────┐
//!       │ KeyResolver │ │ Column   │ │ RowExpander │
//!       │             │ │ Manager  │ │ (Traversal) │
//!       └─────────────┘ └──────────┘ └─────────────┘
//! ```
//!
//! A grid with pinned columns runs one flatten pass per [`Region`]; the
//! passes produce structurally parallel descriptor sequences that differ
//! only in their leaf-column scope. Hover events fan out through the shared
//! [`HoverStore`] so every instance of a logical row styles consistently.
//!
//! Flattening is synchronous and runs to completion over the dataset
//! snapshot it was given; mutating the dataset mid-traversal is the caller's
//! bug to avoid.

mod column;
mod config;
mod error;
mod expand;
mod flatten;
mod grid;
mod hover;
mod key;
mod record;

pub use column::{ColumnManager, ColumnNode, ColumnRef, FixedSide, Region};
pub use config::{GridConfig, GridConfigBuilder, RowClassFn};
pub use error::{Error, Result};
pub use expand::{ExpandContext, ExpandedRows, RowExpander, Traversal};
pub use flatten::{RowDescriptor, RowFlattener};
pub use grid::Grid;
pub use hover::{HoverBridge, HoverStore};
pub use key::{KeyResolver, RowKey, RowKeyFn};
pub use record::RowRecord;
