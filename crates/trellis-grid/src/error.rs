//! Error types for the grid engine.
//!
//! Only configuration mistakes are fatal. Degraded conditions that the
//! engine can render through are not errors: a fixed-region pass over a
//! column tree with nothing pinned on that side produces an empty row
//! sequence, and duplicate sibling row keys are logged and flattened anyway.

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a grid.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The grid was constructed without any column definitions.
    #[error("grid requires at least one column definition")]
    NoColumns,

    /// The configured children field name is empty.
    #[error("children field name must not be empty")]
    EmptyChildrenField,
}
