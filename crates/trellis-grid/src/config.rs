//! Grid configuration.
//!
//! Everything the flattener needs to know about the caller's dataset travels
//! in one value passed down the call chain: the children field name, the key
//! function, and the optional row class function. There is no ambient
//! context to reach into.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::key::{KeyResolver, RowKey, RowKeyFn};

/// Caller-supplied row styling hint: `(record, sibling_index, depth) -> class`.
pub type RowClassFn<R> = Arc<dyn Fn(&R, usize, usize) -> String + Send + Sync>;

/// Configuration for a grid over records of type `R`.
///
/// Built with [`GridConfig::builder`]; the default configuration reads
/// children from a field named `"children"` and keys rows positionally.
///
/// # Example
///
/// ```
/// use trellis_grid::{GridConfig, RowKey};
///
/// struct Account { id: i64, sub_accounts: Vec<Account> }
///
/// let config: trellis_grid::GridConfig<Account> = GridConfig::builder()
///     .with_children_field("sub_accounts")
///     .with_key_fn(|account: &Account, _| RowKey::Int(account.id))
///     .build()
///     .unwrap();
/// ```
pub struct GridConfig<R> {
    children_field: String,
    key_fn: Option<RowKeyFn<R>>,
    row_class: Option<RowClassFn<R>>,
}

impl<R> std::fmt::Debug for GridConfig<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridConfig")
            .field("children_field", &self.children_field)
            .field("key_fn", &self.key_fn.as_ref().map(|_| "<fn>"))
            .field("row_class", &self.row_class.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl<R> GridConfig<R> {
    /// Starts building a configuration.
    pub fn builder() -> GridConfigBuilder<R> {
        GridConfigBuilder::new()
    }

    /// The record field holding child rows.
    #[inline]
    pub fn children_field(&self) -> &str {
        &self.children_field
    }

    /// The caller key function, if one was configured.
    #[inline]
    pub fn key_fn(&self) -> Option<&RowKeyFn<R>> {
        self.key_fn.as_ref()
    }

    /// The row class function, if one was configured.
    #[inline]
    pub fn row_class(&self) -> Option<&RowClassFn<R>> {
        self.row_class.as_ref()
    }

    pub(crate) fn key_resolver(&self) -> KeyResolver<R> {
        KeyResolver::new(self.key_fn.clone())
    }
}

impl<R> Default for GridConfig<R> {
    fn default() -> Self {
        Self {
            children_field: "children".to_string(),
            key_fn: None,
            row_class: None,
        }
    }
}

impl<R> Clone for GridConfig<R> {
    fn clone(&self) -> Self {
        Self {
            children_field: self.children_field.clone(),
            key_fn: self.key_fn.clone(),
            row_class: self.row_class.clone(),
        }
    }
}

/// Builder for [`GridConfig`].
pub struct GridConfigBuilder<R> {
    children_field: String,
    key_fn: Option<RowKeyFn<R>>,
    row_class: Option<RowClassFn<R>>,
}

impl<R> GridConfigBuilder<R> {
    fn new() -> Self {
        Self {
            children_field: "children".to_string(),
            key_fn: None,
            row_class: None,
        }
    }

    /// Names the record field holding child rows.
    pub fn with_children_field(mut self, field: impl Into<String>) -> Self {
        self.children_field = field.into();
        self
    }

    /// Supplies the key function overriding positional keying.
    pub fn with_key_fn<F>(mut self, key_fn: F) -> Self
    where
        F: Fn(&R, usize) -> RowKey + Send + Sync + 'static,
    {
        self.key_fn = Some(Arc::new(key_fn));
        self
    }

    /// Supplies a row class function; its result rides on each descriptor as
    /// a styling hint for the rendering layer.
    pub fn with_row_class<F>(mut self, row_class: F) -> Self
    where
        F: Fn(&R, usize, usize) -> String + Send + Sync + 'static,
    {
        self.row_class = Some(Arc::new(row_class));
        self
    }

    /// Validates and produces the configuration.
    pub fn build(self) -> Result<GridConfig<R>> {
        if self.children_field.is_empty() {
            return Err(Error::EmptyChildrenField);
        }

        Ok(GridConfig {
            children_field: self.children_field,
            key_fn: self.key_fn,
            row_class: self.row_class,
        })
    }
}

impl<R> Default for GridConfigBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
