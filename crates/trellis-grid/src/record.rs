//! Dataset contract.
//!
//! The engine never owns row data. Records live in the caller's dataset and
//! the flattener only reads them, borrowing each record into the descriptor
//! it emits.

/// A row record that may hold child records under a named field.
///
/// The `field` argument is the configured children field name (see
/// [`GridConfig::children_field`](crate::GridConfig)); a record that does not
/// recognize the name, or has no children, returns `None`. Children must be
/// stored in the order they should render.
///
/// # Example
///
/// ```
/// use trellis_grid::RowRecord;
///
/// struct Account {
///     name: String,
///     sub_accounts: Vec<Account>,
/// }
///
/// impl RowRecord for Account {
///     fn child_rows(&self, field: &str) -> Option<&[Account]> {
///         match field {
///             "sub_accounts" => Some(&self.sub_accounts),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait RowRecord: Sized {
    /// Returns the child records stored under `field`, if any.
    fn child_rows(&self, field: &str) -> Option<&[Self]>;
}
