//! Column definitions and per-region leaf selection.
//!
//! Columns form a tree: group nodes carry header nesting, leaf nodes render
//! cells. A node may be pinned to the left or right edge of the grid; the pin
//! is inherited by every descendant that does not declare its own. The
//! [`ColumnManager`] owns the tree and answers the queries the flattener and
//! grid facade need: the ordered leaf projection for each render region, and
//! whether any column is pinned at all.

use std::sync::Arc;

use parking_lot::RwLock;

/// Which fixed edge a column (or column group) is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixedSide {
    /// Not pinned; rendered in the scrolling center region.
    #[default]
    None,
    /// Pinned to the left edge.
    Left,
    /// Pinned to the right edge.
    Right,
}

/// Identity of one render pass over the dataset.
///
/// A grid with pinned columns renders up to three structurally parallel row
/// sequences, one per region; each carries only that region's leaf columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The scrolling pass carrying every leaf column.
    Center,
    /// The pass carrying only left-pinned leaves.
    FixedLeft,
    /// The pass carrying only right-pinned leaves.
    FixedRight,
}

/// A node in the column definition tree.
///
/// Nodes with children are header groups; childless nodes are leaves and
/// render cells. Built with [`ColumnNode::leaf`] / [`ColumnNode::group`] and
/// the `with_*` setters.
///
/// # Example
///
/// ```
/// use trellis_grid::{ColumnNode, FixedSide};
///
/// let columns = vec![
///     ColumnNode::leaf("id").with_fixed(FixedSide::Left),
///     ColumnNode::group("name", vec![
///         ColumnNode::leaf("first"),
///         ColumnNode::leaf("last"),
///     ]).with_title("Name"),
///     ColumnNode::leaf("actions").with_fixed(FixedSide::Right),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNode {
    key: String,
    title: Option<String>,
    width: Option<f32>,
    fixed: FixedSide,
    children: Vec<ColumnNode>,
}

impl ColumnNode {
    /// Creates a leaf column.
    pub fn leaf(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            width: None,
            fixed: FixedSide::None,
            children: Vec::new(),
        }
    }

    /// Creates a header group over `children`.
    pub fn group(key: impl Into<String>, children: Vec<ColumnNode>) -> Self {
        Self {
            children,
            ..Self::leaf(key)
        }
    }

    /// Sets the header title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the preferred cell width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Pins this node (and, by inheritance, its subtree) to a fixed edge.
    pub fn with_fixed(mut self, fixed: FixedSide) -> Self {
        self.fixed = fixed;
        self
    }

    /// The column key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header title, if one was set.
    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The preferred cell width, if one was set.
    #[inline]
    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// The pin declared on this node itself (not inherited).
    #[inline]
    pub fn fixed(&self) -> FixedSide {
        self.fixed
    }

    /// Child columns of a header group; empty for leaves.
    #[inline]
    pub fn children(&self) -> &[ColumnNode] {
        &self.children
    }

    /// Returns `true` if this node renders a cell (has no children).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Identity-stable handle to a leaf column.
///
/// The manager hands out the same `Arc`s for as long as the tree is
/// unchanged, so downstream renderers can structural-share on pointer
/// identity.
pub type ColumnRef = Arc<ColumnNode>;

/// The three leaf projections, built in one walk so a leaf that appears in a
/// fixed set is the same `Arc` as its entry in the full set.
#[derive(Clone)]
struct Leaves {
    all: Vec<ColumnRef>,
    left: Vec<ColumnRef>,
    right: Vec<ColumnRef>,
}

/// Owns the column tree and resolves the ordered leaf set for each region.
///
/// Queries are memoized; [`ColumnManager::reset`] replaces the tree and drops
/// the memo. Calling a query twice on an unchanged tree returns the same
/// `Arc`s in the same order.
pub struct ColumnManager {
    columns: RwLock<Vec<ColumnNode>>,
    leaves: RwLock<Option<Leaves>>,
}

impl ColumnManager {
    /// Creates a manager over the given column tree.
    pub fn new(columns: Vec<ColumnNode>) -> Self {
        Self {
            columns: RwLock::new(columns),
            leaves: RwLock::new(None),
        }
    }

    /// Replaces the column tree and invalidates the cached projections.
    pub fn reset(&self, columns: Vec<ColumnNode>) {
        *self.columns.write() = columns;
        *self.leaves.write() = None;
    }

    /// Every leaf column in tree order (the center-region projection).
    pub fn leaf_columns(&self) -> Vec<ColumnRef> {
        self.leaves().all
    }

    /// Leaves whose nearest pin-carrying ancestor (the leaf included) is
    /// pinned left, in tree order.
    pub fn left_leaf_columns(&self) -> Vec<ColumnRef> {
        self.leaves().left
    }

    /// Leaves whose nearest pin-carrying ancestor (the leaf included) is
    /// pinned right, in tree order.
    pub fn right_leaf_columns(&self) -> Vec<ColumnRef> {
        self.leaves().right
    }

    /// The leaf projection for one render region.
    pub fn leaf_columns_for(&self, region: Region) -> Vec<ColumnRef> {
        match region {
            Region::Center => self.leaf_columns(),
            Region::FixedLeft => self.left_leaf_columns(),
            Region::FixedRight => self.right_leaf_columns(),
        }
    }

    /// Returns `true` if any leaf is pinned to either edge.
    pub fn is_any_fixed(&self) -> bool {
        let leaves = self.leaves();
        !leaves.left.is_empty() || !leaves.right.is_empty()
    }

    /// Returns `true` if any leaf is pinned left.
    pub fn is_any_fixed_left(&self) -> bool {
        !self.leaves().left.is_empty()
    }

    /// Returns `true` if any leaf is pinned right.
    pub fn is_any_fixed_right(&self) -> bool {
        !self.leaves().right.is_empty()
    }

    fn leaves(&self) -> Leaves {
        if let Some(leaves) = self.leaves.read().as_ref() {
            return leaves.clone();
        }

        let built = Self::collect_leaves(&self.columns.read());
        *self.leaves.write() = Some(built.clone());
        built
    }

    fn collect_leaves(columns: &[ColumnNode]) -> Leaves {
        let mut leaves = Leaves {
            all: Vec::new(),
            left: Vec::new(),
            right: Vec::new(),
        };
        Self::walk(columns, FixedSide::None, &mut leaves);
        leaves
    }

    fn walk(columns: &[ColumnNode], inherited: FixedSide, out: &mut Leaves) {
        for node in columns {
            // The nearest pin-carrying node wins, the leaf itself included.
            let side = if node.fixed() == FixedSide::None {
                inherited
            } else {
                node.fixed()
            };

            if node.is_leaf() {
                let leaf: ColumnRef = Arc::new(node.clone());
                out.all.push(leaf.clone());
                match side {
                    FixedSide::Left => out.left.push(leaf),
                    FixedSide::Right => out.right.push(leaf),
                    FixedSide::None => {}
                }
            } else {
                Self::walk(node.children(), side, out);
            }
        }
    }
}

static_assertions::assert_impl_all!(ColumnManager: Send, Sync);
