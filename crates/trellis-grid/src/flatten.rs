//! Row flattening.
//!
//! This module turns the hierarchical dataset into the ordered descriptor
//! sequence one render pass consumes. For each record, in sibling order, the
//! flattener resolves the row key, resolves the region's leaf columns, emits
//! a [`RowDescriptor`], and asks the pass's [`RowExpander`] for descendant
//! descriptors to splice in immediately after the parent. Children therefore
//! always precede the next sibling, whatever the expansion depth.
//!
//! Flattening is a pure, synchronous, call-stack-bound traversal: no
//! suspension points, no internal mutation of the dataset, recursion depth
//! equal to tree depth. Callers with pathologically deep trees self-limit.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::column::{ColumnManager, ColumnRef, Region};
use crate::config::GridConfig;
use crate::expand::{ExpandContext, RowExpander, Traversal};
use crate::key::{KeyResolver, RowKey};
use crate::record::RowRecord;

/// The flattened, render-ready representation of one visible row.
///
/// Immutable once emitted; the next flatten pass replaces the whole
/// sequence. The record is borrowed from the caller's dataset.
pub struct RowDescriptor<'a, R> {
    /// Stable identity of this row within the pass.
    pub key: RowKey,
    /// Nesting depth; equals `ancestor_keys.len()`.
    pub depth: usize,
    /// The record this row renders.
    pub record: &'a R,
    /// Key chain from the root down to this row's parent, shared across
    /// siblings.
    pub ancestor_keys: Arc<[RowKey]>,
    /// The leaf columns this row's cells render, scoped to the pass region.
    pub leaf_columns: Vec<ColumnRef>,
    /// The region this descriptor belongs to.
    pub region: Region,
    /// Styling hint from the configured row class function.
    pub row_class: Option<String>,
}

impl<'a, R> Clone for RowDescriptor<'a, R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            depth: self.depth,
            record: self.record,
            ancestor_keys: self.ancestor_keys.clone(),
            leaf_columns: self.leaf_columns.clone(),
            region: self.region,
            row_class: self.row_class.clone(),
        }
    }
}

impl<'a, R> fmt::Debug for RowDescriptor<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowDescriptor")
            .field("key", &self.key)
            .field("depth", &self.depth)
            .field("ancestor_keys", &self.ancestor_keys)
            .field("region", &self.region)
            .field("columns", &self.leaf_columns.len())
            .finish_non_exhaustive()
    }
}

/// One flatten pass over the dataset for a single region.
///
/// Borrowed from a [`Grid`](crate::Grid) via
/// [`Grid::flattener`](crate::Grid::flattener), or built directly for
/// standalone use. A grid with pinned columns runs up to three passes over
/// the same records, one per region; the passes share only the key resolver
/// semantics and the hover store.
pub struct RowFlattener<'g, R> {
    config: &'g GridConfig<R>,
    columns: &'g ColumnManager,
    region: Region,
    resolver: KeyResolver<R>,
}

impl<'g, R: RowRecord> RowFlattener<'g, R> {
    /// Creates a pass over `columns` for `region`.
    pub fn new(config: &'g GridConfig<R>, columns: &'g ColumnManager, region: Region) -> Self {
        Self {
            resolver: config.key_resolver(),
            config,
            columns,
            region,
        }
    }

    /// The region this pass renders.
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    pub(crate) fn children_field(&self) -> &str {
        self.config.children_field()
    }

    /// Flattens `records` into this pass's descriptor sequence.
    ///
    /// A fixed-region pass over a tree with no leaves pinned to that side
    /// renders nothing: the result is empty, not an error.
    pub fn flatten<'a>(
        &self,
        records: &'a [R],
        expander: &dyn RowExpander<R>,
    ) -> Vec<RowDescriptor<'a, R>> {
        if self.region != Region::Center && self.columns.leaf_columns_for(self.region).is_empty() {
            tracing::debug!(
                target: "trellis_grid::flatten",
                region = ?self.region,
                "no leaf columns pinned to this region, pass renders nothing"
            );
            return Vec::new();
        }

        let root_chain: Arc<[RowKey]> = Vec::new().into();
        let mut out = Vec::new();
        self.flatten_level(records, 0, root_chain, expander, &mut out);
        out
    }

    pub(crate) fn flatten_level<'a>(
        &self,
        records: &'a [R],
        depth: usize,
        ancestor_keys: Arc<[RowKey]>,
        expander: &dyn RowExpander<R>,
        out: &mut Vec<RowDescriptor<'a, R>>,
    ) {
        let mut sibling_keys: HashSet<RowKey> = HashSet::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let key = self.resolver.resolve(record, index);
            if !sibling_keys.insert(key.clone()) {
                tracing::warn!(
                    target: "trellis_grid::flatten",
                    %key,
                    depth,
                    "duplicate row key among siblings; hover and expansion \
                     fan-out for this key is ambiguous"
                );
            }

            let leaf_columns = self.columns.leaf_columns_for(self.region);
            let row_class = self
                .config
                .row_class()
                .map(|row_class| row_class(record, index, depth));

            out.push(RowDescriptor {
                key: key.clone(),
                depth,
                record,
                ancestor_keys: ancestor_keys.clone(),
                leaf_columns,
                region: self.region,
                row_class,
            });

            let ctx = ExpandContext {
                record,
                index,
                depth,
                region: self.region,
                parent_key: key,
                ancestor_keys: ancestor_keys.clone(),
            };
            let traversal = Traversal {
                flattener: self,
                expander,
            };
            let descendants = expander.expand_rows(&traversal, ctx);
            if !descendants.is_empty() {
                out.extend(descendants);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnNode, FixedSide};
    use crate::expand::ExpandedRows;

    struct Item {
        id: i64,
        children: Vec<Item>,
    }

    impl Item {
        fn leaf(id: i64) -> Self {
            Self {
                id,
                children: Vec::new(),
            }
        }

        fn branch(id: i64, children: Vec<Item>) -> Self {
            Self { id, children }
        }
    }

    impl RowRecord for Item {
        fn child_rows(&self, field: &str) -> Option<&[Item]> {
            match field {
                "children" => Some(&self.children),
                _ => None,
            }
        }
    }

    /// Expander that always reveals every child, regardless of any state.
    struct ExpandAll;

    impl<R: RowRecord> RowExpander<R> for ExpandAll {
        fn expand_rows<'a>(
            &self,
            traversal: &Traversal<'_, '_, R>,
            ctx: ExpandContext<'a, R>,
        ) -> Vec<RowDescriptor<'a, R>> {
            match traversal.children_of(ctx.record) {
                Some(children) if !children.is_empty() => traversal.descend(children, &ctx),
                _ => Vec::new(),
            }
        }
    }

    fn keyed_config() -> GridConfig<Item> {
        GridConfig::builder()
            .with_key_fn(|item: &Item, _| RowKey::Int(item.id))
            .build()
            .unwrap()
    }

    fn plain_columns() -> ColumnManager {
        ColumnManager::new(vec![ColumnNode::leaf("id"), ColumnNode::leaf("name")])
    }

    fn mixed_columns() -> ColumnManager {
        ColumnManager::new(vec![
            ColumnNode::leaf("id").with_fixed(FixedSide::Left),
            ColumnNode::leaf("name"),
            ColumnNode::leaf("actions").with_fixed(FixedSide::Right),
        ])
    }

    fn sample_tree() -> Vec<Item> {
        vec![
            Item::branch(1, vec![Item::leaf(2), Item::leaf(3)]),
            Item::leaf(4),
        ]
    }

    fn keys(rows: &[RowDescriptor<'_, Item>]) -> Vec<RowKey> {
        rows.iter().map(|row| row.key.clone()).collect()
    }

    #[test]
    fn test_expanded_scenario_order_depth_ancestors() {
        let config = keyed_config();
        let columns = plain_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);
        let data = sample_tree();

        let rows = flattener.flatten(&data, &ExpandAll);

        assert_eq!(
            keys(&rows),
            vec![RowKey::Int(1), RowKey::Int(2), RowKey::Int(3), RowKey::Int(4)]
        );
        assert_eq!(
            rows.iter().map(|r| r.depth).collect::<Vec<_>>(),
            vec![0, 1, 1, 0]
        );

        assert!(rows[0].ancestor_keys.is_empty());
        assert_eq!(&*rows[1].ancestor_keys, &[RowKey::Int(1)]);
        assert_eq!(&*rows[2].ancestor_keys, &[RowKey::Int(1)]);
        assert!(rows[3].ancestor_keys.is_empty());
    }

    #[test]
    fn test_every_node_emits_exactly_one_descriptor() {
        let config = keyed_config();
        let columns = plain_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);

        let data = vec![
            Item::branch(
                1,
                vec![
                    Item::branch(2, vec![Item::leaf(3), Item::leaf(4)]),
                    Item::leaf(5),
                ],
            ),
            Item::branch(6, vec![Item::leaf(7)]),
        ];

        let rows = flattener.flatten(&data, &ExpandAll);

        // 7 nodes in, 7 descriptors out, in document order.
        assert_eq!(
            keys(&rows),
            (1..=7).map(RowKey::Int).collect::<Vec<_>>()
        );

        // Every descendant's index falls between its parent and the parent's
        // next sibling.
        let index_of = |id: i64| {
            rows.iter()
                .position(|row| row.key == RowKey::Int(id))
                .unwrap()
        };
        assert!(index_of(1) < index_of(2));
        assert!(index_of(2) < index_of(3));
        assert!(index_of(4) < index_of(5));
        assert!(index_of(5) < index_of(6));
    }

    #[test]
    fn test_ancestor_chain_extends_parent_chain() {
        let config = keyed_config();
        let columns = plain_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);

        let data = vec![Item::branch(
            1,
            vec![Item::branch(2, vec![Item::leaf(3)])],
        )];

        let rows = flattener.flatten(&data, &ExpandAll);

        for row in &rows {
            assert_eq!(row.ancestor_keys.len(), row.depth);
        }
        assert_eq!(&*rows[2].ancestor_keys, &[RowKey::Int(1), RowKey::Int(2)]);

        // The child's chain is the parent's chain plus the parent's key.
        let mut expected = rows[1].ancestor_keys.to_vec();
        expected.push(rows[1].key.clone());
        assert_eq!(&*rows[2].ancestor_keys, expected.as_slice());
    }

    #[test]
    fn test_collapsed_rows_stay_hidden() {
        let config = keyed_config();
        let columns = plain_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);
        let data = sample_tree();

        let expanded = ExpandedRows::new();
        let rows = flattener.flatten(&data, &expanded);
        assert_eq!(keys(&rows), vec![RowKey::Int(1), RowKey::Int(4)]);

        expanded.expand(RowKey::Int(1));
        let rows = flattener.flatten(&data, &expanded);
        assert_eq!(
            keys(&rows),
            vec![RowKey::Int(1), RowKey::Int(2), RowKey::Int(3), RowKey::Int(4)]
        );
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let config = keyed_config();
        let columns = mixed_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);
        let data = sample_tree();

        let first = flattener.flatten(&data, &ExpandAll);
        let second = flattener.flatten(&data, &ExpandAll);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.key, b.key);
            assert_eq!(a.depth, b.depth);
            assert_eq!(a.leaf_columns.len(), b.leaf_columns.len());
            // Column identity is shared across passes over an unchanged tree.
            for (col_a, col_b) in a.leaf_columns.iter().zip(b.leaf_columns.iter()) {
                assert!(Arc::ptr_eq(col_a, col_b));
            }
        }
    }

    #[test]
    fn test_positional_keys_without_key_fn() {
        let config = GridConfig::<Item>::default();
        let columns = plain_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);
        let data = sample_tree();

        let rows = flattener.flatten(&data, &ExpandAll);

        // Children restart positional numbering at their own depth.
        assert_eq!(
            keys(&rows),
            vec![
                RowKey::Index(0),
                RowKey::Index(0),
                RowKey::Index(1),
                RowKey::Index(1),
            ]
        );
        // The ancestor chain disambiguates the repeats across depths.
        assert_eq!(&*rows[1].ancestor_keys, &[RowKey::Index(0)]);
        assert!(rows[3].ancestor_keys.is_empty());
    }

    #[test]
    fn test_duplicate_sibling_keys_flatten_without_panic() {
        let config = GridConfig::<Item>::builder()
            .with_key_fn(|_, _| RowKey::Int(0))
            .build()
            .unwrap();
        let columns = plain_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);
        let data = vec![Item::leaf(1), Item::leaf(2), Item::leaf(3)];

        let rows = flattener.flatten(&data, &ExpandAll);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.key == RowKey::Int(0)));
    }

    #[test]
    fn test_fixed_pass_scopes_leaf_columns() {
        let config = keyed_config();
        let columns = mixed_columns();
        let data = sample_tree();

        let center = RowFlattener::new(&config, &columns, Region::Center);
        let left = RowFlattener::new(&config, &columns, Region::FixedLeft);
        let right = RowFlattener::new(&config, &columns, Region::FixedRight);

        let center_rows = center.flatten(&data, &ExpandAll);
        let left_rows = left.flatten(&data, &ExpandAll);
        let right_rows = right.flatten(&data, &ExpandAll);

        // Structurally parallel passes: same rows, region-scoped columns.
        assert_eq!(keys(&center_rows), keys(&left_rows));
        assert_eq!(keys(&center_rows), keys(&right_rows));

        assert_eq!(center_rows[0].leaf_columns.len(), 3);
        assert_eq!(left_rows[0].leaf_columns.len(), 1);
        assert_eq!(left_rows[0].leaf_columns[0].key(), "id");
        assert_eq!(right_rows[0].leaf_columns.len(), 1);
        assert_eq!(right_rows[0].leaf_columns[0].key(), "actions");

        assert!(left_rows.iter().all(|row| row.region == Region::FixedLeft));
    }

    #[test]
    fn test_fixed_pass_without_pinned_columns_is_empty() {
        let config = keyed_config();
        let columns = plain_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::FixedLeft);
        let data = sample_tree();

        let rows = flattener.flatten(&data, &ExpandAll);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_row_class_rides_on_descriptors() {
        let config = GridConfig::<Item>::builder()
            .with_key_fn(|item: &Item, _| RowKey::Int(item.id))
            .with_row_class(|_, index, depth| format!("row-{index}-depth-{depth}"))
            .build()
            .unwrap();
        let columns = plain_columns();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);
        let data = sample_tree();

        let rows = flattener.flatten(&data, &ExpandAll);
        assert_eq!(rows[0].row_class.as_deref(), Some("row-0-depth-0"));
        assert_eq!(rows[1].row_class.as_deref(), Some("row-0-depth-1"));
        assert_eq!(rows[3].row_class.as_deref(), Some("row-1-depth-0"));
    }

    #[test]
    fn test_custom_children_field() {
        struct Node {
            id: i64,
            items: Vec<Node>,
        }

        impl RowRecord for Node {
            fn child_rows(&self, field: &str) -> Option<&[Node]> {
                match field {
                    "items" => Some(&self.items),
                    _ => None,
                }
            }
        }

        struct All;
        impl RowExpander<Node> for All {
            fn expand_rows<'a>(
                &self,
                traversal: &Traversal<'_, '_, Node>,
                ctx: ExpandContext<'a, Node>,
            ) -> Vec<RowDescriptor<'a, Node>> {
                match traversal.children_of(ctx.record) {
                    Some(children) if !children.is_empty() => traversal.descend(children, &ctx),
                    _ => Vec::new(),
                }
            }
        }

        let data = vec![Node {
            id: 1,
            items: vec![Node {
                id: 2,
                items: Vec::new(),
            }],
        }];
        let columns = plain_columns();

        // Pointing at the wrong field reveals nothing.
        let config = GridConfig::<Node>::builder()
            .with_key_fn(|node: &Node, _| RowKey::Int(node.id))
            .build()
            .unwrap();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);
        assert_eq!(flattener.flatten(&data, &All).len(), 1);

        let config = GridConfig::<Node>::builder()
            .with_children_field("items")
            .with_key_fn(|node: &Node, _| RowKey::Int(node.id))
            .build()
            .unwrap();
        let flattener = RowFlattener::new(&config, &columns, Region::Center);
        assert_eq!(flattener.flatten(&data, &All).len(), 2);
    }
}
