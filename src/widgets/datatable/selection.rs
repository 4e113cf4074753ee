//! Row selection state.
//!
//! Each rendered row is `unselected` or `selected`. Rows are found by item
//! identity through an index keyed by the item's `Arc` address, rebuilt on
//! every render pass. The per-row [`PartSet`] is the source of truth for style
//! hooks and is written to the rendered node by [`RowState::apply`].

use std::collections::HashMap;
use std::sync::Arc;

use super::style::{part, row_parity};
use crate::dom::node::NodeId;
use crate::dom::parts::PartSet;
use crate::dom::tree::Dom;
use crate::item::ItemRef;

/// Boolean attribute mirrored onto selected row nodes.
pub const SELECTED_ATTR: &str = "selected";

// ---------------------------------------------------------------------------
// RowState
// ---------------------------------------------------------------------------

/// One rendered row: its source item, node, style hooks and selection flag.
#[derive(Debug, Clone)]
pub struct RowState {
    /// The item the row was rendered from.
    pub item: ItemRef,
    /// The row node in the shadow tree.
    pub node: NodeId,
    parts: PartSet,
    selected: bool,
}

impl RowState {
    /// A fresh, unselected row at position `index`.
    pub fn new(item: ItemRef, node: NodeId, index: usize) -> Self {
        Self {
            item,
            node,
            parts: PartSet::from_iter([part::ROW, row_parity(index)]),
            selected: false,
        }
    }

    /// Whether the row is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The row's style hooks.
    pub fn parts(&self) -> &PartSet {
        &self.parts
    }

    /// Set (or flip, when `force` is `None`) the selection flag.
    ///
    /// Returns the new state.
    pub fn set_selected(&mut self, force: Option<bool>) -> bool {
        self.selected = force.unwrap_or(!self.selected);
        self.parts.toggle(part::SELECTED_ROW, Some(self.selected));
        self.selected
    }

    /// Write the parts and `selected` attribute to the row node.
    pub fn apply(&self, dom: &mut Dom) {
        if let Some(data) = dom.get_mut(self.node) {
            data.parts = self.parts.clone();
            data.toggle_attr(SELECTED_ATTR, self.selected);
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Selection state for the current render pass.
#[derive(Debug, Default)]
pub struct Selection {
    rows: Vec<RowState>,
    by_item: HashMap<usize, usize>,
    by_node: HashMap<NodeId, usize>,
}

fn identity(item: &ItemRef) -> usize {
    Arc::as_ptr(item) as usize
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows, dropping every selection and rebuilding the indexes.
    ///
    /// When an item appears more than once, the first row wins.
    pub fn reset(&mut self, rows: Vec<RowState>) {
        self.by_item.clear();
        self.by_node.clear();
        for (index, row) in rows.iter().enumerate() {
            self.by_item.entry(identity(&row.item)).or_insert(index);
            self.by_node.insert(row.node, index);
        }
        self.rows = rows;
    }

    /// Row position for `item`, by identity.
    pub fn position(&self, item: &ItemRef) -> Option<usize> {
        self.by_item.get(&identity(item)).copied()
    }

    /// Row position for a rendered row node.
    pub fn position_of_node(&self, node: NodeId) -> Option<usize> {
        self.by_node.get(&node).copied()
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<&RowState> {
        self.rows.get(index)
    }

    /// All rows in render order.
    pub fn rows(&self) -> &[RowState] {
        &self.rows
    }

    /// Set the row at `index` and write it to `dom`. Returns the new state.
    pub fn set(&mut self, index: usize, force: Option<bool>, dom: &mut Dom) -> Option<bool> {
        let row = self.rows.get_mut(index)?;
        let value = row.set_selected(force);
        row.apply(dom);
        Some(value)
    }

    /// Unselect every row and write the changes to `dom`.
    pub fn clear(&mut self, dom: &mut Dom) {
        for row in self.rows.iter_mut().filter(|r| r.is_selected()) {
            row.set_selected(Some(false));
            row.apply(dom);
        }
    }

    /// Whether the row for `item` is selected.
    pub fn is_selected(&self, item: &ItemRef) -> bool {
        self.position(item)
            .and_then(|i| self.rows.get(i))
            .is_some_and(RowState::is_selected)
    }

    /// Items of selected rows, in row order.
    pub fn selected(&self) -> Vec<ItemRef> {
        self.rows
            .iter()
            .filter(|r| r.is_selected())
            .map(|r| r.item.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::item::Item;

    struct Fixture {
        dom: Dom,
        items: Vec<ItemRef>,
        selection: Selection,
    }

    fn fixture(names: &[&str]) -> Fixture {
        let mut dom = Dom::new();
        let tbody = dom.insert(NodeData::new("tbody"));
        let items: Vec<ItemRef> = names
            .iter()
            .map(|n| Item::new().with("name", *n).into_ref())
            .collect();
        let rows = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let node = dom.insert_child(tbody, NodeData::new("tr"));
                let row = RowState::new(item.clone(), node, i);
                row.apply(&mut dom);
                row
            })
            .collect();
        let mut selection = Selection::new();
        selection.reset(rows);
        Fixture { dom, items, selection }
    }

    // ── RowState ─────────────────────────────────────────────────────

    #[test]
    fn new_row_parts() {
        let f = fixture(&["A", "B"]);
        assert_eq!(f.selection.rows()[0].parts().to_string(), "row even-row");
        assert_eq!(f.selection.rows()[1].parts().to_string(), "row odd-row");
        assert!(!f.selection.rows()[0].is_selected());
    }

    #[test]
    fn set_selected_toggles_part_and_attr() {
        let mut f = fixture(&["A"]);
        assert_eq!(f.selection.set(0, None, &mut f.dom), Some(true));
        let node = f.dom.get(f.selection.rows()[0].node).unwrap();
        assert_eq!(node.parts.to_string(), "row even-row selected-row");
        assert!(node.has_attr(SELECTED_ATTR));

        assert_eq!(f.selection.set(0, None, &mut f.dom), Some(false));
        let node = f.dom.get(f.selection.rows()[0].node).unwrap();
        assert_eq!(node.parts.to_string(), "row even-row");
        assert!(!node.has_attr(SELECTED_ATTR));
    }

    #[test]
    fn forced_set_is_idempotent() {
        let mut f = fixture(&["A"]);
        assert_eq!(f.selection.set(0, Some(true), &mut f.dom), Some(true));
        assert_eq!(f.selection.set(0, Some(true), &mut f.dom), Some(true));
        assert_eq!(f.selection.rows()[0].parts().len(), 3);
    }

    #[test]
    fn set_out_of_range() {
        let mut f = fixture(&["A"]);
        assert_eq!(f.selection.set(5, Some(true), &mut f.dom), None);
    }

    // ── Lookup ───────────────────────────────────────────────────────

    #[test]
    fn position_by_identity() {
        let f = fixture(&["A", "B"]);
        assert_eq!(f.selection.position(&f.items[1]), Some(1));
        let lookalike = Item::new().with("name", "B").into_ref();
        assert_eq!(f.selection.position(&lookalike), None);
    }

    #[test]
    fn position_of_node() {
        let f = fixture(&["A", "B"]);
        let node = f.selection.rows()[1].node;
        assert_eq!(f.selection.position_of_node(node), Some(1));
    }

    #[test]
    fn repeated_item_resolves_to_first_row() {
        let mut dom = Dom::new();
        let item = Item::new().with("name", "A").into_ref();
        let a = dom.insert(NodeData::new("tr"));
        let b = dom.insert(NodeData::new("tr"));
        let mut selection = Selection::new();
        selection.reset(vec![
            RowState::new(item.clone(), a, 0),
            RowState::new(item.clone(), b, 1),
        ]);
        assert_eq!(selection.position(&item), Some(0));
    }

    // ── Queries ──────────────────────────────────────────────────────

    #[test]
    fn selected_in_row_order() {
        let mut f = fixture(&["A", "B", "C"]);
        f.selection.set(2, Some(true), &mut f.dom);
        f.selection.set(0, Some(true), &mut f.dom);
        let names: Vec<String> = f
            .selection
            .selected()
            .iter()
            .map(|i| i.field_text("name"))
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(f.selection.is_selected(&f.items[2]));
        assert!(!f.selection.is_selected(&f.items[1]));
    }

    #[test]
    fn clear_unselects_all() {
        let mut f = fixture(&["A", "B"]);
        f.selection.set(0, Some(true), &mut f.dom);
        f.selection.set(1, Some(true), &mut f.dom);
        f.selection.clear(&mut f.dom);
        assert!(f.selection.selected().is_empty());
        assert!(f.dom.query_by_part(part::SELECTED_ROW).is_empty());
    }

    #[test]
    fn reset_drops_selection() {
        let mut f = fixture(&["A"]);
        f.selection.set(0, Some(true), &mut f.dom);
        f.selection.reset(Vec::new());
        assert!(f.selection.selected().is_empty());
        assert_eq!(f.selection.position(&f.items[0]), None);
    }
}
