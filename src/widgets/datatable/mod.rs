//! DataTable widget: declarative columns, item rows, row selection.
//!
//! The host element's children declare the columns. A child's `slot`
//! attribute names the item field it shows; a child whose slot ends in
//! `:header` replaces the plain-text header of the matching column.
//!
//! ```text
//! <nega-datatable>
//!   <span slot="name" nega-title="Name"></span>
//!   <a slot="url" slot-attr="href">open</a>
//!   <user-card nega-item></user-card>
//! </nega-datatable>
//! ```
//!
//! Replacing the item list rebuilds every row and clears selection. Clicking a
//! row emits [`ClickItem`] on the host element only; selection changes emit
//! [`Select`], which bubbles to the host page.

pub mod columns;
pub mod render;
pub mod selection;
pub mod style;

use std::any::Any;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::event::handler::EventDispatcher;
use crate::event::message::{ClickItem, Envelope, Select};
use crate::item::ItemRef;
use crate::registry::{ElementRegistry, RegistryError};
use crate::widget::Widget;

pub use columns::{Binding, Column, Columns};
pub use selection::{RowState, Selection};
pub use style::{StyleVars, TableConfig};

/// Custom element name.
pub const TAG_NAME: &str = "nega-datatable";

/// Tag of the shadow tree's root node.
pub const SHADOW_ROOT_TAG: &str = "#shadow-root";

/// Define `nega-datatable` in `registry` with the given config.
pub fn register(registry: &mut ElementRegistry, config: TableConfig) -> Result<(), RegistryError> {
    registry.define(TAG_NAME, move |light: &Dom, host: NodeId| -> Box<dyn Widget> {
        Box::new(DataTable::with_config(light, host, config.clone()))
    })
}

// ---------------------------------------------------------------------------
// DataTable
// ---------------------------------------------------------------------------

/// A data table bound to one host element.
#[derive(Debug)]
pub struct DataTable {
    host: NodeId,
    config: TableConfig,
    columns: Columns,
    items: Vec<ItemRef>,
    shadow: Dom,
    shadow_root: NodeId,
    table: Option<NodeId>,
    selection: Selection,
    outbox: EventDispatcher,
}

impl DataTable {
    /// Create a table for `host`, resolving its declared children in `light`.
    pub fn new(light: &Dom, host: NodeId) -> Self {
        Self::with_config(light, host, TableConfig::default())
    }

    /// Create a table with an explicit config.
    pub fn with_config(light: &Dom, host: NodeId, config: TableConfig) -> Self {
        let mut shadow = Dom::new();
        let shadow_root = shadow.insert(NodeData::new(SHADOW_ROOT_TAG));
        let mut table = Self {
            host,
            config,
            columns: Columns::resolve(light, host),
            items: Vec::new(),
            shadow,
            shadow_root,
            table: None,
            selection: Selection::new(),
            outbox: EventDispatcher::new(),
        };
        table.render();
        table
    }

    /// The host element this table is bound to.
    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Resolved body columns, in declaration order.
    pub fn columns(&self) -> &[Column] {
        self.columns.columns()
    }

    /// Column and header templates.
    pub fn templates(&self) -> &Columns {
        &self.columns
    }

    /// The bound item list.
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Replace the item list. Rebuilds every row; selection is cleared silently.
    pub fn set_items(&mut self, items: Vec<ItemRef>) {
        self.items = items;
        self.render();
    }

    pub fn row_count(&self) -> usize {
        self.selection.rows().len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The rendered `<table>` node.
    pub fn table_node(&self) -> Option<NodeId> {
        self.table
    }

    /// Rendered row nodes, in item order.
    pub fn row_nodes(&self) -> Vec<NodeId> {
        self.selection.rows().iter().map(|r| r.node).collect()
    }

    /// The `<td>` at (`row`, `column`).
    pub fn cell(&self, row: usize, column: usize) -> Option<NodeId> {
        let row = self.selection.row(row)?;
        self.shadow.children(row.node).get(column).copied()
    }

    /// The `<th>` for `column`.
    pub fn header_cell(&self, column: usize) -> Option<NodeId> {
        let table = self.table?;
        let thead = *self.shadow.children(table).first()?;
        let header_row = *self.shadow.children(thead).first()?;
        self.shadow.children(header_row).get(column).copied()
    }

    /// Handle a click on a node of the shadow tree.
    ///
    /// Resolves the nearest rendered body row, starting at `target` itself,
    /// and emits [`ClickItem`] on the host element. Row-like nodes inside a
    /// column template are passed over. Returns `false` when the target is
    /// outside the body rows or belongs to a previous render.
    pub fn click(&mut self, target: NodeId) -> bool {
        let Some(index) = std::iter::once(target)
            .chain(self.shadow.ancestors(target))
            .find_map(|node| self.selection.position_of_node(node))
        else {
            log::trace!("click outside body rows ignored");
            return false;
        };
        let Some(row) = self.selection.row(index) else {
            return false;
        };
        let message = ClickItem {
            value: row.item.clone(),
            target,
        };
        self.outbox.push(Envelope::new(message, self.host));
        true
    }

    /// Select the row for `item`. `None` when no row renders `item`.
    pub fn select(&mut self, item: &ItemRef) -> Option<bool> {
        self.toggle(item, Some(true))
    }

    /// Deselect the row for `item`. `None` when no row renders `item`.
    pub fn deselect(&mut self, item: &ItemRef) -> Option<bool> {
        self.toggle(item, Some(false))
    }

    /// Flip the row for `item`, or force it with `force`.
    ///
    /// A matching row always emits one [`Select`], even if its state did not
    /// change. Returns the row's new state, or `None` with no event when no
    /// row renders `item`.
    pub fn toggle(&mut self, item: &ItemRef, force: Option<bool>) -> Option<bool> {
        let Some(index) = self.selection.position(item) else {
            log::trace!("toggle ignored: item is not rendered");
            return None;
        };
        let value = self.selection.set(index, force, &mut self.shadow)?;
        log::trace!("row {index} selected: {value}");

        let message = Select {
            item: item.clone(),
            value,
        };
        self.outbox.push(Envelope::bubbling(message, self.host));
        Some(value)
    }

    /// Unselect every row without emitting events.
    pub fn clear(&mut self) {
        self.selection.clear(&mut self.shadow);
    }

    /// Items of selected rows, in row order.
    pub fn selected(&self) -> Vec<ItemRef> {
        self.selection.selected()
    }

    /// Whether the row for `item` is selected.
    pub fn is_selected(&self, item: &ItemRef) -> bool {
        self.selection.is_selected(item)
    }
}

impl Widget for DataTable {
    fn tag_name(&self) -> &str {
        TAG_NAME
    }

    fn default_css(&self) -> String {
        self.config.style.to_css()
    }

    /// Discard the previous shadow content and rebuild it from the items.
    fn render(&mut self) {
        self.shadow.clear_children(self.shadow_root);

        let css = self.default_css();
        self.shadow
            .insert_child(self.shadow_root, NodeData::new("style").with_text(css));
        let table = self.shadow.insert_child(
            self.shadow_root,
            NodeData::new(render::TABLE_TAG)
                .with_attr("border", "0")
                .with_attr("cellspacing", "0"),
        );
        let thead = self
            .shadow
            .insert_child(table, NodeData::new(render::HEAD_TAG));
        render::build_header(&mut self.shadow, thead, &self.columns);

        let tbody = self
            .shadow
            .insert_child(table, NodeData::new(render::BODY_TAG));
        let rows = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                render::build_row(&mut self.shadow, tbody, index, item, &self.columns)
            })
            .collect();
        self.selection.reset(rows);
        self.table = Some(table);

        log::debug!(
            "rendered {} row(s) x {} column(s)",
            self.items.len(),
            self.columns.len()
        );
    }

    fn shadow(&self) -> &Dom {
        &self.shadow
    }

    fn take_events(&mut self) -> Vec<Envelope> {
        self.outbox.drain()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::markup::parse_fragment;
    use crate::widgets::datatable::style::part;

    fn table(markup: &str) -> DataTable {
        let dom = parse_fragment(&format!("<nega-datatable>{markup}</nega-datatable>")).unwrap();
        let host = dom.children(dom.root().unwrap())[0];
        DataTable::new(&dom, host)
    }

    fn items(names: &[&str]) -> Vec<ItemRef> {
        names
            .iter()
            .map(|n| Item::new().with("name", *n).into_ref())
            .collect()
    }

    fn text_of(table: &DataTable, row: usize, column: usize) -> Option<String> {
        let td = table.cell(row, column)?;
        let clone = *table.shadow().children(td).first()?;
        table.shadow().get(clone)?.text.clone()
    }

    fn select_events(table: &mut DataTable) -> Vec<(String, bool)> {
        table
            .take_events()
            .iter()
            .filter_map(|e| e.downcast_ref::<Select>())
            .map(|s| (s.item.field_text("name"), s.value))
            .collect()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn widget_identity() {
        let t = table(r#"<span slot="name"></span>"#);
        assert_eq!(t.tag_name(), "nega-datatable");
        assert!(t.default_css().contains("width: 100%"));
        assert_eq!(t.column_count(), 1);
        assert_eq!(t.row_count(), 0);
        assert!(t.items().is_empty());
    }

    #[test]
    fn initial_render_has_header_only() {
        let t = table(r#"<span slot="name"></span>"#);
        let th = t.header_cell(0).unwrap();
        assert_eq!(t.shadow().get(th).unwrap().text.as_deref(), Some("name"));
        assert!(t.row_nodes().is_empty());
    }

    #[test]
    fn shadow_contains_style_and_table() {
        let t = table(r#"<span slot="name"></span>"#);
        let root = t.shadow().root().unwrap();
        let kids = t.shadow().children(root);
        assert_eq!(kids.len(), 2);
        assert_eq!(t.shadow().get(kids[0]).unwrap().tag, "style");
        assert_eq!(Some(kids[1]), t.table_node());
        let table = t.shadow().get(kids[1]).unwrap();
        assert_eq!(table.attr("border"), Some("0"));
        assert_eq!(table.attr("cellspacing"), Some("0"));
    }

    // ── Rendering ────────────────────────────────────────────────────

    #[test]
    fn rows_times_columns_cells() {
        let mut t = table(r#"<span slot="name"></span><span slot="age"></span><i></i>"#);
        t.set_items(items(&["A", "B", "C", "D"]));
        assert_eq!(t.row_count(), 4);
        assert_eq!(t.shadow().query_by_tag("td").len(), 12);
        assert_eq!(text_of(&t, 3, 0).as_deref(), Some("D"));
        assert_eq!(text_of(&t, 3, 1).as_deref(), Some(""));
    }

    #[test]
    fn scenario_two_rows() {
        let mut t = table(r#"<span slot="name"></span>"#);
        t.set_items(items(&["A", "B"]));
        assert_eq!(text_of(&t, 0, 0).as_deref(), Some("A"));
        assert_eq!(text_of(&t, 1, 0).as_deref(), Some("B"));
        let rows = t.row_nodes();
        assert_eq!(t.shadow().get(rows[0]).unwrap().parts.to_string(), "row even-row");
        assert_eq!(t.shadow().get(rows[1]).unwrap().parts.to_string(), "row odd-row");
    }

    #[test]
    fn rerender_replaces_nodes() {
        let mut t = table(r#"<span slot="name"></span>"#);
        t.set_items(items(&["A", "B"]));
        let before = t.shadow().len();
        let old_rows = t.row_nodes();
        t.set_items(items(&["C", "D"]));
        assert_eq!(t.shadow().len(), before);
        assert!(old_rows.iter().all(|&r| !t.shadow().contains(r)));
    }

    // ── Selection ────────────────────────────────────────────────────

    #[test]
    fn select_and_query() {
        let mut t = table(r#"<span slot="name"></span>"#);
        let list = items(&["A", "B"]);
        t.set_items(list.clone());
        assert_eq!(t.select(&list[0]), Some(true));
        let selected = t.selected();
        assert_eq!(selected.len(), 1);
        assert!(ItemRef::ptr_eq(&selected[0], &list[0]));
        assert_eq!(select_events(&mut t), vec![("A".to_owned(), true)]);

        let row = t.row_nodes()[0];
        let data = t.shadow().get(row).unwrap();
        assert!(data.parts.contains(part::SELECTED_ROW));
        assert!(data.has_attr("selected"));
    }

    #[test]
    fn select_twice_dispatches_twice() {
        let mut t = table(r#"<span slot="name"></span>"#);
        let list = items(&["A"]);
        t.set_items(list.clone());
        t.select(&list[0]);
        t.select(&list[0]);
        assert_eq!(t.selected().len(), 1);
        assert_eq!(select_events(&mut t).len(), 2);
    }

    #[test]
    fn deselect_returns_false() {
        let mut t = table(r#"<span slot="name"></span>"#);
        let list = items(&["A"]);
        t.set_items(list.clone());
        t.select(&list[0]);
        assert_eq!(t.deselect(&list[0]), Some(false));
        assert!(t.selected().is_empty());
        assert_eq!(
            select_events(&mut t),
            vec![("A".to_owned(), true), ("A".to_owned(), false)]
        );
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut t = table(r#"<span slot="name"></span>"#);
        let list = items(&["A", "B"]);
        t.set_items(list.clone());
        assert_eq!(t.toggle(&list[1], None), Some(true));
        assert_eq!(t.toggle(&list[1], None), Some(false));
        assert!(!t.is_selected(&list[1]));
        assert_eq!(
            select_events(&mut t),
            vec![("B".to_owned(), true), ("B".to_owned(), false)]
        );
    }

    #[test]
    fn unknown_item_is_noop() {
        let mut t = table(r#"<span slot="name"></span>"#);
        t.set_items(items(&["A"]));
        let stranger = Item::new().with("name", "A").into_ref();
        assert_eq!(t.select(&stranger), None);
        assert_eq!(t.deselect(&stranger), None);
        assert_eq!(t.toggle(&stranger, None), None);
        assert!(t.selected().is_empty());
        assert!(t.take_events().is_empty());
    }

    #[test]
    fn clear_is_silent() {
        let mut t = table(r#"<span slot="name"></span>"#);
        let list = items(&["A", "B"]);
        t.set_items(list.clone());
        t.select(&list[0]);
        t.select(&list[1]);
        t.take_events();
        t.clear();
        assert!(t.selected().is_empty());
        assert!(t.take_events().is_empty());
        assert!(t.shadow().query_by_part(part::SELECTED_ROW).is_empty());
    }

    #[test]
    fn set_items_clears_selection_silently() {
        let mut t = table(r#"<span slot="name"></span>"#);
        let list = items(&["A", "B"]);
        t.set_items(list.clone());
        t.select(&list[0]);
        t.take_events();
        t.set_items(list.clone());
        assert!(t.selected().is_empty());
        assert!(t.take_events().is_empty());
    }

    // ── Clicks ───────────────────────────────────────────────────────

    #[test]
    fn click_inside_row_emits_click_item() {
        let mut t = table(r#"<span slot="name"></span>"#);
        let list = items(&["A", "B"]);
        t.set_items(list.clone());
        let td = t.cell(1, 0).unwrap();
        let inner = t.shadow().children(td)[0];
        assert!(t.click(inner));

        let events = t.take_events();
        assert_eq!(events.len(), 1);
        assert!(!events[0].bubbles);
        assert_eq!(events[0].sender, t.host());
        let click = events[0].downcast_ref::<ClickItem>().unwrap();
        assert!(ItemRef::ptr_eq(&click.value, &list[1]));
        assert_eq!(click.target, inner);
    }

    #[test]
    fn click_inside_row_shaped_template_reaches_rendered_row() {
        let mut t = table(
            r#"<div slot="name" slot-attr="title"><tr part="row"><td>inner</td></tr></div>"#,
        );
        let list = items(&["A", "B"]);
        t.set_items(list.clone());
        let td = t.cell(1, 0).unwrap();
        let div = t.shadow().children(td)[0];
        let nested_row = t.shadow().children(div)[0];
        let nested_cell = t.shadow().children(nested_row)[0];
        assert!(t.shadow().get(nested_row).unwrap().parts.contains(part::ROW));

        assert!(t.click(nested_cell));
        let events = t.take_events();
        let click = events[0].downcast_ref::<ClickItem>().unwrap();
        assert!(ItemRef::ptr_eq(&click.value, &list[1]));
    }

    #[test]
    fn click_on_header_is_ignored() {
        let mut t = table(r#"<span slot="name"></span>"#);
        t.set_items(items(&["A"]));
        let th = t.header_cell(0).unwrap();
        assert!(!t.click(th));
        assert!(t.take_events().is_empty());
    }

    #[test]
    fn click_on_stale_node_is_ignored() {
        let mut t = table(r#"<span slot="name"></span>"#);
        t.set_items(items(&["A"]));
        let old = t.cell(0, 0).unwrap();
        t.set_items(items(&["B"]));
        assert!(!t.click(old));
    }

    #[test]
    fn click_does_not_change_selection() {
        let mut t = table(r#"<span slot="name"></span>"#);
        t.set_items(items(&["A"]));
        let td = t.cell(0, 0).unwrap();
        t.click(td);
        assert!(t.selected().is_empty());
    }

    // ── Config ───────────────────────────────────────────────────────

    #[test]
    fn config_flows_into_stylesheet() {
        let dom = parse_fragment(r#"<nega-datatable><span slot="name"></span></nega-datatable>"#)
            .unwrap();
        let host = dom.children(dom.root().unwrap())[0];
        let config = TableConfig::from_json(r#"{"style": {"cell-padding": "1px"}}"#).unwrap();
        let t = DataTable::with_config(&dom, host, config);
        let style = t.shadow().query_by_tag("style")[0];
        let css = t.shadow().get(style).unwrap().text.clone().unwrap();
        assert!(css.contains("var(--nega-datatable-cell-padding, 1px)"));
        assert_eq!(t.config().style.cell_padding, "1px");
    }
}
