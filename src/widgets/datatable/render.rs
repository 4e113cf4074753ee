//! Shadow tree construction: header row, body rows, cell binding.

use super::columns::{Binding, Column, Columns};
use super::selection::RowState;
use super::style::{column_parity, part};
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::item::ItemRef;

pub const TABLE_TAG: &str = "table";
pub const HEAD_TAG: &str = "thead";
pub const BODY_TAG: &str = "tbody";
pub const ROW_TAG: &str = "tr";
pub const HEADER_CELL_TAG: &str = "th";
pub const CELL_TAG: &str = "td";

/// Build `<tr part="header-row">` with one `<th>` per column under `thead`.
pub fn build_header(shadow: &mut Dom, thead: NodeId, columns: &Columns) {
    let row = shadow.insert_child(thead, NodeData::new(ROW_TAG).with_part(part::HEADER_ROW));
    for (index, column) in columns.columns().iter().enumerate() {
        let th =
            NodeData::new(HEADER_CELL_TAG).with_parts([part::HEADER_CELL, column_parity(index)]);
        match column.header {
            Some(header) => {
                let th = shadow.insert_child(row, th);
                shadow.graft(th, columns.templates(), header);
            }
            None => {
                shadow.insert_child(row, th.with_text(column.title.as_str()));
            }
        }
    }
}

/// Build one body row for `item` at position `index` under `tbody`.
pub fn build_row(
    shadow: &mut Dom,
    tbody: NodeId,
    index: usize,
    item: &ItemRef,
    columns: &Columns,
) -> RowState {
    let node = shadow.insert_child(tbody, NodeData::new(ROW_TAG));
    let row = RowState::new(item.clone(), node, index);
    row.apply(shadow);

    for (col_index, column) in columns.columns().iter().enumerate() {
        let td = shadow.insert_child(
            node,
            NodeData::new(CELL_TAG).with_parts([part::CELL, column_parity(col_index)]),
        );
        if let Some(clone) = shadow.graft(td, columns.templates(), column.template) {
            bind_cell(shadow, clone, column, item);
        }
    }
    row
}

/// Apply a column's bindings to a freshly cloned template.
pub fn bind_cell(shadow: &mut Dom, clone: NodeId, column: &Column, item: &ItemRef) {
    for binding in &column.bindings {
        if *binding == Binding::Text {
            shadow.clear_children(clone);
        }
        let Some(data) = shadow.get_mut(clone) else {
            return;
        };
        match (binding, column.field.as_deref()) {
            (Binding::WholeItem, _) => data.item = Some(item.clone()),
            (Binding::Attribute(name), Some(field)) => {
                data.set_attr(name.as_str(), item.field_text(field));
            }
            (Binding::Property(name), Some(field)) => {
                data.properties.insert(name.clone(), item.field_value(field));
            }
            (Binding::Text, Some(field)) => data.text = Some(item.field_text(field)),
            (_, None) => {}
        }
    }
}
