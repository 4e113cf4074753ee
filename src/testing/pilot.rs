//! Pilot: programmatic interaction with a headless table.
//!
//! The `Pilot` mounts one `nega-datatable` in a [`Host`], then provides
//! methods to bind items, simulate clicks on cells, drive selection, and
//! inspect what the page observed.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::dom::node::NodeId;
use crate::event::message::{ClickItem, Envelope, Select};
use crate::host::{Host, HostConfig};
use crate::item::{items_from_json, ItemRef};
use crate::markup::MarkupError;
use crate::registry::{ElementRegistry, RegistryError};
use crate::widget::Widget;
use crate::widgets::datatable::{self, DataTable, TableConfig, TAG_NAME};

// ---------------------------------------------------------------------------
// PilotError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PilotError {
    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("<nega-datatable> was not upgraded")]
    NotUpgraded,
}

// ---------------------------------------------------------------------------
// RecordedEvent
// ---------------------------------------------------------------------------

/// Where a listener observed a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observer {
    /// The table element itself.
    Table,
    /// The page body, reached only by bubbling.
    Page,
}

/// A notification as seen by one of the pilot's listeners.
#[derive(Debug, Clone)]
pub enum RecordedEvent {
    ClickItem { item: ItemRef, observer: Observer },
    Select { item: ItemRef, value: bool, observer: Observer },
}

impl RecordedEvent {
    fn from_envelope(envelope: &Envelope, observer: Observer) -> Option<Self> {
        if let Some(click) = envelope.downcast_ref::<ClickItem>() {
            return Some(Self::ClickItem {
                item: click.value.clone(),
                observer,
            });
        }
        envelope.downcast_ref::<Select>().map(|select| Self::Select {
            item: select.item.clone(),
            value: select.value,
            observer,
        })
    }

    pub fn observer(&self) -> Observer {
        match self {
            Self::ClickItem { observer, .. } | Self::Select { observer, .. } => *observer,
        }
    }

    pub fn item(&self) -> &ItemRef {
        match self {
            Self::ClickItem { item, .. } | Self::Select { item, .. } => item,
        }
    }
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless table driver for testing.
///
/// # Examples
///
/// ```
/// use nega_datatable::testing::Pilot;
///
/// let mut pilot = Pilot::new(r#"<span slot="name"></span>"#).unwrap();
/// pilot.set_items_json(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
/// assert_eq!(pilot.cell_text(1, 0).as_deref(), Some("B"));
/// assert!(pilot.click_cell(0, 0));
/// assert_eq!(pilot.clicks().len(), 1);
/// ```
pub struct Pilot {
    host: Host,
    table: NodeId,
    events: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl Pilot {
    /// Mount a table whose columns are declared by `columns`.
    pub fn new(columns: &str) -> Result<Self, PilotError> {
        Self::with_config(columns, TableConfig::default())
    }

    /// Mount a table with an explicit config.
    pub fn with_config(columns: &str, config: TableConfig) -> Result<Self, PilotError> {
        let mut registry = ElementRegistry::new();
        datatable::register(&mut registry, config)?;
        let mut host = Host::new(registry, HostConfig::default());

        let markup = format!("<{TAG_NAME}>{columns}</{TAG_NAME}>");
        host.mount_markup(&markup)?;
        let table = host
            .dom()
            .query_by_tag(TAG_NAME)
            .into_iter()
            .find(|&node| host.is_upgraded(node))
            .ok_or(PilotError::NotUpgraded)?;

        let events = Rc::new(RefCell::new(Vec::new()));
        let body = host.body();
        for (node, observer) in [(table, Observer::Table), (body, Observer::Page)] {
            for name in [ClickItem::NAME, Select::NAME] {
                let sink = Rc::clone(&events);
                host.add_listener(node, name, move |envelope| {
                    if let Some(event) = RecordedEvent::from_envelope(envelope, observer) {
                        sink.borrow_mut().push(event);
                    }
                });
            }
        }

        Ok(Self {
            host,
            table,
            events,
        })
    }

    // ── Items ────────────────────────────────────────────────────────

    /// Bind a new item list.
    pub fn set_items(&mut self, items: Vec<ItemRef>) {
        self.drive(|t| t.set_items(items));
    }

    /// Bind items parsed from a JSON array of objects.
    pub fn set_items_json(&mut self, input: &str) -> Result<(), serde_json::Error> {
        let items = items_from_json(input)?;
        self.set_items(items);
        Ok(())
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Click the innermost node of the cell at (`row`, `column`).
    pub fn click_cell(&mut self, row: usize, column: usize) -> bool {
        self.drive(|t| {
            let Some(cell) = t.cell(row, column) else {
                return false;
            };
            let target = t.shadow().children(cell).first().copied().unwrap_or(cell);
            t.click(target)
        })
        .unwrap_or(false)
    }

    /// Click the header cell of `column`.
    pub fn click_header(&mut self, column: usize) -> bool {
        self.drive(|t| t.header_cell(column).is_some_and(|th| t.click(th)))
            .unwrap_or(false)
    }

    pub fn select(&mut self, item: &ItemRef) -> Option<bool> {
        self.drive(|t| t.select(item)).flatten()
    }

    pub fn deselect(&mut self, item: &ItemRef) -> Option<bool> {
        self.drive(|t| t.deselect(item)).flatten()
    }

    pub fn toggle(&mut self, item: &ItemRef, force: Option<bool>) -> Option<bool> {
        self.drive(|t| t.toggle(item, force)).flatten()
    }

    pub fn clear(&mut self) {
        self.drive(DataTable::clear);
    }

    fn drive<R>(&mut self, f: impl FnOnce(&mut DataTable) -> R) -> Option<R> {
        self.host.with_widget::<DataTable, R>(self.table, f)
    }

    // ── Query ────────────────────────────────────────────────────────

    /// The table widget.
    pub fn table(&self) -> Option<&DataTable> {
        self.host.widget::<DataTable>(self.table)
    }

    /// The table's host element.
    pub fn table_node(&self) -> NodeId {
        self.table
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Items of selected rows, in row order.
    pub fn selected(&self) -> Vec<ItemRef> {
        self.table().map(DataTable::selected).unwrap_or_default()
    }

    /// Text of the clone inside the cell at (`row`, `column`).
    pub fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        let table = self.table()?;
        let cell = table.cell(row, column)?;
        let clone = *table.shadow().children(cell).first()?;
        table.shadow().get(clone)?.text.clone()
    }

    /// Every recorded notification, in delivery order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Drain the recorded notifications.
    pub fn take_events(&mut self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Items from `clickItem` notifications seen on the table element.
    pub fn clicks(&self) -> Vec<ItemRef> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::ClickItem {
                    item,
                    observer: Observer::Table,
                } => Some(item.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(item, value)` from `select` notifications seen by `observer`.
    pub fn selects(&self, observer: Observer) -> Vec<(ItemRef, bool)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Select {
                    item,
                    value,
                    observer: seen,
                } if *seen == observer => Some((item.clone(), *value)),
                _ => None,
            })
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn pilot() -> Pilot {
        Pilot::new(r#"<span slot="name"></span><b slot="name:header">Name</b>"#).unwrap()
    }

    fn items(names: &[&str]) -> Vec<ItemRef> {
        names
            .iter()
            .map(|n| Item::new().with("name", *n).into_ref())
            .collect()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_mounts_table() {
        let pilot = pilot();
        let table = pilot.table().unwrap();
        assert_eq!(table.tag_name(), "nega-datatable");
        assert_eq!(table.column_count(), 1);
        assert!(pilot.events().is_empty());
    }

    #[test]
    fn bad_markup_is_an_error() {
        let err = Pilot::new("<span>").err().unwrap();
        assert!(matches!(err, PilotError::Markup(_)));
    }

    // ── Items ────────────────────────────────────────────────────────

    #[test]
    fn set_items_json_binds_rows() {
        let mut pilot = pilot();
        pilot
            .set_items_json(r#"[{"name": "A"}, {"name": "B"}, {"name": "C"}]"#)
            .unwrap();
        assert_eq!(pilot.table().unwrap().row_count(), 3);
        assert_eq!(pilot.cell_text(2, 0).as_deref(), Some("C"));
    }

    #[test]
    fn set_items_json_rejects_non_array() {
        let mut pilot = pilot();
        assert!(pilot.set_items_json(r#"{"name": "A"}"#).is_err());
        assert_eq!(pilot.table().unwrap().row_count(), 0);
    }

    // ── Clicks ───────────────────────────────────────────────────────

    #[test]
    fn click_cell_records_on_table_only() {
        let mut pilot = pilot();
        let list = items(&["A", "B"]);
        pilot.set_items(list.clone());
        assert!(pilot.click_cell(1, 0));
        let clicks = pilot.clicks();
        assert_eq!(clicks.len(), 1);
        assert!(ItemRef::ptr_eq(&clicks[0], &list[1]));
        assert!(pilot.events().iter().all(|e| e.observer() == Observer::Table));
    }

    #[test]
    fn click_outside_rows() {
        let mut pilot = pilot();
        pilot.set_items(items(&["A"]));
        assert!(!pilot.click_header(0));
        assert!(!pilot.click_cell(4, 0));
        assert!(pilot.events().is_empty());
    }

    // ── Selection ────────────────────────────────────────────────────

    #[test]
    fn select_is_seen_by_table_and_page() {
        let mut pilot = pilot();
        let list = items(&["A"]);
        pilot.set_items(list.clone());
        assert_eq!(pilot.select(&list[0]), Some(true));
        assert_eq!(pilot.selects(Observer::Table).len(), 1);
        assert_eq!(pilot.selects(Observer::Page).len(), 1);
        let events = pilot.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].observer(), Observer::Table);
        assert_eq!(events[1].observer(), Observer::Page);
        assert!(ItemRef::ptr_eq(events[1].item(), &list[0]));
        assert!(pilot.events().is_empty());
    }

    #[test]
    fn passthroughs() {
        let mut pilot = pilot();
        let list = items(&["A", "B"]);
        pilot.set_items(list.clone());
        assert_eq!(pilot.toggle(&list[1], None), Some(true));
        assert_eq!(pilot.selected().len(), 1);
        assert_eq!(pilot.deselect(&list[1]), Some(false));
        pilot.select(&list[0]);
        pilot.clear();
        assert!(pilot.selected().is_empty());
        assert_eq!(
            pilot.selects(Observer::Table)
                .into_iter()
                .map(|(_, v)| v)
                .collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }

    #[test]
    fn unknown_item_records_nothing() {
        let mut pilot = pilot();
        pilot.set_items(items(&["A"]));
        let stranger = Item::new().into_ref();
        assert_eq!(pilot.select(&stranger), None);
        assert!(pilot.events().is_empty());
    }
}
