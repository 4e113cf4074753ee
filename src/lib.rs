//! # nega-datatable
//!
//! A headless, retained-DOM data table element.
//!
//! Columns are declared as children of a `<nega-datatable>` element; each child
//! is a template cloned into every row and bound to one field of the row's
//! item. The table renders into its own shadow tree with style hooks for
//! rows, cells and selection, and reports clicks and selection changes as
//! messages that the host page can listen for.
//!
//! ```
//! use nega_datatable::host::Host;
//! use nega_datatable::item::items_from_json;
//! use nega_datatable::widgets::DataTable;
//!
//! let mut host = Host::with_defaults();
//! let nodes = host
//!     .mount_markup(r#"<nega-datatable><span slot="name"></span></nega-datatable>"#)
//!     .unwrap();
//! let items = items_from_json(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
//! host.with_widget::<DataTable, _>(nodes[0], |table| table.set_items(items));
//! assert_eq!(host.widget::<DataTable>(nodes[0]).unwrap().row_count(), 2);
//! ```
//!
//! ## Core Systems
//!
//! - **[`item`]**: Row records and field stringification
//! - **[`dom`]**: Slotmap-backed DOM arena with tree operations and queries
//! - **[`markup`]**: Tokenizer and parser for declarative host markup
//! - **[`event`]**: Messages, envelopes, delivery paths
//! - **[`widget`]**: Widget trait
//! - **[`widgets`]**: Built-in widgets: DataTable
//! - **[`registry`]**: Custom element definitions
//! - **[`host`]**: Host page: upgrades elements and delivers their events
//! - **[`testing`]**: Headless pilot and snapshot helpers

// Foundation
pub mod item;

// Core systems
pub mod dom;
pub mod markup;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Page integration
pub mod host;
pub mod registry;

// Testing
pub mod testing;
