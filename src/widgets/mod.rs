//! Built-in widgets: DataTable.

pub mod datatable;

pub use datatable::DataTable;
