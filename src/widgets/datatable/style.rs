//! Styling surface: part names, style variables, table configuration.
//!
//! Parts are the style hooks a host page targets with `::part(...)`. Style
//! variables are `--nega-datatable-*` custom properties; the widget's own
//! stylesheet reads each one with the configured value as fallback.

use serde::Deserialize;

/// Style-hook names attached to rendered nodes.
pub mod part {
    pub const HEADER_ROW: &str = "header-row";
    pub const HEADER_CELL: &str = "header-cell";
    pub const ROW: &str = "row";
    pub const EVEN_ROW: &str = "even-row";
    pub const ODD_ROW: &str = "odd-row";
    pub const SELECTED_ROW: &str = "selected-row";
    pub const CELL: &str = "cell";
    pub const EVEN_COLUMN: &str = "even-column";
    pub const ODD_COLUMN: &str = "odd-column";
}

/// Row parity tag for a 0-based row position.
pub fn row_parity(index: usize) -> &'static str {
    if index % 2 == 0 {
        part::EVEN_ROW
    } else {
        part::ODD_ROW
    }
}

/// Column parity tag for a 0-based column position.
pub fn column_parity(index: usize) -> &'static str {
    if index % 2 == 0 {
        part::EVEN_COLUMN
    } else {
        part::ODD_COLUMN
    }
}

// ---------------------------------------------------------------------------
// StyleVars
// ---------------------------------------------------------------------------

/// Default values for the table's style variables.
///
/// Deserializes from kebab-case keys; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleVars {
    /// `--nega-datatable-row-color`
    pub row_color: String,
    /// `--nega-datatable-row-background`
    pub row_background: String,
    /// `--nega-datatable-alternate-row-background`
    pub alternate_row_background: String,
    /// `--nega-datatable-selected-row-color`
    pub selected_row_color: String,
    /// `--nega-datatable-selected-row-background`
    pub selected_row_background: String,
    /// `--nega-datatable-cell-padding`
    pub cell_padding: String,
    /// `--nega-datatable-cell-white-space`
    pub cell_white_space: String,
    /// `--nega-datatable-cell-vertical-align`
    pub cell_vertical_align: String,
}

impl Default for StyleVars {
    fn default() -> Self {
        Self {
            row_color: "inherit".to_owned(),
            row_background: "transparent".to_owned(),
            alternate_row_background: "rgba(0, 0, 0, 0.04)".to_owned(),
            selected_row_color: "inherit".to_owned(),
            selected_row_background: "rgba(33, 150, 243, 0.2)".to_owned(),
            cell_padding: "4px 8px".to_owned(),
            cell_white_space: "nowrap".to_owned(),
            cell_vertical_align: "middle".to_owned(),
        }
    }
}

impl StyleVars {
    /// `var(--nega-datatable-<name>, <fallback>)`
    fn var(name: &str, fallback: &str) -> String {
        format!("var(--nega-datatable-{name}, {fallback})")
    }

    /// `(custom property, configured default)` pairs, in documentation order.
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("--nega-datatable-row-color", self.row_color.as_str()),
            ("--nega-datatable-row-background", self.row_background.as_str()),
            (
                "--nega-datatable-alternate-row-background",
                self.alternate_row_background.as_str(),
            ),
            ("--nega-datatable-selected-row-color", self.selected_row_color.as_str()),
            (
                "--nega-datatable-selected-row-background",
                self.selected_row_background.as_str(),
            ),
            ("--nega-datatable-cell-padding", self.cell_padding.as_str()),
            ("--nega-datatable-cell-white-space", self.cell_white_space.as_str()),
            ("--nega-datatable-cell-vertical-align", self.cell_vertical_align.as_str()),
        ]
    }

    /// The widget's internal stylesheet.
    pub fn to_css(&self) -> String {
        let mut css = String::from("table {\n  width: 100%;\n}\n");
        css.push_str(&format!(
            "tr[part~=\"{}\"] {{\n  color: {};\n  background: {};\n}}\n",
            part::ROW,
            Self::var("row-color", &self.row_color),
            Self::var("row-background", &self.row_background),
        ));
        css.push_str(&format!(
            "tr[part~=\"{}\"] {{\n  background: {};\n}}\n",
            part::ODD_ROW,
            Self::var("alternate-row-background", &self.alternate_row_background),
        ));
        css.push_str(&format!(
            "tr[part~=\"{}\"] {{\n  color: {};\n  background: {};\n}}\n",
            part::SELECTED_ROW,
            Self::var("selected-row-color", &self.selected_row_color),
            Self::var("selected-row-background", &self.selected_row_background),
        ));
        css.push_str(&format!(
            "th[part~=\"{}\"], td[part~=\"{}\"] {{\n  padding: {};\n  white-space: {};\n  vertical-align: {};\n}}\n",
            part::HEADER_CELL,
            part::CELL,
            Self::var("cell-padding", &self.cell_padding),
            Self::var("cell-white-space", &self.cell_white_space),
            Self::var("cell-vertical-align", &self.cell_vertical_align),
        ));
        css
    }
}

// ---------------------------------------------------------------------------
// TableConfig
// ---------------------------------------------------------------------------

/// Configuration for a table instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Style variable defaults baked into the internal stylesheet.
    pub style: StyleVars,
}

impl TableConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style variables (builder).
    pub fn with_style(mut self, style: StyleVars) -> Self {
        self.style = style;
        self
    }

    /// Load a config from JSON, e.g. `{"style": {"cell-padding": "2px"}}`.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
