//! Snapshot rendering helpers.
//!
//! Serializes a DOM subtree as indented markup for snapshot tests. Output is
//! deterministic: attributes come out sorted, properties follow as
//! `.name=<json>`, then `part`, then the whole-item marker.

use std::fmt::Write as _;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::markup::{ITEM_MARKER_ATTR, TEXT_TAG};
use crate::widget::Widget;

const INDENT: &str = "  ";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render `node` and its subtree as indented markup.
///
/// Nodes whose tag starts with `#` (fragment and shadow roots) render only
/// their children. Lines are separated by `'\n'` with no trailing newline.
///
/// # Examples
///
/// ```
/// use nega_datatable::markup::parse_fragment;
/// use nega_datatable::testing::render_to_string;
///
/// let dom = parse_fragment(r#"<b class="x">hi</b>"#).unwrap();
/// let root = dom.root().unwrap();
/// assert_eq!(render_to_string(&dom, root), r#"<b class="x">hi</b>"#);
/// ```
pub fn render_to_string(dom: &Dom, node: NodeId) -> String {
    let mut lines = Vec::new();
    write_node(dom, node, 0, &mut lines);
    lines.join("\n")
}

/// Render a widget's shadow tree, leaving out its `<style>` element.
pub fn render_widget_to_string(widget: &dyn Widget) -> String {
    let shadow = widget.shadow();
    let Some(root) = shadow.root() else {
        return String::new();
    };
    let mut lines = Vec::new();
    for &child in shadow.children(root) {
        if shadow.get(child).is_some_and(|d| d.tag == "style") {
            continue;
        }
        write_node(shadow, child, 0, &mut lines);
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn write_node(dom: &Dom, node: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(data) = dom.get(node) else {
        return;
    };
    let pad = INDENT.repeat(depth);

    // Text on its own line is trimmed; the indentation stands in for its spacing.
    if data.tag == TEXT_TAG {
        let text = data.text.as_deref().unwrap_or("").trim();
        lines.push(format!("{pad}{}", escape_text(text)));
        return;
    }
    if data.tag.starts_with('#') {
        for &child in dom.children(node) {
            write_node(dom, child, depth, lines);
        }
        return;
    }

    let open = open_tag(data);
    let children = dom.children(node);
    if children.is_empty() {
        let text = data.text.as_deref().map(escape_text).unwrap_or_default();
        lines.push(format!("{pad}{open}{text}</{}>", data.tag));
        return;
    }

    lines.push(format!("{pad}{open}"));
    if let Some(text) = &data.text {
        lines.push(format!("{pad}{INDENT}{}", escape_text(text.trim())));
    }
    for &child in children {
        write_node(dom, child, depth + 1, lines);
    }
    lines.push(format!("{pad}</{}>", data.tag));
}

fn open_tag(data: &NodeData) -> String {
    let mut out = format!("<{}", data.tag);
    if let Some(id) = &data.id {
        let _ = write!(out, " id=\"{}\"", escape_attr(id));
    }
    for (name, value) in &data.attributes {
        if value.is_empty() {
            let _ = write!(out, " {name}");
        } else {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
    }
    for (name, value) in &data.properties {
        let _ = write!(out, " .{name}={value}");
    }
    if !data.parts.is_empty() {
        let _ = write!(out, " part=\"{}\"", data.parts);
    }
    if data.accepts_item {
        let _ = write!(out, " {ITEM_MARKER_ATTR}");
    }
    out.push('>');
    out
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

// ===========================================================================
// Tests
// ===========================================================================
