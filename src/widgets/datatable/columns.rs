//! Column resolution: classify declared children into headers and columns.
//!
//! Runs once per table. Each declared child is deep-copied into a private
//! template arena; later changes to the host's children are not observed.
//! Every column gets a display title, an optional header template, and a
//! binding descriptor list evaluated per cell without re-reading attributes.

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::markup::TEXT_TAG;

/// Slots ending with this suffix declare a header for the base slot.
pub const HEADER_SUFFIX: &str = ":header";

/// Item field the column reads.
pub const SLOT_ATTR: &str = "slot";
/// Explicit display title.
pub const TITLE_ATTR: &str = "nega-title";
/// Attribute the field value is written to.
pub const BIND_ATTR: &str = "slot-attr";
/// Property the field value is written to.
pub const BIND_PROP: &str = "slot-prop";

const TEMPLATES_TAG: &str = "#templates";

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// How a cell clone receives data from its row item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Attach the entire item to the clone.
    WholeItem,
    /// Write the field's text to the named attribute.
    Attribute(String),
    /// Write the field's value to the named property.
    Property(String),
    /// Replace the clone's content with the field's text.
    Text,
}

/// Derive the binding list for a template.
///
/// Field bindings only apply when the template names a non-empty slot.
/// `Attribute` and `Property` are independent; `Text` applies when neither is
/// declared.
pub fn bindings_for(data: &NodeData) -> Vec<Binding> {
    let mut bindings = Vec::new();
    if data.accepts_item {
        bindings.push(Binding::WholeItem);
    }
    if data.non_empty_attr(SLOT_ATTR).is_none() {
        return bindings;
    }

    let attr = data.non_empty_attr(BIND_ATTR);
    let prop = data.non_empty_attr(BIND_PROP);
    if let Some(name) = attr {
        bindings.push(Binding::Attribute(name.to_owned()));
    }
    if let Some(name) = prop {
        bindings.push(Binding::Property(name.to_owned()));
    }
    if attr.is_none() && prop.is_none() {
        bindings.push(Binding::Text);
    }
    bindings
}

/// Display title: `nega-title`, else `slot`, else empty.
pub fn derive_title(data: &NodeData) -> String {
    data.non_empty_attr(TITLE_ATTR)
        .or_else(|| data.non_empty_attr(SLOT_ATTR))
        .unwrap_or_default()
        .to_owned()
}

fn is_header(data: &NodeData) -> bool {
    data.attr(SLOT_ATTR)
        .is_some_and(|slot| slot.ends_with(HEADER_SUFFIX))
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A resolved body column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Item field key, when the template names a non-empty slot.
    pub field: Option<String>,
    /// Text shown in the header cell when no header template matches.
    pub title: String,
    /// The column template in the template arena.
    pub template: NodeId,
    /// The matching `<field>:header` template, if declared.
    pub header: Option<NodeId>,
    /// Bindings applied to every cell clone.
    pub bindings: Vec<Binding>,
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Templates copied from the host plus their classification.
#[derive(Debug, Clone)]
pub struct Columns {
    templates: Dom,
    columns: Vec<Column>,
    headers: Vec<NodeId>,
}

impl Columns {
    /// Copy and classify the element children of `host` in `light`.
    pub fn resolve(light: &Dom, host: NodeId) -> Self {
        let mut templates = Dom::new();
        let root = templates.insert(NodeData::new(TEMPLATES_TAG));

        let mut headers = Vec::new();
        let mut declared = Vec::new();
        for &child in light.children(host) {
            if light.get(child).is_some_and(|d| d.tag == TEXT_TAG) {
                continue;
            }
            let Some(copy) = templates.graft(root, light, child) else {
                continue;
            };
            let Some(data) = templates.get(copy) else {
                continue;
            };
            if is_header(data) {
                headers.push(copy);
            } else {
                declared.push(copy);
            }
        }

        let columns = declared
            .into_iter()
            .filter_map(|template| {
                let data = templates.get(template)?;
                let field = data.non_empty_attr(SLOT_ATTR).map(str::to_owned);
                let header = field.as_deref().and_then(|field| {
                    let wanted = format!("{field}{HEADER_SUFFIX}");
                    headers.iter().copied().find(|&h| {
                        templates.get(h).and_then(|d| d.attr(SLOT_ATTR)) == Some(wanted.as_str())
                    })
                });
                Some(Column {
                    title: derive_title(data),
                    bindings: bindings_for(data),
                    field,
                    template,
                    header,
                })
            })
            .collect::<Vec<_>>();

        log::debug!(
            "resolved {} column(s) and {} header template(s)",
            columns.len(),
            headers.len()
        );

        Self {
            templates,
            columns,
            headers,
        }
    }

    /// The private template arena.
    pub fn templates(&self) -> &Dom {
        &self.templates
    }

    /// Body columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header templates in declaration order.
    pub fn headers(&self) -> &[NodeId] {
        &self.headers
    }

    /// Number of body columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no body columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_fragment;

    fn resolve(markup: &str) -> Columns {
        let dom = parse_fragment(&format!("<nega-datatable>{markup}</nega-datatable>")).unwrap();
        let host = dom.children(dom.root().unwrap())[0];
        Columns::resolve(&dom, host)
    }

    fn slot(columns: &Columns, id: NodeId) -> Option<String> {
        columns
            .templates()
            .get(id)
            .and_then(|d| d.attr(SLOT_ATTR))
            .map(str::to_owned)
    }

    // ── Classification ───────────────────────────────────────────────

    #[test]
    fn partitions_headers_and_columns() {
        let cols = resolve(
            r#"<span slot="name"></span><b slot="name:header">Name</b><span slot="age"></span>"#,
        );
        assert_eq!(cols.len(), 2);
        assert_eq!(cols.headers().len(), 1);
        let fields: Vec<_> = cols.columns().iter().map(|c| c.field.clone()).collect();
        assert_eq!(fields, vec![Some("name".to_owned()), Some("age".to_owned())]);
    }

    #[test]
    fn header_matches_base_slot() {
        let cols = resolve(
            r#"<b slot="age:header"></b><span slot="name"></span><span slot="age"></span>"#,
        );
        assert!(cols.columns()[0].header.is_none());
        let header = cols.columns()[1].header.unwrap();
        assert_eq!(slot(&cols, header).as_deref(), Some("age:header"));
    }

    #[test]
    fn unmatched_header_is_ignored() {
        let cols = resolve(r#"<span slot="name"></span><b slot="other:header"></b>"#);
        assert_eq!(cols.len(), 1);
        assert!(cols.columns()[0].header.is_none());
    }

    #[test]
    fn children_without_slot_are_columns() {
        let cols = resolve("<button>Edit</button>");
        assert_eq!(cols.len(), 1);
        let column = &cols.columns()[0];
        assert_eq!(column.field, None);
        assert_eq!(column.title, "");
        assert!(column.bindings.is_empty());
    }

    #[test]
    fn text_between_children_is_skipped() {
        let cols = resolve(r#"<span slot="a"></span> stray <span slot="b"></span>"#);
        assert_eq!(cols.len(), 2);
    }

    #[test]
    fn templates_are_copies() {
        let mut light =
            parse_fragment(r#"<nega-datatable><span slot="name"></span></nega-datatable>"#)
                .unwrap();
        let host = light.children(light.root().unwrap())[0];
        let cols = Columns::resolve(&light, host);
        light.clear_children(host);
        assert!(light.children(host).is_empty());
        assert_eq!(slot(&cols, cols.columns()[0].template).as_deref(), Some("name"));
    }

    // ── Titles ───────────────────────────────────────────────────────

    #[test]
    fn title_prefers_nega_title() {
        let cols = resolve(r#"<span slot="name" nega-title="Full name"></span>"#);
        assert_eq!(cols.columns()[0].title, "Full name");
    }

    #[test]
    fn title_falls_back_to_slot() {
        let cols = resolve(r#"<span slot="name" nega-title=""></span>"#);
        assert_eq!(cols.columns()[0].title, "name");
    }

    // ── Bindings ─────────────────────────────────────────────────────

    #[test]
    fn text_binding_by_default() {
        let cols = resolve(r#"<span slot="name"></span>"#);
        assert_eq!(cols.columns()[0].bindings, vec![Binding::Text]);
    }

    #[test]
    fn attribute_and_property_are_independent() {
        let cols = resolve(r#"<a slot="url" slot-attr="href" slot-prop="title"></a>"#);
        assert_eq!(
            cols.columns()[0].bindings,
            vec![
                Binding::Attribute("href".to_owned()),
                Binding::Property("title".to_owned()),
            ]
        );
    }

    #[test]
    fn whole_item_with_and_without_slot() {
        let cols = resolve(r#"<user-card nega-item></user-card><user-card nega-item slot="name"></user-card>"#);
        assert_eq!(cols.columns()[0].bindings, vec![Binding::WholeItem]);
        assert_eq!(
            cols.columns()[1].bindings,
            vec![Binding::WholeItem, Binding::Text]
        );
    }

    #[test]
    fn empty_binding_names_are_ignored() {
        let cols = resolve(r#"<span slot="name" slot-attr=""></span>"#);
        assert_eq!(cols.columns()[0].bindings, vec![Binding::Text]);
    }
}
