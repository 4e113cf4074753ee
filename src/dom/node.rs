//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use serde_json::Value;
use slotmap::new_key_type;

use super::parts::PartSet;
use crate::item::ItemRef;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Element tag name (e.g. "span", "td", "nega-datatable").
    pub tag: String,
    /// Optional unique id (`id` attribute).
    pub id: Option<String>,
    /// HTML attributes, excluding `id` and `part`.
    pub attributes: BTreeMap<String, String>,
    /// Element properties written by bindings.
    pub properties: BTreeMap<String, Value>,
    /// Text content, rendered before any children.
    pub text: Option<String>,
    /// Style-hook tags, serialized as the `part` attribute.
    pub parts: PartSet,
    /// Whether this element wants the whole row item attached.
    pub accepts_item: bool,
    /// The attached row item, for elements that accept one.
    pub item: Option<ItemRef>,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
            text: None,
            parts: PartSet::new(),
            accepts_item: false,
            item: None,
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set a property (builder).
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a single part (builder).
    pub fn with_part(mut self, part: &str) -> Self {
        self.parts.insert(part);
        self
    }

    /// Add multiple parts (builder).
    pub fn with_parts<'a>(mut self, parts: impl IntoIterator<Item = &'a str>) -> Self {
        for part in parts {
            self.parts.insert(part);
        }
        self
    }

    /// Mark the element as accepting the whole row item (builder).
    pub fn accepting_item(mut self) -> Self {
        self.accepts_item = true;
        self
    }

    /// Attribute lookup.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute lookup that treats an empty value as absent.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    /// Whether the attribute is present (boolean attributes have empty values).
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set or overwrite an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute. Returns the previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Add or remove a boolean attribute.
    pub fn toggle_attr(&mut self, name: &str, present: bool) {
        if present {
            self.attributes.entry(name.to_owned()).or_default();
        } else {
            self.attributes.remove(name);
        }
    }

    /// Property lookup.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}
