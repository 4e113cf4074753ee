//! DOM queries: by id, tag, part; generic predicate matching.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node whose `id` field matches the given string.
    ///
    /// Iterates all nodes in the arena (not just the tree rooted at `root`).
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.iter_nodes()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Find all nodes that carry the given part.
    pub fn query_by_part(&self, part: &str) -> Vec<NodeId> {
        self.query_all(|data| data.parts.contains(part))
    }

    /// Find all nodes with the given tag name.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|data| data.tag == tag)
    }

    /// Find all nodes matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// Iterate over all `(NodeId, &NodeData)` pairs in the arena.
    ///
    /// Slotmap order is deterministic but not tree-order.
    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;

    /// Build a host element with declared column templates:
    /// ```text
    ///   nega-datatable #people
    ///    ├── span [slot=name]
    ///    ├── b    [slot=name:header]
    ///    └── a    [slot=url slot-attr=href] .link
    /// ```
    fn build_query_tree() -> Dom {
        let mut dom = Dom::new();
        let host = dom.insert(NodeData::new("nega-datatable").with_id("people"));
        dom.insert_child(host, NodeData::new("span").with_attr("slot", "name"));
        dom.insert_child(host, NodeData::new("b").with_attr("slot", "name:header"));
        dom.insert_child(
            host,
            NodeData::new("a")
                .with_attr("slot", "url")
                .with_attr("slot-attr", "href")
                .with_part("link"),
        );
        dom
    }

    #[test]
    fn query_by_id_found() {
        let dom = build_query_tree();
        let id = dom.query_by_id("people").unwrap();
        assert_eq!(dom.get(id).unwrap().tag, "nega-datatable");
    }

    #[test]
    fn query_by_id_not_found() {
        let dom = build_query_tree();
        assert!(dom.query_by_id("nonexistent").is_none());
    }

    #[test]
    fn query_by_tag() {
        let dom = build_query_tree();
        assert_eq!(dom.query_by_tag("span").len(), 1);
        assert!(dom.query_by_tag("table").is_empty());
    }

    #[test]
    fn query_by_part() {
        let dom = build_query_tree();
        assert_eq!(dom.query_by_part("link").len(), 1);
        assert!(dom.query_by_part("row").is_empty());
    }

    #[test]
    fn query_all_custom_predicate() {
        let dom = build_query_tree();
        let bound = dom.query_all(|d| d.attr("slot").is_some_and(|s| !s.ends_with(":header")));
        assert_eq!(bound.len(), 2);
    }

    #[test]
    fn query_on_empty_dom() {
        let dom = Dom::new();
        assert!(dom.query_by_id("x").is_none());
        assert!(dom.query_by_part("x").is_empty());
        assert!(dom.query_by_tag("x").is_empty());
        assert!(dom.query_all(|_| true).is_empty());
    }
}
