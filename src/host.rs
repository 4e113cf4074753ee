//! Host page: light DOM, element upgrades, event delivery.
//!
//! [`Host`] owns the page's light DOM and the widgets attached to its custom
//! elements. Widgets raise notifications into their own outbox; [`Host::flush`]
//! drains every outbox and delivers each envelope to the listeners along its
//! delivery path, which stops at the element for non-bubbling messages.

use std::collections::HashMap;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::event::handler::EventDispatcher;
use crate::event::message::Envelope;
use crate::markup::{parse_into, MarkupError};
use crate::registry::ElementRegistry;
use crate::widget::Widget;

/// Tag of the light DOM root.
pub const BODY_TAG: &str = "body";

type Listener = Box<dyn FnMut(&mut Envelope)>;

// ---------------------------------------------------------------------------
// HostConfig
// ---------------------------------------------------------------------------

/// Configuration for the host page.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Upgrade defined elements as soon as markup is mounted.
    pub auto_upgrade: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { auto_upgrade: true }
    }
}

impl HostConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set auto-upgrade (builder).
    pub fn with_auto_upgrade(mut self, auto_upgrade: bool) -> Self {
        self.auto_upgrade = auto_upgrade;
        self
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// A headless page hosting custom elements.
pub struct Host {
    dom: Dom,
    body: NodeId,
    registry: ElementRegistry,
    config: HostConfig,
    /// Upgraded elements in upgrade order.
    widgets: Vec<(NodeId, Box<dyn Widget>)>,
    listeners: HashMap<NodeId, Vec<(String, Listener)>>,
}

impl Host {
    /// Create an empty page with the given registry.
    pub fn new(registry: ElementRegistry, config: HostConfig) -> Self {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new(BODY_TAG));
        Self {
            dom,
            body,
            registry,
            config,
            widgets: Vec::new(),
            listeners: HashMap::new(),
        }
    }

    /// An empty page with the built-in elements defined.
    pub fn with_defaults() -> Self {
        Self::new(ElementRegistry::with_defaults(), HostConfig::default())
    }

    /// The light DOM.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// The `<body>` node all mounted markup lives under.
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Parse `markup` into the body. Returns the new top-level nodes.
    ///
    /// With `auto_upgrade`, defined elements are upgraded immediately.
    pub fn mount_markup(&mut self, markup: &str) -> Result<Vec<NodeId>, MarkupError> {
        let nodes = parse_into(&mut self.dom, self.body, markup)?;
        if self.config.auto_upgrade {
            self.upgrade();
        }
        Ok(nodes)
    }

    /// Construct widgets for defined elements that have none yet, in tree
    /// order. Returns how many were upgraded.
    pub fn upgrade(&mut self) -> usize {
        let mut count = 0;
        for node in self.dom.walk_depth_first(self.body) {
            if self.is_upgraded(node) {
                continue;
            }
            let Some(widget) = self.registry.construct(&self.dom, node) else {
                continue;
            };
            log::debug!("upgraded <{}>", widget.tag_name());
            self.widgets.push((node, widget));
            count += 1;
        }
        count
    }

    /// Whether `node` has a widget attached.
    pub fn is_upgraded(&self, node: NodeId) -> bool {
        self.widgets.iter().any(|(id, _)| *id == node)
    }

    /// The widget attached to `node`, as `W`.
    pub fn widget<W: Widget + 'static>(&self, node: NodeId) -> Option<&W> {
        self.widgets
            .iter()
            .find(|(id, _)| *id == node)
            .and_then(|(_, w)| w.as_any().downcast_ref::<W>())
    }

    /// Mutable access to the widget attached to `node`.
    ///
    /// Notifications raised through this reference wait for [`Host::flush`].
    pub fn widget_mut<W: Widget + 'static>(&mut self, node: NodeId) -> Option<&mut W> {
        self.widgets
            .iter_mut()
            .find(|(id, _)| *id == node)
            .and_then(|(_, w)| w.as_any_mut().downcast_mut::<W>())
    }

    /// Run `f` against the widget on `node`, then deliver what it raised.
    pub fn with_widget<W, R>(&mut self, node: NodeId, f: impl FnOnce(&mut W) -> R) -> Option<R>
    where
        W: Widget + 'static,
    {
        let result = f(self.widget_mut::<W>(node)?);
        self.flush();
        Some(result)
    }

    /// Listen for `event` (a message name such as `"select"`) on `node`.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        event: impl Into<String>,
        listener: impl FnMut(&mut Envelope) + 'static,
    ) {
        self.listeners
            .entry(node)
            .or_default()
            .push((event.into(), Box::new(listener)));
    }

    /// Drain every widget outbox and deliver the envelopes in the order they
    /// were raised, across widgets.
    ///
    /// Returns the number of listener invocations.
    pub fn flush(&mut self) -> usize {
        let mut envelopes: Vec<Envelope> = self
            .widgets
            .iter_mut()
            .flat_map(|(_, w)| w.take_events())
            .collect();
        envelopes.sort_by_key(|e| e.sequence);

        let mut delivered = 0;
        for mut envelope in envelopes {
            for node in EventDispatcher::delivery_path(&self.dom, &envelope) {
                let Some(listeners) = self.listeners.get_mut(&node) else {
                    continue;
                };
                for (name, listener) in listeners.iter_mut() {
                    if *name == envelope.name() {
                        listener(&mut envelope);
                        delivered += 1;
                    }
                }
                if envelope.handled {
                    log::trace!("'{}' handled, propagation stopped", envelope.name());
                    break;
                }
            }
        }
        delivered
    }

    /// Remove `node` and its subtree, dropping attached widgets and listeners.
    pub fn remove(&mut self, node: NodeId) -> Option<NodeData> {
        if node == self.body {
            return None;
        }
        let subtree = self.dom.walk_depth_first(node);
        for id in &subtree {
            self.listeners.remove(id);
        }
        self.widgets.retain(|(host, widget)| {
            let keep = !subtree.contains(host);
            if !keep {
                log::debug!("dropped <{}>", widget.tag_name());
            }
            keep
        });
        self.dom.remove(node)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
