//! Message trait, envelope, and the table's notifications.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed message with routing metadata (sender element,
//! whether it bubbles to ancestors). The table emits [`ClickItem`] and
//! [`Select`].

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dom::node::NodeId;
use crate::item::ItemRef;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
///
/// All messages must implement `as_any` for downcasting and `message_name`,
/// which is the event type listeners subscribe to.
pub trait Message: Send + 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Event type name (e.g. `"select"`).
    fn message_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Wraps a boxed message with routing metadata.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The element the message is dispatched on.
    pub sender: NodeId,
    /// Whether the message continues to the sender's ancestors.
    pub bubbles: bool,
    /// Whether a listener has stopped propagation.
    pub handled: bool,
    /// Process-wide creation order; the host delivers in this order.
    pub sequence: u64,
}

impl Envelope {
    /// Create a non-bubbling envelope: only listeners on `sender` observe it.
    pub fn new(message: impl Message, sender: NodeId) -> Self {
        Self {
            message: Box::new(message),
            sender,
            bubbles: false,
            handled: false,
            sequence: NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Create an envelope that bubbles from `sender` up to the root.
    pub fn bubbling(message: impl Message, sender: NodeId) -> Self {
        Self {
            bubbles: true,
            ..Self::new(message, sender)
        }
    }

    /// The event type name of the payload.
    pub fn name(&self) -> &str {
        self.message.message_name()
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message + 'static>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }

    /// Mark this envelope as handled, stopping further propagation.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("sender", &self.sender)
            .field("bubbles", &self.bubbles)
            .field("handled", &self.handled)
            .field("sequence", &self.sequence)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Table notifications
// ---------------------------------------------------------------------------

/// A body row was clicked.
///
/// Dispatched on the table element without bubbling.
#[derive(Debug, Clone)]
pub struct ClickItem {
    /// The item behind the clicked row.
    pub value: ItemRef,
    /// The innermost rendered node that received the click.
    pub target: NodeId,
}

impl ClickItem {
    pub const NAME: &'static str = "clickItem";
}

impl Message for ClickItem {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        Self::NAME
    }
}

/// A row's selection state was set.
///
/// Dispatched on the table element and bubbles to the host page.
#[derive(Debug, Clone)]
pub struct Select {
    /// The item behind the row.
    pub item: ItemRef,
    /// The row's selection state after the call.
    pub value: bool,
}

impl Select {
    pub const NAME: &'static str = "select";
}

impl Message for Select {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        Self::NAME
    }
}

// ===========================================================================
// Tests
// ===========================================================================
