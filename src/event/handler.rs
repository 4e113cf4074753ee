//! Event dispatch: message queue and delivery path computation.
//!
//! [`EventDispatcher`] maintains a queue of [`Envelope`]s. Widgets push into
//! their own dispatcher; the host drains it and walks each envelope along its
//! [`delivery_path`](EventDispatcher::delivery_path).

use std::collections::VecDeque;

use super::message::Envelope;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Queue-based event dispatcher.
///
/// Messages are enqueued via `push` and drained for processing via `drain`.
/// The dispatcher does not itself route messages; the host uses the delivery
/// path and its listener table for that.
#[derive(Debug)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue a message envelope for later processing.
    pub fn push(&mut self, envelope: Envelope) {
        log::trace!(
            "queued '{}' (bubbles: {})",
            envelope.name(),
            envelope.bubbles
        );
        self.queue.push_back(envelope);
    }

    /// Drain all pending messages and return them as a `Vec`.
    ///
    /// The queue is empty after this call.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Compute the bubble path from `start` up to the root (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ..., root]`.
    /// If `start` does not exist in the DOM, returns an empty vec.
    pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
        if !dom.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(dom.ancestors(start));
        path
    }

    /// The nodes whose listeners observe `envelope`, in order.
    ///
    /// Non-bubbling envelopes stop at the sender.
    pub fn delivery_path(dom: &Dom, envelope: &Envelope) -> Vec<NodeId> {
        let mut path = Self::bubble_path(dom, envelope.sender);
        if !envelope.bubbles {
            path.truncate(1);
        }
        path
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
