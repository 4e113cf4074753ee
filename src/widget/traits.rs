//! Widget trait: tag name, stylesheet, shadow render, event outbox.
//!
//! A widget is the behaviour behind one upgraded custom element. It owns a
//! private shadow tree that it rebuilds in `render`, and queues the
//! notifications it raises until the host drains them with `take_events`.

use std::any::Any;

use crate::dom::tree::Dom;
use crate::event::message::Envelope;

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every custom element behaviour.
///
/// Object-safe: the host stores widgets as `Box<dyn Widget>` and downcasts
/// through `as_any` / `as_any_mut` for typed access.
pub trait Widget {
    /// The custom element name (e.g. `"nega-datatable"`).
    fn tag_name(&self) -> &str;

    /// The widget's internal stylesheet. Empty if none.
    fn default_css(&self) -> String {
        String::new()
    }

    /// Rebuild the shadow tree from current state.
    fn render(&mut self);

    /// The rendered shadow tree.
    fn shadow(&self) -> &Dom;

    /// Drain queued notifications, in the order they were raised.
    fn take_events(&mut self) -> Vec<Envelope>;

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
