//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a mounted table without a real page. Use
//! [`render_to_string`] and [`render_widget_to_string`] to capture DOM
//! subtrees as indented markup for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::{Observer, Pilot, PilotError, RecordedEvent};
pub use snapshot::{render_to_string, render_widget_to_string};
