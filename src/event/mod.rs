//! Event system: messages, envelopes, dispatch.

pub mod handler;
pub mod message;

pub use handler::EventDispatcher;
pub use message::{ClickItem, Envelope, Message, Select};
