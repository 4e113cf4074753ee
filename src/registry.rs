//! Custom element registry.
//!
//! [`ElementRegistry`] maps element names to widget constructors. Nothing is
//! registered implicitly: call [`register_defaults`] (or use
//! [`ElementRegistry::with_defaults`]) to install the built-in elements.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::widget::Widget;
use crate::widgets::datatable::{self, TableConfig};

/// Builds a widget for a host element in the light DOM.
pub type Constructor = Box<dyn Fn(&Dom, NodeId) -> Box<dyn Widget>>;

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid custom element name '{0}'")]
    InvalidName(String),

    #[error("element '{0}' is already defined")]
    AlreadyDefined(String),
}

/// Whether `name` is usable as a custom element name.
///
/// Lowercase, starts with an ASCII letter, contains a hyphen.
pub fn is_valid_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.contains('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
}

// ---------------------------------------------------------------------------
// ElementRegistry
// ---------------------------------------------------------------------------

/// Registry of custom element constructors, keyed by element name.
#[derive(Default)]
pub struct ElementRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl ElementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in elements defined.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        if let Err(err) = register_defaults(&mut registry) {
            log::warn!("failed to install built-in elements: {err}");
        }
        registry
    }

    /// Define `name`. Names are validated and cannot be redefined.
    pub fn define<F>(&mut self, name: &str, constructor: F) -> Result<(), RegistryError>
    where
        F: Fn(&Dom, NodeId) -> Box<dyn Widget> + 'static,
    {
        if !is_valid_name(name) {
            return Err(RegistryError::InvalidName(name.to_owned()));
        }
        if self.constructors.contains_key(name) {
            return Err(RegistryError::AlreadyDefined(name.to_owned()));
        }
        log::debug!("defined element '{name}'");
        self.constructors.insert(name.to_owned(), Box::new(constructor));
        Ok(())
    }

    /// The constructor for `name`.
    pub fn get(&self, name: &str) -> Option<&Constructor> {
        self.constructors.get(name)
    }

    /// Build the widget for `host` if its tag is defined.
    pub fn construct(&self, light: &Dom, host: NodeId) -> Option<Box<dyn Widget>> {
        let tag = light.get(host)?.tag.as_str();
        let constructor = self.constructors.get(tag)?;
        Some(constructor(light, host))
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Defined names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Define every built-in element with its default config.
pub fn register_defaults(registry: &mut ElementRegistry) -> Result<(), RegistryError> {
    datatable::register(registry, TableConfig::default())
}

// ===========================================================================
// Tests
// ===========================================================================
