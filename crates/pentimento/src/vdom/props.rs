//! Node properties.

use compact_str::CompactString;
use pentimento_tela::EventHandler;
use smallvec::SmallVec;

/// A property value: a plain attribute string or an event handler.
///
/// Handlers compare by closure identity, so a re-rendered description that
/// rebuilds its closures is never property-equal to the previous one and the
/// reconciler replaces the subtree.
#[derive(Debug, Clone)]
pub enum PropValue {
    /// Plain attribute value
    Text(CompactString),
    /// Event callback
    Handler(EventHandler),
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Text(a), PropValue::Text(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value.into())
    }
}

impl From<EventHandler> for PropValue {
    fn from(handler: EventHandler) -> Self {
        PropValue::Handler(handler)
    }
}

/// An insertion-ordered property map with unique names.
///
/// Application order is declaration order, so hosts observe attributes in the
/// order the description named them.
#[derive(Debug, Clone, Default)]
pub struct Props {
    entries: SmallVec<[(CompactString, PropValue); 4]>,
}

impl Props {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, builder style.
    pub fn attr(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.set(name, value.into());
        self
    }

    /// Install an event handler, builder style.
    pub fn on(mut self, event: &str, handler: impl Fn() + 'static) -> Self {
        self.set(event, PropValue::Handler(EventHandler::new(handler)));
        self
    }

    /// Insert or replace a property, keeping first-insertion order.
    pub fn set(&mut self, name: &str, value: PropValue) {
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name.into(), value));
        }
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}
