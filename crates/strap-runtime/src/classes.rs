//! CSS class sets
//!
//! Widgets describe their styling as an ordered map of class name to enabled
//! flag, mirroring the object syntax of template class bindings.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassSet(IndexMap<String, bool>);

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ClassSet::insert`]
    pub fn with(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.insert(name, enabled);
        self
    }

    /// Set a class flag. Empty names are ignored.
    pub fn insert(&mut self, name: impl Into<String>, enabled: bool) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        self.0.insert(name, enabled);
    }

    /// True if the class is present and enabled
    pub fn contains(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Enabled class names in insertion order
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
    }

    pub fn to_class_string(&self) -> String {
        self.enabled().collect::<Vec<_>>().join(" ")
    }
}

impl std::fmt::Display for ClassSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_class_string())
    }
}
