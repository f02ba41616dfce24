//! Template Store — in-memory named templates with `{{key}}` substitution.
//!
//! This is the lightweight cousin of the blueprint flow: templates are plain
//! strings owned by the process, not persisted, and rendering is literal text
//! replacement with no escaping, conditionals, or nesting.

pub mod handlers;

use std::collections::HashMap;
use std::sync::RwLock;

pub struct TemplateStore {
    templates: RwLock<HashMap<String, String>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Stores or replaces the template body under `name`.
    pub fn upsert(&self, name: &str, body: String) {
        self.write().insert(name.to_string(), body);
    }

    /// Sorted template names, for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Renders the named template against `values`. Returns `None` when the
    /// template does not exist.
    pub fn render(&self, name: &str, values: &HashMap<String, String>) -> Option<String> {
        let body = self.read().get(name).cloned()?;
        Some(substitute(&body, values))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, String>> {
        self.templates.read().expect("template store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, String>> {
        self.templates.write().expect("template store lock poisoned")
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces every `{{key}}` occurrence with its value. Placeholders with no
/// matching key are left verbatim so callers can spot gaps in the output.
pub fn substitute(body: &str, values: &HashMap<String, String>) -> String {
    let mut rendered = body.to_string();
    for (key, value) in values {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}
