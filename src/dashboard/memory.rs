use serde_json::Value;

use crate::client::{Backend, MemoryEntry};
use crate::report::{Notifier, Outcome, Visibility};

/// The memory editor: the bot's memory document as editable JSON text.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    editor: String,
}

impl MemoryView {
    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Replace the editor contents with user-typed text.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.editor = text.into();
    }
}

/// Fill the editor with the document from `GET /memory`, pretty-printed
/// with 2-space indentation.
pub fn load(backend: &dyn Backend, view: &mut MemoryView, notifier: &mut dyn Notifier) {
    let result = backend
        .memory()
        .and_then(|doc| Ok(serde_json::to_string_pretty(&doc)?));
    match result {
        Ok(text) => view.editor = text,
        Err(err) => Visibility::Logged.route(notifier, "Failed to load memory", &err),
    }
}

/// Parse the editor text and send it to `POST /memory`.
///
/// Invalid JSON is refused before anything is sent. The editor is not
/// reloaded after a save.
pub fn save(backend: &dyn Backend, view: &MemoryView, notifier: &mut dyn Notifier) -> Outcome {
    let document: Value = match serde_json::from_str(&view.editor) {
        Ok(doc) => doc,
        Err(err) => {
            notifier.alert(&format!("Invalid JSON: {err}"));
            return Outcome::Rejected;
        }
    };

    match backend.save_memory(&document) {
        Ok(_) => {
            notifier.alert("Memory saved!");
            Outcome::Completed
        }
        Err(err) => {
            Visibility::Surfaced.route(notifier, "Error saving memory", &err);
            Outcome::Failed
        }
    }
}

// ---------------------------------------------------------------------------
// Long-term memory lookup
// ---------------------------------------------------------------------------

/// Recent long-term memory rows for one user.
#[derive(Debug, Clone, Default)]
pub struct LongMemoryView {
    user: String,
    entries: Vec<MemoryEntry>,
}

impl LongMemoryView {
    pub fn render(&self) -> String {
        if self.user.is_empty() {
            return String::new();
        }
        if self.entries.is_empty() {
            return format!("No memory for {}.", self.user);
        }
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.role, e.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fetch a user's recent conversation rows from `GET /long_memory`.
///
/// A blank user clears the view without a request.
pub fn load_long(
    backend: &dyn Backend,
    view: &mut LongMemoryView,
    notifier: &mut dyn Notifier,
    user: &str,
) -> Outcome {
    let user = user.trim();
    if user.is_empty() {
        *view = LongMemoryView::default();
        return Outcome::Rejected;
    }

    match backend.long_memory(user) {
        Ok(entries) => {
            view.user = user.to_string();
            view.entries = entries;
            Outcome::Completed
        }
        Err(err) => {
            Visibility::Surfaced.route(notifier, "Error loading long memory", &err);
            Outcome::Failed
        }
    }
}
