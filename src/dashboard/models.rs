use crate::client::Backend;
use crate::report::{Notifier, Outcome, Visibility};

pub const SELECT_PROMPT: &str = "Please select a model";

/// Model selector: available options, the candidate selection, and the
/// status line under it.
#[derive(Debug, Clone, Default)]
pub struct ModelView {
    options: Vec<String>,
    selected: Option<String>,
    status: String,
}

impl ModelView {
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace every option. Like a freshly filled select box, the first
    /// option becomes the selection.
    pub fn replace_options(&mut self, names: Vec<String>) {
        self.selected = names.first().cloned();
        self.options = names;
    }

    /// Select an option by name. Names not in the list are refused.
    pub fn select(&mut self, name: &str) -> bool {
        if self.options.iter().any(|o| o == name) {
            self.selected = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

/// Refresh the option list from `GET /models`.
pub fn load(backend: &dyn Backend, view: &mut ModelView, notifier: &mut dyn Notifier) {
    match backend.models() {
        Ok(names) => view.replace_options(names),
        Err(err) => Visibility::Logged.route(notifier, "Failed to load models", &err),
    }
}

/// Ask the backend to switch to the selected model.
///
/// Both the outcome and any failure are written to the status line.
pub fn change(backend: &dyn Backend, view: &mut ModelView) -> Outcome {
    let Some(model) = view.selected.clone().filter(|m| !m.is_empty()) else {
        view.status = SELECT_PROMPT.to_string();
        return Outcome::Rejected;
    };

    match backend.set_model(&model) {
        Ok(changed) => {
            view.status = format!("Model changed to {}", changed.new_model);
            Outcome::Completed
        }
        Err(err) => {
            view.status = format!("Error: {err:#}");
            Outcome::Failed
        }
    }
}
