use super::Listing;
use crate::client::{Agent, Backend};
use crate::report::{Notifier, Outcome, Visibility};

pub const NO_AGENTS: &str = "No active agents.";

/// Agent list plus the create/kill form inputs.
#[derive(Debug, Clone, Default)]
pub struct AgentView {
    listing: Listing<Agent>,
    pub name_input: String,
    pub model_input: String,
    pub kill_input: String,
}

impl AgentView {
    pub fn render(&self) -> String {
        self.listing.render_with(NO_AGENTS, "\n", |a| {
            format!("{} - Model: {}", a.name, a.model)
        })
    }
}

/// Replace the agent list with the result of `GET /agents`.
pub fn load(backend: &dyn Backend, view: &mut AgentView, notifier: &mut dyn Notifier) {
    match backend.agents() {
        Ok(agents) => view.listing = Listing::from_items(agents),
        Err(err) => Visibility::Logged.route(notifier, "Failed to load agents", &err),
    }
}

/// Spawn an agent from the name/model inputs.
///
/// Name uniqueness is the backend's call; no check against the current list
/// is made here.
pub fn create(backend: &dyn Backend, view: &mut AgentView, notifier: &mut dyn Notifier) -> Outcome {
    if view.name_input.is_empty() || view.model_input.is_empty() {
        notifier.alert("Please provide both name and model");
        return Outcome::Rejected;
    }

    match backend.create_agent(&view.name_input, &view.model_input) {
        Ok(_) => {
            notifier.alert("Agent created!");
            view.name_input.clear();
            view.model_input.clear();
            load(backend, view, notifier);
            Outcome::Completed
        }
        Err(err) => {
            Visibility::Surfaced.route(notifier, "Error creating agent", &err);
            Outcome::Failed
        }
    }
}

/// Stop the agent named in the kill input.
pub fn kill(backend: &dyn Backend, view: &mut AgentView, notifier: &mut dyn Notifier) -> Outcome {
    if view.kill_input.is_empty() {
        notifier.alert("Please provide agent name");
        return Outcome::Rejected;
    }

    match backend.kill_agent(&view.kill_input) {
        Ok(_) => {
            notifier.alert("Agent killed!");
            view.kill_input.clear();
            load(backend, view, notifier);
            Outcome::Completed
        }
        Err(err) => {
            Visibility::Surfaced.route(notifier, "Error killing agent", &err);
            Outcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeBackend;
    use crate::report::RecordingNotifier;

    #[test]
    fn empty_list_renders_placeholder() {
        let backend = FakeBackend::new();
        let mut view = AgentView::default();
        let mut notifier = RecordingNotifier::new();

        load(&backend, &mut view, &mut notifier);
        assert_eq!(view.render(), "No active agents.");
    }

    #[test]
    fn create_requires_both_fields() {
        let backend = FakeBackend::new();
        let mut view = AgentView::default();
        let mut notifier = RecordingNotifier::new();

        view.model_input = "llama3".to_string();
        assert_eq!(create(&backend, &mut view, &mut notifier), Outcome::Rejected);
        assert_eq!(backend.call_count(), 0);
        assert_eq!(
            notifier.last_alert(),
            Some("Please provide both name and model")
        );

        view.model_input.clear();
        view.name_input = "scout".to_string();
        assert_eq!(create(&backend, &mut view, &mut notifier), Outcome::Rejected);
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn create_clears_inputs_and_reloads() {
        let backend = FakeBackend::new();
        let mut view = AgentView::default();
        let mut notifier = RecordingNotifier::new();
        view.name_input = "scout".to_string();
        view.model_input = "llama3".to_string();

        assert_eq!(create(&backend, &mut view, &mut notifier), Outcome::Completed);
        assert_eq!(notifier.last_alert(), Some("Agent created!"));
        assert!(view.name_input.is_empty());
        assert!(view.model_input.is_empty());
        assert_eq!(view.render(), "scout - Model: llama3");
    }

    #[test]
    fn duplicate_create_is_not_prechecked() {
        let backend = FakeBackend::new();
        let mut view = AgentView::default();
        let mut notifier = RecordingNotifier::new();

        for _ in 0..2 {
            view.name_input = "scout".to_string();
            view.model_input = "llama3".to_string();
            create(&backend, &mut view, &mut notifier);
        }
        assert_eq!(backend.calls_to("POST /agents/create"), 2);
    }

    #[test]
    fn kill_requires_name() {
        let backend = FakeBackend::new();
        let mut view = AgentView::default();
        let mut notifier = RecordingNotifier::new();

        assert_eq!(kill(&backend, &mut view, &mut notifier), Outcome::Rejected);
        assert_eq!(notifier.last_alert(), Some("Please provide agent name"));
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn kill_clears_input_and_reloads() {
        let backend = FakeBackend::new();
        backend.agents.borrow_mut().push(Agent {
            name: "scout".to_string(),
            model: "llama3".to_string(),
        });
        let mut view = AgentView::default();
        let mut notifier = RecordingNotifier::new();
        view.kill_input = "scout".to_string();

        assert_eq!(kill(&backend, &mut view, &mut notifier), Outcome::Completed);
        assert_eq!(notifier.last_alert(), Some("Agent killed!"));
        assert!(view.kill_input.is_empty());
        assert_eq!(view.render(), "No active agents.");
    }

    #[test]
    fn create_failure_keeps_inputs() {
        let backend = FakeBackend::new().failing("POST /agents/create");
        let mut view = AgentView::default();
        let mut notifier = RecordingNotifier::new();
        view.name_input = "scout".to_string();
        view.model_input = "llama3".to_string();

        assert_eq!(create(&backend, &mut view, &mut notifier), Outcome::Failed);
        assert!(
            notifier
                .last_alert()
                .unwrap()
                .starts_with("Error creating agent: ")
        );
        assert_eq!(view.name_input, "scout");
        assert_eq!(backend.calls_to("GET /agents"), 0);
    }
}
