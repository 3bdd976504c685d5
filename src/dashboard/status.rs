use crate::client::{Backend, ServerStatus};
use crate::report::{Notifier, Visibility};

/// Backend health summary from `GET /status`.
#[derive(Debug, Clone, Default)]
pub struct StatusView {
    status: Option<ServerStatus>,
}

impl StatusView {
    pub fn summary(&self) -> String {
        let Some(s) = &self.status else {
            return String::new();
        };
        format!(
            "Backend: {} | Model: {} | Voice: {}",
            s.status,
            s.model.as_deref().unwrap_or("none"),
            if s.voice_enabled { "on" } else { "off" }
        )
    }
}

pub fn load(backend: &dyn Backend, view: &mut StatusView, notifier: &mut dyn Notifier) {
    match backend.status() {
        Ok(status) => view.status = Some(status),
        Err(err) => Visibility::Logged.route(notifier, "Failed to load status", &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeBackend;
    use crate::report::RecordingNotifier;

    #[test]
    fn summary_reflects_backend() {
        let backend = FakeBackend {
            models: vec!["llama3".to_string()],
            ..FakeBackend::new()
        };
        let mut view = StatusView::default();
        let mut notifier = RecordingNotifier::new();

        load(&backend, &mut view, &mut notifier);
        assert_eq!(view.summary(), "Backend: ok | Model: llama3 | Voice: off");
    }

    #[test]
    fn missing_model_renders_none() {
        let view = StatusView {
            status: Some(ServerStatus {
                status: "ok".to_string(),
                model: None,
                voice_enabled: true,
            }),
        };
        assert_eq!(view.summary(), "Backend: ok | Model: none | Voice: on");
    }
}
