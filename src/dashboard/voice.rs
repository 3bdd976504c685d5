use crate::client::{Backend, VoiceState};
use crate::report::{Notifier, Outcome, Visibility};

/// Voice control panel: last known state and its one-line summary.
#[derive(Debug, Clone, Default)]
pub struct VoiceView {
    state: Option<VoiceState>,
}

impl VoiceView {
    pub fn state(&self) -> Option<VoiceState> {
        self.state
    }

    /// `Status: Enabled | Listening: No`, or empty before the first load.
    pub fn summary(&self) -> String {
        self.state.map(summarize).unwrap_or_default()
    }
}

pub fn summarize(state: VoiceState) -> String {
    format!(
        "Status: {} | Listening: {}",
        if state.enabled { "Enabled" } else { "Disabled" },
        if state.listening { "Yes" } else { "No" }
    )
}

/// Refresh from `GET /voice/status`. Failures go to the console only.
pub fn load(backend: &dyn Backend, view: &mut VoiceView, notifier: &mut dyn Notifier) {
    match backend.voice_status() {
        Ok(state) => view.state = Some(state),
        Err(err) => Visibility::Logged.route(notifier, "Failed to load voice status", &err),
    }
}

/// Enable or disable voice, then refresh the status line.
pub fn toggle(
    backend: &dyn Backend,
    view: &mut VoiceView,
    notifier: &mut dyn Notifier,
    enable: bool,
) -> Outcome {
    let result = if enable {
        backend.voice_enable()
    } else {
        backend.voice_disable()
    };

    match result {
        Ok(_) => {
            notifier.alert(if enable {
                "Voice enabled!"
            } else {
                "Voice disabled!"
            });
            load(backend, view, notifier);
            Outcome::Completed
        }
        Err(err) => {
            Visibility::Surfaced.route(notifier, "Error", &err);
            Outcome::Failed
        }
    }
}
