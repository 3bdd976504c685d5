use std::fmt;

use super::Listing;
use crate::client::{Backend, Plugin};
use crate::report::{Notifier, Outcome, Visibility};

pub const NO_PLUGINS: &str = "No plugins installed.";

/// Reload action attached to a rendered plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadAction {
    plugin: String,
}

impl ReloadAction {
    pub fn plugin(&self) -> &str {
        &self.plugin
    }
}

/// One rendered plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginBlock {
    pub name: String,
    pub folder: String,
    pub behavior: String,
    pub reload: ReloadAction,
}

impl From<Plugin> for PluginBlock {
    fn from(p: Plugin) -> Self {
        let behavior = p
            .behavior
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "None".to_string());
        Self {
            reload: ReloadAction {
                plugin: p.name.clone(),
            },
            name: p.name,
            folder: p.folder,
            behavior,
        }
    }
}

impl fmt::Display for PluginBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Folder: {}", self.folder)?;
        write!(f, "Behavior: {}", self.behavior)
    }
}

/// Plugin list panel.
#[derive(Debug, Clone, Default)]
pub struct PluginView {
    listing: Listing<PluginBlock>,
}

impl PluginView {
    pub fn blocks(&self) -> &[PluginBlock] {
        self.listing.items()
    }

    /// Reload action for a rendered plugin, if it is on screen.
    pub fn action(&self, name: &str) -> Option<&ReloadAction> {
        self.blocks()
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.reload)
    }

    pub fn render(&self) -> String {
        self.listing.render(NO_PLUGINS, "\n\n")
    }
}

/// Replace the plugin list with the result of `GET /plugins`.
pub fn load(backend: &dyn Backend, view: &mut PluginView, notifier: &mut dyn Notifier) {
    match backend.plugins() {
        Ok(plugins) => {
            view.listing = Listing::from_items(plugins.into_iter().map(PluginBlock::from));
        }
        Err(err) => Visibility::Logged.route(notifier, "Failed to load plugins", &err),
    }
}

/// Reload one plugin by name, then refresh the list.
pub fn reload(
    backend: &dyn Backend,
    view: &mut PluginView,
    notifier: &mut dyn Notifier,
    name: &str,
) -> Outcome {
    match backend.reload_plugin(name) {
        Ok(_) => {
            notifier.alert(&format!("Plugin {name} reloaded!"));
            load(backend, view, notifier);
            Outcome::Completed
        }
        Err(err) => {
            Visibility::Surfaced.route(notifier, "Error reloading plugin", &err);
            Outcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeBackend;
    use crate::report::RecordingNotifier;

    fn plugin(name: &str, behavior: Option<&str>) -> Plugin {
        Plugin {
            name: name.to_string(),
            folder: format!("plugins/{name}"),
            behavior: behavior.map(str::to_string),
        }
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let backend = FakeBackend::new();
        let mut view = PluginView::default();
        let mut notifier = RecordingNotifier::new();

        load(&backend, &mut view, &mut notifier);
        assert_eq!(view.render(), "No plugins installed.");
    }

    #[test]
    fn missing_behavior_renders_none() {
        let backend = FakeBackend {
            plugins: vec![Plugin {
                name: "x".to_string(),
                folder: "f".to_string(),
                behavior: None,
            }],
            ..FakeBackend::new()
        };
        let mut view = PluginView::default();
        let mut notifier = RecordingNotifier::new();

        load(&backend, &mut view, &mut notifier);
        assert_eq!(view.blocks()[0].behavior, "None");
        assert_eq!(view.render(), "x\nFolder: f\nBehavior: None");
        assert_eq!(view.action("x").map(ReloadAction::plugin), Some("x"));
    }

    #[test]
    fn empty_behavior_renders_none() {
        let block = PluginBlock::from(plugin("echo", Some("")));
        assert_eq!(block.behavior, "None");

        let block = PluginBlock::from(plugin("echo", Some("be concise")));
        assert_eq!(block.behavior, "be concise");
    }

    #[test]
    fn reload_alerts_and_refreshes() {
        let backend = FakeBackend {
            plugins: vec![plugin("weather", None)],
            ..FakeBackend::new()
        };
        let mut view = PluginView::default();
        let mut notifier = RecordingNotifier::new();

        let outcome = reload(&backend, &mut view, &mut notifier, "weather");
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(notifier.last_alert(), Some("Plugin weather reloaded!"));
        assert_eq!(backend.calls_to("GET /plugins"), 1);
        assert_eq!(view.blocks().len(), 1);
    }

    #[test]
    fn reload_failure_is_surfaced_without_refresh() {
        let backend = FakeBackend::new().failing("POST /plugins/reload");
        let mut view = PluginView::default();
        let mut notifier = RecordingNotifier::new();

        let outcome = reload(&backend, &mut view, &mut notifier, "weather");
        assert_eq!(outcome, Outcome::Failed);
        assert!(
            notifier
                .last_alert()
                .unwrap()
                .starts_with("Error reloading plugin: ")
        );
        assert_eq!(backend.calls_to("GET /plugins"), 0);
    }

    #[test]
    fn reload_replaces_stale_blocks() {
        let mut backend = FakeBackend {
            plugins: vec![plugin("a", None), plugin("b", None)],
            ..FakeBackend::new()
        };
        let mut view = PluginView::default();
        let mut notifier = RecordingNotifier::new();
        load(&backend, &mut view, &mut notifier);
        assert!(view.action("b").is_some());

        backend.plugins.pop();
        reload(&backend, &mut view, &mut notifier, "a");
        assert!(view.action("b").is_none());
        assert_eq!(view.blocks().len(), 1);
    }
}
