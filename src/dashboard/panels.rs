/// Panel identifiers known to the dashboard, in display order.
pub const PANELS: [&str; 7] = [
    "logs", "models", "memory", "plugins", "agents", "voice", "status",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub id: String,
    pub active: bool,
    pub visible: bool,
}

/// The set of switchable panels. At most one is active and visible.
#[derive(Debug, Clone)]
pub struct PanelSet {
    panels: Vec<Panel>,
}

impl Default for PanelSet {
    fn default() -> Self {
        Self::new(PANELS)
    }
}

impl PanelSet {
    /// Build a set with every panel hidden.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            panels: ids
                .into_iter()
                .map(|id| Panel {
                    id: id.into(),
                    active: false,
                    visible: false,
                })
                .collect(),
        }
    }

    /// Show the panel named `name` and hide all others.
    ///
    /// Returns `false` and leaves the current panel in place when no panel
    /// has that name.
    pub fn show_page(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }
        for panel in &mut self.panels {
            let target = panel.id == name;
            panel.active = target;
            panel.visible = target;
        }
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.panels.iter().any(|p| p.id == name)
    }

    pub fn active(&self) -> Option<&str> {
        self.panels
            .iter()
            .find(|p| p.active)
            .map(|p| p.id.as_str())
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.panels.iter().any(|p| p.id == name && p.visible)
    }

    pub fn visible(&self) -> Vec<&str> {
        self.panels
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id.as_str())
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.panels.iter().map(|p| p.id.as_str())
    }
}
