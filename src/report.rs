//! Error routing for dashboard routines.
//!
//! Every call site that can fail declares a [`Visibility`] tier, and the
//! failure is routed through a [`Notifier`] accordingly. Alerts are the
//! blocking user-facing messages; the console is the developer log.

use colored::Colorize;

use crate::console::ConsoleLog;

/// How visible a failure at a given call site is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Dropped without a trace (log polling).
    Silent,
    /// Written to the developer console only (list loads, voice poll).
    Logged,
    /// Shown to the user as an alert (mutating actions).
    Surfaced,
}

/// User-facing and developer-facing output of the dashboard.
pub trait Notifier {
    /// Blocking user alert.
    fn alert(&mut self, message: &str);
    /// Developer console entry.
    fn console(&mut self, source: &str, message: &str);
}

impl Visibility {
    /// Route a failure. `label` prefixes the error text: it becomes the
    /// console source for `Logged` and the alert prefix for `Surfaced`.
    pub fn route(self, notifier: &mut dyn Notifier, label: &str, err: &anyhow::Error) {
        match self {
            Self::Silent => {}
            Self::Logged => notifier.console(label, &format!("{err:#}")),
            Self::Surfaced => notifier.alert(&format!("{label}: {err:#}")),
        }
    }
}

/// Result of a user-triggered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request was sent and acknowledged.
    Completed,
    /// Client-side validation refused the action; nothing was sent.
    Rejected,
    /// The request failed in transport or parsing.
    Failed,
}

impl Outcome {
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

// ---------------------------------------------------------------------------
// Terminal notifier
// ---------------------------------------------------------------------------

/// Prints alerts to stderr and forwards console entries to a [`ConsoleLog`].
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    console: ConsoleLog,
}

impl TerminalNotifier {
    pub fn new(console: ConsoleLog) -> Self {
        Self { console }
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{} {}", "!".yellow().bold(), message.bold());
    }

    fn console(&mut self, source: &str, message: &str) {
        self.console.error(source, message);
    }
}

// ---------------------------------------------------------------------------
// Recording notifier
// ---------------------------------------------------------------------------

/// Keeps every alert and console entry in memory.
///
/// Useful for embedding the dashboard in another front end, and in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
    pub console: Vec<(String, String)>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn console(&mut self, source: &str, message: &str) {
        self.console.push((source.to_string(), message.to_string()));
    }
}
