//! Dashboard view controller.
//!
//! [`Dashboard`] owns the explicit [`DashboardState`] and drives every
//! load, poll and user action against a [`Backend`], routing failures
//! through a [`Notifier`]. Each view lives in its own submodule as a state
//! struct plus free functions that take the backend, that view's state, and
//! the notifier.
//!
//! Startup ([`Dashboard::bootstrap`]) shows the initial panel and performs
//! the one-shot loads. Repeating polls are registered on a
//! [`Scheduler`] by [`Dashboard::start_polling`] and run by
//! [`Dashboard::tick`] or [`Dashboard::run_until`].

pub mod agents;
pub mod logs;
pub mod memory;
pub mod models;
pub mod panels;
pub mod plugins;
pub mod status;
pub mod voice;

use std::fmt;
use std::time::{Duration, Instant};

use crate::client::Backend;
use crate::config::schema::PollingConfig;
use crate::report::{Notifier, Outcome};
use crate::schedule::{Scheduler, TaskHandle};

use agents::AgentView;
use logs::LogView;
use memory::{LongMemoryView, MemoryView};
use models::ModelView;
use panels::PanelSet;
use plugins::{PluginView, ReloadAction};
use status::StatusView;
use voice::VoiceView;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// A fully replaced list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    /// Nothing fetched yet.
    NotLoaded,
    /// Fetched, and the backend returned no items.
    Empty,
    Items(Vec<T>),
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::NotLoaded
    }
}

impl<T> Listing<T> {
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(items) => items,
            Self::NotLoaded | Self::Empty => &[],
        }
    }

    pub fn render_with(&self, empty: &str, sep: &str, f: impl Fn(&T) -> String) -> String {
        match self {
            Self::NotLoaded => String::new(),
            Self::Empty => empty.to_string(),
            Self::Items(items) => items.iter().map(f).collect::<Vec<_>>().join(sep),
        }
    }
}

impl<T: fmt::Display> Listing<T> {
    pub fn render(&self, empty: &str, sep: &str) -> String {
        self.render_with(empty, sep, |item| item.to_string())
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything the dashboard displays.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub panels: PanelSet,
    pub logs: LogView,
    pub models: ModelView,
    pub memory: MemoryView,
    pub long_memory: LongMemoryView,
    pub plugins: PluginView,
    pub agents: AgentView,
    pub voice: VoiceView,
    pub status: StatusView,
}

impl DashboardState {
    /// Text content of a panel, or `None` for an unknown panel id.
    pub fn render_panel(&self, panel: &str) -> Option<String> {
        let text = match panel {
            "logs" => self.logs.text().trim_end_matches('\n').to_string(),
            "models" => {
                let mut lines: Vec<String> = self
                    .models
                    .options()
                    .iter()
                    .map(|m| {
                        let marker = if Some(m.as_str()) == self.models.selected() {
                            ">"
                        } else {
                            " "
                        };
                        format!("{marker} {m}")
                    })
                    .collect();
                if !self.models.status().is_empty() {
                    lines.push(self.models.status().to_string());
                }
                lines.join("\n")
            }
            "memory" => {
                let mut text = self.memory.editor().to_string();
                let long = self.long_memory.render();
                if !long.is_empty() {
                    text.push_str("\n\n");
                    text.push_str(&long);
                }
                text
            }
            "plugins" => self.plugins.render(),
            "agents" => self.agents.render(),
            "voice" => self.voice.summary(),
            "status" => self.status.summary(),
            _ => return None,
        };
        Some(text)
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Repeating poll routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTask {
    Logs,
    Voice,
}

/// Handles for the two repeating polls registered by `start_polling`.
#[derive(Debug, Clone)]
pub struct PollHandles {
    pub logs: TaskHandle,
    pub voice: TaskHandle,
}

pub struct Dashboard<B, N> {
    backend: B,
    notifier: N,
    state: DashboardState,
}

impl<B: Backend, N: Notifier> Dashboard<B, N> {
    pub fn new(backend: B, notifier: N) -> Self {
        Self {
            backend,
            notifier,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Mutable state, for filling form inputs and the memory editor.
    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Show the initial panel and run every one-shot startup load.
    pub fn bootstrap(&mut self, initial_panel: &str) {
        if !self.show_page(initial_panel) {
            self.show_page("logs");
        }
        self.load_models();
        self.load_memory();
        self.load_plugins();
        self.load_agents();
        self.load_voice_status();
        self.load_status();
    }

    /// Register the log and voice polls on `scheduler`.
    pub fn start_polling(
        &self,
        scheduler: &mut Scheduler<PollTask>,
        polling: &PollingConfig,
        now: Instant,
    ) -> PollHandles {
        PollHandles {
            logs: scheduler.every(
                PollTask::Logs,
                Duration::from_millis(polling.logs_interval_ms),
                now,
            ),
            voice: scheduler.every(
                PollTask::Voice,
                Duration::from_millis(polling.voice_interval_ms),
                now,
            ),
        }
    }

    pub fn run_task(&mut self, task: PollTask) {
        match task {
            PollTask::Logs => self.poll_logs(),
            PollTask::Voice => self.load_voice_status(),
        }
    }

    /// Run every task due at `now`. Returns how many ran.
    pub fn tick(&mut self, scheduler: &mut Scheduler<PollTask>, now: Instant) -> usize {
        let due = scheduler.due(now);
        for task in &due {
            self.run_task(*task);
        }
        due.len()
    }

    /// Drive the scheduler until `deadline` (forever when `None`) or until
    /// every task is cancelled. `after_tick` sees the state after each batch.
    pub fn run_until(
        &mut self,
        scheduler: &mut Scheduler<PollTask>,
        deadline: Option<Instant>,
        mut after_tick: impl FnMut(&DashboardState, &[PollTask]),
    ) {
        while let Some(next) = scheduler.next_deadline() {
            if deadline.is_some_and(|d| next > d) {
                break;
            }
            let now = Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            }
            let due = scheduler.due(Instant::now());
            for task in &due {
                self.run_task(*task);
            }
            after_tick(&self.state, &due);
        }
    }

    // -- Page switcher --

    pub fn show_page(&mut self, name: &str) -> bool {
        self.state.panels.show_page(name)
    }

    // -- Logs --

    pub fn poll_logs(&mut self) {
        logs::poll(&self.backend, &mut self.state.logs, &mut self.notifier);
    }

    // -- Models --

    pub fn load_models(&mut self) {
        models::load(&self.backend, &mut self.state.models, &mut self.notifier);
    }

    pub fn select_model(&mut self, name: &str) -> bool {
        self.state.models.select(name)
    }

    pub fn change_model(&mut self) -> Outcome {
        models::change(&self.backend, &mut self.state.models)
    }

    // -- Memory --

    pub fn load_memory(&mut self) {
        memory::load(&self.backend, &mut self.state.memory, &mut self.notifier);
    }

    pub fn edit_memory(&mut self, text: impl Into<String>) {
        self.state.memory.edit(text);
    }

    pub fn save_memory(&mut self) -> Outcome {
        memory::save(&self.backend, &self.state.memory, &mut self.notifier)
    }

    pub fn load_long_memory(&mut self, user: &str) -> Outcome {
        memory::load_long(
            &self.backend,
            &mut self.state.long_memory,
            &mut self.notifier,
            user,
        )
    }

    // -- Plugins --

    pub fn load_plugins(&mut self) {
        plugins::load(&self.backend, &mut self.state.plugins, &mut self.notifier);
    }

    pub fn reload_plugin(&mut self, name: &str) -> Outcome {
        plugins::reload(
            &self.backend,
            &mut self.state.plugins,
            &mut self.notifier,
            name,
        )
    }

    /// Trigger the reload action attached to a rendered plugin block.
    pub fn trigger_reload(&mut self, action: &ReloadAction) -> Outcome {
        self.reload_plugin(action.plugin())
    }

    // -- Agents --

    pub fn load_agents(&mut self) {
        agents::load(&self.backend, &mut self.state.agents, &mut self.notifier);
    }

    pub fn create_agent(&mut self) -> Outcome {
        agents::create(&self.backend, &mut self.state.agents, &mut self.notifier)
    }

    pub fn kill_agent(&mut self) -> Outcome {
        agents::kill(&self.backend, &mut self.state.agents, &mut self.notifier)
    }

    // -- Voice --

    pub fn load_voice_status(&mut self) {
        voice::load(&self.backend, &mut self.state.voice, &mut self.notifier);
    }

    pub fn voice_on(&mut self) -> Outcome {
        voice::toggle(&self.backend, &mut self.state.voice, &mut self.notifier, true)
    }

    pub fn voice_off(&mut self) -> Outcome {
        voice::toggle(&self.backend, &mut self.state.voice, &mut self.notifier, false)
    }

    // -- Status --

    pub fn load_status(&mut self) {
        status::load(&self.backend, &mut self.state.status, &mut self.notifier);
    }
}
