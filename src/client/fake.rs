//! Scripted in-memory backend for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, anyhow};
use serde_json::{Value, json};

use super::Backend;
use super::types::{Agent, MemoryEntry, ModelChanged, Plugin, ServerStatus, VoiceState};

/// Canned responses plus a log of every request made.
///
/// `logs` is a queue: each poll pops the next batch (an empty batch once
/// drained). Endpoints listed in `failing` return a transport error.
#[derive(Default)]
pub struct FakeBackend {
    pub log_batches: RefCell<VecDeque<Vec<String>>>,
    pub models: Vec<String>,
    pub memory: RefCell<Value>,
    pub plugins: Vec<Plugin>,
    pub agents: RefCell<Vec<Agent>>,
    pub voice: RefCell<VoiceState>,
    pub long_memory: Vec<MemoryEntry>,
    pub failing: Vec<&'static str>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            memory: RefCell::new(json!({})),
            ..Default::default()
        }
    }

    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing.push(endpoint);
        self
    }

    pub fn push_logs(&self, lines: &[&str]) {
        self.log_batches
            .borrow_mut()
            .push_back(lines.iter().map(|l| l.to_string()).collect());
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == endpoint).count()
    }

    fn hit(&self, endpoint: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(endpoint.to_string());
        if self.failing.contains(&endpoint) {
            return Err(anyhow!("{endpoint}: connection refused"));
        }
        Ok(())
    }
}

impl Backend for FakeBackend {
    fn logs(&self) -> Result<Vec<String>> {
        self.hit("GET /logs")?;
        Ok(self.log_batches.borrow_mut().pop_front().unwrap_or_default())
    }

    fn models(&self) -> Result<Vec<String>> {
        self.hit("GET /models")?;
        Ok(self.models.clone())
    }

    fn set_model(&self, model: &str) -> Result<ModelChanged> {
        self.hit("POST /set_model")?;
        Ok(ModelChanged {
            new_model: model.to_string(),
        })
    }

    fn memory(&self) -> Result<Value> {
        self.hit("GET /memory")?;
        Ok(self.memory.borrow().clone())
    }

    fn save_memory(&self, document: &Value) -> Result<Value> {
        self.hit("POST /memory")?;
        *self.memory.borrow_mut() = document.clone();
        Ok(json!({"status": "saved"}))
    }

    fn plugins(&self) -> Result<Vec<Plugin>> {
        self.hit("GET /plugins")?;
        Ok(self.plugins.clone())
    }

    fn reload_plugin(&self, _name: &str) -> Result<Value> {
        self.hit("POST /plugins/reload")?;
        Ok(json!({"status": "reloaded"}))
    }

    fn agents(&self) -> Result<Vec<Agent>> {
        self.hit("GET /agents")?;
        Ok(self.agents.borrow().clone())
    }

    fn create_agent(&self, name: &str, model: &str) -> Result<Value> {
        self.hit("POST /agents/create")?;
        self.agents.borrow_mut().push(Agent {
            name: name.to_string(),
            model: model.to_string(),
        });
        Ok(json!({"status": "spawned"}))
    }

    fn kill_agent(&self, name: &str) -> Result<Value> {
        self.hit("POST /agents/kill")?;
        self.agents.borrow_mut().retain(|a| a.name != name);
        Ok(json!({"status": "killed"}))
    }

    fn voice_status(&self) -> Result<VoiceState> {
        self.hit("GET /voice/status")?;
        Ok(*self.voice.borrow())
    }

    fn voice_enable(&self) -> Result<Value> {
        self.hit("POST /voice/enable")?;
        self.voice.borrow_mut().enabled = true;
        Ok(json!({"status": "voice_on"}))
    }

    fn voice_disable(&self) -> Result<Value> {
        self.hit("POST /voice/disable")?;
        self.voice.borrow_mut().enabled = false;
        Ok(json!({"status": "voice_off"}))
    }

    fn status(&self) -> Result<ServerStatus> {
        self.hit("GET /status")?;
        Ok(ServerStatus {
            status: "ok".to_string(),
            model: self.models.first().cloned(),
            voice_enabled: self.voice.borrow().enabled,
        })
    }

    fn long_memory(&self, _user: &str) -> Result<Vec<MemoryEntry>> {
        self.hit("GET /long_memory")?;
        Ok(self.long_memory.clone())
    }
}
