//! Backend API surface consumed by the dashboard.
//!
//! [`Backend`] is the seam between the view controller and the network:
//! [`HttpBackend`] talks to the real service, tests substitute a scripted
//! fake. Every method is one request/response exchange; non-2xx statuses,
//! transport failures and malformed JSON all come back as `Err`.

pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::Result;
use serde_json::Value;

pub use http::HttpBackend;
pub use types::{Agent, MemoryEntry, ModelChanged, Plugin, ServerStatus, VoiceState};

/// The HTTP endpoints of the bot control backend.
///
/// Acknowledgement bodies are returned as raw JSON; callers only use them to
/// confirm success.
pub trait Backend {
    /// `GET /logs`
    fn logs(&self) -> Result<Vec<String>>;
    /// `GET /models`
    fn models(&self) -> Result<Vec<String>>;
    /// `POST /set_model {model}`
    fn set_model(&self, model: &str) -> Result<ModelChanged>;
    /// `GET /memory`
    fn memory(&self) -> Result<Value>;
    /// `POST /memory`
    fn save_memory(&self, document: &Value) -> Result<Value>;
    /// `GET /plugins`
    fn plugins(&self) -> Result<Vec<Plugin>>;
    /// `POST /plugins/reload {name}`
    fn reload_plugin(&self, name: &str) -> Result<Value>;
    /// `GET /agents`
    fn agents(&self) -> Result<Vec<Agent>>;
    /// `POST /agents/create {name, model}`
    fn create_agent(&self, name: &str, model: &str) -> Result<Value>;
    /// `POST /agents/kill {name}`
    fn kill_agent(&self, name: &str) -> Result<Value>;
    /// `GET /voice/status`
    fn voice_status(&self) -> Result<VoiceState>;
    /// `POST /voice/enable`
    fn voice_enable(&self) -> Result<Value>;
    /// `POST /voice/disable`
    fn voice_disable(&self) -> Result<Value>;
    /// `GET /status`
    fn status(&self) -> Result<ServerStatus>;
    /// `GET /long_memory?user=`
    fn long_memory(&self, user: &str) -> Result<Vec<MemoryEntry>>;
}
