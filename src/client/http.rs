/// Synchronous HTTP client for the bot control backend.
///
/// Uses a shared `ureq` agent so connections are reused across the
/// dashboard's polls. Every request carries the configured timeout; JSON
/// bodies are sent with `Content-Type: application/json`.
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Backend;
use super::types::{
    Agent, CreateAgentRequest, MemoryEntry, ModelChanged, NameRequest, Plugin, ServerStatus,
    SetModelRequest, VoiceState,
};
use crate::config::schema::BackendConfig;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    /// Build a client from the resolved `[backend]` config.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.url, Duration::from_millis(config.timeout_ms))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    ///
    /// On Windows, "localhost" may resolve to IPv6 (::1) first and stall
    /// when the backend only binds IPv4, so it is pinned to 127.0.0.1.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path).replace("://localhost", "://127.0.0.1")
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .agent
            .get(&self.endpoint(path))
            .call()
            .with_context(|| format!("GET {path} failed"))?;
        resp.into_json()
            .with_context(|| format!("invalid JSON from GET {path}"))
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self
            .agent
            .post(&self.endpoint(path))
            .send_json(body)
            .with_context(|| format!("POST {path} failed"))?;
        resp.into_json()
            .with_context(|| format!("invalid JSON from POST {path}"))
    }

    /// POST with no request body.
    fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .agent
            .post(&self.endpoint(path))
            .call()
            .with_context(|| format!("POST {path} failed"))?;
        resp.into_json()
            .with_context(|| format!("invalid JSON from POST {path}"))
    }
}

impl Backend for HttpBackend {
    fn logs(&self) -> Result<Vec<String>> {
        self.get("/logs")
    }

    fn models(&self) -> Result<Vec<String>> {
        self.get("/models")
    }

    fn set_model(&self, model: &str) -> Result<ModelChanged> {
        self.post("/set_model", &SetModelRequest { model })
    }

    fn memory(&self) -> Result<Value> {
        self.get("/memory")
    }

    fn save_memory(&self, document: &Value) -> Result<Value> {
        self.post("/memory", document)
    }

    fn plugins(&self) -> Result<Vec<Plugin>> {
        self.get("/plugins")
    }

    fn reload_plugin(&self, name: &str) -> Result<Value> {
        self.post("/plugins/reload", &NameRequest { name })
    }

    fn agents(&self) -> Result<Vec<Agent>> {
        self.get("/agents")
    }

    fn create_agent(&self, name: &str, model: &str) -> Result<Value> {
        self.post("/agents/create", &CreateAgentRequest { name, model })
    }

    fn kill_agent(&self, name: &str) -> Result<Value> {
        self.post("/agents/kill", &NameRequest { name })
    }

    fn voice_status(&self) -> Result<VoiceState> {
        self.get("/voice/status")
    }

    fn voice_enable(&self) -> Result<Value> {
        self.post_empty("/voice/enable")
    }

    fn voice_disable(&self) -> Result<Value> {
        self.post_empty("/voice/disable")
    }

    fn status(&self) -> Result<ServerStatus> {
        self.get("/status")
    }

    fn long_memory(&self, user: &str) -> Result<Vec<MemoryEntry>> {
        let resp = self
            .agent
            .get(&self.endpoint("/long_memory"))
            .query("user", user)
            .call()
            .context("GET /long_memory failed")?;
        resp.into_json()
            .context("invalid JSON from GET /long_memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HttpBackend::new("http://bot.lan:5000/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://bot.lan:5000");
        assert_eq!(client.endpoint("/logs"), "http://bot.lan:5000/logs");
    }

    #[test]
    fn localhost_is_pinned_to_ipv4() {
        let client = HttpBackend::new("http://localhost:5000", Duration::from_secs(1));
        assert_eq!(client.endpoint("/models"), "http://127.0.0.1:5000/models");
    }

    #[test]
    fn unreachable_backend_is_an_error() {
        // Port 9 (discard) is practically never served over HTTP locally.
        let client = HttpBackend::new("http://127.0.0.1:9", Duration::from_millis(200));
        assert!(client.logs().is_err());
    }
}
