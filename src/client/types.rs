use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A loaded plugin as reported by `GET /plugins`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    pub folder: String,
    /// Behavior injection text. Absent, `null` and `""` all mean "none".
    #[serde(default)]
    pub behavior: Option<String>,
}

/// A running agent as reported by `GET /agents`. `name` is unique per backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub model: String,
}

/// Voice subsystem flags from `GET /voice/status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceState {
    pub enabled: bool,
    #[serde(default)]
    pub listening: bool,
}

/// Response body of `POST /set_model`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelChanged {
    pub new_model: String,
}

/// Summary from `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub voice_enabled: bool,
}

/// One row of a user's long-term memory.
///
/// The backend sends rows as `[role, content]` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String)")]
pub struct MemoryEntry {
    pub role: String,
    pub content: String,
}

impl From<(String, String)> for MemoryEntry {
    fn from((role, content): (String, String)) -> Self {
        Self { role, content }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct SetModelRequest<'a> {
    pub model: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateAgentRequest<'a> {
    pub name: &'a str,
    pub model: &'a str,
}
