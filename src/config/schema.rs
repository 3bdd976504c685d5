/// Configuration schema and defaults for botdash.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[backend]`, `[polling]`, `[dashboard]` and `[console]`.
///
/// Every field has a built-in default. Users only need to set the values they
/// want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level botdash configuration.
///
/// Maps directly to the `~/.botdash/config.toml` and `.botdash.toml` file
/// schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub backend: BackendConfig,
    pub polling: PollingConfig,
    pub dashboard: DashboardConfig,
    pub console: ConsoleConfig,
}

// ---------------------------------------------------------------------------
// [backend]
// ---------------------------------------------------------------------------

/// Where the control backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend HTTP API.
    pub url: String,
    /// Per-request timeout (milliseconds).
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [polling]
// ---------------------------------------------------------------------------

/// Cadence of the two repeating poll tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub logs_interval_ms: u64,
    pub voice_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            logs_interval_ms: 1000,
            voice_interval_ms: 2000,
        }
    }
}

// ---------------------------------------------------------------------------
// [dashboard]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Panel shown when the dashboard starts.
    pub initial_panel: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            initial_panel: "logs".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [console]
// ---------------------------------------------------------------------------

/// Developer console sink for `Logged` errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Append entries to `~/.botdash/console.jsonl`.
    pub enabled: bool,
    /// Also echo entries to stderr.
    pub echo: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            echo: false,
        }
    }
}

impl DashConfig {
    /// Annotated default config written by `botdash config init`.
    pub fn default_toml() -> String {
        r#"# botdash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (BOTDASH_*)
#   2. Project config (.botdash.toml in current directory)
#   3. User global config (~/.botdash/config.toml)
#   4. Built-in defaults

[backend]
url = "http://localhost:5000"
timeout_ms = 10000

[polling]
logs_interval_ms = 1000               # Log stream poll cadence
voice_interval_ms = 2000              # Voice status poll cadence

[dashboard]
initial_panel = "logs"                # logs | models | memory | plugins | agents | voice | status

[console]
enabled = true                        # Record load failures in ~/.botdash/console.jsonl
echo = false                          # Also print them to stderr
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_cadence() {
        let config = DashConfig::default();
        assert_eq!(config.polling.logs_interval_ms, 1000);
        assert_eq!(config.polling.voice_interval_ms, 2000);
        assert_eq!(config.dashboard.initial_panel, "logs");
        assert!(config.console.enabled);
    }

    #[test]
    fn default_toml_parses_back() {
        let toml_str = DashConfig::default_toml();
        let config: DashConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.backend.url, "http://localhost:5000");
        assert_eq!(config.backend.timeout_ms, 10_000);
        assert!(!config.console.echo);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[backend]
url = "http://bot.lan:8080"
"#;
        let config: DashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.url, "http://bot.lan:8080");
        assert_eq!(config.backend.timeout_ms, 10_000);
        assert_eq!(config.polling.voice_interval_ms, 2000);
    }
}
