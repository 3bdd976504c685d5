use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Debug, Parser)]
#[command(name = "botdash")]
#[command(about = "Terminal dashboard for the bot control backend")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Stream logs and voice status until interrupted
    Watch {
        /// Stop after N seconds
        #[arg(long)]
        duration_secs: Option<u64>,
        /// Panel to print at startup (default: config `dashboard.initial_panel`)
        #[arg(long)]
        panel: Option<String>,
    },
    /// Load the dashboard and print one panel
    Show {
        /// logs | models | memory | plugins | agents | voice | status
        panel: String,
    },
    /// List models offered by the backend
    Models,
    /// Switch the backend to another model
    SetModel {
        /// Model name as listed by `botdash models`
        name: String,
    },
    /// View or replace the memory document
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },
    /// Look up a user's recent long-term memory
    LongMemory {
        user: String,
    },
    /// List or reload plugins
    Plugins {
        #[command(subcommand)]
        action: Option<PluginAction>,
    },
    /// List, create or kill agents
    Agents {
        #[command(subcommand)]
        action: Option<AgentAction>,
    },
    /// Voice control
    Voice {
        #[command(subcommand)]
        action: Option<VoiceAction>,
    },
    /// Backend status summary
    Status,
    /// Show recent developer console entries
    Console {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        tail: usize,
    },
    /// Manage configuration: show, init, set, reset
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Check configuration and backend reachability
    Health,
}

#[derive(Debug, Subcommand)]
enum MemoryAction {
    /// Print the memory document
    Show,
    /// Save a JSON document (from a file, or stdin when omitted)
    Save {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum PluginAction {
    /// Reload a plugin by name
    Reload { name: String },
}

#[derive(Debug, Subcommand)]
enum AgentAction {
    /// Spawn an agent
    Create { name: String, model: String },
    /// Stop an agent
    Kill { name: String },
}

#[derive(Debug, Subcommand)]
enum VoiceAction {
    /// Show voice status (default)
    Status,
    /// Enable voice
    On,
    /// Disable voice
    Off,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Write the default config to ~/.botdash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a configuration value (e.g., backend.url http://bot:5000)
    Set { key: String, value: String },
    /// Reset configuration to defaults
    Reset,
}

fn main() -> Result<ExitCode> {
    let app = App::parse();

    let outcome = match app.command {
        Commands::Watch {
            duration_secs,
            panel,
        } => cli::run_watch(duration_secs, panel.as_deref())?,
        Commands::Show { panel } => cli::run_show(&panel)?,
        Commands::Models => cli::run_models()?,
        Commands::SetModel { name } => cli::run_set_model(&name)?,
        Commands::Memory { action } => match action {
            MemoryAction::Show => cli::run_memory_show()?,
            MemoryAction::Save { file } => cli::run_memory_save(file.as_deref())?,
        },
        Commands::LongMemory { user } => cli::run_long_memory(&user)?,
        Commands::Plugins { action } => match action {
            None => cli::run_plugins()?,
            Some(PluginAction::Reload { name }) => cli::run_plugin_reload(&name)?,
        },
        Commands::Agents { action } => match action {
            None => cli::run_agents()?,
            Some(AgentAction::Create { name, model }) => cli::run_agent_create(&name, &model)?,
            Some(AgentAction::Kill { name }) => cli::run_agent_kill(&name)?,
        },
        Commands::Voice { action } => match action {
            None | Some(VoiceAction::Status) => cli::run_voice_status()?,
            Some(VoiceAction::On) => cli::run_voice_toggle(true)?,
            Some(VoiceAction::Off) => cli::run_voice_toggle(false)?,
        },
        Commands::Status => cli::run_status()?,
        Commands::Console { tail } => cli::run_console(tail)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show()?,
            ConfigAction::Init { force } => cli::run_config_init(force)?,
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value)?,
            ConfigAction::Reset => cli::run_config_reset()?,
        },
        Commands::Health => cli::run_health()?,
    };

    Ok(if outcome.is_completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
