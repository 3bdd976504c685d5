//! CLI command implementations for botdash.
//!
//! Provides subcommand handlers for:
//! - `botdash watch`: live log stream and voice status
//! - `botdash show <panel>`: print one dashboard panel
//! - `botdash models|set-model|memory|long-memory|plugins|agents|voice|status`:
//!   runs the dashboard's loads and actions, one per invocation
//! - `botdash console`: recent developer console entries
//! - `botdash config show|init|set|reset`: configuration management
//! - `botdash health`: config sources and backend reachability
//!
//! Every handler returns the [`Outcome`] of the action it performed so the
//! process exit status reflects rejected or failed requests.

use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::Colorize;

use botdash::client::{Backend, HttpBackend};
use botdash::config::{self, DashConfig};
use botdash::console::ConsoleLog;
use botdash::dashboard::panels::PANELS;
use botdash::dashboard::{Dashboard, DashboardState, PollTask};
use botdash::report::{Outcome, TerminalNotifier};
use botdash::schedule::Scheduler;

type Terminal = Dashboard<HttpBackend, TerminalNotifier>;

/// Build a dashboard wired to the configured backend.
///
/// One-shot commands echo console entries to stderr, since there is no
/// running view to fall back on.
fn open(echo_console: bool) -> (Terminal, DashConfig) {
    let cfg = config::load();
    let mut console_cfg = cfg.console.clone();
    console_cfg.echo |= echo_console;

    let backend = HttpBackend::from_config(&cfg.backend);
    let notifier = TerminalNotifier::new(ConsoleLog::from_config(&console_cfg));
    (Dashboard::new(backend, notifier), cfg)
}

fn print_header(title: &str) {
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(50));
}

fn print_body(text: &str) {
    if text.is_empty() {
        println!("{}", "(nothing loaded)".dimmed());
    } else {
        println!("{text}");
    }
}

// ---------------------------------------------------------------------------
// botdash watch
// ---------------------------------------------------------------------------

/// Bootstrap the dashboard and run the poll loop.
///
/// New log lines are printed as they arrive; the voice summary is printed
/// whenever it changes.
pub fn run_watch(duration_secs: Option<u64>, panel: Option<&str>) -> Result<Outcome> {
    let (mut dash, cfg) = open(false);
    let initial = panel.unwrap_or(&cfg.dashboard.initial_panel).to_string();

    dash.bootstrap(&initial);

    println!(
        "{} {}",
        "botdash watching".bold().cyan(),
        dash.backend().base_url().dimmed()
    );
    println!("{}", "Press Ctrl+C to stop.".dimmed());
    println!();

    let shown = dash.state().panels.active().unwrap_or("logs").to_string();
    if shown != "logs" {
        print_panel(dash.state(), &shown);
        println!();
    }

    let mut voice_line = dash.state().voice.summary();
    if !voice_line.is_empty() {
        print_voice_line(&voice_line);
    }

    let mut printed = 0usize;
    let mut scheduler = Scheduler::new();
    let start = Instant::now();
    dash.start_polling(&mut scheduler, &cfg.polling, start);
    let deadline = duration_secs.map(|s| start + Duration::from_secs(s));

    dash.run_until(&mut scheduler, deadline, |state, tasks| {
        for task in tasks {
            match task {
                PollTask::Logs => {
                    let text = state.logs.text();
                    if text.len() > printed {
                        print!("{}", &text[printed..]);
                        printed = text.len();
                    }
                }
                PollTask::Voice => {
                    let summary = state.voice.summary();
                    if summary != voice_line && !summary.is_empty() {
                        print_voice_line(&summary);
                        voice_line = summary;
                    }
                }
            }
        }
    });

    Ok(Outcome::Completed)
}

fn print_voice_line(summary: &str) {
    println!(
        "{} {} {}",
        chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
        "voice".magenta(),
        summary
    );
}

// ---------------------------------------------------------------------------
// botdash show
// ---------------------------------------------------------------------------

/// Bootstrap, poll logs once, and print one panel.
pub fn run_show(panel: &str) -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.bootstrap(panel);
    if !dash.show_page(panel) {
        println!(
            "{} unknown panel '{}'. Known panels: {}",
            "✗".red().bold(),
            panel,
            PANELS.join(", ")
        );
        return Ok(Outcome::Rejected);
    }
    if panel == "logs" {
        dash.poll_logs();
    }
    print_panel(dash.state(), panel);
    Ok(Outcome::Completed)
}

fn print_panel(state: &DashboardState, panel: &str) {
    if let Some(text) = state.render_panel(panel) {
        print_header(&format!("botdash · {panel}"));
        print_body(&text);
    }
}

// ---------------------------------------------------------------------------
// botdash models | set-model
// ---------------------------------------------------------------------------

pub fn run_models() -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.load_models();
    print_header("Models");
    let models = &dash.state().models;
    if models.options().is_empty() {
        println!("{}", "No models offered by the backend.".yellow());
    }
    for name in models.options() {
        println!("  {name}");
    }
    Ok(Outcome::Completed)
}

pub fn run_set_model(name: &str) -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.load_models();
    if !dash.select_model(name) {
        // Fall through with no selection so the status line matches the dashboard.
        dash.state_mut().models.clear_selection();
        println!(
            "{} '{}' is not in the backend's model list",
            "✗".red().bold(),
            name
        );
    }
    let outcome = dash.change_model();
    print_outcome_line(outcome, dash.state().models.status());
    Ok(outcome)
}

fn print_outcome_line(outcome: Outcome, text: &str) {
    let mark = match outcome {
        Outcome::Completed => "✓".green().bold(),
        Outcome::Rejected => "·".yellow().bold(),
        Outcome::Failed => "✗".red().bold(),
    };
    println!("{mark} {text}");
}

// ---------------------------------------------------------------------------
// botdash memory | long-memory
// ---------------------------------------------------------------------------

pub fn run_memory_show() -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.load_memory();
    print_body(dash.state().memory.editor());
    Ok(Outcome::Completed)
}

/// Save a memory document read from `file`, or from stdin.
pub fn run_memory_save(file: Option<&Path>) -> Result<Outcome> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read memory document from stdin")?;
            buf
        }
    };

    let (mut dash, _) = open(true);
    dash.edit_memory(text);
    Ok(dash.save_memory())
}

pub fn run_long_memory(user: &str) -> Result<Outcome> {
    let (mut dash, _) = open(true);
    let outcome = dash.load_long_memory(user);
    if outcome == Outcome::Rejected {
        println!("{}", "A user id is required.".yellow());
    } else if outcome.is_completed() {
        print_header(&format!("Long-term memory · {user}"));
        print_body(&dash.state().long_memory.render());
    }
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// botdash plugins
// ---------------------------------------------------------------------------

pub fn run_plugins() -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.load_plugins();
    print_header("Plugins");
    print_body(&dash.state().plugins.render());
    Ok(Outcome::Completed)
}

pub fn run_plugin_reload(name: &str) -> Result<Outcome> {
    let (mut dash, _) = open(true);
    let outcome = dash.reload_plugin(name);
    if outcome.is_completed() {
        print_header("Plugins");
        print_body(&dash.state().plugins.render());
    }
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// botdash agents
// ---------------------------------------------------------------------------

pub fn run_agents() -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.load_agents();
    print_header("Agents");
    print_body(&dash.state().agents.render());
    Ok(Outcome::Completed)
}

pub fn run_agent_create(name: &str, model: &str) -> Result<Outcome> {
    let (mut dash, _) = open(true);
    let agents = &mut dash.state_mut().agents;
    agents.name_input = name.to_string();
    agents.model_input = model.to_string();

    let outcome = dash.create_agent();
    if outcome.is_completed() {
        print_body(&dash.state().agents.render());
    }
    Ok(outcome)
}

pub fn run_agent_kill(name: &str) -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.state_mut().agents.kill_input = name.to_string();

    let outcome = dash.kill_agent();
    if outcome.is_completed() {
        print_body(&dash.state().agents.render());
    }
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// botdash voice | status
// ---------------------------------------------------------------------------

pub fn run_voice_status() -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.load_voice_status();
    print_body(&dash.state().voice.summary());
    Ok(Outcome::Completed)
}

pub fn run_voice_toggle(enable: bool) -> Result<Outcome> {
    let (mut dash, _) = open(true);
    let outcome = if enable {
        dash.voice_on()
    } else {
        dash.voice_off()
    };
    if outcome.is_completed() {
        print_body(&dash.state().voice.summary());
    }
    Ok(outcome)
}

pub fn run_status() -> Result<Outcome> {
    let (mut dash, _) = open(true);
    dash.load_status();
    print_body(&dash.state().status.summary());
    Ok(Outcome::Completed)
}

// ---------------------------------------------------------------------------
// botdash console
// ---------------------------------------------------------------------------

pub fn run_console(tail: usize) -> Result<Outcome> {
    let cfg = config::load();
    let console = ConsoleLog::from_config(&cfg.console);
    let entries = console.tail(tail);

    if entries.is_empty() {
        println!("{}", "No console entries.".yellow());
        return Ok(Outcome::Completed);
    }

    print_header("Developer Console");
    for entry in entries {
        println!(
            "  {} {} {}",
            entry.timestamp.dimmed(),
            format!("{}:", entry.source).bold(),
            entry.message
        );
    }
    Ok(Outcome::Completed)
}

// ---------------------------------------------------------------------------
// botdash health
// ---------------------------------------------------------------------------

pub fn run_health() -> Result<Outcome> {
    print_header("botdash Health Check");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.botdash/config.toml found"
        } else {
            "not found (run `botdash config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".botdash.toml found"
        } else {
            "none (optional)"
        },
    );

    let backend = HttpBackend::from_config(&cfg.backend);
    let reachable = backend.status();
    let backend_ok = reachable.is_ok();
    let detail = match &reachable {
        Ok(status) => format!("{} reports '{}'", backend.base_url(), status.status),
        Err(err) => format!("{} unreachable: {err:#}", backend.base_url()),
    };
    print_health_item("Backend", backend_ok, &detail);

    print_health_item(
        "Poll cadence",
        true,
        &format!(
            "logs every {} ms, voice every {} ms",
            cfg.polling.logs_interval_ms, cfg.polling.voice_interval_ms
        ),
    );

    let console = ConsoleLog::from_config(&cfg.console);
    match console.path() {
        Some(path) => print_health_item("Console log", true, &path.display().to_string()),
        None => print_health_item("Console log", false, "disabled"),
    }

    Ok(if backend_ok {
        Outcome::Completed
    } else {
        Outcome::Failed
    })
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// botdash config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<Outcome> {
    let toml_str = config::show_effective_config()?;
    print_header("Effective botdash Configuration");
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.botdash/config.toml", global_exists);
    print_source(".botdash.toml", project_exists);
    println!("  {} BOTDASH_* environment variables", "·".dimmed());

    Ok(Outcome::Completed)
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

pub fn run_config_init(force: bool) -> Result<Outcome> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(Outcome::Completed)
}

pub fn run_config_set(key: &str, value: &str) -> Result<Outcome> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(Outcome::Completed)
}

pub fn run_config_reset() -> Result<Outcome> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(Outcome::Completed)
}
