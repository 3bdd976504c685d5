//! Terminal dashboard client for the bot control backend.
//!
//! The [`dashboard::Dashboard`] view controller polls the backend over HTTP
//! for logs, models, memory, plugins, agents and voice state, and performs
//! the user actions that change them.

pub mod client;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod report;
pub mod schedule;
