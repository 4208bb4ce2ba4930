//! Command-line interface: argument definitions, logging setup and command handlers

pub mod args;
pub mod commands;
pub mod logging;

pub use args::{Cli, Commands, LogLevel};
pub use commands::{execute, run};
pub use logging::init_logging;
