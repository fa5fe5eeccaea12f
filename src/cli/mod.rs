//! CLI layer: argument parsing, interactive menu and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod menu;
pub mod output;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
pub use menu::Menu;
