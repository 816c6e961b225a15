//! Terminal dashboard shell.

pub mod commands;
pub mod core;
pub mod formatters;
pub mod help;
pub mod output;
pub mod render;
pub mod shell;
pub mod system_clock;
pub mod table;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use self::shell::{run_cli, SCRIPT_MODE_ENV};
