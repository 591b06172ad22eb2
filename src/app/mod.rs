pub mod cli;

pub use cli::{help_text, parse_command, run_cli, Command};
