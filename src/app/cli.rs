use crate::config::{ConfigError, SmokeConfig};
use crate::scenarios::{Scenario, ScenarioRunner};
use crate::shared::{EventLog, SmokeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Bootstrap,
    Search,
    Tasks,
    Db,
    All,
    Help,
}

impl Command {
    pub fn scenarios(self) -> &'static [Scenario] {
        match self {
            Self::Bootstrap => &[Scenario::Bootstrap],
            Self::Search => &[Scenario::Search],
            Self::Tasks => &[Scenario::Tasks],
            Self::Db => &[Scenario::Db],
            Self::All => &[
                Scenario::Bootstrap,
                Scenario::Search,
                Scenario::Tasks,
                Scenario::Db,
            ],
            Self::Help => &[],
        }
    }
}

pub fn parse_command(args: &[String]) -> Result<Command, ConfigError> {
    let Some(first) = args.first() else {
        return Ok(Command::All);
    };
    match first.as_str() {
        "bootstrap" => Ok(Command::Bootstrap),
        "search" => Ok(Command::Search),
        "tasks" => Ok(Command::Tasks),
        "db" => Ok(Command::Db),
        "all" => Ok(Command::All),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(ConfigError::UnknownCommand(other.to_string())),
    }
}

pub fn help_text() -> String {
    [
        "Usage: webhook-smoke [command]",
        "",
        "Commands:",
        "  bootstrap   Run the OS bootstrap webhook once under its fixed idempotency key",
        "  search      Search the workspace and print the returned rows",
        "  tasks       Create and update a task, replaying each with the same idempotency key",
        "  db          Fetch the database schema and a sample of rows",
        "  all         Run bootstrap, search, tasks and db in order (default)",
        "",
        "Environment:",
        "  API_BEARER_TOKEN, BOOTSTRAP_BEARER_TOKEN, SMOKE_BASE_URL, SMOKE_N8N_API_BASE,",
        "  N8N_API_KEY, SMOKE_WEBHOOK_PREFIX, SMOKE_WEBHOOK_MAP, SMOKE_DISCOVERY_TIMEOUT_SECS,",
        "  SMOKE_INVOKE_TIMEOUT_SECS, SMOKE_DATABASE_KEY, SMOKE_LOG_PATH",
    ]
    .join("\n")
}

pub fn run_cli(args: &[String], report: &mut dyn FnMut(&str)) -> Result<(), SmokeError> {
    let command = parse_command(args)?;
    if command == Command::Help {
        report(&help_text());
        return Ok(());
    }

    let config = SmokeConfig::from_env()?;
    run_with_config(command, &config, report)
}

pub fn run_with_config(
    command: Command,
    config: &SmokeConfig,
    report: &mut dyn FnMut(&str),
) -> Result<(), SmokeError> {
    let log = EventLog::new(config.log_path.clone());
    log.info(
        "config.loaded",
        &format!(
            "base_url={} discovery={} prefix={} map={}",
            config.base_url,
            config.discovery_enabled(),
            config.webhook_prefix.as_deref().unwrap_or("-"),
            config.webhook_map.is_some()
        ),
    );
    let mut runner = ScenarioRunner::from_config(config, log);
    runner.run(command.scenarios(), report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn no_argument_runs_everything() {
        assert_eq!(parse_command(&[]).expect("parse"), Command::All);
        assert_eq!(Command::All.scenarios().len(), 4);
        assert_eq!(Command::All.scenarios()[0], Scenario::Bootstrap);
    }

    #[test]
    fn known_commands_parse() {
        assert_eq!(parse_command(&args(&["tasks"])).expect("parse"), Command::Tasks);
        assert_eq!(parse_command(&args(&["db"])).expect("parse"), Command::Db);
        assert_eq!(parse_command(&args(&["--help"])).expect("parse"), Command::Help);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse_command(&args(&["deploy"])).expect_err("unknown");
        assert_eq!(err.to_string(), "Unknown command: deploy");
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();
        for name in ["bootstrap", "search", "tasks", "db", "all"] {
            assert!(help.contains(name), "help is missing {name}");
        }
    }
}
