#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0}")]
    MissingEnvVar(String),
    #[error("{key} must be a positive integer number of seconds, got `{value}`")]
    InvalidTimeout { key: String, value: String },
    #[error("SMOKE_WEBHOOK_MAP must be valid JSON")]
    InvalidPrefixMap(#[source] serde_json::Error),
    #[error("SMOKE_WEBHOOK_MAP must be a JSON object mapping endpoint paths to prefixes")]
    PrefixMapNotObject,
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
