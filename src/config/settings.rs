use super::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://n8n:5678";
pub const DEFAULT_DATABASE_KEY: &str = "tasks";
pub const DEFAULT_DISCOVERY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INVOKE_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    pub api_token: Option<String>,
    pub bootstrap_token: Option<String>,
    pub base_url: String,
    pub n8n_api_base: String,
    pub n8n_api_key: Option<String>,
    pub webhook_prefix: Option<String>,
    pub webhook_map: Option<String>,
    pub discovery_timeout: Duration,
    pub invoke_timeout: Duration,
    pub database_key: String,
    pub log_path: Option<PathBuf>,
}

impl SmokeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = non_empty("SMOKE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let n8n_api_base = non_empty("SMOKE_N8N_API_BASE")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url.clone());
        let webhook_prefix = non_empty("SMOKE_WEBHOOK_PREFIX")
            .map(|v| v.trim_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            api_token: non_empty("API_BEARER_TOKEN"),
            bootstrap_token: non_empty("BOOTSTRAP_BEARER_TOKEN"),
            base_url,
            n8n_api_base,
            n8n_api_key: non_empty("N8N_API_KEY"),
            webhook_prefix,
            webhook_map: non_empty("SMOKE_WEBHOOK_MAP"),
            discovery_timeout: parse_timeout(
                "SMOKE_DISCOVERY_TIMEOUT_SECS",
                non_empty("SMOKE_DISCOVERY_TIMEOUT_SECS"),
                DEFAULT_DISCOVERY_TIMEOUT_SECS,
            )?,
            invoke_timeout: parse_timeout(
                "SMOKE_INVOKE_TIMEOUT_SECS",
                non_empty("SMOKE_INVOKE_TIMEOUT_SECS"),
                DEFAULT_INVOKE_TIMEOUT_SECS,
            )?,
            database_key: non_empty("SMOKE_DATABASE_KEY")
                .unwrap_or_else(|| DEFAULT_DATABASE_KEY.to_string()),
            log_path: non_empty("SMOKE_LOG_PATH").map(PathBuf::from),
        })
    }

    pub fn discovery_enabled(&self) -> bool {
        self.n8n_api_key.is_some()
    }
}

impl std::fmt::Debug for SmokeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("SmokeConfig")
            .field("api_token", &redact(&self.api_token))
            .field("bootstrap_token", &redact(&self.bootstrap_token))
            .field("base_url", &self.base_url)
            .field("n8n_api_base", &self.n8n_api_base)
            .field("n8n_api_key", &redact(&self.n8n_api_key))
            .field("webhook_prefix", &self.webhook_prefix)
            .field("webhook_map", &self.webhook_map)
            .field("discovery_timeout", &self.discovery_timeout)
            .field("invoke_timeout", &self.invoke_timeout)
            .field("database_key", &self.database_key)
            .field("log_path", &self.log_path)
            .finish()
    }
}

fn parse_timeout(key: &str, raw: Option<String>, default_secs: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default_secs));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            key: key.to_string(),
            value: raw,
        }),
    }
}
