use super::{ConfigError, SmokeConfig};

#[derive(Clone)]
pub struct TokenProvider {
    api_token: Option<String>,
    bootstrap_token: Option<String>,
}

impl TokenProvider {
    pub fn new(config: &SmokeConfig) -> Self {
        Self {
            api_token: config.api_token.clone(),
            bootstrap_token: config.bootstrap_token.clone(),
        }
    }

    pub fn operator_token(&self) -> Result<&str, ConfigError> {
        self.api_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("API_BEARER_TOKEN".to_string()))
    }

    pub fn bootstrap_token(&self) -> Result<&str, ConfigError> {
        self.bootstrap_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("BOOTSTRAP_BEARER_TOKEN".to_string()))
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("api_token", &self.api_token.is_some())
            .field("bootstrap_token", &self.bootstrap_token.is_some())
            .finish()
    }
}
