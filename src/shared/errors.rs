use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Resolution,
    Transport,
    Protocol,
    Assertion,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Resolution => "resolution",
            Self::Transport => "transport",
            Self::Protocol => "protocol",
            Self::Assertion => "assertion",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SmokeError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("workflow discovery failed at {url}: {reason}")]
    Resolution { url: String, reason: String },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("{label} failed with HTTP {status}: {body}")]
    HttpStatus {
        label: String,
        status: u16,
        body: String,
    },
    #[error("{label} returned error: {body}")]
    Envelope { label: String, body: String },
    #[error("{label} response is missing `{field}`: {body}")]
    MissingField {
        label: String,
        field: String,
        body: String,
    },
    #[error("{label} response has invalid `{field}`: {body}")]
    InvalidField {
        label: String,
        field: String,
        body: String,
    },
    #[error("{label} expected {flag}={expected}")]
    Assertion {
        label: String,
        flag: String,
        expected: bool,
    },
}

impl SmokeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Resolution { .. } => ErrorKind::Resolution,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::HttpStatus { .. }
            | Self::Envelope { .. }
            | Self::MissingField { .. }
            | Self::InvalidField { .. } => ErrorKind::Protocol,
            Self::Assertion { .. } => ErrorKind::Assertion,
        }
    }

    pub(crate) fn resolution(url: &str, reason: impl ToString) -> Self {
        Self::Resolution {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn transport(url: &str, reason: impl ToString) -> Self {
        Self::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
