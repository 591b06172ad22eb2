use crate::shared::{EventLog, SmokeError};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub status: u16,
    pub body: String,
}

#[derive(Clone)]
pub struct HttpInvoker {
    agent: ureq::Agent,
    log: EventLog,
}

impl HttpInvoker {
    pub fn new(timeout: Duration, log: EventLog) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            log,
        }
    }

    // Any HTTP answer is a result; only connection-level faults are errors.
    pub fn post_json<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        token: &str,
    ) -> Result<InvocationResult, SmokeError> {
        let payload =
            serde_json::to_string(body).map_err(|err| SmokeError::transport(url, err))?;
        let outcome = self
            .agent
            .post(url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Content-Type", "application/json")
            .send_string(&payload);

        let response = match outcome {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => {
                self.log
                    .error("invoke", &format!("POST {url} transport failure: {err}"));
                return Err(SmokeError::transport(url, err));
            }
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|err| SmokeError::transport(url, format!("failed to read body: {err}")))?;
        self.log.info("invoke", &format!("POST {url} -> {status}"));
        Ok(InvocationResult { status, body })
    }
}

impl std::fmt::Debug for HttpInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpInvoker").finish_non_exhaustive()
    }
}
