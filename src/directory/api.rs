use super::{latest_workflow_ids, WorkflowCatalog, WorkflowIds, WorkflowListing};
use crate::config::SmokeConfig;
use crate::shared::{EventLog, SmokeError};
use std::time::Duration;

pub const WORKFLOWS_LISTING_PATH: &str = "/api/v1/workflows";
const API_KEY_HEADER: &str = "X-N8N-API-KEY";

#[derive(Clone)]
pub struct WorkflowDirectory {
    api_base: String,
    api_key: Option<String>,
    agent: ureq::Agent,
    log: EventLog,
}

impl WorkflowDirectory {
    pub fn new(api_base: &str, api_key: Option<String>, timeout: Duration, log: EventLog) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            log,
        }
    }

    pub fn from_config(config: &SmokeConfig, log: EventLog) -> Self {
        Self::new(
            &config.n8n_api_base,
            config.n8n_api_key.clone(),
            config.discovery_timeout,
            log,
        )
    }

    fn listing_url(&self) -> String {
        format!("{}{WORKFLOWS_LISTING_PATH}", self.api_base)
    }

    fn fetch_listing(&self, api_key: &str) -> Result<WorkflowListing, SmokeError> {
        let url = self.listing_url();
        let response = match self.agent.get(&url).set(API_KEY_HEADER, api_key).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(SmokeError::resolution(
                    &url,
                    format!("unexpected status {status}: {body}"),
                ));
            }
            Err(err) => return Err(SmokeError::resolution(&url, err)),
        };

        response
            .into_json::<WorkflowListing>()
            .map_err(|err| SmokeError::resolution(&url, format!("invalid listing: {err}")))
    }
}

impl WorkflowCatalog for WorkflowDirectory {
    fn fetch_workflow_ids(&self) -> Result<WorkflowIds, SmokeError> {
        let Some(api_key) = self.api_key.as_deref() else {
            self.log
                .info("directory.fetch", "skipped: no discovery key configured");
            return Ok(WorkflowIds::new());
        };

        let listing = self.fetch_listing(api_key)?;
        let ids = latest_workflow_ids(&listing.data);
        self.log.info(
            "directory.fetch",
            &format!(
                "{} records listed, {} workflows resolvable",
                listing.data.len(),
                ids.len()
            ),
        );
        Ok(ids)
    }
}

impl std::fmt::Debug for WorkflowDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowDirectory")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.is_some())
            .finish()
    }
}
