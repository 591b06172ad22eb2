use crate::config::{parse_prefix_map, PrefixMap, SmokeConfig};
use crate::directory::{WorkflowCatalog, WorkflowDirectory};
use crate::operations::Operation;
use crate::shared::{EventLog, SmokeError};

pub mod cache;

pub use cache::WorkflowDirectoryCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    StaticPrefix,
    PrefixMap,
    Directory,
    Fallback,
}

impl ResolutionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StaticPrefix => "static_prefix",
            Self::PrefixMap => "prefix_map",
            Self::Directory => "directory",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub url: String,
    pub tier: ResolutionTier,
}

// Tiers in order: static prefix, prefix map, workflow directory, fallback.
#[derive(Debug)]
pub struct EndpointResolver<C = WorkflowDirectory> {
    base_url: String,
    webhook_prefix: Option<String>,
    webhook_map: Option<String>,
    parsed_map: Option<PrefixMap>,
    catalog: C,
    cache: WorkflowDirectoryCache,
    log: EventLog,
}

impl EndpointResolver<WorkflowDirectory> {
    pub fn from_config(config: &SmokeConfig, log: EventLog) -> Self {
        let directory = WorkflowDirectory::from_config(config, log.clone());
        Self::new(config, directory, log)
    }
}

impl<C: WorkflowCatalog> EndpointResolver<C> {
    pub fn new(config: &SmokeConfig, catalog: C, log: EventLog) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            webhook_prefix: config
                .webhook_prefix
                .as_deref()
                .map(|p| p.trim_matches('/').to_string())
                .filter(|p| !p.is_empty()),
            webhook_map: config.webhook_map.clone(),
            parsed_map: None,
            catalog,
            cache: WorkflowDirectoryCache::default(),
            log,
        }
    }

    pub fn resolve(&mut self, path: &str) -> Result<String, SmokeError> {
        self.resolve_endpoint(path).map(|resolved| resolved.url)
    }

    pub fn resolve_endpoint(&mut self, path: &str) -> Result<ResolvedEndpoint, SmokeError> {
        let resolved = self.select_endpoint(path)?;
        self.log.info(
            "resolve",
            &format!("{path} -> {} ({})", resolved.url, resolved.tier.as_str()),
        );
        Ok(resolved)
    }

    pub fn cache(&self) -> &WorkflowDirectoryCache {
        &self.cache
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    fn select_endpoint(&mut self, path: &str) -> Result<ResolvedEndpoint, SmokeError> {
        if let Some(prefix) = self.webhook_prefix.as_deref() {
            return Ok(ResolvedEndpoint {
                url: format!("{}/webhook/{prefix}{path}", self.base_url),
                tier: ResolutionTier::StaticPrefix,
            });
        }

        if let Some(prefix) = self.mapped_prefix(path)? {
            return Ok(ResolvedEndpoint {
                url: format!("{}/webhook/{prefix}{path}", self.base_url),
                tier: ResolutionTier::PrefixMap,
            });
        }

        if let Some(operation) = Operation::from_path(path) {
            let ids = self.cache.get_or_fetch(&self.catalog)?;
            if let Some(id) = ids.get(operation.workflow_name()) {
                return Ok(ResolvedEndpoint {
                    url: format!("{}/webhook/{id}/webhook{path}", self.base_url),
                    tier: ResolutionTier::Directory,
                });
            }
        }

        Ok(ResolvedEndpoint {
            url: format!("{}/webhook{path}", self.base_url),
            tier: ResolutionTier::Fallback,
        })
    }

    fn mapped_prefix(&mut self, path: &str) -> Result<Option<String>, SmokeError> {
        let Some(raw) = self.webhook_map.as_deref() else {
            return Ok(None);
        };
        if self.parsed_map.is_none() {
            self.parsed_map = Some(parse_prefix_map(raw)?);
        }
        Ok(self
            .parsed_map
            .as_ref()
            .and_then(|map| map.get(path))
            .cloned())
    }
}
