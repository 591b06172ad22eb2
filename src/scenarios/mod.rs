use crate::config::{SmokeConfig, TokenProvider};
use crate::directory::{WorkflowCatalog, WorkflowDirectory};
use crate::envelope::{Envelope, EnvelopeBuilder};
use crate::operations::Operation;
use crate::resolver::EndpointResolver;
use crate::shared::{EventLog, SmokeError};
use crate::transport::HttpInvoker;
use crate::verdict::validate;
use serde_json::Value;

pub mod replay;
pub mod steps;

pub use replay::{ReplayPair, ReplayState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Bootstrap,
    Search,
    Tasks,
    Db,
}

impl Scenario {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Search => "search",
            Self::Tasks => "tasks",
            Self::Db => "db",
        }
    }
}

// The first failure of any kind ends the run.
#[derive(Debug)]
pub struct ScenarioRunner<C = WorkflowDirectory> {
    resolver: EndpointResolver<C>,
    invoker: HttpInvoker,
    envelopes: EnvelopeBuilder,
    tokens: TokenProvider,
    database_key: String,
    log: EventLog,
}

impl ScenarioRunner<WorkflowDirectory> {
    pub fn from_config(config: &SmokeConfig, log: EventLog) -> Self {
        let resolver = EndpointResolver::from_config(config, log.clone());
        Self::with_resolver(config, resolver, log)
    }
}

impl<C: WorkflowCatalog> ScenarioRunner<C> {
    pub fn with_resolver(config: &SmokeConfig, resolver: EndpointResolver<C>, log: EventLog) -> Self {
        Self {
            resolver,
            invoker: HttpInvoker::new(config.invoke_timeout, log.clone()),
            envelopes: EnvelopeBuilder::default(),
            tokens: TokenProvider::new(config),
            database_key: config.database_key.clone(),
            log,
        }
    }

    pub fn resolver(&self) -> &EndpointResolver<C> {
        &self.resolver
    }

    pub fn run(
        &mut self,
        scenarios: &[Scenario],
        report: &mut dyn FnMut(&str),
    ) -> Result<(), SmokeError> {
        self.run_in_order(scenarios, report).map_err(|(stage, err)| {
            self.log.error(
                "run.failed",
                &format!("{stage} [{}]: {err}", err.kind().as_str()),
            );
            err
        })
    }

    fn run_in_order(
        &mut self,
        scenarios: &[Scenario],
        report: &mut dyn FnMut(&str),
    ) -> Result<(), (&'static str, SmokeError)> {
        self.tokens
            .operator_token()
            .map_err(|err| ("preflight", SmokeError::from(err)))?;
        for scenario in scenarios {
            self.run_scenario(*scenario, report)
                .map_err(|err| (scenario.name(), err))?;
        }
        Ok(())
    }

    fn run_scenario(
        &mut self,
        scenario: Scenario,
        report: &mut dyn FnMut(&str),
    ) -> Result<(), SmokeError> {
        match scenario {
            Scenario::Bootstrap => {
                let created = self.run_bootstrap()?;
                emit(&self.log, report, format!("bootstrap created={created}"));
            }
            Scenario::Search => {
                let results = self.run_search()?;
                for row in &results {
                    emit(&self.log, report, row.to_string());
                }
                emit(&self.log, report, format!("search results={}", results.len()));
            }
            Scenario::Tasks => {
                let page_id = self.run_task_create()?;
                emit(&self.log, report, format!("tasks_create page_id={page_id}"));
                self.run_task_update(&page_id)?;
                emit(&self.log, report, "tasks_update ok".to_string());
            }
            Scenario::Db => {
                let key = self.database_key.clone();
                let database_id = self.run_db_schema(&key)?;
                emit(&self.log, report, format!("db_schema id={database_id}"));
                let rows = self.run_db_sample(&key)?;
                emit(&self.log, report, format!("db_sample rows={}", rows.len()));
            }
        }
        Ok(())
    }

    pub(crate) fn call(
        &mut self,
        operation: Operation,
        label: &str,
        envelope: &Envelope,
        token: &str,
    ) -> Result<Value, SmokeError> {
        let url = self.resolver.resolve(operation.path())?;
        let result = self.invoker.post_json(&url, envelope, token)?;
        validate(&result).into_data(label)
    }
}

fn emit(log: &EventLog, report: &mut dyn FnMut(&str), line: String) {
    log.info("scenario.step", &line);
    report(&line);
}
