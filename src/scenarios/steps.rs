use super::{ReplayPair, ScenarioRunner};
use crate::directory::WorkflowCatalog;
use crate::operations::Operation;
use crate::shared::ids::new_idempotency_key;
use crate::shared::SmokeError;
use serde_json::{json, Value};

pub const BOOTSTRAP_IDEMPOTENCY_KEY: &str = "smoke-bootstrap";
pub const SEARCH_QUERY: &str = "OS";
pub const SEARCH_LIMIT: u64 = 5;
pub const DB_SAMPLE_LIMIT: u64 = 3;

pub fn bootstrap_payload() -> Value {
    json!({"schema_version": 1, "rebuild": false})
}

pub fn search_payload() -> Value {
    json!({"query": SEARCH_QUERY, "limit": SEARCH_LIMIT, "types": ["page", "database"]})
}

pub fn task_create_payload(now_secs: i64) -> Value {
    json!({
        "task": {
            "title": format!("Smoke Task {now_secs}"),
            "status": "Todo",
            "priority": "Low",
            "tags": ["smoke"],
            "notes": "Smoke test create",
        }
    })
}

pub fn task_update_payload(page_id: &str) -> Value {
    json!({
        "notion_page_id": page_id,
        "patch": {
            "status": "In Progress",
            "notes_append": "Smoke update append",
        }
    })
}

impl<C: WorkflowCatalog> ScenarioRunner<C> {
    // A backend bootstrapped earlier answers `created=false`; either value passes.
    pub fn run_bootstrap(&mut self) -> Result<bool, SmokeError> {
        let token = self.tokens.bootstrap_token()?.to_string();
        let op = Operation::Bootstrap;
        let envelope = self
            .envelopes
            .build(bootstrap_payload(), Some(BOOTSTRAP_IDEMPOTENCY_KEY));
        let data = self.call(op, op.label(), &envelope, &token)?;
        match data.get("created") {
            Some(Value::Bool(created)) => Ok(*created),
            other => Err(field_error(op.label(), "data.created", other.is_some(), &data)),
        }
    }

    pub fn run_search(&mut self) -> Result<Vec<Value>, SmokeError> {
        let token = self.tokens.operator_token()?.to_string();
        let op = Operation::Search;
        let envelope = self.envelopes.build(search_payload(), None);
        let data = self.call(op, op.label(), &envelope, &token)?;
        required_rows(op.label(), data)
    }

    pub fn run_task_create(&mut self) -> Result<String, SmokeError> {
        let token = self.tokens.operator_token()?.to_string();
        let pair = ReplayPair {
            operation: Operation::TasksCreate,
            flag: "created",
            idempotency_key: new_idempotency_key("task-create"),
            payload: task_create_payload(chrono::Utc::now().timestamp()),
        };
        let created = self.run_replay_pair(&pair, &token)?;
        required_str(pair.operation.label(), &created, "notion_page_id")
    }

    pub fn run_task_update(&mut self, page_id: &str) -> Result<(), SmokeError> {
        let token = self.tokens.operator_token()?.to_string();
        let pair = ReplayPair {
            operation: Operation::TasksUpdate,
            flag: "updated",
            idempotency_key: new_idempotency_key("task-update"),
            payload: task_update_payload(page_id),
        };
        self.run_replay_pair(&pair, &token)?;
        Ok(())
    }

    pub fn run_db_schema(&mut self, database_key: &str) -> Result<String, SmokeError> {
        let token = self.tokens.operator_token()?.to_string();
        let op = Operation::DbSchema;
        let envelope = self
            .envelopes
            .build(json!({"database_key": database_key}), None);
        let data = self.call(op, op.label(), &envelope, &token)?;
        required_str(op.label(), &data, "database_id")
    }

    pub fn run_db_sample(&mut self, database_key: &str) -> Result<Vec<Value>, SmokeError> {
        let token = self.tokens.operator_token()?.to_string();
        let op = Operation::DbSample;
        let envelope = self.envelopes.build(
            json!({"database_key": database_key, "limit": DB_SAMPLE_LIMIT}),
            None,
        );
        let data = self.call(op, op.label(), &envelope, &token)?;
        required_rows(op.label(), data)
    }
}

fn required_rows(label: &str, data: Value) -> Result<Vec<Value>, SmokeError> {
    match data.get("results") {
        Some(Value::Array(rows)) => Ok(rows.clone()),
        other => Err(field_error(label, "data.results", other.is_some(), &data)),
    }
}

fn required_str(label: &str, data: &Value, field: &str) -> Result<String, SmokeError> {
    match data.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        other => Err(field_error(
            label,
            &format!("data.{field}"),
            other.is_some(),
            data,
        )),
    }
}

fn field_error(label: &str, field: &str, present: bool, data: &Value) -> SmokeError {
    let (label, field, body) = (label.to_string(), field.to_string(), data.to_string());
    if present {
        SmokeError::InvalidField { label, field, body }
    } else {
        SmokeError::MissingField { label, field, body }
    }
}
