use super::ScenarioRunner;
use crate::directory::WorkflowCatalog;
use crate::operations::Operation;
use crate::shared::SmokeError;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    NotStarted,
    FirstCallIssued,
    FirstAsserted,
    ReplayIssued,
    ReplayAsserted,
    Done,
    Failed,
}

impl ReplayState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::FirstCallIssued => "first_call_issued",
            Self::FirstAsserted => "first_asserted",
            Self::ReplayIssued => "replay_issued",
            Self::ReplayAsserted => "replay_asserted",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

// Both calls carry the same key and payload; the backend must answer
// `flag=true` and then `flag=false`.
#[derive(Debug, Clone)]
pub struct ReplayPair {
    pub operation: Operation,
    pub flag: &'static str,
    pub idempotency_key: String,
    pub payload: Value,
}

impl<C: WorkflowCatalog> ScenarioRunner<C> {
    pub fn run_replay_pair(
        &mut self,
        pair: &ReplayPair,
        token: &str,
    ) -> Result<Value, SmokeError> {
        let mut state = ReplayState::NotStarted;
        let result = self.drive_replay_pair(pair, token, &mut state);
        if let Err(err) = &result {
            self.log.error(
                "scenario.step",
                &format!(
                    "{} failed after {}: {err}",
                    pair.operation.label(),
                    state.as_str()
                ),
            );
            self.transition(&mut state, ReplayState::Failed, pair.operation.label());
        }
        result
    }

    fn drive_replay_pair(
        &mut self,
        pair: &ReplayPair,
        token: &str,
        state: &mut ReplayState,
    ) -> Result<Value, SmokeError> {
        let label = pair.operation.label();
        let replay_label = format!("{label}_replay");

        let first_envelope = self
            .envelopes
            .build(pair.payload.clone(), Some(pair.idempotency_key.as_str()));
        self.transition(state, ReplayState::FirstCallIssued, label);
        let first = self.call(pair.operation, label, &first_envelope, token)?;
        expect_flag(&first, label, pair.flag, true)?;
        self.transition(state, ReplayState::FirstAsserted, label);

        let replay_envelope = self
            .envelopes
            .build(pair.payload.clone(), Some(pair.idempotency_key.as_str()));
        self.transition(state, ReplayState::ReplayIssued, label);
        let replay = self.call(pair.operation, &replay_label, &replay_envelope, token)?;
        expect_flag(&replay, &format!("{label} replay"), pair.flag, false)?;
        self.transition(state, ReplayState::ReplayAsserted, label);

        self.transition(state, ReplayState::Done, label);
        Ok(first)
    }

    fn transition(&self, state: &mut ReplayState, next: ReplayState, label: &str) {
        *state = next;
        self.log
            .info("scenario.step", &format!("{label} {}", next.as_str()));
    }
}

pub(crate) fn expect_flag(
    data: &Value,
    label: &str,
    flag: &str,
    expected: bool,
) -> Result<(), SmokeError> {
    match data.get(flag) {
        Some(Value::Bool(actual)) if *actual == expected => Ok(()),
        Some(_) => Err(SmokeError::Assertion {
            label: label.to_string(),
            flag: flag.to_string(),
            expected,
        }),
        None => Err(SmokeError::MissingField {
            label: label.to_string(),
            field: format!("data.{flag}"),
            body: data.to_string(),
        }),
    }
}
