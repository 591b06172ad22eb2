use crate::shared::ids::new_request_id;
use serde::Serialize;
use serde_json::Value;

pub const SMOKE_ACTOR: &str = "smoke";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub request_id: String,
    pub actor: String,
    pub payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    actor: String,
}

impl Default for EnvelopeBuilder {
    fn default() -> Self {
        Self::new(SMOKE_ACTOR)
    }
}

impl EnvelopeBuilder {
    pub fn new(actor: &str) -> Self {
        Self {
            actor: actor.to_string(),
        }
    }

    pub fn build(&self, payload: Value, idempotency_key: Option<&str>) -> Envelope {
        Envelope {
            request_id: new_request_id(),
            actor: self.actor.clone(),
            payload,
            idempotency_key: idempotency_key
                .filter(|key| !key.is_empty())
                .map(str::to_string),
        }
    }
}
