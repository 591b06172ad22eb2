use crate::shared::SmokeError;
use crate::transport::InvocationResult;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Ok { data: Value },
    HttpStatus { status: u16, body: String },
    NotOk { status: u16, body: String },
}

impl Verdict {
    pub fn into_data(self, label: &str) -> Result<Value, SmokeError> {
        match self {
            Self::Ok { data } => Ok(data),
            Self::HttpStatus { status, body } => Err(SmokeError::HttpStatus {
                label: label.to_string(),
                status,
                body,
            }),
            Self::NotOk { body, .. } => Err(SmokeError::Envelope {
                label: label.to_string(),
                body,
            }),
        }
    }
}

pub fn validate(result: &InvocationResult) -> Verdict {
    if result.status != 200 {
        return Verdict::HttpStatus {
            status: result.status,
            body: result.body.clone(),
        };
    }

    let parsed = serde_json::from_str::<Value>(&result.body).ok();
    match parsed {
        Some(Value::Object(mut envelope))
            if envelope.get("status").and_then(Value::as_str) == Some("ok") =>
        {
            Verdict::Ok {
                data: envelope.remove("data").unwrap_or(Value::Null),
            }
        }
        _ => Verdict::NotOk {
            status: result.status,
            body: result.body.clone(),
        },
    }
}
