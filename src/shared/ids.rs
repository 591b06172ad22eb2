use uuid::Uuid;

pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn new_idempotency_key(scope: &str) -> String {
    format!("smoke-{scope}-{}", Uuid::new_v4())
}
