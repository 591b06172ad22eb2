#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is json")
    }
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockBackend {
    pub fn start<F>(expected_requests: usize, responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_for_thread = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            for _ in 0..expected_requests {
                let (mut stream, _) = listener.accept().expect("accept");
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

                let mut request_line = String::new();
                reader
                    .read_line(&mut request_line)
                    .expect("read request line");
                let mut parts = request_line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let path = parts.next().unwrap_or("/").to_string();

                let mut headers = BTreeMap::new();
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).expect("read header");
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
                    }
                }

                let content_length = headers
                    .get("content-length")
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(0);
                let mut body = vec![0_u8; content_length];
                if content_length > 0 {
                    reader.read_exact(&mut body).expect("read body");
                }

                let request = RecordedRequest {
                    method,
                    path,
                    headers,
                    body: String::from_utf8_lossy(&body).to_string(),
                };
                let (status, response_body) = responder(&request);
                requests_for_thread
                    .lock()
                    .expect("lock requests")
                    .push(request);

                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reason(status),
                    response_body.len(),
                    response_body
                );
                stream
                    .write_all(response.as_bytes())
                    .expect("write response");
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
            handle: Some(handle),
        }
    }

    pub fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock backend");
        }
        self.requests.lock().expect("lock requests").clone()
    }

    pub fn requests_so_far(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock requests").clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

pub fn ok(data: serde_json::Value) -> (u16, String) {
    (200, serde_json::json!({"status": "ok", "data": data}).to_string())
}

pub fn idempotent_backend() -> impl Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static
{
    let seen = Mutex::new(std::collections::BTreeSet::new());
    move |request: &RecordedRequest| {
        let body = request.json();
        let key = body["idempotency_key"].as_str().map(str::to_string);
        let first = match &key {
            Some(key) => seen.lock().expect("lock keys").insert(key.clone()),
            None => true,
        };
        let path = request.path.as_str();
        if path.ends_with("/v1/os/bootstrap") {
            ok(serde_json::json!({"created": first}))
        } else if path.ends_with("/v1/notion/search") {
            ok(serde_json::json!({"results": [{"id": "page-a"}, {"id": "db-b"}]}))
        } else if path.ends_with("/v1/notion/tasks/create") {
            ok(serde_json::json!({"created": first, "notion_page_id": "page-123"}))
        } else if path.ends_with("/v1/notion/tasks/update") {
            ok(serde_json::json!({"updated": first}))
        } else if path.ends_with("/v1/notion/db/schema") {
            ok(serde_json::json!({"database_id": "db-tasks", "properties": {}}))
        } else if path.ends_with("/v1/notion/db/sample") {
            ok(serde_json::json!({"results": [{}, {}, {}]}))
        } else {
            (404, "not found".to_string())
        }
    }
}

pub fn config_for(base_url: &str, extra: &[(&str, &str)]) -> webhook_smoke::config::SmokeConfig {
    let mut vars: BTreeMap<String, String> = BTreeMap::new();
    vars.insert("API_BEARER_TOKEN".to_string(), "operator-token".to_string());
    vars.insert("BOOTSTRAP_BEARER_TOKEN".to_string(), "bootstrap-token".to_string());
    vars.insert("SMOKE_BASE_URL".to_string(), base_url.to_string());
    vars.insert("SMOKE_INVOKE_TIMEOUT_SECS".to_string(), "5".to_string());
    vars.insert("SMOKE_DISCOVERY_TIMEOUT_SECS".to_string(), "5".to_string());
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    webhook_smoke::config::SmokeConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("config")
}
