use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;

use crate::api::client::ApiClient;
use crate::core::storage::SessionStorage;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    body: String,
    hold: Option<Arc<Notify>>,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::text(status, &body.to_string())
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            hold: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self::text(status, "")
    }

    /// Keeps the request open after it is captured until `release` is
    /// notified.
    pub fn held_until(mut self, release: Arc<Notify>) -> Self {
        self.hold = Some(release);
        self
    }
}

/// Minimal HTTP/1.1 server answering one scripted response per connection.
///
/// Responses carry `connection: close` so the client never reuses a socket
/// the stub has already dropped.
pub struct StubServer {
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    task: JoinHandle<Result<(), String>>,
}

impl StubServer {
    pub async fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");
        let captured = Arc::new(Mutex::new(Vec::new()));
        let captured_for_server = Arc::clone(&captured);

        let task = tokio::spawn(async move {
            for response in responses {
                let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
                let request = read_http_request(&mut stream).await?;
                captured_for_server.lock().await.push(request);
                if let Some(release) = &response.hold {
                    release.notified().await;
                }

                let reason = reason_phrase(response.status);
                let raw = format!(
                    "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{}",
                    response.status,
                    reason,
                    response.body.len(),
                    response.body
                );
                stream
                    .write_all(raw.as_bytes())
                    .await
                    .map_err(|err| err.to_string())?;
                stream.shutdown().await.map_err(|err| err.to_string())?;
            }
            Ok(())
        });

        Self {
            base_url: format!("http://{addr}/api"),
            captured,
            task,
        }
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }

    /// Waits for every scripted response to be served and returns the
    /// captured requests.
    pub async fn finish(self) -> Vec<CapturedRequest> {
        self.task
            .await
            .expect("stub server task should not panic")
            .expect("stub server should serve every response");
        let captured = self.captured.lock().await;
        captured.clone()
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    drop(listener);
    format!("http://{addr}/api")
}

pub fn test_client(base_url: &str, storage: Arc<dyn SessionStorage>) -> ApiClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test http client should build");
    ApiClient::with_http_client(http, base_url, storage)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let header_end = loop {
        let mut chunk = [0_u8; 1024];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines.filter(|line| !line.is_empty()) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim().to_string());
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}
