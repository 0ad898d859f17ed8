//! Shared test utilities: a minimal one-shot HTTP stub server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A tiny HTTP/1.1 server that answers each connection with the next queued
/// response and records the request lines it saw.
///
/// Responses carry `Connection: close`, so every request opens a fresh
/// connection and the hit counter maps one-to-one onto issued requests.
pub struct StubServer {
    /// Base URL to point a fetcher at, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Starts the server. `responses` are `(status, body)` pairs served in
    /// order; the last one repeats once the queue is exhausted.
    pub async fn start(responses: Vec<(u16, String)>) -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Failed to read stub address");

        let hits = Arc::new(AtomicUsize::new(0));
        let request_lines = Arc::new(Mutex::new(Vec::new()));

        let task_hits = hits.clone();
        let task_lines = request_lines.clone();
        tokio::spawn(async move {
            let mut served = 0usize;
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };

                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                // Read until the end of the request headers.
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                if let Some(line) = request.split(|&b| b == b'\r').next() {
                    task_lines
                        .lock()
                        .await
                        .push(String::from_utf8_lossy(line).into_owned());
                }

                let (status, body) = responses
                    .get(served)
                    .or_else(|| responses.last())
                    .cloned()
                    .unwrap_or((200, String::from("[]")));
                served += 1;
                task_hits.fetch_add(1, Ordering::SeqCst);

                let reason = match status {
                    200 => "OK",
                    400 => "Bad Request",
                    404 => "Not Found",
                    429 => "Too Many Requests",
                    500 => "Internal Server Error",
                    _ => "Status",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        StubServer {
            base_url: format!("http://{addr}"),
            hits,
            request_lines,
        }
    }

    /// Number of requests served so far.
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request lines as received, e.g. `GET /api/v3/klines?... HTTP/1.1`.
    pub async fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().await.clone()
    }
}
