// src/test_support.rs
// =============================================================================
// A tiny in-process HTTP server for tests.
//
// It stands in for both api.github.com and raw.githubusercontent.com: tests
// register a canned Reply per path, point a GitHubClient at the server, and
// afterwards inspect which requests arrived. Each connection serves exactly
// one request and is then closed, which keeps the parsing trivial.
//
// Only compiled for `cargo test` (see the #[cfg(test)] in main.rs).
// =============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use crate::config::RepositoryCoordinate;
use crate::github::GitHubClient;

#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: Vec<u8>,
    // Content-Length to announce; larger than body.len() simulates a dropped connection
    claimed_len: usize,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            status: 200,
            claimed_len: body.len(),
            body,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            claimed_len: 0,
        }
    }

    /// 200 OK that announces `claimed_len` bytes but closes after sending `body`.
    pub fn cut_off(body: impl Into<Vec<u8>>, claimed_len: usize) -> Self {
        Self {
            status: 200,
            body: body.into(),
            claimed_len,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Path plus query, as sent on the request line
    pub target: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Reply>,
    requests: Vec<RecordedRequest>,
}

pub struct StubServer {
    url: Url,
    state: Arc<Mutex<State>>,
}

impl StubServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        let state = Arc::new(Mutex::new(State::default()));

        let accept_state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, Arc::clone(&accept_state)));
            }
        });

        Self { url, state }
    }

    pub fn url(&self) -> Url {
        self.url.clone()
    }

    /// Registers the reply for a path (query string ignored). Unknown paths get 404.
    pub fn route(&self, path: &str, reply: Reply) {
        self.state.lock().unwrap().routes.insert(path.to_string(), reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests that were not for the tree listing.
    pub fn download_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.target)
            .filter(|target| !target.starts_with("/repos/"))
            .collect()
    }
}

async fn serve(mut stream: TcpStream, state: Arc<Mutex<State>>) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&head).into_owned();
    let mut lines = head.lines();
    let target = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let authorization = lines.take_while(|line| !line.is_empty()).find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("authorization")
            .then(|| value.trim().to_string())
    });
    let path = target.split('?').next().unwrap_or("/").to_string();

    let reply = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            target,
            authorization,
        });
        state
            .routes
            .get(&path)
            .cloned()
            .unwrap_or_else(|| Reply::status(404))
    };

    let reason = if reply.status == 200 { "OK" } else { "Error" };
    let response_head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        reply.status, reason, reply.claimed_len
    );
    let _ = stream.write_all(response_head.as_bytes()).await;
    let _ = stream.write_all(&reply.body).await;
    let _ = stream.shutdown().await;
}

/// A client aimed at the stub server for both the API and raw content.
pub fn client_for(server: &StubServer) -> GitHubClient {
    // no_proxy: an HTTP(S)_PROXY in the test environment must not intercept 127.0.0.1
    GitHubClient::with_builder(Client::builder().no_proxy(), "ghp_test", server.url(), server.url())
        .unwrap()
}

pub fn coordinate(branch: &str) -> RepositoryCoordinate {
    RepositoryCoordinate {
        owner: "octo".to_string(),
        name: "hello".to_string(),
        branch: branch.to_string(),
    }
}

/// A tree listing response body from (path, type) pairs.
pub fn tree_body(entries: &[(&str, &str)], truncated: bool) -> Vec<u8> {
    let tree: Vec<_> = entries
        .iter()
        .map(|(path, kind)| serde_json::json!({ "path": path, "type": kind }))
        .collect();

    serde_json::to_vec(&serde_json::json!({ "sha": "0000", "tree": tree, "truncated": truncated }))
        .unwrap()
}
