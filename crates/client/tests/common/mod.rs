//! In-process mock of the content API.
//!
//! Binds an axum router to `127.0.0.1:0`, answers with canned responses
//! keyed by `(method, path)` and records every request it receives,
//! decoding JSON and multipart bodies so tests can assert on them.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;

/// A decoded multipart field.
#[derive(Debug, Clone)]
pub struct RecordedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl RecordedPart {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[derive(Debug, Clone)]
pub enum RecordedBody {
    Empty,
    Json(Value),
    Multipart(Vec<RecordedPart>),
    Other(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: RecordedBody,
}

impl RecordedRequest {
    pub fn json(&self) -> &Value {
        match &self.body {
            RecordedBody::Json(v) => v,
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    pub fn parts(&self) -> &[RecordedPart] {
        match &self.body {
            RecordedBody::Multipart(p) => p,
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    /// Text values of every part named `name`.
    pub fn texts(&self, name: &str) -> Vec<String> {
        self.parts()
            .iter()
            .filter(|p| p.name == name && p.file_name.is_none())
            .map(RecordedPart::text)
            .collect()
    }

    /// File parts named `name`.
    pub fn files(&self, name: &str) -> Vec<&RecordedPart> {
        self.parts()
            .iter()
            .filter(|p| p.name == name && p.file_name.is_some())
            .collect()
    }
}

enum Canned {
    Json(u16, Value),
    Bytes(u16, Vec<u8>),
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<(Method, String), Canned>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockApi {
    pub base_url: String,
    state: MockState,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Canned::Json(status, body));
    }

    /// Answer `method path` with raw bytes.
    pub fn respond_bytes(&self, method: Method, path: &str, status: u16, body: Vec<u8>) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Canned::Bytes(status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn handle(State(state): State<MockState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &()).await.unwrap();
        let mut parts = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.unwrap().to_vec();
            parts.push(RecordedPart {
                name,
                file_name,
                content_type,
                bytes,
            });
        }
        RecordedBody::Multipart(parts)
    } else {
        let bytes: Bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap();
        if bytes.is_empty() {
            RecordedBody::Empty
        } else if content_type.starts_with("application/json") {
            RecordedBody::Json(serde_json::from_slice(&bytes).unwrap())
        } else {
            RecordedBody::Other(bytes.to_vec())
        }
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body,
    });

    let routes = state.routes.lock().unwrap();
    match routes.get(&(method, path)) {
        Some(Canned::Json(status, value)) => (
            StatusCode::from_u16(*status).unwrap(),
            axum::Json(value.clone()),
        )
            .into_response(),
        Some(Canned::Bytes(status, bytes)) => (
            StatusCode::from_u16(*status).unwrap(),
            [(header::CONTENT_TYPE, "image/png")],
            bytes.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "no canned response").into_response(),
    }
}

pub const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
