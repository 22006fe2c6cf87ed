//! Shared helpers: an in-process mock gateway and a recording surface.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;

use chathub::llm::{Message, ModelRegistry, ModelSelection, OpenRouterClient};
use chathub::surface::PresentationSurface;

/// How the mock gateway answers every request.
#[derive(Clone)]
pub enum MockReply {
    Json(StatusCode, serde_json::Value),
    Text(StatusCode, String),
    Delayed(Duration, serde_json::Value),
}

impl MockReply {
    pub fn content(text: &str) -> Self {
        MockReply::Json(
            StatusCode::OK,
            serde_json::json!({
                "id": "gen-test",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": text},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            }),
        )
    }
}

/// A request as seen by the mock gateway.
#[derive(Debug, Clone)]
pub struct Captured {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub referer: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    captured: Arc<Mutex<Vec<Captured>>>,
}

pub struct MockGateway {
    pub base_url: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockGateway {
    pub async fn start(reply: MockReply) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            captured: captured.clone(),
        };
        let app = Router::new()
            .route("/api/v1/chat/completions", post(completions))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            captured,
        }
    }

    pub fn client(&self) -> OpenRouterClient {
        OpenRouterClient::new(
            reqwest::Client::new(),
            self.base_url.clone(),
            OpenRouterClient::DEFAULT_REFERER.to_string(),
        )
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn completions(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.captured.lock().unwrap().push(Captured {
        authorization: header("authorization"),
        content_type: header("content-type"),
        referer: header("http-referer"),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    match state.reply {
        MockReply::Json(status, value) => (status, axum::Json(value)).into_response(),
        MockReply::Text(status, text) => (status, text).into_response(),
        MockReply::Delayed(delay, value) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, axum::Json(value)).into_response()
        }
    }
}

/// Surface that replays one interaction and records what it was told.
#[derive(Default)]
pub struct RecordingSurface {
    pub input: Option<String>,
    pub credential: String,
    pub clear: bool,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
    pub renders: Vec<Vec<Message>>,
    pub busy: Vec<bool>,
}

impl RecordingSurface {
    pub fn submitting(credential: &str, input: &str) -> Self {
        Self {
            input: Some(input.to_string()),
            credential: credential.to_string(),
            ..Default::default()
        }
    }
}

impl PresentationSurface for RecordingSurface {
    fn next_interaction(&mut self) -> bool {
        self.input.is_some() || self.clear
    }

    fn user_input(&mut self) -> Option<String> {
        self.input.take()
    }

    fn credential(&self) -> String {
        self.credential.clone()
    }

    fn selected_model(&self) -> ModelSelection {
        ModelRegistry::builtin().default_model()
    }

    fn render(&mut self, history: &[Message]) {
        self.renders.push(history.to_vec());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn show_info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn clear_requested(&mut self) -> bool {
        std::mem::take(&mut self.clear)
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy.push(busy);
    }
}
