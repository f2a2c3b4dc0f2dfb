use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct StubState {
    response: Mutex<Option<(StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A stand-in chat-completion provider listening on localhost. It answers
/// both `/v1/chat/completions` and the proxy path `/api`.
pub struct StubProvider {
    url: String,
    state: Arc<StubState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StubProvider {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());

        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .route("/api", post(proxy))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub provider");
        let addr = listener.local_addr().expect("stub provider address");
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = server.await {
                eprintln!("stub provider error: {err}");
            }
        });

        Self {
            url: format!("http://{addr}"),
            state,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn respond(&self, status: StatusCode, body: impl Into<String>) {
        *self.state.response.lock().unwrap() = Some((status, body.into()));
    }

    /// Respond with a successful envelope whose first choice holds `content`.
    pub fn respond_with_content(&self, content: &str) {
        self.respond(
            StatusCode::OK,
            json!({
                "id": "chatcmpl-stub",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

type StubResponse = (StatusCode, [(header::HeaderName, &'static str); 1], String);

async fn completions(state: State<Arc<StubState>>, headers: HeaderMap, body: String) -> StubResponse {
    handle(state, headers, body, "/v1/chat/completions")
}

async fn proxy(state: State<Arc<StubState>>, headers: HeaderMap, body: String) -> StubResponse {
    handle(state, headers, body, "/api")
}

fn handle(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: String,
    path: &'static str,
) -> StubResponse {
    state.requests.lock().unwrap().push(RecordedRequest {
        path,
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    let (status, body) = state
        .response
        .lock()
        .unwrap()
        .clone()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "no stub response".to_string()));

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
