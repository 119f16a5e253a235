//! Router harness for route tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use haggle::{CallAgent, CallRepository};

use crate::application::fakes::{InMemoryCallRepository, RecordingAgent, StaticListings};
use crate::application::CallService;
use crate::AppState;

/// Full application router wired to in-memory fakes
pub struct TestApp {
    pub repo: Arc<InMemoryCallRepository>,
    pub agent: Arc<RecordingAgent>,
    pub listings: Arc<StaticListings>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(
            RecordingAgent::new(),
            StaticListings::returning(serde_json::json!({"listings": []})),
        )
    }

    pub fn with_failing_agent(message: &str) -> Self {
        Self::build(
            RecordingAgent::failing(message),
            StaticListings::returning(serde_json::json!({"listings": []})),
        )
    }

    pub fn with_listings(listings: StaticListings) -> Self {
        Self::build(RecordingAgent::new(), listings)
    }

    fn build(agent: RecordingAgent, listings: StaticListings) -> Self {
        let repo = Arc::new(InMemoryCallRepository::new());
        let agent = Arc::new(agent);
        let listings = Arc::new(listings);

        let repo_port: Arc<dyn CallRepository> = repo.clone();
        let agent_port: Arc<dyn CallAgent> = agent.clone();
        let state = AppState {
            call_service: Arc::new(CallService::new(repo_port, agent_port)),
            listings: listings.clone(),
        };

        Self {
            repo,
            agent,
            listings,
            router: crate::app(state),
        }
    }

    /// Send a request and decode the JSON body (Null when empty)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
