#![allow(dead_code)]

use axum::body::{Body, to_bytes};
use axum::http::Request;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;
use videoprompt_rs::credentials::CredentialStore;
use videoprompt_rs::gemini::types::GenerateContentRequest;
use videoprompt_rs::gemini::{ContentGenerator, GeminiError};
use videoprompt_rs::server::{AppState, build_router};

// Scripted upstream shared between the router and the test body.
#[derive(Clone, Default)]
pub struct Upstream {
    pub replies: Arc<Mutex<VecDeque<Result<String, GeminiError>>>>,
    pub calls: Arc<Mutex<Vec<(String, GenerateContentRequest)>>>,
}

impl Upstream {
    pub fn reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn fail(&self, status: u16, message: &str) {
        self.replies.lock().unwrap().push_back(Err(GeminiError::Status {
            status,
            message: message.to_string(),
        }));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Value {
        let calls = self.calls.lock().unwrap();
        serde_json::to_value(&calls.last().expect("no upstream call").1).unwrap()
    }
}

impl ContentGenerator for Upstream {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

pub fn app(process_key: &str) -> (axum::Router, Upstream) {
    let upstream = Upstream::default();
    let state = Arc::new(AppState::new(
        CredentialStore::new(process_key),
        upstream.clone(),
    ));
    (build_router(state), upstream)
}

pub async fn call(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let req = match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.expect("service call failed");
    let status = resp.status().as_u16();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
