#![allow(dead_code)]

use std::{
    collections::{HashSet, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use scrobcli::{
    error::{Result, ScrobbleError},
    lastfm::{ApiResponse, ApiTransport, AuthorizationGate, Params},
    management::BatchSubmitter,
    types::{ScrobbleEvent, SubmissionResult},
};
use serde_json::{Value, json};

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";
pub const TOKEN: &str = "one-time-token";
pub const SESSION_KEY: &str = "session-key-123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

pub enum Scripted {
    Reply(u16, Value),
    Failure(String),
}

/// Fake Last.fm endpoint.
///
/// Scripted replies are served first, in order. Once they run out it answers
/// like a healthy server: a token, a session, and every scrobble accepted.
#[derive(Clone, Default)]
pub struct StubTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<(Method, Params)>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: Value) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Reply(status, body));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Failure(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<(Method, Params)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|(_, p)| p.get("method").cloned().unwrap_or_default())
            .collect()
    }

    fn answer(&self, method: Method, params: &Params) -> Result<ApiResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((method, params.clone()));

        if let Some(scripted) = self.script.lock().unwrap().pop_front() {
            return match scripted {
                Scripted::Reply(status, body) => Ok(ApiResponse { status, body }),
                Scripted::Failure(message) => Err(ScrobbleError::Response(message)),
            };
        }

        let body = match params.get("method").map(String::as_str) {
            Some("auth.getToken") => json!({ "token": TOKEN }),
            Some("auth.getSession") => {
                json!({ "session": { "name": "tester", "key": SESSION_KEY, "subscriber": 0 } })
            }
            Some("track.scrobble") => {
                let indexed = params.keys().filter(|k| k.starts_with("artist[")).count();
                let accepted = if indexed == 0 { 1 } else { indexed };
                json!({ "scrobbles": { "@attr": { "accepted": accepted, "ignored": 0 }, "scrobble": [] } })
            }
            _ => json!({ "error": 3, "message": "Invalid Method" }),
        };
        Ok(ApiResponse { status: 200, body })
    }
}

#[async_trait]
impl ApiTransport for StubTransport {
    async fn get(&self, params: &Params) -> Result<ApiResponse> {
        self.answer(Method::Get, params)
    }

    async fn post(&self, params: &Params) -> Result<ApiResponse> {
        self.answer(Method::Post, params)
    }
}

/// Records presented URLs and confirms (or refuses) without user input.
#[derive(Clone)]
pub struct StubGate {
    confirm: bool,
    presented: Arc<Mutex<Vec<String>>>,
}

impl StubGate {
    pub fn confirming() -> Self {
        Self {
            confirm: true,
            presented: Arc::default(),
        }
    }

    pub fn refusing() -> Self {
        Self {
            confirm: false,
            presented: Arc::default(),
        }
    }

    pub fn presented(&self) -> Vec<String> {
        self.presented.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorizationGate for StubGate {
    fn present(&self, url: &str) {
        self.presented.lock().unwrap().push(url.to_string());
    }

    async fn wait_for_confirmation(&self) -> Result<()> {
        if self.confirm {
            Ok(())
        } else {
            Err(ScrobbleError::Auth("user did not confirm".into()))
        }
    }
}

/// Batch submitter that records chunks and accepts everything, except the
/// chunks listed in `failing`.
#[derive(Default)]
pub struct RecordingSubmitter {
    pub calls: Vec<Vec<ScrobbleEvent>>,
    pub failing: HashSet<usize>,
    pub response: Option<Value>,
}

impl RecordingSubmitter {
    pub fn failing_on(chunks: &[usize]) -> Self {
        Self {
            failing: chunks.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn responding_with(body: Value) -> Self {
        Self {
            response: Some(body),
            ..Default::default()
        }
    }

    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.calls.iter().map(Vec::len).collect()
    }
}

#[async_trait]
impl BatchSubmitter for RecordingSubmitter {
    async fn submit_batch(&mut self, events: &[ScrobbleEvent]) -> Result<SubmissionResult> {
        let index = self.calls.len();
        self.calls.push(events.to_vec());

        if self.failing.contains(&index) {
            return Err(ScrobbleError::Http {
                status: 500,
                message: "Operation failed (code 8)".into(),
            });
        }

        Ok(self.response.clone().unwrap_or_else(|| {
            json!({ "scrobbles": { "@attr": { "accepted": events.len(), "ignored": 0 } } })
        }))
    }
}
