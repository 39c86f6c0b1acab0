//! Shared test utilities for integration tests.
//!
//! `SimulatedController` is an in-memory stand-in for the firmware: it
//! keeps a single-slot style reply queue fed by scripted gcode responses,
//! an in-memory filesystem for the file endpoints, and a log of every
//! request with the (tokio) time it arrived.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::Instant;

use rrf_api::{RawResponse, Request, RrfClient, Transport};
use rrf_core::config::ControllerConfig;
use rrf_core::error::{RrfError, RrfResult};

/// A request as seen by the simulated controller.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub at: Instant,
    pub request: Request,
}

#[derive(Default)]
struct State {
    /// What `rr_reply` returns next, front first. Empty text once drained.
    pending_replies: VecDeque<RawResponse>,
    /// Replies queued whenever a given gcode is submitted.
    scripts: HashMap<String, Vec<RawResponse>>,
    files: BTreeMap<String, Vec<u8>>,
    /// Object model subtrees served by `/rr_model`.
    model: HashMap<String, Value>,
    requests: Vec<Recorded>,
    fail_replies: bool,
}

/// In-memory controller implementing [`Transport`].
#[derive(Clone, Default)]
pub struct SimulatedController {
    state: Arc<Mutex<State>>,
}

impl SimulatedController {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `command` is submitted, `rr_reply` yields `empty_polls` empty
    /// replies and then `reply`.
    pub fn script(&self, command: &str, empty_polls: usize, reply: RawResponse) {
        let mut sequence = vec![RawResponse::text(""); empty_polls];
        sequence.push(reply);
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(command.to_string(), sequence);
    }

    /// Script a JSON reply labelled as plain text, the way `M409` answers.
    pub fn script_json(&self, command: &str, empty_polls: usize, value: Value) {
        self.script(command, empty_polls, RawResponse::text(value.to_string()));
    }

    /// Make every `rr_reply` fail at the transport level.
    pub fn fail_replies(&self) {
        self.state.lock().unwrap().fail_replies = true;
    }

    pub fn set_model(&self, key: &str, value: Value) {
        self.state
            .lock()
            .unwrap()
            .model
            .insert(key.to_string(), value);
    }

    pub fn put_file(&self, name: &str, bytes: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(name.to_string(), bytes.to_vec());
    }

    pub fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(name).cloned()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests made to one endpoint, e.g. "/rr_reply".
    pub fn requests_to(&self, endpoint: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.request.endpoint() == endpoint)
            .collect()
    }

    /// Gcode commands submitted, in order.
    pub fn submitted(&self) -> Vec<String> {
        self.requests_to("/rr_gcode")
            .into_iter()
            .filter_map(|r| r.request.param_value("gcode").map(str::to_string))
            .collect()
    }

    fn handle(&self, request: &Request) -> RrfResult<RawResponse> {
        let mut state = self.state.lock().unwrap();
        let param = |key: &str| request.param_value(key).unwrap_or_default().to_string();

        let response = match request.endpoint() {
            "/rr_gcode" => {
                let command = param("gcode");
                if let Some(sequence) = state.scripts.get(&command).cloned() {
                    state.pending_replies.extend(sequence);
                }
                RawResponse::json(&json!({"buff": 255}))
            }
            "/rr_reply" => {
                if state.fail_replies {
                    return Err(RrfError::Http("connection failed: refused".into()));
                }
                state
                    .pending_replies
                    .pop_front()
                    .unwrap_or_else(|| RawResponse::text(""))
            }
            "/rr_upload" => {
                let body = request.body.clone().unwrap_or_default();
                state.files.insert(param("name"), body);
                RawResponse::json(&json!({"err": 0}))
            }
            "/rr_download" => match state.files.get(&param("name")) {
                Some(bytes) => RawResponse::bytes(bytes.clone()),
                None => RawResponse {
                    status: 404,
                    ..RawResponse::json(&json!({"err": 1}))
                },
            },
            "/rr_delete" => {
                let err = if state.files.remove(&param("name")).is_some() { 0 } else { 1 };
                RawResponse::json(&json!({"err": err}))
            }
            "/rr_move" => {
                let err = match state.files.remove(&param("old")) {
                    Some(bytes) => {
                        state.files.insert(param("new"), bytes);
                        0
                    }
                    None => 1,
                };
                RawResponse::json(&json!({"err": err}))
            }
            "/rr_mkdir" => RawResponse::json(&json!({"err": 0})),
            "/rr_filelist" => {
                let dir = param("dir");
                let prefix = format!("{}/", dir.trim_end_matches('/'));
                let files: Vec<Value> = state
                    .files
                    .iter()
                    .filter_map(|(name, bytes)| {
                        name.strip_prefix(&prefix)
                            .map(|n| json!({"type": "f", "name": n, "size": bytes.len()}))
                    })
                    .collect();
                if files.is_empty() {
                    RawResponse::json(&json!({"err": 2}))
                } else {
                    RawResponse::json(&json!({"dir": format!("0:{dir}"), "first": 0, "files": files, "next": 0}))
                }
            }
            "/rr_model" => RawResponse::json(&json!({
                "key": param("key"),
                "flags": param("flags"),
                "result": state.model.get(&param("key")).cloned().unwrap_or(Value::Null),
            })),
            "/rr_connect" => RawResponse::json(&json!({"err": 0, "sessionTimeout": 8000})),
            "/rr_disconnect" => RawResponse::json(&json!({"err": 0})),
            other => return Err(RrfError::Http(format!("no route to {other}"))),
        };

        state.requests.push(Recorded {
            at: Instant::now(),
            request: request.clone(),
        });
        Ok(response)
    }
}

#[async_trait]
impl Transport for SimulatedController {
    async fn send(&self, request: Request) -> RrfResult<RawResponse> {
        self.handle(&request)
    }
}

pub const THROTTLE: Duration = Duration::from_millis(500);
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Client over a fresh simulated controller with the default timings.
pub fn create_test_client() -> (RrfClient<SimulatedController>, SimulatedController) {
    let controller = SimulatedController::new();
    let config = ControllerConfig {
        throttle_ms: THROTTLE.as_millis() as u64,
        reply_timeout_ms: REPLY_TIMEOUT.as_millis() as u64,
        ..ControllerConfig::for_host("duet.local")
    };
    let client = RrfClient::with_transport(controller.clone(), &config);
    (client, controller)
}
