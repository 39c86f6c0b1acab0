//! Synchronous command emulation over the asynchronous reply buffer.
//!
//! `rr_gcode` only queues a command. Its output shows up later on
//! `rr_reply`, which holds a single slot: the most recent reply, from
//! whichever command (or client) produced it. There is no correlation id,
//! so the only way to wait for "our" reply is to poll until something
//! appears or the timeout runs out. A concurrent web console can consume
//! or precede the reply; that race is inherent to the protocol.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, error};

use rrf_core::constants::{endpoints, gcode};
use rrf_core::error::RrfResult;

use crate::client::RrfClient;
use crate::reply::Reply;
use crate::transport::{Request, Transport};

/// How `send_command` treats the reply buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandMode {
    /// Submit and return the submission response; never poll.
    FireAndForget,
    /// Submit, then poll `rr_reply` until a reply arrives or the timeout passes.
    #[default]
    Synchronous,
}

/// State of the reply polling loop after one poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// Nothing yet; sleep and poll again.
    Awaiting(Reply),
    /// A reply arrived.
    Succeeded(Reply),
    /// Timeout reached; carries the last poll result.
    TimedOut(Reply),
}

/// Whether a polled reply ends the wait.
///
/// Any structured reply stops immediately. Text stops only when non-empty:
/// empty text is how the firmware says "no new reply".
pub fn should_stop(reply: &Reply) -> bool {
    match reply {
        Reply::Structured(_) => true,
        Reply::Text(text) => !text.is_empty(),
    }
}

/// Transition after a poll returned `reply` at `elapsed` since submission.
pub fn next_state(reply: Reply, elapsed: Duration, timeout: Duration) -> PollState {
    if should_stop(&reply) {
        PollState::Succeeded(reply)
    } else if elapsed >= timeout {
        PollState::TimedOut(reply)
    } else {
        PollState::Awaiting(reply)
    }
}

/// Result synthesized for a forced timeout: `{expected_key: null}`.
pub fn forced_reply(expected_key: &str) -> Reply {
    let mut map = serde_json::Map::new();
    map.insert(expected_key.to_string(), serde_json::Value::Null);
    Reply::Structured(serde_json::Value::Object(map))
}

impl<T: Transport> RrfClient<T> {
    /// Submit a gcode command.
    ///
    /// In [`CommandMode::Synchronous`] the reply buffer is polled every
    /// throttle interval until [`should_stop`] accepts a reply or the reply
    /// timeout passes. On timeout an error is logged; with `force` and an
    /// `expected_key` the result is `{expected_key: null}`, otherwise the
    /// last (usually empty) poll result is returned.
    ///
    /// The command is submitted exactly once. Transport errors propagate.
    pub async fn send_command(
        &self,
        command: &str,
        mode: CommandMode,
        expected_key: Option<&str>,
        force: bool,
    ) -> RrfResult<Reply> {
        let submitted = self
            .send(Request::get(self.url(endpoints::GCODE)).param("gcode", command))
            .await?;

        if mode == CommandMode::FireAndForget {
            return Ok(submitted);
        }

        let started = Instant::now();
        let mut polls = 0u32;
        loop {
            let reply = self.reply().await?;
            polls += 1;

            match next_state(reply, started.elapsed(), self.reply_timeout()) {
                PollState::Awaiting(_) => sleep(self.throttle()).await,
                PollState::Succeeded(reply) => {
                    debug!("reply to '{command}' after {polls} poll(s)");
                    return Ok(reply);
                }
                PollState::TimedOut(last) => {
                    return Ok(timed_out(command, expected_key, force, polls, last));
                }
            }
        }
    }

    /// Submit a command and wait for its reply.
    pub async fn gcode(&self, command: &str) -> RrfResult<Reply> {
        self.send_command(command, CommandMode::Synchronous, None, false)
            .await
    }

    /// Submit a command and wait for a structured reply carrying `expected_key`,
    /// substituting `{expected_key: null}` on timeout.
    pub async fn gcode_expect(&self, command: &str, expected_key: &str) -> RrfResult<Reply> {
        self.send_command(command, CommandMode::Synchronous, Some(expected_key), true)
            .await
    }

    /// Run the firmware's diagnostics report (`M122`).
    pub async fn diagnostics(&self) -> RrfResult<Reply> {
        self.gcode(gcode::DIAGNOSTICS).await
    }

    /// Read the reply buffer once.
    pub async fn reply(&self) -> RrfResult<Reply> {
        self.send(Request::get(self.url(endpoints::REPLY))).await
    }
}

fn timed_out(
    command: &str,
    expected_key: Option<&str>,
    force: bool,
    polls: u32,
    last: Reply,
) -> Reply {
    match expected_key {
        Some(key) => {
            error!("no reply to '{command}' after {polls} poll(s), failed to retrieve '{key}'");
            if force {
                forced_reply(key)
            } else {
                last
            }
        }
        None => {
            error!("no reply to '{command}' after {polls} poll(s)");
            last
        }
    }
}
