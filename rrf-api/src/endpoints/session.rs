//! Session endpoints.
//!
//! Boards without a password accept requests without a session; a
//! password-protected board rejects other requests until `rr_connect`
//! succeeds.

use chrono::{Local, NaiveDateTime};

use rrf_core::constants::endpoints;
use rrf_core::error::{RrfError, RrfResult};

use crate::client::RrfClient;
use crate::reply::Reply;
use crate::transport::Transport;

/// Format of the `time` parameter the board uses to set its clock.
const CONNECT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Value of the `time` parameter for a given local time.
pub fn connect_time(now: NaiveDateTime) -> String {
    now.format(CONNECT_TIME_FORMAT).to_string()
}

impl<T: Transport> RrfClient<T> {
    /// Open a session, passing the local wall clock to the board.
    ///
    /// Fails with [`RrfError::AuthFailed`] when the board reports a bad
    /// password (`err` 1) and [`RrfError::Protocol`] when it has no free
    /// session slot (`err` 2).
    pub async fn connect(&self, password: &str) -> RrfResult<Reply> {
        let time = connect_time(Local::now().naive_local());
        let reply = self
            .get(endpoints::CONNECT, &[("password", password), ("time", time.as_str())])
            .await?;

        match reply.get("err").and_then(|v| v.as_i64()) {
            None | Some(0) => Ok(reply),
            Some(1) => Err(RrfError::AuthFailed("invalid board password".into())),
            Some(code) => Err(RrfError::Protocol(format!("rr_connect failed with err {code}"))),
        }
    }

    /// Close the session.
    pub async fn disconnect(&self) -> RrfResult<Reply> {
        self.get(endpoints::DISCONNECT, &[]).await
    }
}
