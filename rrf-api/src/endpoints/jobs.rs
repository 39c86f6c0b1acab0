//! Print job commands.

use rrf_core::constants::gcode;
use rrf_core::error::RrfResult;

use crate::client::RrfClient;
use crate::reply::Reply;
use crate::transport::Transport;

impl<T: Transport> RrfClient<T> {
    /// Start printing a file from the controller's storage (`M32`).
    pub async fn print(&self, path: &str) -> RrfResult<Reply> {
        self.gcode(&gcode::start_print(path)).await
    }

    /// Report SD print progress (`M27`).
    pub async fn print_status(&self) -> RrfResult<Reply> {
        self.gcode(gcode::PRINT_STATUS).await
    }
}
