//! RepRapFirmware API - HTTP client for the controller's `rr_` interface.
//!
//! Covers gcode submission, the reply buffer, object model queries, and
//! file management. The firmware only exposes the output of a gcode
//! command through a separate single-slot reply endpoint, so synchronous
//! commands are emulated by polling it (see [`coordinator`]). Responses
//! are decoded as JSON when either the content type or the body says so,
//! because the firmware labels some JSON as plain text.

pub mod client;
pub mod coordinator;
pub mod endpoints;
pub mod reply;
pub mod transport;

// Re-export key types
pub use client::RrfClient;
pub use coordinator::{should_stop, CommandMode, PollState};
pub use endpoints::files::{FileEntry, FileList};
pub use endpoints::model::ModelSnapshot;
pub use reply::Reply;
pub use transport::{HttpTransport, Method, RawResponse, Request, Transport};
