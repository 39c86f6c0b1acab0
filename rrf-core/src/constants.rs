//! Protocol and application constants.

/// Application name.
pub const APP_NAME: &str = "RepRapFirmware";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default controller host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default HTTP request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Default spacing between reply polls and model sub-queries in milliseconds.
pub const DEFAULT_THROTTLE_MS: u64 = 500;

/// Default time to wait for a command reply in milliseconds.
pub const DEFAULT_REPLY_TIMEOUT_MS: u64 = 2_000;

/// Content type that marks a body as JSON.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Key holding the payload in an object model reply.
pub const RESULT_KEY: &str = "result";

/// Default flags for object model queries (verbose).
pub const DEFAULT_MODEL_FLAGS: &str = "v";

/// HTTP endpoints exposed by the controller, relative to the base URL.
pub mod endpoints {
    pub const GCODE: &str = "/rr_gcode";
    pub const REPLY: &str = "/rr_reply";
    pub const UPLOAD: &str = "/rr_upload";
    pub const DOWNLOAD: &str = "/rr_download";
    pub const DELETE: &str = "/rr_delete";
    pub const FILELIST: &str = "/rr_filelist";
    pub const FILES: &str = "/rr_files";
    pub const MODEL: &str = "/rr_model";
    pub const MOVE: &str = "/rr_move";
    pub const MKDIR: &str = "/rr_mkdir";
    pub const FILEINFO: &str = "/rr_fileinfo";
    pub const CONNECT: &str = "/rr_connect";
    pub const DISCONNECT: &str = "/rr_disconnect";
}

/// Gcode command aliases.
pub mod gcode {
    /// Full diagnostics report.
    pub const DIAGNOSTICS: &str = "M122";
    /// Report print status.
    pub const PRINT_STATUS: &str = "M27";
    /// Query object model (top-level keys when sent bare).
    pub const MODEL_QUERY: &str = "M409";

    /// Start printing a file from the controller's storage.
    pub fn start_print(path: &str) -> String {
        format!("M32 \"{path}\"")
    }

    /// Query one object model key verbosely.
    pub fn model_key(key: &str) -> String {
        format!("{MODEL_QUERY} K\"{key}\" F\"v\"")
    }
}
