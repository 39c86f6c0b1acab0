//! File management endpoints.

use std::path::Path;

use serde::{Deserialize, Serialize};

use rrf_core::constants::endpoints;
use rrf_core::error::{RrfError, RrfResult};

use crate::client::RrfClient;
use crate::reply::Reply;
use crate::transport::{Request, Transport};

/// Directory listing returned by `/rr_filelist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileList {
    /// Directory that was listed, with volume prefix (e.g. "0:/gcodes").
    pub dir: String,
    #[serde(default)]
    pub first: u32,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    /// Index of the next page, 0 when the listing is complete.
    #[serde(default)]
    pub next: u32,
}

/// One entry of a [`FileList`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// "f" for files, "d" for directories.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    /// Last modification time as reported by the controller.
    #[serde(default)]
    pub date: Option<String>,
}

impl FileEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == "d"
    }
}

impl<T: Transport> RrfClient<T> {
    /// Upload a local file. `dest` defaults to the file's base name.
    pub async fn upload(&self, local: &Path, dest: Option<&str>) -> RrfResult<Reply> {
        let bytes = tokio::fs::read(local).await?;
        let dest = match dest {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => local
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    RrfError::Config(format!("no file name in {}", local.display()))
                })?,
        };
        self.upload_bytes(&dest, bytes).await
    }

    /// Upload bytes to a remote path.
    pub async fn upload_bytes(&self, dest: &str, bytes: Vec<u8>) -> RrfResult<Reply> {
        let request = Request::post(self.url(endpoints::UPLOAD), bytes).param("name", dest);
        self.send(request).await
    }

    /// Download a remote file, decoded as JSON or text.
    pub async fn download(&self, name: &str) -> RrfResult<Reply> {
        self.get(endpoints::DOWNLOAD, &[("name", name)]).await
    }

    /// Download a remote file as raw bytes.
    pub async fn download_bytes(&self, name: &str) -> RrfResult<Vec<u8>> {
        let request = Request::get(self.url(endpoints::DOWNLOAD)).param("name", name);
        let raw = self.send_raw(request).await?;
        Ok(raw.body)
    }

    pub async fn delete(&self, name: &str) -> RrfResult<Reply> {
        self.get(endpoints::DELETE, &[("name", name)]).await
    }

    /// Detailed listing of a directory.
    pub async fn filelist(&self, dir: &str) -> RrfResult<Reply> {
        self.get(endpoints::FILELIST, &[("dir", dir)]).await
    }

    /// Name-only listing of a directory; directories are prefixed with `*`.
    pub async fn files(&self, dir: &str) -> RrfResult<Reply> {
        self.get(endpoints::FILES, &[("dir", dir)]).await
    }

    /// Detailed listing parsed into a [`FileList`].
    pub async fn file_entries(&self, dir: &str) -> RrfResult<FileList> {
        let reply = self.filelist(dir).await?;
        if let Some(err) = reply.get("err") {
            return Err(RrfError::Protocol(format!(
                "listing '{dir}' failed with err {err}"
            )));
        }
        reply.parse()
    }

    /// Rename or move a file.
    pub async fn move_file(&self, old: &str, new: &str) -> RrfResult<Reply> {
        self.get(endpoints::MOVE, &[("old", old), ("new", new)]).await
    }

    pub async fn mkdir(&self, name: &str) -> RrfResult<Reply> {
        self.get(endpoints::MKDIR, &[("name", name)]).await
    }

    /// Metadata of a file (size, slicer info for gcode files).
    pub async fn fileinfo(&self, name: &str) -> RrfResult<Reply> {
        self.get(endpoints::FILEINFO, &[("name", name)]).await
    }
}
