use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::WebhookConfig;

/// Append-only record sink. Appends are serialized so concurrent requests
/// never interleave partial records.
#[derive(Debug)]
pub struct WebhookLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl WebhookLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one full record. The file is created if missing.
    pub async fn append(&self, record: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(record.as_bytes()).await?;
        file.flush().await
    }
}

/// Shared application state for the webhook listener.
#[derive(Debug)]
pub struct AppState {
    pub log: WebhookLog,
}

impl AppState {
    pub fn new(config: &WebhookConfig) -> Self {
        Self {
            log: WebhookLog::new(&config.log_path),
        }
    }
}
