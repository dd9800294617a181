// Append NDJSON lines to a single output file.
// The file is opened once in create + append mode and never truncated or
// rotated. A mutex around the handle keeps each line contiguous when several
// streams write at the same time.

use crate::error::SinkError;
use crate::port::RecordSink;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct JsonFileSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl JsonFileSink {
    /// Open (or create) the output file for appending.
    ///
    /// Missing parent directories are created.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let open_error = |source| SinkError::Open {
            path: path.display().to_string(),
            source,
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(open_error)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(open_error)?;

        info!(path = %path.display(), "Opened access log output file");

        Ok(Self {
            path,
            file: Mutex::new(Some(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_line(&self, mut record: Vec<u8>) -> Result<(), SinkError> {
        record.push(b'\n');

        let mut guard = self.file.lock().await;
        let file = guard.as_mut().ok_or(SinkError::Closed)?;

        let start = file.metadata().await?.len();
        if let Err(e) = write_and_flush(file, &record).await {
            restore_length(file, start).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn shutdown(&self) -> Result<(), SinkError> {
        let mut guard = self.file.lock().await;
        let Some(mut file) = guard.take() else {
            return Ok(());
        };

        file.flush().await?;
        file.sync_data().await?;
        debug!(path = %self.path.display(), "Closed access log output file");

        Ok(())
    }
}

async fn write_and_flush(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

/// Drop whatever part of a failed record reached the file, so the next line
/// starts on a clean boundary. If truncating fails, terminate the fragment
/// with a newline instead.
async fn restore_length(file: &mut File, len: u64) {
    let Err(e) = file.set_len(len).await else {
        return;
    };
    warn!(error = %e, "Failed to roll back partial record, terminating it");
    if let Err(e) = write_and_flush(file, b"\n").await {
        warn!(error = %e, "Failed to terminate partial record");
    }
}

impl RecordSink for JsonFileSink {
    fn append(
        &self,
        record: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + '_>> {
        Box::pin(self.write_line(record))
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + '_>> {
        Box::pin(self.shutdown())
    }
}
