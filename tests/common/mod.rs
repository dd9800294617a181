#![allow(dead_code)]

use als_logsink::app::server;
use als_logsink::error::AppError;
use als_logsink::port::RecordSink;
use als_logsink::proto::access_log_service_client::AccessLogServiceClient;
use als_logsink::proto::stream_access_logs_message::{
    HttpAccessLogEntries, LogEntries, TcpAccessLogEntries,
};
use als_logsink::proto::{HttpAccessLogEntry, StreamAccessLogsMessage, TcpAccessLogEntry};
use als_logsink::sink::JsonFileSink;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;

/// A server bound to an ephemeral localhost port, writing into a temp dir.
pub struct TestServer {
    pub addr: SocketAddr,
    pub log_file: PathBuf,
    pub shutdown: CancellationToken,
    pub handle: JoinHandle<Result<(), AppError>>,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("envoy").join("access.log");
        let sink: Arc<dyn RecordSink> = Arc::new(JsonFileSink::open(&log_file).await.unwrap());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(server::serve(listener, sink, shutdown.clone()));

        Self {
            addr,
            log_file,
            shutdown,
            handle,
            _dir: dir,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn client(&self) -> AccessLogServiceClient<Channel> {
        AccessLogServiceClient::connect(self.endpoint()).await.unwrap()
    }

    pub fn lines(&self) -> Vec<serde_json::Value> {
        read_lines(&self.log_file)
    }

    /// Poll the output file until it holds `count` lines.
    pub async fn wait_for_lines(&self, count: usize) -> Vec<serde_json::Value> {
        for _ in 0..100 {
            let lines = self.lines();
            if lines.len() >= count {
                return lines;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!(
            "timed out waiting for {count} lines, have {}",
            self.lines().len()
        );
    }
}

pub fn read_lines(path: &Path) -> Vec<serde_json::Value> {
    let contents = std::fs::read_to_string(path).unwrap_or_default();
    contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

pub fn http_message(entries: Vec<HttpAccessLogEntry>) -> StreamAccessLogsMessage {
    StreamAccessLogsMessage {
        identifier: None,
        log_entries: Some(LogEntries::HttpLogs(HttpAccessLogEntries { log_entry: entries })),
    }
}

pub fn tcp_message(entries: Vec<TcpAccessLogEntry>) -> StreamAccessLogsMessage {
    StreamAccessLogsMessage {
        identifier: None,
        log_entries: Some(LogEntries::TcpLogs(TcpAccessLogEntries { log_entry: entries })),
    }
}
