//! Per-stream ingestion session.
//!
//! A session is `Open` when created, `Active` while it pulls messages off its
//! stream, and `Closed` once the stream ends or fails. There is no retry: the
//! peer reconnects and opens a new session.

use std::net::SocketAddr;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tonic::Status;
use tracing::{debug, error, info, instrument, warn};

use crate::error::SinkError;
use crate::port::RecordSink;
use crate::proto::StreamAccessLogsMessage;
use crate::proto::stream_access_logs_message::{Identifier, LogEntries};
use crate::transform::{convert_http_entry, encode_access_record, encode_tcp_entry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Active,
    Closed,
}

/// Counters reported when a session ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub messages: u64,
    pub written: u64,
    pub dropped: u64,
    pub ignored_messages: u64,
}

pub struct StreamSession {
    sink: Arc<dyn RecordSink>,
    peer: Option<SocketAddr>,
    state: SessionState,
    identified: bool,
    summary: SessionSummary,
}

impl StreamSession {
    pub fn new(sink: Arc<dyn RecordSink>, peer: Option<SocketAddr>) -> Self {
        Self {
            sink,
            peer,
            state: SessionState::Open,
            identified: false,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Drive the session until the stream ends.
    ///
    /// Returns the summary on a clean end of stream, or the receive error that
    /// terminated it. The session stays `Active` if the future is dropped
    /// before either happens.
    #[instrument(name = "session", skip_all, fields(peer = ?self.peer))]
    pub async fn run<S>(&mut self, mut stream: S) -> Result<SessionSummary, Status>
    where
        S: Stream<Item = Result<StreamAccessLogsMessage, Status>> + Unpin,
    {
        self.state = SessionState::Active;
        debug!("Access log stream opened");

        loop {
            match stream.next().await {
                Some(Ok(message)) => self.process_message(message).await,
                Some(Err(status)) => {
                    self.state = SessionState::Closed;
                    warn!(
                        code = ?status.code(),
                        error = status.message(),
                        written = self.summary.written,
                        dropped = self.summary.dropped,
                        "Access log stream failed"
                    );
                    return Err(status);
                }
                None => {
                    self.state = SessionState::Closed;
                    info!(
                        messages = self.summary.messages,
                        written = self.summary.written,
                        dropped = self.summary.dropped,
                        ignored_messages = self.summary.ignored_messages,
                        "Access log stream closed by peer"
                    );
                    return Ok(self.summary);
                }
            }
        }
    }

    /// Dispatch one inbound message by entry-kind, in the order the peer
    /// packed its entries.
    pub async fn process_message(&mut self, message: StreamAccessLogsMessage) {
        self.summary.messages += 1;

        if let Some(identifier) = &message.identifier {
            self.log_identifier(identifier);
        }

        match message.log_entries {
            Some(LogEntries::HttpLogs(batch)) => {
                debug!(count = batch.log_entry.len(), "Received HTTP access log batch");
                for entry in &batch.log_entry {
                    let record = convert_http_entry(entry);
                    self.append(encode_access_record(&record)).await;
                }
            }
            Some(LogEntries::TcpLogs(batch)) => {
                debug!(count = batch.log_entry.len(), "Received TCP access log batch");
                for entry in &batch.log_entry {
                    self.append(encode_tcp_entry(entry)).await;
                }
            }
            None => {
                self.summary.ignored_messages += 1;
                debug!("Ignoring message without a known entry kind");
            }
        }
    }

    async fn append(&mut self, line: Result<Vec<u8>, serde_json::Error>) {
        let result = match line {
            Ok(bytes) => self.sink.append(bytes).await,
            Err(e) => Err(SinkError::from(e)),
        };

        match result {
            Ok(()) => self.summary.written += 1,
            Err(e) => {
                self.summary.dropped += 1;
                error!(error = %e, "Failed to append access log record, dropping it");
            }
        }
    }

    fn log_identifier(&mut self, identifier: &Identifier) {
        if self.identified {
            return;
        }
        self.identified = true;

        let node = identifier.node.as_ref();
        info!(
            node_id = node.map(|n| n.id.as_str()).unwrap_or_default(),
            node_cluster = node.map(|n| n.cluster.as_str()).unwrap_or_default(),
            log_name = %identifier.log_name,
            "Access log stream identified"
        );
    }
}
