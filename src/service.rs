use std::sync::Arc;

use tonic::{Request, Response, Status, Streaming};
use tracing::debug;

use crate::port::RecordSink;
use crate::proto::access_log_service_server::{AccessLogService, AccessLogServiceServer};
use crate::proto::{StreamAccessLogsMessage, StreamAccessLogsResponse};
use crate::session::StreamSession;

/// gRPC entry point for Envoy's access log service.
///
/// Every inbound stream gets its own [`StreamSession`]; all sessions share
/// the same sink.
#[derive(Clone)]
pub struct IngestionService {
    sink: Arc<dyn RecordSink>,
}

impl IngestionService {
    pub fn new(sink: Arc<dyn RecordSink>) -> Self {
        Self { sink }
    }

    pub fn into_server(self) -> AccessLogServiceServer<Self> {
        AccessLogServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl AccessLogService for IngestionService {
    async fn stream_access_logs(
        &self,
        request: Request<Streaming<StreamAccessLogsMessage>>,
    ) -> Result<Response<StreamAccessLogsResponse>, Status> {
        let peer = request.remote_addr();
        debug!(peer = ?peer, "Accepted access log stream");

        let mut session = StreamSession::new(self.sink.clone(), peer);
        session.run(request.into_inner()).await?;

        Ok(Response::new(StreamAccessLogsResponse {}))
    }
}
