use crate::error::AppError;
use crate::port::RecordSink;
use crate::proto::access_log_service_server::AccessLogServiceServer;
use crate::service::IngestionService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tonic::transport::server::TcpIncoming;
use tonic_health::ServingStatus;
use tracing::{error, info};

/// Bind the ingestion listener on all interfaces.
pub async fn bind(port: u16) -> Result<TcpListener, AppError> {
    let bind_addr = format!("0.0.0.0:{port}");
    TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::Bind {
            address: bind_addr,
            source: e,
        })
}

/// Serve the access log service and gRPC health until `shutdown_token` is
/// cancelled.
///
/// On cancellation health flips to NOT_SERVING and the listener stops
/// accepting. Streams already open run until their peers close them, then the
/// sink is closed.
pub async fn serve(
    listener: TcpListener,
    sink: Arc<dyn RecordSink>,
    shutdown_token: CancellationToken,
) -> Result<(), AppError> {
    let local_addr = listener.local_addr()?;

    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<AccessLogServiceServer<IngestionService>>()
        .await;

    let ingestion = IngestionService::new(sink.clone()).into_server();

    info!("gRPC server listening on {}", local_addr);
    info!("  - envoy.service.accesslog.v3.AccessLogService/StreamAccessLogs");
    info!("  - grpc.health.v1.Health/Check");

    let shutdown = async move {
        shutdown_token.cancelled().await;
        health_reporter
            .set_not_serving::<AccessLogServiceServer<IngestionService>>()
            .await;
        health_reporter
            .set_service_status("", ServingStatus::NotServing)
            .await;
        info!("Stopped accepting streams, waiting for open streams to finish");
    };

    Server::builder()
        .add_service(health_service)
        .add_service(ingestion)
        .serve_with_incoming_shutdown(TcpIncoming::from(listener), shutdown)
        .await?;

    if let Err(e) = sink.close().await {
        error!("Failed to close output file: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C) for graceful shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
