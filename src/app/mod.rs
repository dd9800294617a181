pub mod server;
pub mod tracing;

use crate::config;
use crate::error::AppError;
use crate::port::RecordSink;
use crate::sink::JsonFileSink;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Application entry point. Initializes tracing and configuration, opens the
/// output file, and serves until SIGINT or SIGTERM.
pub async fn run() -> Result<(), AppError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Healthcheck failed: {e:#}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings = config::get_configuration().map_err(|e| AppError::Config(e.to_string()))?;
    ::tracing::info!(
        port = settings.port,
        log_file = %settings.log_file.display(),
        "Loaded settings"
    );

    let sink: Arc<dyn RecordSink> = Arc::new(JsonFileSink::open(&settings.log_file).await?);
    let listener = server::bind(settings.port).await?;

    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        server::shutdown_signal().await;
        signal_token.cancel();
    });

    server::serve(listener, sink, shutdown_token).await
}
