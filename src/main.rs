use als_logsink::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    als_logsink::app::run().await
}
