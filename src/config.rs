use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Default gRPC listening port
pub const DEFAULT_PORT: u16 = 9000;

/// Default output file for normalized access log lines
pub const DEFAULT_LOG_FILE: &str = "/var/log/envoy/access.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// gRPC listening port (all interfaces)
    pub port: u16,
    /// NDJSON output file, opened in append mode
    pub log_file: PathBuf,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_port(self.port)?;
        validate_log_file(&self.log_file)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), AppError> {
    if port == 0 {
        return Err(AppError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

/// Validates that the output path is not empty or whitespace-only.
fn validate_log_file(path: &std::path::Path) -> Result<(), AppError> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(AppError::Config("Log file path cannot be empty".into()));
    }
    Ok(())
}

pub fn get_configuration() -> Result<Settings, Box<dyn std::error::Error>> {
    settings_from(|name| env::var(name).ok())
}

/// Build settings from an arbitrary variable lookup.
pub fn settings_from<F>(lookup: F) -> Result<Settings, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let port = match lookup("PORT") {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT value {raw:?}: {e}"))?,
        None => DEFAULT_PORT,
    };

    let log_file = lookup("LOGFILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let settings = Settings { port, log_file };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}
