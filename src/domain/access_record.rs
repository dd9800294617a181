use serde::{Deserialize, Serialize};

use crate::proto::HttpVersion;

/// Flat NDJSON record written for every HTTP access log entry.
///
/// Fields that Envoy did not report are empty strings or zero. The three
/// optional fields are left out of the JSON line entirely when absent.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessRecord {
    /// Request start, UTC with millisecond precision.
    pub start_time: String,
    pub method: String,
    pub authority: String,
    pub path: String,
    pub protocol: String,
    pub status: u32,
    /// Response body bytes sent downstream.
    pub bytes_sent: u64,
    /// Request body bytes received from downstream.
    pub bytes_received: u64,
    /// Milliseconds until the last byte was sent downstream.
    pub duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_host: Option<String>,
    pub upstream_service: String,
    pub source_ip: String,
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarded_for: Option<String>,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waf_violation: Option<String>,
}

/// Human-readable HTTP protocol version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Http10,
    Http11,
    Http2,
    Http3,
    Unknown,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http10 => "HTTP/1.0",
            Protocol::Http11 => "HTTP/1.1",
            Protocol::Http2 => "HTTP/2",
            Protocol::Http3 => "HTTP/3",
            Protocol::Unknown => "UNKNOWN",
        }
    }
}

impl From<i32> for Protocol {
    fn from(value: i32) -> Self {
        match HttpVersion::try_from(value) {
            Ok(HttpVersion::Http10) => Protocol::Http10,
            Ok(HttpVersion::Http11) => Protocol::Http11,
            Ok(HttpVersion::Http2) => Protocol::Http2,
            Ok(HttpVersion::Http3) => Protocol::Http3,
            Ok(HttpVersion::ProtocolUnspecified) | Err(_) => Protocol::Unknown,
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
