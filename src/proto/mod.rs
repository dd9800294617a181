//! Envoy access log service protocol.
//!
//! Messages are declared by hand with `prost` and are wire-compatible with
//! Envoy's `envoy.service.accesslog.v3` and `envoy.data.accesslog.v3`
//! packages. The service server and client are generated by `build.rs`.

pub mod accesslog;
pub mod core_types;
mod serde_helpers;
pub mod service;

pub use accesslog::{
    AccessLogCommon, AccessLogType, ConnectionProperties, HttpAccessLogEntry,
    HttpRequestProperties, HttpResponseProperties, ResponseFlags, TcpAccessLogEntry,
    TlsProperties, http_access_log_entry::HttpVersion,
};
pub use core_types::{Address, Metadata, Node, RequestMethod, SocketAddress};
pub use service::{StreamAccessLogsMessage, StreamAccessLogsResponse, stream_access_logs_message};

mod generated {
    include!(concat!(
        env!("OUT_DIR"),
        "/envoy.service.accesslog.v3.AccessLogService.rs"
    ));
}

pub use generated::{access_log_service_client, access_log_service_server};
