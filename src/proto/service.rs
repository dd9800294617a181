//! Messages of `envoy.service.accesslog.v3.AccessLogService`.

use super::accesslog::{HttpAccessLogEntry, TcpAccessLogEntry};
use super::core_types::Node;

/// Empty acknowledgement sent once the peer closes its side of the stream.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct StreamAccessLogsResponse {}

/// One message on the access log stream: an optional identifier and a batch
/// of either HTTP or TCP entries.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StreamAccessLogsMessage {
    #[prost(message, optional, tag = "1")]
    pub identifier: Option<stream_access_logs_message::Identifier>,
    #[prost(oneof = "stream_access_logs_message::LogEntries", tags = "2, 3")]
    pub log_entries: Option<stream_access_logs_message::LogEntries>,
}

pub mod stream_access_logs_message {
    use super::{HttpAccessLogEntry, Node, TcpAccessLogEntry};

    /// Sent by Envoy on the first message of every stream.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Identifier {
        #[prost(message, optional, tag = "1")]
        pub node: Option<Node>,
        #[prost(string, tag = "2")]
        pub log_name: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct HttpAccessLogEntries {
        #[prost(message, repeated, tag = "1")]
        pub log_entry: Vec<HttpAccessLogEntry>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TcpAccessLogEntries {
        #[prost(message, repeated, tag = "1")]
        pub log_entry: Vec<TcpAccessLogEntry>,
    }

    /// The entry-kind of a message. A tag this build does not know decodes
    /// as `None` on the parent field.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum LogEntries {
        #[prost(message, tag = "2")]
        HttpLogs(HttpAccessLogEntries),
        #[prost(message, tag = "3")]
        TcpLogs(TcpAccessLogEntries),
    }
}
