//! Subset of `envoy.data.accesslog.v3` carried by the access log stream.
//!
//! Field numbers match Envoy's definitions; fields not declared here are
//! skipped by the decoder.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::core_types::{Address, Metadata, RequestMethod};
use super::serde_helpers;

/// Access log entry for a raw TCP connection.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct TcpAccessLogEntry {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_properties: Option<AccessLogCommon>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_properties: Option<ConnectionProperties>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ConnectionProperties {
    #[prost(uint64, tag = "1")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub received_bytes: u64,
    #[prost(uint64, tag = "2")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub sent_bytes: u64,
}

/// Access log entry for a completed HTTP request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HttpAccessLogEntry {
    #[prost(message, optional, tag = "1")]
    pub common_properties: Option<AccessLogCommon>,
    #[prost(enumeration = "http_access_log_entry::HttpVersion", tag = "2")]
    pub protocol_version: i32,
    #[prost(message, optional, tag = "3")]
    pub request: Option<HttpRequestProperties>,
    #[prost(message, optional, tag = "4")]
    pub response: Option<HttpResponseProperties>,
}

pub mod http_access_log_entry {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum HttpVersion {
        ProtocolUnspecified = 0,
        Http10 = 1,
        Http11 = 2,
        Http2 = 3,
        Http3 = 4,
    }
}

/// Properties shared by HTTP and TCP entries.
///
/// Serialized for pass-through with the protobuf JSON rule: fields holding
/// their default value are left out.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct AccessLogCommon {
    #[prost(double, tag = "1")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub sample_rate: f64,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_remote_address: Option<Address>,
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_local_address: Option<Address>,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_properties: Option<TlsProperties>,
    #[prost(message, optional, tag = "5")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::timestamp"
    )]
    pub start_time: Option<prost_types::Timestamp>,
    #[prost(message, optional, tag = "6")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::duration"
    )]
    pub time_to_last_rx_byte: Option<prost_types::Duration>,
    #[prost(message, optional, tag = "7")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::duration"
    )]
    pub time_to_first_upstream_tx_byte: Option<prost_types::Duration>,
    #[prost(message, optional, tag = "8")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::duration"
    )]
    pub time_to_last_upstream_tx_byte: Option<prost_types::Duration>,
    #[prost(message, optional, tag = "9")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::duration"
    )]
    pub time_to_first_upstream_rx_byte: Option<prost_types::Duration>,
    #[prost(message, optional, tag = "10")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::duration"
    )]
    pub time_to_last_upstream_rx_byte: Option<prost_types::Duration>,
    #[prost(message, optional, tag = "11")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::duration"
    )]
    pub time_to_first_downstream_tx_byte: Option<prost_types::Duration>,
    #[prost(message, optional, tag = "12")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::duration"
    )]
    pub time_to_last_downstream_tx_byte: Option<prost_types::Duration>,
    #[prost(message, optional, tag = "13")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_remote_address: Option<Address>,
    #[prost(message, optional, tag = "14")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_local_address: Option<Address>,
    #[prost(string, tag = "15")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub upstream_cluster: String,
    #[prost(message, optional, tag = "16")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_flags: Option<ResponseFlags>,
    #[prost(message, optional, tag = "17")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[prost(string, tag = "18")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub upstream_transport_failure_reason: String,
    #[prost(string, tag = "19")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub route_name: String,
    #[prost(message, optional, tag = "20")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_direct_remote_address: Option<Address>,
    #[prost(btree_map = "string, message", tag = "21")]
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        serialize_with = "serde_helpers::any_map"
    )]
    pub filter_state_objects: BTreeMap<String, prost_types::Any>,
    #[prost(btree_map = "string, string", tag = "22")]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_tags: BTreeMap<String, String>,
    #[prost(message, optional, tag = "23")]
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::duration"
    )]
    pub duration: Option<prost_types::Duration>,
    #[prost(uint32, tag = "24")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_request_attempt_count: u32,
    #[prost(string, tag = "25")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub connection_termination_details: String,
    #[prost(string, tag = "26")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stream_id: String,
    #[prost(bool, tag = "27")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub intermediate_log_entry: bool,
    #[prost(string, tag = "28")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub downstream_transport_failure_reason: String,
    #[prost(uint64, tag = "29")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub downstream_wire_bytes_sent: u64,
    #[prost(uint64, tag = "30")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub downstream_wire_bytes_received: u64,
    #[prost(uint64, tag = "31")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_wire_bytes_sent: u64,
    #[prost(uint64, tag = "32")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_wire_bytes_received: u64,
    #[prost(enumeration = "AccessLogType", tag = "33")]
    #[serde(
        skip_serializing_if = "serde_helpers::is_default",
        serialize_with = "serde_helpers::access_log_type"
    )]
    pub access_log_type: i32,
}

/// The point in a connection or request at which an entry was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AccessLogType {
    NotSet = 0,
    TcpUpstreamConnected = 1,
    TcpPeriodic = 2,
    TcpConnectionEnd = 3,
    DownstreamStart = 4,
    DownstreamPeriodic = 5,
    DownstreamEnd = 6,
    UpstreamPoolReady = 7,
    UpstreamPeriodic = 8,
    UpstreamEnd = 9,
    DownstreamTunnelSuccessfullyEstablished = 10,
    UdpTunnelUpstreamConnected = 11,
    UdpPeriodic = 12,
    UdpSessionEnd = 13,
}

impl AccessLogType {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            AccessLogType::NotSet => "NotSet",
            AccessLogType::TcpUpstreamConnected => "TcpUpstreamConnected",
            AccessLogType::TcpPeriodic => "TcpPeriodic",
            AccessLogType::TcpConnectionEnd => "TcpConnectionEnd",
            AccessLogType::DownstreamStart => "DownstreamStart",
            AccessLogType::DownstreamPeriodic => "DownstreamPeriodic",
            AccessLogType::DownstreamEnd => "DownstreamEnd",
            AccessLogType::UpstreamPoolReady => "UpstreamPoolReady",
            AccessLogType::UpstreamPeriodic => "UpstreamPeriodic",
            AccessLogType::UpstreamEnd => "UpstreamEnd",
            AccessLogType::DownstreamTunnelSuccessfullyEstablished => {
                "DownstreamTunnelSuccessfullyEstablished"
            }
            AccessLogType::UdpTunnelUpstreamConnected => "UdpTunnelUpstreamConnected",
            AccessLogType::UdpPeriodic => "UdpPeriodic",
            AccessLogType::UdpSessionEnd => "UdpSessionEnd",
        }
    }
}

/// Why Envoy failed or short-circuited a request or connection.
#[derive(Clone, Copy, PartialEq, ::prost::Message, Serialize)]
pub struct ResponseFlags {
    #[prost(bool, tag = "1")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub failed_local_healthcheck: bool,
    #[prost(bool, tag = "2")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub no_healthy_upstream: bool,
    #[prost(bool, tag = "3")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_request_timeout: bool,
    #[prost(bool, tag = "4")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub local_reset: bool,
    #[prost(bool, tag = "5")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_remote_reset: bool,
    #[prost(bool, tag = "6")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_connection_failure: bool,
    #[prost(bool, tag = "7")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_connection_termination: bool,
    #[prost(bool, tag = "8")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_overflow: bool,
    #[prost(bool, tag = "9")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub no_route_found: bool,
    #[prost(bool, tag = "10")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub delay_injected: bool,
    #[prost(bool, tag = "11")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub fault_injected: bool,
    #[prost(bool, tag = "12")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub rate_limited: bool,
    #[prost(message, optional, tag = "13")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unauthorized_details: Option<response_flags::Unauthorized>,
    #[prost(bool, tag = "14")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub rate_limit_service_error: bool,
    #[prost(bool, tag = "15")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub downstream_connection_termination: bool,
    #[prost(bool, tag = "16")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_retry_limit_exceeded: bool,
    #[prost(bool, tag = "17")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub stream_idle_timeout: bool,
    #[prost(bool, tag = "18")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub invalid_envoy_request_headers: bool,
    #[prost(bool, tag = "19")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub downstream_protocol_error: bool,
    #[prost(bool, tag = "20")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_max_stream_duration_reached: bool,
    #[prost(bool, tag = "21")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub response_from_cache_filter: bool,
    #[prost(bool, tag = "22")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub no_filter_config_found: bool,
    #[prost(bool, tag = "23")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub duration_timeout: bool,
    #[prost(bool, tag = "24")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub upstream_protocol_error: bool,
    #[prost(bool, tag = "25")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub no_cluster_found: bool,
    #[prost(bool, tag = "26")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub overload_manager: bool,
    #[prost(bool, tag = "27")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub dns_resolution_failure: bool,
    #[prost(bool, tag = "28")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub downstream_remote_reset: bool,
}

pub mod response_flags {
    use serde::Serialize;

    use super::serde_helpers;

    #[derive(Clone, Copy, PartialEq, ::prost::Message, Serialize)]
    pub struct Unauthorized {
        #[prost(enumeration = "unauthorized::Reason", tag = "1")]
        #[serde(
            skip_serializing_if = "serde_helpers::is_default",
            serialize_with = "serde_helpers::unauthorized_reason"
        )]
        pub reason: i32,
    }

    pub mod unauthorized {
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
        )]
        #[repr(i32)]
        pub enum Reason {
            ReasonUnspecified = 0,
            ExternalService = 1,
        }

        impl Reason {
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Reason::ReasonUnspecified => "REASON_UNSPECIFIED",
                    Reason::ExternalService => "EXTERNAL_SERVICE",
                }
            }
        }
    }
}

/// TLS details of the downstream connection.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct TlsProperties {
    #[prost(enumeration = "tls_properties::TlsVersion", tag = "1")]
    #[serde(
        skip_serializing_if = "serde_helpers::is_default",
        serialize_with = "serde_helpers::tls_version"
    )]
    pub tls_version: i32,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_cipher_suite: Option<u32>,
    #[prost(string, tag = "3")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tls_sni_hostname: String,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_certificate_properties: Option<tls_properties::CertificateProperties>,
    #[prost(message, optional, tag = "5")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_certificate_properties: Option<tls_properties::CertificateProperties>,
    #[prost(string, tag = "6")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tls_session_id: String,
    #[prost(string, tag = "7")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ja3_fingerprint: String,
}

pub mod tls_properties {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum TlsVersion {
        VersionUnspecified = 0,
        TlSv1 = 1,
        TlSv11 = 2,
        TlSv12 = 3,
        TlSv13 = 4,
    }

    impl TlsVersion {
        pub fn as_str_name(&self) -> &'static str {
            match self {
                TlsVersion::VersionUnspecified => "VERSION_UNSPECIFIED",
                TlsVersion::TlSv1 => "TLSv1",
                TlsVersion::TlSv11 => "TLSv1_1",
                TlsVersion::TlSv12 => "TLSv1_2",
                TlsVersion::TlSv13 => "TLSv1_3",
            }
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct CertificateProperties {
        #[prost(message, repeated, tag = "1")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub subject_alt_name: Vec<certificate_properties::SubjectAltName>,
        #[prost(string, tag = "2")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub subject: String,
        #[prost(string, tag = "3")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub issuer: String,
    }

    pub mod certificate_properties {
        use serde::Serialize;

        #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
        pub struct SubjectAltName {
            #[prost(oneof = "subject_alt_name::San", tags = "1, 2")]
            #[serde(flatten)]
            pub san: Option<subject_alt_name::San>,
        }

        pub mod subject_alt_name {
            use serde::Serialize;

            #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
            #[serde(rename_all = "snake_case")]
            pub enum San {
                #[prost(string, tag = "1")]
                Uri(String),
                #[prost(string, tag = "2")]
                Dns(String),
            }
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HttpRequestProperties {
    #[prost(enumeration = "RequestMethod", tag = "1")]
    pub request_method: i32,
    #[prost(string, tag = "2")]
    pub scheme: String,
    #[prost(string, tag = "3")]
    pub authority: String,
    #[prost(message, optional, tag = "4")]
    pub port: Option<u32>,
    #[prost(string, tag = "5")]
    pub path: String,
    #[prost(string, tag = "6")]
    pub user_agent: String,
    #[prost(string, tag = "7")]
    pub referer: String,
    #[prost(string, tag = "8")]
    pub forwarded_for: String,
    #[prost(string, tag = "9")]
    pub request_id: String,
    #[prost(string, tag = "10")]
    pub original_path: String,
    #[prost(uint64, tag = "11")]
    pub request_headers_bytes: u64,
    #[prost(uint64, tag = "12")]
    pub request_body_bytes: u64,
    #[prost(map = "string, string", tag = "13")]
    pub request_headers: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HttpResponseProperties {
    #[prost(message, optional, tag = "1")]
    pub response_code: Option<u32>,
    #[prost(uint64, tag = "2")]
    pub response_headers_bytes: u64,
    #[prost(uint64, tag = "3")]
    pub response_body_bytes: u64,
    #[prost(map = "string, string", tag = "4")]
    pub response_headers: HashMap<String, String>,
    #[prost(map = "string, string", tag = "5")]
    pub response_trailers: HashMap<String, String>,
    #[prost(string, tag = "6")]
    pub response_code_details: String,
}
