//! Normalization of Envoy access log entries into NDJSON lines.

pub mod converter;

pub use converter::{
    WAF_VIOLATION_HEADER, convert_http_entry, encode_access_record, encode_tcp_entry,
};
