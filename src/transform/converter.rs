//! Converter from Envoy access log entries to output lines

use chrono::DateTime;

use crate::domain::{AccessRecord, Protocol};
use crate::proto::{AccessLogCommon, Address, HttpAccessLogEntry, RequestMethod, TcpAccessLogEntry};

/// Response header set by the WAF filter when a request tripped a rule.
pub const WAF_VIOLATION_HEADER: &str = "x-waf-violation";

/// Convert one HTTP access log entry into the flat output record.
///
/// Never fails: every absent sub-message degrades to an empty or zero value.
pub fn convert_http_entry(entry: &HttpAccessLogEntry) -> AccessRecord {
    let common = entry.common_properties.as_ref();
    let request = entry.request.as_ref();
    let response = entry.response.as_ref();

    AccessRecord {
        start_time: common
            .and_then(|c| c.start_time.as_ref())
            .map(format_start_time)
            .unwrap_or_default(),
        method: request
            .map(|r| method_name(r.request_method))
            .unwrap_or_default(),
        authority: request.map(|r| r.authority.clone()).unwrap_or_default(),
        path: request.map(|r| r.path.clone()).unwrap_or_default(),
        protocol: Protocol::from(entry.protocol_version).as_str().to_string(),
        status: response.and_then(|r| r.response_code).unwrap_or_default(),
        bytes_sent: response.map(|r| r.response_body_bytes).unwrap_or_default(),
        bytes_received: request.map(|r| r.request_body_bytes).unwrap_or_default(),
        duration: common.map(duration_millis).unwrap_or_default(),
        upstream_host: common.and_then(|c| upstream_host(c.upstream_remote_address.as_ref())),
        upstream_service: common.map(|c| c.upstream_cluster.clone()).unwrap_or_default(),
        source_ip: common
            .and_then(|c| c.downstream_remote_address.as_ref())
            .and_then(Address::socket_address)
            .map(|sa| sa.address.clone())
            .unwrap_or_default(),
        user_agent: request.map(|r| r.user_agent.clone()).unwrap_or_default(),
        forwarded_for: request
            .map(|r| r.forwarded_for.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        request_id: common.map(|c| c.stream_id.clone()).unwrap_or_default(),
        waf_violation: response
            .and_then(|r| r.response_headers.get(WAF_VIOLATION_HEADER))
            .filter(|v| !v.is_empty())
            .cloned(),
    }
}

/// Serialize an output record as one JSON line (without the newline).
pub fn encode_access_record(record: &AccessRecord) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(record)
}

/// Serialize a TCP entry as-is, using the protocol's own field names.
pub fn encode_tcp_entry(entry: &TcpAccessLogEntry) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(entry)
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ`, or empty when the timestamp is out of range.
fn format_start_time(ts: &prost_types::Timestamp) -> String {
    let Ok(nanos) = u32::try_from(ts.nanos) else {
        return String::new();
    };
    DateTime::from_timestamp(ts.seconds, nanos)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
        .unwrap_or_default()
}

/// Time to last downstream byte in whole milliseconds, falling back to the
/// total stream duration when Envoy did not report it.
fn duration_millis(common: &AccessLogCommon) -> i64 {
    common
        .time_to_last_downstream_tx_byte
        .as_ref()
        .or(common.duration.as_ref())
        .map(|d| {
            d.seconds
                .saturating_mul(1000)
                .saturating_add(i64::from(d.nanos / 1_000_000))
        })
        .unwrap_or_default()
}

fn method_name(value: i32) -> String {
    match RequestMethod::try_from(value) {
        Ok(method) => method.as_str_name().to_string(),
        Err(_) => value.to_string(),
    }
}

/// `address:port` of the upstream socket address, if there is one.
fn upstream_host(address: Option<&Address>) -> Option<String> {
    let sa = address?.socket_address()?;
    Some(format!("{}:{}", sa.address, sa.port_value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::accesslog::tls_properties::TlsVersion;
    use crate::proto::core_types::{address, socket_address};
    use crate::proto::{
        AccessLogType, ConnectionProperties, HttpRequestProperties, HttpResponseProperties,
        Metadata, ResponseFlags, SocketAddress, TlsProperties,
    };
    use prost::Message;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn socket(host: &str, port: u32) -> Address {
        Address {
            address: Some(address::Address::SocketAddress(SocketAddress {
                address: host.to_string(),
                port_specifier: Some(socket_address::PortSpecifier::PortValue(port)),
                ..Default::default()
            })),
        }
    }

    fn full_entry() -> HttpAccessLogEntry {
        let mut headers = HashMap::new();
        headers.insert(WAF_VIOLATION_HEADER.to_string(), "sqli-942100".to_string());

        HttpAccessLogEntry {
            common_properties: Some(AccessLogCommon {
                start_time: Some(prost_types::Timestamp {
                    seconds: 1_700_000_000,
                    nanos: 123_456_789,
                }),
                time_to_last_downstream_tx_byte: Some(prost_types::Duration {
                    seconds: 1,
                    nanos: 250_900_000,
                }),
                downstream_remote_address: Some(socket("192.168.1.10", 51234)),
                upstream_remote_address: Some(socket("10.0.0.5", 8080)),
                upstream_cluster: "backend".to_string(),
                stream_id: "6f1c2a4e-req".to_string(),
                ..Default::default()
            }),
            protocol_version: 2,
            request: Some(HttpRequestProperties {
                request_method: RequestMethod::Post as i32,
                authority: "api.example.com".to_string(),
                path: "/v1/items".to_string(),
                user_agent: "curl/8.0".to_string(),
                forwarded_for: "203.0.113.7".to_string(),
                request_body_bytes: 512,
                ..Default::default()
            }),
            response: Some(HttpResponseProperties {
                response_code: Some(201),
                response_body_bytes: 1024,
                response_headers: headers,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_convert_fully_populated_entry() {
        let record = convert_http_entry(&full_entry());

        assert_eq!(record.start_time, "2023-11-14T22:13:20.123Z");
        assert_eq!(record.method, "POST");
        assert_eq!(record.authority, "api.example.com");
        assert_eq!(record.path, "/v1/items");
        assert_eq!(record.protocol, "HTTP/1.1");
        assert_eq!(record.status, 201);
        assert_eq!(record.bytes_sent, 1024);
        assert_eq!(record.bytes_received, 512);
        assert_eq!(record.duration, 1250);
        assert_eq!(record.upstream_host.as_deref(), Some("10.0.0.5:8080"));
        assert_eq!(record.upstream_service, "backend");
        assert_eq!(record.source_ip, "192.168.1.10");
        assert_eq!(record.user_agent, "curl/8.0");
        assert_eq!(record.forwarded_for.as_deref(), Some("203.0.113.7"));
        assert_eq!(record.request_id, "6f1c2a4e-req");
        assert_eq!(record.waf_violation.as_deref(), Some("sqli-942100"));
    }

    #[test]
    fn test_fully_populated_record_has_exact_schema() {
        let line = encode_access_record(&convert_http_entry(&full_entry())).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&line).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(
            keys,
            vec![
                "authority",
                "bytes_received",
                "bytes_sent",
                "duration",
                "forwarded_for",
                "method",
                "path",
                "protocol",
                "request_id",
                "source_ip",
                "start_time",
                "status",
                "upstream_host",
                "upstream_service",
                "user_agent",
                "waf_violation",
            ]
        );
    }

    #[test]
    fn test_empty_entry_degrades_to_defaults() {
        let record = convert_http_entry(&HttpAccessLogEntry::default());

        assert_eq!(record.start_time, "");
        assert_eq!(record.method, "");
        assert_eq!(record.protocol, "UNKNOWN");
        assert_eq!(record.status, 0);
        assert_eq!(record.duration, 0);
        assert!(record.upstream_host.is_none());
        assert!(record.forwarded_for.is_none());
        assert!(record.waf_violation.is_none());
    }

    #[test]
    fn test_missing_upstream_address_omits_upstream_host() {
        let mut entry = full_entry();
        if let Some(common) = entry.common_properties.as_mut() {
            common.upstream_remote_address = None;
        }
        let line = encode_access_record(&convert_http_entry(&entry)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&line).unwrap();
        assert!(value.get("upstream_host").is_none());
    }

    #[test]
    fn test_pipe_upstream_address_omits_upstream_host() {
        let mut entry = full_entry();
        if let Some(common) = entry.common_properties.as_mut() {
            common.upstream_remote_address = Some(Address {
                address: Some(address::Address::Pipe(Default::default())),
            });
        }
        assert!(convert_http_entry(&entry).upstream_host.is_none());
    }

    #[test]
    fn test_missing_response_headers_omits_waf_violation() {
        let mut entry = full_entry();
        entry.response = Some(HttpResponseProperties {
            response_code: Some(200),
            ..Default::default()
        });
        let record = convert_http_entry(&entry);
        assert!(record.waf_violation.is_none());
        assert_eq!(record.status, 200);

        entry.response = None;
        let record = convert_http_entry(&entry);
        assert!(record.waf_violation.is_none());
        assert_eq!(record.status, 0);
    }

    #[test]
    fn test_duration_falls_back_to_total_duration() {
        let mut entry = full_entry();
        if let Some(common) = entry.common_properties.as_mut() {
            common.time_to_last_downstream_tx_byte = None;
            common.duration = Some(prost_types::Duration {
                seconds: 0,
                nanos: 42_999_999,
            });
        }
        assert_eq!(convert_http_entry(&entry).duration, 42);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(method_name(1), "GET");
        assert_eq!(method_name(0), "METHOD_UNSPECIFIED");
        assert_eq!(method_name(77), "77");
    }

    #[test]
    fn test_start_time_out_of_range_is_empty() {
        let ts = prost_types::Timestamp {
            seconds: i64::MAX,
            nanos: 0,
        };
        assert_eq!(format_start_time(&ts), "");
    }

    #[test]
    fn test_encode_tcp_entry_passes_fields_through() {
        let entry = TcpAccessLogEntry {
            common_properties: Some(AccessLogCommon {
                upstream_remote_address: Some(socket("10.0.0.9", 5432)),
                upstream_cluster: "postgres".to_string(),
                stream_id: "tcp-1".to_string(),
                ..Default::default()
            }),
            connection_properties: Some(ConnectionProperties {
                received_bytes: 100,
                sent_bytes: 200,
            }),
        };

        let line = encode_tcp_entry(&entry).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&line).unwrap();

        assert_eq!(value["connection_properties"]["received_bytes"], 100);
        assert_eq!(value["connection_properties"]["sent_bytes"], 200);
        assert_eq!(value["common_properties"]["upstream_cluster"], "postgres");
        assert_eq!(value["common_properties"]["stream_id"], "tcp-1");
        let upstream = &value["common_properties"]["upstream_remote_address"]["socket_address"];
        assert_eq!(upstream["address"], "10.0.0.9");
        assert_eq!(upstream["port_value"], 5432);
        // TCP is the enum default and is left out like any other default.
        assert!(upstream.get("protocol").is_none());
        assert!(value["common_properties"].get("start_time").is_none());
    }

    #[test]
    fn test_tcp_entry_keeps_fields_decoded_from_the_wire() {
        let mut metadata = Metadata::default();
        metadata.filter_metadata.insert(
            "envoy.filters.network.rbac".to_string(),
            prost_types::Struct {
                fields: [(
                    "shadow_engine_result".to_string(),
                    prost_types::Value {
                        kind: Some(prost_types::value::Kind::StringValue("denied".to_string())),
                    },
                )]
                .into(),
            },
        );
        let sent = TcpAccessLogEntry {
            common_properties: Some(AccessLogCommon {
                upstream_cluster: "postgres".to_string(),
                tls_properties: Some(TlsProperties {
                    tls_version: TlsVersion::TlSv13 as i32,
                    tls_sni_hostname: "db.internal".to_string(),
                    ..Default::default()
                }),
                response_flags: Some(ResponseFlags {
                    upstream_connection_failure: true,
                    ..Default::default()
                }),
                metadata: Some(metadata),
                upstream_wire_bytes_sent: 4096,
                access_log_type: AccessLogType::TcpConnectionEnd as i32,
                ..Default::default()
            }),
            connection_properties: None,
        };
        let decoded = TcpAccessLogEntry::decode(sent.encode_to_vec().as_slice()).unwrap();

        let line = encode_tcp_entry(&decoded).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&line).unwrap();
        let common = &value["common_properties"];

        assert_eq!(common["upstream_cluster"], "postgres");
        assert_eq!(common["tls_properties"]["tls_version"], "TLSv1_3");
        assert_eq!(common["tls_properties"]["tls_sni_hostname"], "db.internal");
        assert_eq!(
            common["response_flags"],
            serde_json::json!({"upstream_connection_failure": true})
        );
        assert_eq!(
            common["metadata"]["filter_metadata"]["envoy.filters.network.rbac"]
                ["shadow_engine_result"],
            "denied"
        );
        assert_eq!(common["upstream_wire_bytes_sent"], 4096);
        assert_eq!(common["access_log_type"], "TcpConnectionEnd");
        for absent in [
            "sample_rate",
            "stream_id",
            "upstream_request_attempt_count",
            "intermediate_log_entry",
            "downstream_wire_bytes_sent",
            "filter_state_objects",
        ] {
            assert!(common.get(absent).is_none(), "{absent} should be omitted");
        }
        assert!(value.get("connection_properties").is_none());
    }

    fn arb_address() -> impl Strategy<Value = Option<Address>> {
        prop_oneof![
            Just(None),
            Just(Some(Address::default())),
            ("[a-z0-9.:]{0,20}", any::<u32>()).prop_map(|(host, port)| Some(socket(&host, port))),
        ]
    }

    fn arb_entry() -> impl Strategy<Value = HttpAccessLogEntry> {
        let common = prop::option::of((
            arb_address(),
            arb_address(),
            prop::option::of((any::<i64>(), any::<i32>())),
            prop::option::of((any::<i64>(), any::<i32>())),
            ".{0,16}",
        ))
        .prop_map(|c| {
            c.map(|(downstream, upstream, start, elapsed, cluster)| AccessLogCommon {
                downstream_remote_address: downstream,
                upstream_remote_address: upstream,
                start_time: start.map(|(seconds, nanos)| prost_types::Timestamp { seconds, nanos }),
                time_to_last_downstream_tx_byte: elapsed
                    .map(|(seconds, nanos)| prost_types::Duration { seconds, nanos }),
                upstream_cluster: cluster,
                ..Default::default()
            })
        });
        let request = prop::option::of((any::<i32>(), ".{0,16}", ".{0,16}")).prop_map(|r| {
            r.map(|(method, path, forwarded_for)| HttpRequestProperties {
                request_method: method,
                path,
                forwarded_for,
                ..Default::default()
            })
        });
        let response = prop::option::of((prop::option::of(any::<u32>()), any::<bool>())).prop_map(
            |r| {
                r.map(|(code, waf)| {
                    let mut response_headers = HashMap::new();
                    if waf {
                        response_headers
                            .insert(WAF_VIOLATION_HEADER.to_string(), "rule".to_string());
                    }
                    HttpResponseProperties {
                        response_code: code,
                        response_headers,
                        ..Default::default()
                    }
                })
            },
        );

        (common, any::<i32>(), request, response).prop_map(
            |(common_properties, protocol_version, request, response)| HttpAccessLogEntry {
                common_properties,
                protocol_version,
                request,
                response,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_conversion_is_idempotent(entry in arb_entry()) {
            let first = encode_access_record(&convert_http_entry(&entry)).unwrap();
            let second = encode_access_record(&convert_http_entry(&entry)).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_upstream_host_only_with_socket_address(entry in arb_entry()) {
            let record = convert_http_entry(&entry);
            let has_socket = entry
                .common_properties
                .as_ref()
                .and_then(|c| c.upstream_remote_address.as_ref())
                .and_then(Address::socket_address)
                .is_some();
            prop_assert_eq!(record.upstream_host.is_some(), has_socket);
        }
    }
}
