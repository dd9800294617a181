//! Serializers for the well-known protobuf types and enums that appear in
//! pass-through entries. Output follows the protobuf JSON mapping.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat};
use prost_types::value::Kind;
use serde::Serializer;
use serde_json::{Map, Number, Value};

use super::accesslog::AccessLogType;
use super::accesslog::response_flags::unauthorized::Reason;
use super::accesslog::tls_properties::TlsVersion;
use super::core_types::socket_address::Protocol;

/// Fields equal to their type's default are left out of the output.
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

pub fn timestamp<S>(value: &Option<prost_types::Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.as_ref().and_then(format_timestamp) {
        Some(formatted) => serializer.serialize_str(&formatted),
        None => serializer.serialize_none(),
    }
}

pub fn duration<S>(value: &Option<prost_types::Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(d) => serializer.serialize_str(&format_duration(d)),
        None => serializer.serialize_none(),
    }
}

pub fn socket_protocol<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    enum_name(*value, Protocol::try_from(*value).ok().map(|p| p.as_str_name()), serializer)
}

pub fn tls_version<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    enum_name(*value, TlsVersion::try_from(*value).ok().map(|v| v.as_str_name()), serializer)
}

pub fn access_log_type<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    enum_name(*value, AccessLogType::try_from(*value).ok().map(|t| t.as_str_name()), serializer)
}

pub fn unauthorized_reason<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    enum_name(*value, Reason::try_from(*value).ok().map(|r| r.as_str_name()), serializer)
}

/// Known enum values by name, unknown ones as their number.
fn enum_name<S>(value: i32, name: Option<&'static str>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match name {
        Some(name) => serializer.serialize_str(name),
        None => serializer.serialize_i32(value),
    }
}

pub fn struct_map<S>(
    value: &BTreeMap<String, prost_types::Struct>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(value.iter().map(|(k, v)| (k, struct_to_json(v))))
}

pub fn any_map<S>(value: &BTreeMap<String, prost_types::Any>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(value.iter().map(|(k, v)| (k, any_to_json(v))))
}

fn struct_to_json(value: &prost_types::Struct) -> Value {
    Value::Object(
        value
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect::<Map<_, _>>(),
    )
}

fn value_to_json(value: &prost_types::Value) -> Value {
    match &value.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::NumberValue(n)) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
        Some(Kind::StringValue(s)) => Value::String(s.clone()),
        Some(Kind::BoolValue(b)) => Value::Bool(*b),
        Some(Kind::StructValue(s)) => struct_to_json(s),
        Some(Kind::ListValue(list)) => Value::Array(list.values.iter().map(value_to_json).collect()),
    }
}

/// The payload type is not known here, so the packed bytes stay opaque.
fn any_to_json(value: &prost_types::Any) -> Value {
    let mut object = Map::new();
    object.insert("@type".to_string(), Value::String(value.type_url.clone()));
    object.insert("value".to_string(), Value::String(STANDARD.encode(&value.value)));
    Value::Object(object)
}

/// RFC 3339 in UTC with as many fractional digits as needed.
fn format_timestamp(ts: &prost_types::Timestamp) -> Option<String> {
    let nanos = u32::try_from(ts.nanos).ok()?;
    DateTime::from_timestamp(ts.seconds, nanos)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// `"<secs>s"` with 0, 3, 6 or 9 fractional digits.
fn format_duration(d: &prost_types::Duration) -> String {
    let negative = d.seconds < 0 || d.nanos < 0;
    let seconds = d.seconds.unsigned_abs();
    let nanos = d.nanos.unsigned_abs();
    let sign = if negative { "-" } else { "" };

    if nanos == 0 {
        format!("{sign}{seconds}s")
    } else if nanos % 1_000_000 == 0 {
        format!("{sign}{seconds}.{:03}s", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!("{sign}{seconds}.{:06}s", nanos / 1_000)
    } else {
        format!("{sign}{seconds}.{nanos:09}s")
    }
}
