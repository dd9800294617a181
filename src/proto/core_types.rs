//! Subset of `envoy.config.core.v3` used by access log entries.

use std::collections::BTreeMap;

use serde::Serialize;

use super::serde_helpers;

/// Identity of the Envoy instance that opened the stream.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Node {
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster: String,
}

/// A network address. Only the socket form carries a host and port.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Address {
    #[prost(oneof = "address::Address", tags = "1, 2")]
    #[serde(flatten)]
    pub address: Option<address::Address>,
}

pub mod address {
    use serde::Serialize;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Address {
        #[prost(message, tag = "1")]
        SocketAddress(super::SocketAddress),
        #[prost(message, tag = "2")]
        Pipe(super::Pipe),
    }
}

impl Address {
    /// Returns the socket address, if this is one.
    pub fn socket_address(&self) -> Option<&SocketAddress> {
        match &self.address {
            Some(address::Address::SocketAddress(sa)) => Some(sa),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct SocketAddress {
    #[prost(enumeration = "socket_address::Protocol", tag = "1")]
    #[serde(
        skip_serializing_if = "serde_helpers::is_default",
        serialize_with = "serde_helpers::socket_protocol"
    )]
    pub protocol: i32,
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[prost(oneof = "socket_address::PortSpecifier", tags = "3, 4")]
    #[serde(flatten)]
    pub port_specifier: Option<socket_address::PortSpecifier>,
    #[prost(string, tag = "5")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resolver_name: String,
    #[prost(bool, tag = "6")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub ipv4_compat: bool,
}

pub mod socket_address {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Protocol {
        Tcp = 0,
        Udp = 1,
    }

    impl Protocol {
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Protocol::Tcp => "TCP",
                Protocol::Udp => "UDP",
            }
        }
    }

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PortSpecifier {
        #[prost(uint32, tag = "3")]
        PortValue(u32),
        #[prost(string, tag = "4")]
        NamedPort(String),
    }
}

impl SocketAddress {
    /// Numeric port, or 0 when the port is absent or named.
    pub fn port_value(&self) -> u32 {
        match self.port_specifier {
            Some(socket_address::PortSpecifier::PortValue(port)) => port,
            _ => 0,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Pipe {
    #[prost(string, tag = "1")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[prost(uint32, tag = "2")]
    #[serde(skip_serializing_if = "serde_helpers::is_default")]
    pub mode: u32,
}

/// Filter metadata attached by Envoy filters, keyed by filter name.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Metadata {
    #[prost(btree_map = "string, message", tag = "1")]
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        serialize_with = "serde_helpers::struct_map"
    )]
    pub filter_metadata: BTreeMap<String, prost_types::Struct>,
    #[prost(btree_map = "string, message", tag = "2")]
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        serialize_with = "serde_helpers::any_map"
    )]
    pub typed_filter_metadata: BTreeMap<String, prost_types::Any>,
}

/// HTTP request method as reported by Envoy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RequestMethod {
    MethodUnspecified = 0,
    Get = 1,
    Head = 2,
    Post = 3,
    Put = 4,
    Delete = 5,
    Connect = 6,
    Options = 7,
    Trace = 8,
    Patch = 9,
}

impl RequestMethod {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            RequestMethod::MethodUnspecified => "METHOD_UNSPECIFIED",
            RequestMethod::Get => "GET",
            RequestMethod::Head => "HEAD",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Connect => "CONNECT",
            RequestMethod::Options => "OPTIONS",
            RequestMethod::Trace => "TRACE",
            RequestMethod::Patch => "PATCH",
        }
    }
}
