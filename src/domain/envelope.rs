use crate::bridge_error::BridgeError;
use crate::domain::appliance::Appliance;
use serde::Serialize;

pub const DISCOVERY_NAMESPACE: &str = "Discovery";
pub const CONTROL_NAMESPACE: &str = "Control";
pub const PAYLOAD_VERSION: &str = "1";

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub namespace: String,
    pub name: String,
    pub payload_version: String,
}

impl Header {
    fn new(namespace: &str, name: &str) -> Self {
        Header {
            namespace: namespace.to_string(),
            name: name.to_string(),
            payload_version: PAYLOAD_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Envelope<P> {
    pub header: Header,
    pub payload: P,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryPayload {
    pub discovered_appliances: Vec<Appliance>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ControlPayload {
    pub success: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorPayload {
    pub exception: Exception,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Exception {
    pub code: ErrorCode,
    pub description: String,
}

#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnsupportedOperation,
    UnexpectedInformationReceived,
    DependentServiceUnavailable,
}

/// A successful result for the voice platform.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Discovery(Envelope<DiscoveryPayload>),
    Control(Envelope<ControlPayload>),
}

pub fn discovery_response(appliances: Vec<Appliance>) -> Response {
    Response::Discovery(Envelope {
        header: Header::new(DISCOVERY_NAMESPACE, "DiscoverAppliancesResponse"),
        payload: DiscoveryPayload {
            discovered_appliances: appliances,
        },
    })
}

pub fn control_response() -> Response {
    Response::Control(Envelope {
        header: Header::new(CONTROL_NAMESPACE, "SwitchOnOffResponse"),
        payload: ControlPayload { success: true },
    })
}

/// Wraps a failure of any kind, named after the request that caused it.
pub fn error_response(request_name: &str, error: &BridgeError) -> Envelope<ErrorPayload> {
    Envelope {
        header: Header::new(CONTROL_NAMESPACE, request_name),
        payload: ErrorPayload {
            exception: Exception {
                code: error.code(),
                description: error.to_string(),
            },
        },
    }
}
