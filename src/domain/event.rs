use serde::Deserialize;
use std::fmt::{Debug, Formatter};

pub const TURN_ON: &str = "TURN_ON";

/// Inbound request from the voice platform.
#[derive(Debug, Deserialize)]
pub struct Event {
    pub header: EventHeader,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Deserialize)]
pub struct EventHeader {
    pub namespace: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub access_token: Option<String>,
    pub appliance: Option<ApplianceReference>,
    pub switch_control_action: Option<String>,
}

impl EventPayload {
    /// The access token without surrounding whitespace, if there is one left.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().map(str::trim).filter(|token| !token.is_empty())
    }

    pub fn turn_on(&self) -> bool {
        self.switch_control_action.as_deref() == Some(TURN_ON)
    }
}

// Keeps tokens out of the logs
impl Debug for EventPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPayload")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("appliance", &self.appliance)
            .field("switch_control_action", &self.switch_control_action)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceReference {
    pub appliance_id: String,
}
