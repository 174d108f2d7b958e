use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

pub const APPLIANCE_ID_SEPARATOR: char = '-';

/// One controllable end-point as exposed to the voice platform.
#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appliance {
    pub appliance_id: String,
    pub manufacturer_name: String,
    pub model_name: String,
    pub version: String,
    pub friendly_name: String,
    pub friendly_description: String,
    pub is_reachable: bool,
    pub additional_appliance_details: HashMap<String, String>,
}

/// Composite key `<deviceID>-<subDeviceName>` routing a control command back to a physical device
/// and one of its channels.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ApplianceId {
    device_id: String,
    sub_device_id: String,
}

impl ApplianceId {
    pub fn new(device_id: impl Into<String>, sub_device_id: impl Into<String>) -> Result<Self, ApplianceIdError> {
        let device_id = device_id.into();
        let sub_device_id = sub_device_id.into();

        for part in [&device_id, &sub_device_id] {
            if part.is_empty() || part.contains(APPLIANCE_ID_SEPARATOR) {
                return Err(ApplianceIdError::InvalidPart(part.clone()));
            }
        }

        Ok(ApplianceId { device_id, sub_device_id })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn sub_device_id(&self) -> &str {
        &self.sub_device_id
    }
}

impl Display for ApplianceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.device_id, APPLIANCE_ID_SEPARATOR, self.sub_device_id)
    }
}

impl FromStr for ApplianceId {
    type Err = ApplianceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(APPLIANCE_ID_SEPARATOR).collect::<Vec<_>>();
        match parts.as_slice() {
            [device_id, sub_device_id] => ApplianceId::new(*device_id, *sub_device_id),
            _ => Err(ApplianceIdError::WrongPartCount {
                appliance_id: s.to_string(),
                parts: parts.len(),
            }),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ApplianceIdError {
    #[error("appliance id '{appliance_id}' has {parts} part(s), expected 2")]
    WrongPartCount { appliance_id: String, parts: usize },
    #[error("'{0}' cannot be used as part of an appliance id")]
    InvalidPart(String),
}
