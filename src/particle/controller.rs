use crate::domain::appliance::{ApplianceId, ApplianceIdError};
use crate::particle::client::{ParticleClient, ParticleClientError};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Switches one sub-device on or off through the device's control function.
#[instrument(skip(client, access_token))]
pub async fn set_power(client: &ParticleClient, appliance_id: &str, access_token: &str, turn_on: bool) -> Result<(), ControlError> {
    let appliance_id = appliance_id.parse::<ApplianceId>()?;
    let arg = power_argument(&appliance_id, turn_on);

    let on_text = if turn_on { "on" } else { "off" };
    info!(device_id = appliance_id.device_id(), "🟢 Turn {} sub-device '{}'", on_text, appliance_id.sub_device_id());

    let path = format!("/v1/devices/{}/{}", appliance_id.device_id(), client.config().particle().control_function());
    match client.post(&path, &[("access_token", access_token), ("arg", &arg)]).await {
        Ok(return_value) => {
            info!(device_id = appliance_id.device_id(), %return_value, "🟢 Turn {} sub-device '{}'... OK", on_text, appliance_id.sub_device_id());
            Ok(())
        }
        Err(e) => {
            warn!(device_id = appliance_id.device_id(), "⚠️ Unable to control the sub-device: {}", e);
            Err(ControlError::Unavailable(e))
        }
    }
}

/// Encodes the desired state as `<subDeviceId>.<1|0>`.
pub fn power_argument(appliance_id: &ApplianceId, turn_on: bool) -> String {
    format!("{}.{}", appliance_id.sub_device_id(), if turn_on { 1 } else { 0 })
}

#[derive(Error, Debug)]
pub enum ControlError {
    #[error(transparent)]
    InvalidApplianceId(#[from] ApplianceIdError),
    #[error("device cloud unavailable: {0}")]
    Unavailable(ParticleClientError),
}
