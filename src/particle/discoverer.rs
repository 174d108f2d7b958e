use crate::domain::appliance::Appliance;
use crate::particle::client::{ParticleClient, ParticleClientError};
use crate::particle::device_get::{Descriptor, DeviceGet, VariableGet};
use crate::particle::map_appliances::map_appliances;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Lists the appliances of every connected device on the account.
///
/// Descriptors are fetched concurrently and the result is assembled once all of them settled, in completion
/// order. A device whose descriptor cannot be fetched or parsed contributes nothing, only a failure to list the
/// devices fails the discovery.
#[instrument(skip_all)]
pub async fn discover(client: &ParticleClient, access_token: &str) -> Result<Vec<Appliance>, DiscoverError> {
    info!("Retrieving Particle devices...");
    let body = client.get("/v1/devices", access_token).await?;
    let devices = serde_json::from_str::<Vec<DeviceGet>>(&body).map_err(DiscoverError::MalformedDeviceList)?;

    let total = devices.len();
    let connected = devices.into_iter().filter(|device| device.connected).collect::<Vec<_>>();
    info!("Retrieving Particle devices... OK, {} found, {} connected", total, connected.len());

    let appliances = FuturesUnordered::from_iter(connected.iter().map(|device| describe(client, &device.id, access_token)))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    info!("Discovered {} appliance(s)", appliances.len());
    Ok(appliances)
}

#[instrument(skip(client, access_token))]
async fn describe(client: &ParticleClient, device_id: &str, access_token: &str) -> Vec<Appliance> {
    match fetch_descriptor(client, device_id, access_token).await {
        Ok(Some(descriptor)) => {
            let appliances = map_appliances(device_id, descriptor);
            debug!(device_id, "Describing device... OK, {} appliance(s)", appliances.len());
            appliances
        }
        Ok(None) => {
            debug!(device_id, "Describing device... no descriptor reported");
            Vec::new()
        }
        Err(e) => {
            warn!(device_id, "⚠️ Unable to describe device, skipping it: {}", e);
            Vec::new()
        }
    }
}

async fn fetch_descriptor(client: &ParticleClient, device_id: &str, access_token: &str) -> Result<Option<Descriptor>, DiscoverError> {
    let variable = client.config().particle().descriptor_variable();
    let body = client.get(&format!("/v1/devices/{}/{}", device_id, variable), access_token).await?;

    let variable_get = serde_json::from_str::<VariableGet>(&body).map_err(DiscoverError::MalformedDescriptor)?;
    variable_get
        .descriptor()
        .transpose()
        .map_err(DiscoverError::MalformedDescriptor)
}

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error(transparent)]
    Client(#[from] ParticleClientError),
    #[error("malformed device list: {0}")]
    MalformedDeviceList(serde_json::Error),
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(serde_json::Error),
}
