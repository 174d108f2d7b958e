use crate::domain::appliance::{Appliance, ApplianceId};
use crate::particle::device_get::Descriptor;
use std::collections::HashMap;
use tracing::warn;

const MISSING_MANUFACTURER_NAME: &str = "Missing Manufacturer Name";
const MISSING_MODEL_NAME: &str = "Missing Model Name";
const MISSING_VERSION: &str = "Missing Version String";
const MISSING_FRIENDLY_NAME: &str = "Missing Friendly Name";
const MISSING_DESCRIPTION: &str = "Missing Description";

/// Flattens a descriptor into one appliance per sub-device.
pub fn map_appliances(device_id: &str, descriptor: Descriptor) -> Vec<Appliance> {
    let manufacturer_name = or_placeholder(descriptor.manufacturer_name, MISSING_MANUFACTURER_NAME);
    let model_name = or_placeholder(descriptor.model_name, MISSING_MODEL_NAME);
    let version = or_placeholder(descriptor.version, MISSING_VERSION);

    descriptor
        .devices
        .into_iter()
        .enumerate()
        .filter_map(|(index, sub_device)| {
            let sub_device_id = sub_device.name().unwrap_or_else(|| format!("missing{}", index));
            let appliance_id = match ApplianceId::new(device_id, sub_device_id) {
                Ok(appliance_id) => appliance_id,
                Err(e) => {
                    warn!(device_id, "⚠️ Skipping sub-device #{}: {}", index, e);
                    return None;
                }
            };

            Some(Appliance {
                appliance_id: appliance_id.to_string(),
                manufacturer_name: manufacturer_name.clone(),
                model_name: model_name.clone(),
                version: version.clone(),
                friendly_name: or_placeholder(sub_device.friendly_name, MISSING_FRIENDLY_NAME),
                friendly_description: or_placeholder(sub_device.friendly_description, MISSING_DESCRIPTION),
                is_reachable: true,
                additional_appliance_details: HashMap::new(),
            })
        })
        .collect()
}

// Empty counts as missing
fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value.filter(|value| !value.is_empty()).unwrap_or_else(|| placeholder.to_string())
}
