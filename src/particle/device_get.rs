use serde::Deserialize;
use serde_json::Value;

// GET /v1/devices
#[derive(Debug, Deserialize)]
pub struct DeviceGet {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub connected: bool,
}

// GET /v1/devices/<id>/<variable>
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct VariableGet {
    pub cmd: Option<String>,
    pub name: Option<String>,
    pub result: Option<Value>,
}

impl VariableGet {
    /// The descriptor is only present when the cloud reports the variable value, marked by `cmd`.
    pub fn descriptor(&self) -> Option<Result<Descriptor, serde_json::Error>> {
        self.cmd.as_deref().filter(|cmd| !cmd.is_empty())?;
        match self.result.as_ref()? {
            Value::String(text) => Some(serde_json::from_str(text)),
            other => Some(Descriptor::deserialize(other)),
        }
    }
}

/// Payload a device publishes to describe itself and its channels.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Descriptor {
    #[serde(rename = "mfn")]
    pub manufacturer_name: Option<String>,
    #[serde(rename = "mdn")]
    pub model_name: Option<String>,
    #[serde(rename = "v")]
    pub version: Option<String>,
    #[serde(default)]
    pub devices: Vec<SubDevice>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SubDevice {
    // firmware reports either a string or a number
    #[serde(rename = "n")]
    pub name: Option<Value>,
    #[serde(rename = "fn")]
    pub friendly_name: Option<String>,
    #[serde(rename = "fd")]
    pub friendly_description: Option<String>,
}

impl SubDevice {
    pub fn name(&self) -> Option<String> {
        match self.name.as_ref()? {
            Value::String(name) if !name.is_empty() => Some(name.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn device_list_treats_missing_and_null_connectivity_as_disconnected() -> Result<(), serde_json::Error> {
        let devices: Vec<DeviceGet> = serde_json::from_str(
            r#"[{"id":"a","connected":true},{"id":"b","connected":null},{"id":"c"},{"id":"d","connected":false,"name":"spare"}]"#,
        )?;

        let connected = devices.iter().map(|d| (d.id.as_str(), d.connected)).collect::<Vec<_>>();
        assert_eq!(connected, vec![("a", true), ("b", false), ("c", false), ("d", false)]);

        Ok(())
    }

    #[test]
    fn descriptor_is_parsed_from_the_string_result() -> Result<(), serde_json::Error> {
        let variable: VariableGet = serde_json::from_str(include_str!("../../tests/resources/ach_str_response.json"))?;

        let descriptor = variable.descriptor().expect("descriptor")?;

        assert_eq!(descriptor.manufacturer_name.as_deref(), Some("HarrisonJones"));
        assert_eq!(descriptor.model_name.as_deref(), Some("Prototype"));
        assert_eq!(descriptor.version.as_deref(), Some("0.1"));
        assert_eq!(descriptor.devices.len(), 1);
        assert_eq!(descriptor.devices[0].name(), Some("1".to_string()));

        Ok(())
    }

    #[test]
    fn descriptor_is_absent_without_a_command_marker() -> Result<(), serde_json::Error> {
        let variable: VariableGet = serde_json::from_str(r#"{"error":"Variable not found"}"#)?;

        assert!(variable.descriptor().is_none());

        Ok(())
    }

    #[test]
    fn descriptor_reports_an_unparsable_result() -> Result<(), serde_json::Error> {
        let variable: VariableGet = serde_json::from_str(r#"{"cmd":"VarReturn","result":"{not json"}"#)?;

        assert!(matches!(variable.descriptor(), Some(Err(_))));

        Ok(())
    }

    #[rstest]
    #[case(r#"{"n":"kitchen"}"#, Some("kitchen"))]
    #[case(r#"{"n":2}"#, Some("2"))]
    #[case(r#"{"n":""}"#, None)]
    #[case(r#"{"n":null}"#, None)]
    #[case(r#"{"fn":"Lamp"}"#, None)]
    fn sub_device_name_accepts_strings_and_numbers(#[case] json: &str, #[case] expected: Option<&str>) -> Result<(), serde_json::Error> {
        let sub_device: SubDevice = serde_json::from_str(json)?;

        assert_eq!(sub_device.name(), expected.map(str::to_string));

        Ok(())
    }
}
