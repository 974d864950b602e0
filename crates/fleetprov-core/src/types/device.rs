use serde::{Deserialize, Serialize};

/// A device identity destined for the provisioning manifest.
///
/// Serializes to the registry's bulk-registration wire format: one compact
/// JSON object per manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Device name, `{prefix}_{sequence}`
    #[serde(rename = "ThingName")]
    pub name: String,

    /// Device type the registry files the device under
    #[serde(rename = "ThingTypeName")]
    pub type_name: String,

    /// Position of the device in the batch
    #[serde(rename = "ThingId")]
    pub sequence: u64,
}

impl DeviceIdentity {
    /// Build the identity for batch position `sequence`
    #[must_use]
    pub fn new(prefix: &str, type_name: impl Into<String>, sequence: u64) -> Self {
        Self {
            name: format!("{prefix}_{sequence}"),
            type_name: type_name.into(),
            sequence,
        }
    }
}

/// Summary row from the registry's device listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    /// Device name
    pub name: String,

    /// Provider-assigned device ARN
    pub arn: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_manifest_wire_format() {
        let identity = DeviceIdentity::new("MOTO", "TRACKER", 3);
        assert_eq!(
            serde_json::to_string(&identity).unwrap(),
            r#"{"ThingName":"MOTO_3","ThingTypeName":"TRACKER","ThingId":3}"#
        );
    }

    #[test]
    fn round_trips_from_wire_format() {
        let line = r#"{"ThingName":"MOTO_0","ThingTypeName":"TRACKER","ThingId":0}"#;
        let identity: DeviceIdentity = serde_json::from_str(line).unwrap();
        assert_eq!(identity, DeviceIdentity::new("MOTO", "TRACKER", 0));
    }
}
