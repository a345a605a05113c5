//! Drive status type

use std::fmt;

use model_common::{
    fields, BinaryModel, ContextValidate, FormatRegistry, ModelResult, Validate, ValidationContext,
};
use schemars::JsonSchema;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::capacity::{self, CapacityLevel, CapacityThresholds};

/// Status of a single drive attached to a server in the cluster
///
/// Every field is optional on the wire. A field at its zero value is left
/// out of the encoded JSON, so "zero" and "absent" are the same thing here.
///
/// Decoding accepts keys in any ASCII case, keeps the last of repeated keys
/// and treats `null` as "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
#[schemars(rename = "serverDrives")]
pub struct ServerDrives {
    /// Bytes free on the drive
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub available_space: i64,

    /// Filesystem or device path of the drive
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub drive_path: String,

    /// Address of the node hosting the drive
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub endpoint: String,

    /// Whether the drive is being healed
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub healing: bool,

    /// Manufacturer model identifier
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub model: String,

    /// Whether the drive holds the OS root filesystem
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub root_disk: bool,

    /// Health state as reported by the server (e.g., "ok", "offline")
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub state: String,

    /// Drive capacity in bytes
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub total_space: i64,

    /// Bytes in use
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub used_space: i64,

    /// Drive UUID
    #[serde(skip_serializing_if = "model_common::omit::is_default")]
    pub uuid: String,
}

impl ServerDrives {
    /// Percentage of the drive in use, 0 when the capacity is unknown
    pub fn usage_percent(&self) -> f64 {
        capacity::usage_percent(self.used_space, self.total_space)
    }

    /// Capacity level of the drive under the given thresholds
    pub fn capacity_level(&self, thresholds: &CapacityThresholds) -> CapacityLevel {
        capacity::capacity_level(self.used_space, self.total_space, thresholds)
    }
}

#[derive(Clone, Copy)]
enum Field {
    AvailableSpace,
    DrivePath,
    Endpoint,
    Healing,
    Model,
    RootDisk,
    State,
    TotalSpace,
    UsedSpace,
    Uuid,
}

const FIELDS: &[(&str, Field)] = &[
    ("availableSpace", Field::AvailableSpace),
    ("drivePath", Field::DrivePath),
    ("endpoint", Field::Endpoint),
    ("healing", Field::Healing),
    ("model", Field::Model),
    ("rootDisk", Field::RootDisk),
    ("state", Field::State),
    ("totalSpace", Field::TotalSpace),
    ("usedSpace", Field::UsedSpace),
    ("uuid", Field::Uuid),
];

impl<'de> Deserialize<'de> for ServerDrives {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ServerDrivesVisitor)
    }
}

struct ServerDrivesVisitor;

impl<'de> Visitor<'de> for ServerDrivesVisitor {
    type Value = ServerDrives;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a server drive object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ServerDrives, A::Error> {
        let mut drive = ServerDrives::default();

        while let Some(key) = map.next_key::<String>()? {
            let Some(field) = fields::lookup(&key, FIELDS) else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            match field {
                Field::AvailableSpace => {
                    fields::assign(&mut drive.available_space, map.next_value()?)
                }
                Field::DrivePath => fields::assign(&mut drive.drive_path, map.next_value()?),
                Field::Endpoint => fields::assign(&mut drive.endpoint, map.next_value()?),
                Field::Healing => fields::assign(&mut drive.healing, map.next_value()?),
                Field::Model => fields::assign(&mut drive.model, map.next_value()?),
                Field::RootDisk => fields::assign(&mut drive.root_disk, map.next_value()?),
                Field::State => fields::assign(&mut drive.state, map.next_value()?),
                Field::TotalSpace => fields::assign(&mut drive.total_space, map.next_value()?),
                Field::UsedSpace => fields::assign(&mut drive.used_space, map.next_value()?),
                Field::Uuid => fields::assign(&mut drive.uuid, map.next_value()?),
            }
        }

        Ok(drive)
    }
}

// None of the fields carry a format constraint, so both validators accept
// any value.
impl Validate for ServerDrives {
    fn validate(&self, _formats: &dyn FormatRegistry) -> ModelResult<()> {
        Ok(())
    }
}

impl ContextValidate for ServerDrives {
    fn context_validate(
        &self,
        _ctx: &ValidationContext,
        _formats: &dyn FormatRegistry,
    ) -> ModelResult<()> {
        Ok(())
    }
}

impl BinaryModel for ServerDrives {}

#[cfg(test)]
mod tests {
    use super::*;
    use model_common::{marshal_optional, ModelError, Registry};
    use serde_json::{json, Value};

    fn sample() -> ServerDrives {
        ServerDrives {
            available_space: 750_000,
            drive_path: "/mnt/disk1".to_string(),
            endpoint: "https://minio-0.minio.svc:9000".to_string(),
            healing: true,
            model: "SAMSUNG MZ7LH960".to_string(),
            root_disk: false,
            state: "ok".to_string(),
            total_space: 1_000_000,
            used_space: 250_000,
            uuid: "5d3a3ac2-6ed4-4d7c-9c8f-6f0f5a0e8f11".to_string(),
        }
    }

    #[test]
    fn test_default_encodes_to_empty_object() {
        let bytes = ServerDrives::default().marshal_binary().unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[test]
    fn test_empty_object_decodes_to_default() {
        let drive = ServerDrives::from_binary(b"{}").unwrap();
        assert_eq!(drive, ServerDrives::default());
    }

    #[test]
    fn test_wire_key_names() {
        let mut drive = sample();
        drive.root_disk = true;
        let value: Value = serde_json::from_slice(&drive.marshal_binary().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "availableSpace": 750000,
                "drivePath": "/mnt/disk1",
                "endpoint": "https://minio-0.minio.svc:9000",
                "healing": true,
                "model": "SAMSUNG MZ7LH960",
                "rootDisk": true,
                "state": "ok",
                "totalSpace": 1000000,
                "usedSpace": 250000,
                "uuid": "5d3a3ac2-6ed4-4d7c-9c8f-6f0f5a0e8f11"
            })
        );
    }

    #[test]
    fn test_zero_fields_are_omitted() {
        let drive = ServerDrives {
            drive_path: "/mnt/disk2".to_string(),
            healing: false,
            total_space: 0,
            ..Default::default()
        };
        let value: Value = serde_json::from_slice(&drive.marshal_binary().unwrap()).unwrap();
        assert_eq!(value, json!({ "drivePath": "/mnt/disk2" }));
    }

    #[test]
    fn test_round_trip() {
        let drive = sample();
        let decoded = ServerDrives::from_binary(&drive.marshal_binary().unwrap()).unwrap();
        assert_eq!(decoded, drive);
    }

    #[test]
    fn test_negative_space_is_kept() {
        let drive = ServerDrives {
            available_space: -1,
            ..Default::default()
        };
        let bytes = drive.marshal_binary().unwrap();
        assert_eq!(bytes, br#"{"availableSpace":-1}"#);
        assert_eq!(ServerDrives::from_binary(&bytes).unwrap(), drive);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let drive =
            ServerDrives::from_binary(br#"{"state":"offline","pool":3,"extra":{"a":[1]}}"#)
                .unwrap();
        assert_eq!(drive.state, "offline");
    }

    #[test]
    fn test_null_fields_stay_zero() {
        let drive =
            ServerDrives::from_binary(br#"{"model":null,"usedSpace":null,"rootDisk":true}"#)
                .unwrap();
        assert_eq!(drive.model, "");
        assert_eq!(drive.used_space, 0);
        assert!(drive.root_disk);
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let drive = ServerDrives::from_binary(br#"{"state":"offline","state":"ok"}"#).unwrap();
        assert_eq!(drive.state, "ok");

        let drive =
            ServerDrives::from_binary(br#"{"totalSpace":5,"totalSpace":null}"#).unwrap();
        assert_eq!(drive.total_space, 5);
    }

    #[test]
    fn test_keys_match_ignoring_case() {
        let drive =
            ServerDrives::from_binary(br#"{"DrivePath":"/mnt/x","TOTALSPACE":5,"rootdisk":true}"#)
                .unwrap();
        assert_eq!(drive.drive_path, "/mnt/x");
        assert_eq!(drive.total_space, 5);
        assert!(drive.root_disk);
    }

    #[test]
    fn test_repeated_key_in_other_case_keeps_last() {
        let drive =
            ServerDrives::from_binary(br#"{"drivePath":"/a","DRIVEPATH":"/b"}"#).unwrap();
        assert_eq!(drive.drive_path, "/b");
    }

    #[test]
    fn test_unmarshal_replaces_receiver() {
        let mut drive = sample();
        drive.unmarshal_binary(br#"{"endpoint":"node-2:9000"}"#).unwrap();
        assert_eq!(
            drive,
            ServerDrives {
                endpoint: "node-2:9000".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_truncated_input_leaves_receiver() {
        let mut drive = sample();
        let err = drive.unmarshal_binary(br#"{"uuid":"#).unwrap_err();
        assert!(matches!(err, ModelError::Deserialization(_)));
        assert_eq!(drive, sample());
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        assert!(ServerDrives::from_binary(br#"{"totalSpace":"1000"}"#).is_err());
        assert!(ServerDrives::from_binary(br#"{"healing":"yes"}"#).is_err());
        assert!(ServerDrives::from_binary(br#"{"usedSpace":1.5}"#).is_err());
        assert!(ServerDrives::from_binary(br#"["ok"]"#).is_err());
    }

    #[test]
    fn test_absent_drive_marshals_to_none() {
        assert!(marshal_optional::<ServerDrives>(None).unwrap().is_none());
    }

    #[test]
    fn test_validate_accepts_anything() {
        let formats = Registry::default();
        assert!(ServerDrives::default().validate(&formats).is_ok());

        let extreme = ServerDrives {
            available_space: i64::MAX,
            total_space: i64::MIN,
            used_space: i64::MAX,
            uuid: "not-a-uuid".to_string(),
            state: "whatever".to_string(),
            ..sample()
        };
        assert!(extreme.validate(&formats).is_ok());
        assert!(extreme.validate(&Registry::empty()).is_ok());
    }

    #[test]
    fn test_context_validate_accepts_anything() {
        let formats = Registry::default();
        let ctx = ValidationContext::new();
        assert!(sample().context_validate(&ctx, &formats).is_ok());

        ctx.cancel();
        assert!(ServerDrives::default().context_validate(&ctx, &formats).is_ok());
    }

    #[test]
    fn test_usage_percent() {
        assert_eq!(sample().usage_percent(), 25.0);
        assert_eq!(ServerDrives::default().usage_percent(), 0.0);
    }

    #[test]
    fn test_capacity_level() {
        let thresholds = CapacityThresholds::default();
        let drive = ServerDrives {
            total_space: 100,
            used_space: 95,
            ..Default::default()
        };
        assert_eq!(drive.capacity_level(&thresholds), CapacityLevel::Critical);
        assert_eq!(sample().capacity_level(&thresholds), CapacityLevel::Normal);
    }

    #[test]
    fn test_schema_uses_wire_names() {
        let schema = schemars::schema_for!(ServerDrives);
        let value = serde_json::to_value(&schema).unwrap();
        let properties = value["properties"].as_object().unwrap();
        assert!(properties.contains_key("drivePath"));
        assert!(properties.contains_key("rootDisk"));
        assert!(!properties.contains_key("drive_path"));
    }
}
