//! Binary marshalling for operator API models
//!
//! Models travel as JSON bytes in HTTP bodies. [`BinaryModel`] gives every
//! model the same encode/decode behaviour:
//!
//! - encoding produces compact JSON
//! - decoding parses into a fresh value and only then replaces the receiver,
//!   so a failed decode leaves the receiver untouched
//! - a JSON `null` document decodes to the zero value
//!
//! # Example
//!
//! ```rust,ignore
//! use model_common::BinaryModel;
//!
//! let bytes = drive.marshal_binary()?;
//!
//! let mut decoded = ServerDrives::default();
//! decoded.unmarshal_binary(&bytes)?;
//! assert_eq!(decoded, drive);
//! ```

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ModelError, ModelResult};

/// JSON byte encoding shared by all models
pub trait BinaryModel: Serialize + DeserializeOwned + Default {
    /// Encode this model as JSON bytes
    fn marshal_binary(&self) -> ModelResult<Vec<u8>> {
        let bytes = serde_json::to_vec(self).map_err(ModelError::Serialization)?;
        tracing::trace!(len = bytes.len(), "marshalled model");
        Ok(bytes)
    }

    /// Replace this model with the one decoded from `bytes`
    fn unmarshal_binary(&mut self, bytes: &[u8]) -> ModelResult<()> {
        *self = Self::from_binary(bytes)?;
        Ok(())
    }

    /// Decode a new model from JSON bytes
    fn from_binary(bytes: &[u8]) -> ModelResult<Self> {
        let parsed: Option<Self> = serde_json::from_slice(bytes).map_err(|e| {
            tracing::debug!(error = %e, len = bytes.len(), "failed to unmarshal model");
            ModelError::Deserialization(e)
        })?;
        Ok(parsed.unwrap_or_default())
    }
}

/// Encode a model that may be absent
///
/// An absent model encodes to `None` rather than failing.
pub fn marshal_optional<T: BinaryModel>(model: Option<&T>) -> ModelResult<Option<Vec<u8>>> {
    model.map(BinaryModel::marshal_binary).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(default)]
        name: String,
        #[serde(default)]
        count: i64,
    }

    impl BinaryModel for Sample {}

    #[test]
    fn test_marshal_binary() {
        let sample = Sample {
            name: "a".to_string(),
            count: 2,
        };
        let bytes = sample.marshal_binary().unwrap();
        assert_eq!(bytes, br#"{"name":"a","count":2}"#);
    }

    #[test]
    fn test_unmarshal_replaces_whole_value() {
        let mut sample = Sample {
            name: "old".to_string(),
            count: 9,
        };
        sample.unmarshal_binary(br#"{"count":1}"#).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: String::new(),
                count: 1
            }
        );
    }

    #[test]
    fn test_unmarshal_failure_leaves_receiver() {
        let mut sample = Sample {
            name: "keep".to_string(),
            count: 5,
        };
        let err = sample.unmarshal_binary(br#"{"name":"#).unwrap_err();
        assert!(matches!(err, ModelError::Deserialization(_)));
        assert_eq!(sample.name, "keep");
        assert_eq!(sample.count, 5);
    }

    #[test]
    fn test_null_document_is_zero_value() {
        let sample = Sample::from_binary(b"null").unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(Sample::from_binary(b"[1,2]").is_err());
        assert!(Sample::from_binary(b"").is_err());
        assert!(Sample::from_binary(b"{} trailing").is_err());
    }

    #[test]
    fn test_marshal_optional() {
        assert!(marshal_optional::<Sample>(None).unwrap().is_none());

        let sample = Sample::default();
        let bytes = marshal_optional(Some(&sample)).unwrap();
        assert!(bytes.is_some());
    }
}
