//! Helm release transcoding
//!
//! Helm stores a release record as base64(gzip(json)) under the `release`
//! key of its Secret. The record is presented for editing as YAML and turned
//! back into compact JSON on write-back. Other keys are left untouched.

use k8s_openapi::ByteString;
use tracing::debug;

use crate::error::Format;
use crate::transcode::{
    base64_decode, base64_encode, gunzip, gzip, DecodeStage, SecretData, Transcoder,
};
use crate::{Error, Result};

/// Data key holding the Helm release record
pub const RELEASE_KEY: &str = "release";

/// Transcoder unwrapping the JSON release record of a Helm release Secret
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseTranscoder;

impl ReleaseTranscoder {
    /// Decode the stored release value into its JSON document
    pub fn decode_record(raw: &[u8]) -> Result<serde_json::Value> {
        let compressed = base64_decode(raw, RELEASE_KEY, DecodeStage::FirstBase64)?;
        let json = gunzip(&compressed, RELEASE_KEY)?;
        serde_json::from_slice(&json).map_err(|e| Error::DecodeError {
            stage: DecodeStage::Json,
            key: RELEASE_KEY.to_string(),
            message: e.to_string(),
        })
    }

    /// Encode a JSON release document into its stored form
    pub fn encode_record(record: &serde_json::Value) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(record).map_err(|e| Error::SerializeError {
            format: Format::Json,
            message: e.to_string(),
        })?;
        Ok(base64_encode(&gzip(&json)?))
    }
}

impl Transcoder for ReleaseTranscoder {
    fn decode(&self, name: &str, data: &SecretData) -> Result<Vec<u8>> {
        let raw = data.get(RELEASE_KEY).ok_or_else(|| Error::MissingKey {
            name: name.to_string(),
            key: RELEASE_KEY.to_string(),
        })?;

        let record = Self::decode_record(&raw.0)?;
        debug!("Decoded release record of secret {}", name);

        serde_yaml::to_string(&record)
            .map(String::into_bytes)
            .map_err(|e| Error::SerializeError {
                format: Format::Yaml,
                message: e.to_string(),
            })
    }

    fn encode(&self, rendering: &[u8], original: &SecretData) -> Result<SecretData> {
        if rendering.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::ParseError {
                format: Format::Yaml,
                message: "release record is empty".to_string(),
            });
        }

        let document: serde_yaml::Value =
            serde_yaml::from_slice(rendering).map_err(|e| Error::ParseError {
                format: Format::Yaml,
                message: e.to_string(),
            })?;

        if !document.is_mapping() {
            return Err(Error::ParseError {
                format: Format::Yaml,
                message: "release record must be a mapping".to_string(),
            });
        }

        // JSON objects only admit string keys
        let record = serde_json::to_value(&document).map_err(|e| Error::SerializeError {
            format: Format::Json,
            message: e.to_string(),
        })?;

        let mut data = original.clone();
        data.insert(
            RELEASE_KEY.to_string(),
            ByteString(Self::encode_record(&record)?),
        );
        Ok(data)
    }
}
