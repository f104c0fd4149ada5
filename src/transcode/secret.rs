//! Generic Secret transcoding: every key holds base64(base64(gzip(text)))

use std::collections::BTreeMap;

use k8s_openapi::ByteString;
use tracing::debug;

use crate::error::Format;
use crate::transcode::{
    base64_decode, base64_encode, gunzip, gzip, DecodeStage, SecretData, Transcoder,
};
use crate::{Error, Result};

/// Transcoder treating every key of the Secret as flat text
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretTranscoder;

impl SecretTranscoder {
    /// Decode a single stored value into its plain text
    pub fn decode_value(key: &str, raw: &[u8]) -> Result<String> {
        let level1 = base64_decode(raw, key, DecodeStage::FirstBase64)?;
        let level2 = base64_decode(&level1, key, DecodeStage::SecondBase64)?;
        let text = gunzip(&level2, key)?;
        String::from_utf8(text).map_err(|e| Error::DecodeError {
            stage: DecodeStage::Utf8,
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Encode plain text into its stored form
    pub fn encode_value(text: &str) -> Result<Vec<u8>> {
        let compressed = gzip(text.as_bytes())?;
        Ok(base64_encode(&base64_encode(&compressed)))
    }
}

impl Transcoder for SecretTranscoder {
    fn decode(&self, _name: &str, data: &SecretData) -> Result<Vec<u8>> {
        let mut view = BTreeMap::new();
        for (key, value) in data {
            view.insert(key.clone(), Self::decode_value(key, &value.0)?);
        }
        debug!("Decoded {} key(s)", view.len());
        render(&view)
    }

    fn encode(&self, rendering: &[u8], _original: &SecretData) -> Result<SecretData> {
        let view = parse(rendering)?;
        let mut data = SecretData::new();
        for (key, text) in view {
            data.insert(key, ByteString(Self::encode_value(&text)?));
        }
        Ok(data)
    }
}

/// Render the decoded view as YAML; no keys renders as no bytes at all
/// rather than `{}`.
fn render(view: &BTreeMap<String, String>) -> Result<Vec<u8>> {
    if view.is_empty() {
        return Ok(Vec::new());
    }

    serde_yaml::to_string(view)
        .map(String::into_bytes)
        .map_err(|e| Error::SerializeError {
            format: Format::Yaml,
            message: e.to_string(),
        })
}

/// Parse an edited rendering back into key/text pairs
///
/// Values are read as strings, so a plain scalar keeps the text that was
/// typed (`1.10` stays `1.10`, `0x1F` stays `0x1F`). A null value reads as
/// the empty string.
fn parse(rendering: &[u8]) -> Result<BTreeMap<String, String>> {
    if rendering.iter().all(u8::is_ascii_whitespace) {
        return Ok(BTreeMap::new());
    }

    let document: Option<BTreeMap<String, Option<String>>> = serde_yaml::from_slice(rendering)
        .map_err(|e| Error::ParseError {
            format: Format::Yaml,
            message: e.to_string(),
        })?;

    Ok(document
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}
