//! Conversion between stored Secret payloads and the editable rendering
//!
//! A [`Transcoder`] turns the raw `data` map of a Secret into the bytes placed
//! in the scratch file, and turns the edited bytes back into a replacement
//! `data` map. Two strategies exist, picked per binary through [`Variant`].

mod codec;
mod release;
mod secret;

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::ByteString;

use crate::Result;

pub use codec::{base64_decode, base64_encode, gunzip, gzip};
pub use release::{ReleaseTranscoder, RELEASE_KEY};
pub use secret::SecretTranscoder;

/// Stored payload of a Secret, keyed by data key
pub type SecretData = BTreeMap<String, ByteString>;

/// Stage of the decode pipeline a payload failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    FirstBase64,
    SecondBase64,
    Gzip,
    Utf8,
    Json,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            DecodeStage::FirstBase64 => "first base64 decode",
            DecodeStage::SecondBase64 => "second base64 decode",
            DecodeStage::Gzip => "gzip decompression",
            DecodeStage::Utf8 => "utf-8 conversion",
            DecodeStage::Json => "json parsing",
        };
        f.write_str(stage)
    }
}

/// Strategy converting a Secret payload to an editable rendering and back
pub trait Transcoder {
    /// Decode the stored payload into the bytes presented to the editor
    fn decode(&self, name: &str, data: &SecretData) -> Result<Vec<u8>>;

    /// Build the replacement payload from the edited rendering
    ///
    /// `original` is the payload as fetched, for strategies that only touch
    /// part of it.
    fn encode(&self, rendering: &[u8], original: &SecretData) -> Result<SecretData>;
}

/// Transcoding variant a binary is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Every key holds base64(base64(gzip(text)))
    Secret,
    /// Helm release Secret: `release` holds base64(gzip(json))
    Release,
}

impl Variant {
    /// Subcommand name shown in help and usage
    pub fn command_name(&self) -> &'static str {
        match self {
            Variant::Secret => "modify-secret",
            Variant::Release => "modify-release",
        }
    }

    /// One-line description shown in help
    pub fn about(&self) -> &'static str {
        match self {
            Variant::Secret => "Modify the secret with implicit base64 translations",
            Variant::Release => "Modify a Helm release secret as YAML",
        }
    }

    pub fn transcoder(&self) -> Box<dyn Transcoder> {
        match self {
            Variant::Secret => Box::new(SecretTranscoder),
            Variant::Release => Box::new(ReleaseTranscoder),
        }
    }
}
