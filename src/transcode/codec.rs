//! Base64 and gzip primitives shared by both transcoders

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::Format;
use crate::transcode::DecodeStage;
use crate::{Error, Result};

/// Decode one standard-alphabet base64 layer of the value stored under `key`
///
/// Line breaks inside the encoded text are ignored.
pub fn base64_decode(input: &[u8], key: &str, stage: DecodeStage) -> Result<Vec<u8>> {
    let compact: Vec<u8> = input
        .iter()
        .copied()
        .filter(|b| *b != b'\n' && *b != b'\r')
        .collect();
    STANDARD.decode(compact).map_err(|e| Error::DecodeError {
        stage,
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Encode one standard-alphabet base64 layer
pub fn base64_encode(input: &[u8]) -> Vec<u8> {
    STANDARD.encode(input).into_bytes()
}

/// Decompress a gzip stream stored under `key`, concatenated members included
pub fn gunzip(input: &[u8], key: &str) -> Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(input);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::DecodeError {
            stage: DecodeStage::Gzip,
            key: key.to_string(),
            message: e.to_string(),
        })?;
    Ok(out)
}

/// Compress `input` as a single gzip member with default compression
pub fn gzip(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(input).map_err(gzip_error)?;
    encoder.finish().map_err(gzip_error)
}

fn gzip_error(e: std::io::Error) -> Error {
    Error::SerializeError {
        format: Format::Gzip,
        message: e.to_string(),
    }
}
