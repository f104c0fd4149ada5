//! Content fingerprints for detecting untouched renderings

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest of a rendering, used only for equality
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hasher.finalize().into())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// True iff the two byte sequences differ
///
/// This is a byte comparison. A reformat that leaves the parsed content
/// identical still counts as a change.
pub fn has_changed(original: &[u8], edited: &[u8]) -> bool {
    Fingerprint::of(original) != Fingerprint::of(edited)
}
