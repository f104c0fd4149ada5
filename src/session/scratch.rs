//! Temporary file holding the rendering while the editor runs

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{Error, Result};

/// Uniquely named `<namespace>-<name>-<random>.yaml` file in the system temp
/// directory, removed when dropped
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    pub fn create(namespace: &str, name: &str) -> Result<Self> {
        let prefix = format!("{}-{}-", namespace, name);
        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".yaml")
            .tempfile()
            .map_err(|e| Error::WriteError {
                path: std::env::temp_dir().join(format!("{}*.yaml", prefix)),
                source: e,
            })?;

        debug!("Created scratch file {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write the pre-edit rendering
    pub fn write_rendering(&mut self, rendering: &[u8]) -> Result<()> {
        let path = self.path().to_path_buf();
        let file = self.file.as_file_mut();
        if let Err(source) = file.write_all(rendering) {
            return Err(Error::WriteError { path, source });
        }
        file.flush()
            .map_err(|source| Error::WriteError { path, source })
    }

    /// Read the file's content as left by the editor
    ///
    /// Reads by path since editors commonly replace the file instead of
    /// writing through the original inode.
    pub fn read_back(&self) -> Result<Vec<u8>> {
        std::fs::read(self.path()).map_err(|source| Error::ReadError {
            path: self.path().to_path_buf(),
            source,
        })
    }
}
