//! Error types for kubectl-modify-secret

use std::fmt;
use std::path::PathBuf;

use crate::modify::Step;
use crate::transcode::DecodeStage;

/// Result type for the plugin
pub type Result<T> = std::result::Result<T, Error>;

/// Document format named in parse and serialize errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Gzip,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Yaml => f.write_str("YAML"),
            Format::Gzip => f.write_str("gzip stream"),
        }
    }
}

/// Error type for the plugin
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Secret does not exist
    #[error("secret {namespace}/{name} not found")]
    NotFound { name: String, namespace: String },

    /// API server could not be reached
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Credentials rejected or insufficient
    #[error("Authorization error: {0}")]
    AuthError(String),

    /// Secret changed between fetch and write-back
    #[error("secret {namespace}/{name} was modified concurrently: {message}")]
    ConflictError {
        name: String,
        namespace: String,
        message: String,
    },

    /// Any other Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    KubeError(String),

    /// Kubeconfig loading or client construction
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed encoded payload
    #[error("failed to decode key {key:?} ({stage}): {message}")]
    DecodeError {
        stage: DecodeStage,
        key: String,
        message: String,
    },

    /// A key the variant depends on is absent
    #[error("secret {name:?} has no .{key} key")]
    MissingKey { name: String, key: String },

    /// Edited or stored document could not be parsed
    #[error("failed to parse {format}: {message}")]
    ParseError { format: Format, message: String },

    /// Document could not be re-serialized
    #[error("failed to serialize {format}: {message}")]
    SerializeError { format: Format, message: String },

    /// Scratch file could not be created or written
    #[error("failed to write {}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scratch file could not be read back
    #[error("failed to read {}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Editor could not be launched or exited unsuccessfully
    #[error("Editor error: {0}")]
    EditorError(String),

    /// Command line misuse
    #[error("{0}")]
    ValidationError(String),

    /// Run aborted by a termination signal
    #[error("interrupted")]
    Interrupted,

    /// Failure attributed to the step of the modify session it came from
    #[error("{step} failed")]
    StepError {
        step: Step,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the session step it originated in
    pub fn during(self, step: Step) -> Self {
        match self {
            Error::StepError { .. } | Error::Interrupted => self,
            other => Error::StepError {
                step,
                source: Box::new(other),
            },
        }
    }

    /// Step the error was raised in, if it was raised inside a modify session
    pub fn step(&self) -> Option<Step> {
        match self {
            Error::StepError { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The underlying error with any step attribution removed
    pub fn cause(&self) -> &Error {
        match self {
            Error::StepError { source, .. } => source.cause(),
            other => other,
        }
    }
}
