//! Fetch, edit and write back a single Secret

mod run;

use std::fmt;

pub use run::modify;

/// Secret being modified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub namespace: String,
}

impl Target {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Steps of a modify session, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fetching,
    Decoding,
    Rendering,
    Editing,
    Comparing,
    Encoding,
    Persisting,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Step::Fetching => "fetching secret",
            Step::Decoding => "decoding secret",
            Step::Rendering => "writing scratch file",
            Step::Editing => "editing",
            Step::Comparing => "reading edited file",
            Step::Encoding => "encoding edited content",
            Step::Persisting => "updating secret",
        };
        f.write_str(step)
    }
}

/// How a successful session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Edited content was byte-identical, nothing was written
    Unchanged,
    /// The secret was replaced with the edited content
    Updated,
}
