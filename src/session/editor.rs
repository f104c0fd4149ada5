//! External editor invocation

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info};

use crate::{Error, Result};

#[cfg(windows)]
const DEFAULT_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const DEFAULT_EDITOR: &str = "vi";

/// Environment variables consulted for the editor command, in order
const EDITOR_ENV_VARS: [&str; 2] = ["KUBE_EDITOR", "EDITOR"];

/// Something that lets the operator change a file in place
#[allow(async_fn_in_trait)]
pub trait Editor {
    /// Returns once editing of `path` is finished
    async fn edit(&self, path: &Path) -> Result<()>;
}

/// Editor process resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEditor {
    program: String,
    args: Vec<String>,
}

impl ExternalEditor {
    /// Parse an editor command line such as `code --wait`
    ///
    /// Words are split on whitespace. Single or double quotes group a word
    /// containing spaces, e.g. `"/opt/Sublime Text/subl" -w`. Returns `None`
    /// for a blank command.
    pub fn from_command(command: &str) -> Option<Self> {
        let mut parts = split_command(command).into_iter();
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Resolve from `KUBE_EDITOR`, then `EDITOR`, then the platform default
    pub fn from_env() -> Self {
        Self::resolve(|var| std::env::var(var).ok())
    }

    /// Resolve using `lookup` in place of the process environment
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        EDITOR_ENV_VARS
            .iter()
            .filter_map(|&var| lookup(var))
            .find_map(|command| Self::from_command(&command))
            .unwrap_or_else(|| Self {
                program: DEFAULT_EDITOR.to_string(),
                args: Vec::new(),
            })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Editor for ExternalEditor {
    async fn edit(&self, path: &Path) -> Result<()> {
        info!("Waiting for {} to close {}", self.program, path.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| Error::EditorError(format!("failed to launch {}: {}", self.program, e)))?;

        debug!("Editor exited with {}", status);

        if !status.success() {
            return Err(Error::EditorError(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }
}

/// Split a command line into words, honouring single and double quotes
fn split_command(command: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in command.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_word {
        words.push(current);
    }
    words
}
