//! kubectl-modify-secret
//!
//! Edit the values of a Kubernetes Secret, or the release record of a Helm
//! release Secret, in a text editor without decoding and re-encoding the
//! payload by hand.

pub mod adapters;
pub mod cli;
pub mod error;
pub mod modify;
pub mod session;
pub mod transcode;

pub use error::{Error, Result};
