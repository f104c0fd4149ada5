//! Edit session: scratch file, external editor and change detection

mod editor;
mod fingerprint;
mod scratch;

pub use editor::{Editor, ExternalEditor};
pub use fingerprint::{has_changed, Fingerprint};
pub use scratch::ScratchFile;
