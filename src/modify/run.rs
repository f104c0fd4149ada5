//! The modify session state machine

use tracing::{debug, info, instrument};

use crate::adapters::secrets::SecretStore;
use crate::modify::{Outcome, Step, Target};
use crate::session::{has_changed, Editor, ScratchFile};
use crate::transcode::{SecretData, Transcoder};
use crate::Result;

/// Run one modify session against `target`
///
/// Steps run in order: fetch, decode, render to a scratch file, edit,
/// compare, then encode and persist when the content changed. The store is
/// only written in the last step, so a failure anywhere earlier leaves the
/// secret untouched. The scratch file is removed on every return path.
#[instrument(skip_all, fields(secret = %target))]
pub async fn modify<S, E, T>(
    store: &S,
    editor: &E,
    transcoder: &T,
    target: &Target,
) -> Result<Outcome>
where
    S: SecretStore,
    E: Editor,
    T: Transcoder + ?Sized,
{
    debug!("Step: {}", Step::Fetching);
    let mut secret = store
        .fetch(&target.name, &target.namespace)
        .await
        .map_err(|e| e.during(Step::Fetching))?;

    debug!("Step: {}", Step::Decoding);
    let data: SecretData = secret.data.clone().unwrap_or_default();
    let rendering = transcoder
        .decode(&target.name, &data)
        .map_err(|e| e.during(Step::Decoding))?;

    debug!("Step: {}", Step::Rendering);
    let mut scratch = ScratchFile::create(&target.namespace, &target.name)
        .map_err(|e| e.during(Step::Rendering))?;
    scratch
        .write_rendering(&rendering)
        .map_err(|e| e.during(Step::Rendering))?;

    debug!("Step: {}", Step::Editing);
    editor
        .edit(scratch.path())
        .await
        .map_err(|e| e.during(Step::Editing))?;

    debug!("Step: {}", Step::Comparing);
    let edited = scratch
        .read_back()
        .map_err(|e| e.during(Step::Comparing))?;

    if !has_changed(&rendering, &edited) {
        info!("no changes done to secret {:?}", target.name);
        return Ok(Outcome::Unchanged);
    }

    debug!("Step: {}", Step::Encoding);
    let updated = transcoder
        .encode(&edited, &data)
        .map_err(|e| e.during(Step::Encoding))?;

    debug!("Step: {}", Step::Persisting);
    secret.data = Some(updated);
    if secret.metadata.namespace.is_none() {
        secret.metadata.namespace = Some(target.namespace.clone());
    }
    store
        .persist(&secret)
        .await
        .map_err(|e| e.during(Step::Persisting))?;

    info!("secret {:?} edited", target.name);
    Ok(Outcome::Updated)
}
