//! kubectl-modify-secret
//!
//! kubectl plugin editing Secret values stored as base64(base64(gzip(text))).

use kubectl_modify_secret::cli::{self, BuildInfo, Cli};
use kubectl_modify_secret::transcode::Variant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Cli::parse_for(Variant::Secret);
    cli::init_tracing(opts.verbose);

    cli::run(opts, Variant::Secret, BuildInfo::current()).await?;
    Ok(())
}
