//! kubectl-modify-release
//!
//! kubectl plugin editing the release record of a Helm release Secret as YAML.

use kubectl_modify_secret::cli::{self, BuildInfo, Cli};
use kubectl_modify_secret::transcode::Variant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Cli::parse_for(Variant::Release);
    cli::init_tracing(opts.verbose);

    cli::run(opts, Variant::Release, BuildInfo::current()).await?;
    Ok(())
}
