//! Command line surface shared by the `kubectl-modify-secret` and
//! `kubectl-modify-release` binaries

use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches, Parser};
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::kube_client::{self, ConnectionOptions};
use crate::adapters::secrets::KubeSecretStore;
use crate::modify::{self, Target};
use crate::session::ExternalEditor;
use crate::transcode::Variant;
use crate::{Error, Result};

/// Build metadata injected into the command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
}

impl BuildInfo {
    /// Version from `MODIFY_SECRET_VERSION` at compile time, else the crate version
    pub const fn current() -> Self {
        let version = match option_env!("MODIFY_SECRET_VERSION") {
            Some(version) => version,
            None => env!("CARGO_PKG_VERSION"),
        };
        Self { version }
    }
}

#[derive(Parser, Debug)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Name of the secret to modify
    #[arg(value_name = "SECRET_NAME")]
    pub args: Vec<String>,

    /// If present, the namespace scope for this request
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Path to the kubeconfig file to use
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// The name of the kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,

    /// The name of the kubeconfig cluster to use
    #[arg(long)]
    pub cluster: Option<String>,

    /// The name of the kubeconfig user to use
    #[arg(long)]
    pub user: Option<String>,

    /// prints version of plugin
    #[arg(long)]
    pub version: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// What an invocation asks for once arguments are validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PrintVersion,
    Modify { name: String },
}

impl Cli {
    /// Parse the process arguments for `variant`, exiting on clap errors
    pub fn parse_for(variant: Variant) -> Self {
        let matches = Self::command_for(variant).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    pub fn try_parse_for<I, T>(variant: Variant, args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_for(variant).try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    fn command_for(variant: Variant) -> clap::Command {
        Self::command()
            .name(variant.command_name())
            .about(variant.about())
            .override_usage(format!("{} [secret-name] [flags]", variant.command_name()))
    }

    /// Resolve the requested action, checking positional arguments
    pub fn action(&self) -> Result<Action> {
        if self.version {
            return Ok(Action::PrintVersion);
        }

        match self.args.as_slice() {
            [] => Err(Error::ValidationError(
                "at least one argument is required".to_string(),
            )),
            [name] => Ok(Action::Modify { name: name.clone() }),
            _ => Err(Error::ValidationError(
                "only one argument is allowed".to_string(),
            )),
        }
    }

    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
            cluster: self.cluster.clone(),
            user: self.user.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

/// Run the command for `variant`
pub async fn run(cli: Cli, variant: Variant, build: BuildInfo) -> Result<()> {
    let name = match cli.action()? {
        Action::PrintVersion => {
            println!("{}", build.version);
            return Ok(());
        }
        Action::Modify { name } => name,
    };

    let connection = kube_client::connect(&cli.connection_options()).await?;
    let target = Target::new(name, connection.namespace);
    let store = KubeSecretStore::new(connection.client);
    let editor = ExternalEditor::from_env();
    let transcoder = variant.transcoder();

    debug!(
        "Modifying {} with {} as editor",
        target,
        editor.program()
    );

    tokio::select! {
        outcome = modify::modify(&store, &editor, transcoder.as_ref(), &target) => outcome.map(|_| ()),
        _ = shutdown_signal() => Err(Error::Interrupted),
    }
}

/// Initialize tracing subscriber
///
/// `RUST_LOG` wins when set. Output goes to stderr to keep stdout clean.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "debug,kube=warn,hyper=warn"
    } else {
        "info,kube=warn,hyper=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
///
/// Editors put the terminal in raw mode, so Ctrl-C typed inside one does not
/// reach this handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received CTRL+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}
