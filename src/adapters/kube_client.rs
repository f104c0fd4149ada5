//! Kubernetes client construction from kubeconfig selection flags

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

use crate::{Error, Result};

/// Namespace used when neither a flag nor the kubeconfig context names one
pub const DEFAULT_NAMESPACE: &str = "default";

/// kubectl-style connection selection
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    /// Explicit kubeconfig file
    pub kubeconfig: Option<String>,
    /// Kubeconfig context to use
    pub context: Option<String>,
    /// Kubeconfig cluster to use
    pub cluster: Option<String>,
    /// Kubeconfig user to use
    pub user: Option<String>,
    /// Namespace override
    pub namespace: Option<String>,
}

impl ConnectionOptions {
    fn kubeconfig_options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            cluster: self.cluster.clone(),
            user: self.user.clone(),
        }
    }

    fn selects_entries(&self) -> bool {
        self.context.is_some() || self.cluster.is_some() || self.user.is_some()
    }
}

/// Connected client and the namespace to operate in
pub struct Connection {
    pub client: Client,
    pub namespace: String,
}

/// Build a client from the given options
///
/// An explicit `--kubeconfig` is read directly. Otherwise `KUBECONFIG` and
/// `~/.kube/config` apply, falling back to in-cluster configuration when no
/// kubeconfig entry was asked for.
pub async fn connect(options: &ConnectionOptions) -> Result<Connection> {
    let config = load_config(options).await?;
    let namespace = resolve_namespace(options.namespace.as_deref(), &config.default_namespace);
    debug!("Using cluster {} in namespace {}", config.cluster_url, namespace);

    let client = Client::try_from(config)
        .map_err(|e| Error::ConfigError(format!("failed to build client: {}", e)))?;

    Ok(Connection { client, namespace })
}

async fn load_config(options: &ConnectionOptions) -> Result<Config> {
    let kubeconfig_options = options.kubeconfig_options();

    match options.kubeconfig.as_deref() {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                Error::ConfigError(format!("failed to read kubeconfig {}: {}", path, e))
            })?;
            Config::from_custom_kubeconfig(kubeconfig, &kubeconfig_options)
                .await
                .map_err(|e| Error::ConfigError(e.to_string()))
        }
        None if options.selects_entries() => Config::from_kubeconfig(&kubeconfig_options)
            .await
            .map_err(|e| Error::ConfigError(e.to_string())),
        None => Config::infer()
            .await
            .map_err(|e| Error::ConfigError(e.to_string())),
    }
}

/// Pick the namespace: explicit flag, then the kubeconfig context's, then
/// [`DEFAULT_NAMESPACE`]
pub fn resolve_namespace(flag: Option<&str>, context_namespace: &str) -> String {
    match flag {
        Some(ns) if !ns.is_empty() => ns.to_string(),
        _ if !context_namespace.is_empty() => context_namespace.to_string(),
        _ => DEFAULT_NAMESPACE.to_string(),
    }
}
