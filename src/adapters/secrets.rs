//! Kubernetes secret fetching and write-back

use k8s_openapi::api::core::v1::Secret;
use kube::api::PostParams;
use kube::{Api, Client, ResourceExt};
use tracing::debug;

use crate::{Error, Result};

/// Access to the Secrets being edited
#[allow(async_fn_in_trait)]
pub trait SecretStore {
    /// Fetch a secret by name from the given namespace
    async fn fetch(&self, name: &str, namespace: &str) -> Result<Secret>;

    /// Replace a previously fetched secret in a single write
    ///
    /// The secret's `resourceVersion` is sent along, so a concurrent change
    /// surfaces as [`Error::ConflictError`].
    async fn persist(&self, secret: &Secret) -> Result<()>;
}

/// [`SecretStore`] backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
}

impl KubeSecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl SecretStore for KubeSecretStore {
    async fn fetch(&self, name: &str, namespace: &str) -> Result<Secret> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = secrets
            .get(name)
            .await
            .map_err(|e| map_kube_error(e, name, namespace))?;

        debug!(
            "Fetched secret {}/{} at resourceVersion {}",
            namespace,
            name,
            secret.resource_version().unwrap_or_default()
        );
        Ok(secret)
    }

    async fn persist(&self, secret: &Secret) -> Result<()> {
        let name = secret.name_any();
        let namespace = secret.namespace().unwrap_or_default();
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), &namespace);

        secrets
            .replace(&name, &PostParams::default(), secret)
            .await
            .map_err(|e| map_kube_error(e, &name, &namespace))?;

        debug!("Replaced secret {}/{}", namespace, name);
        Ok(())
    }
}

/// Classify a client error for the secret `namespace/name`
pub fn map_kube_error(err: kube::Error, name: &str, namespace: &str) -> Error {
    match err {
        kube::Error::Api(resp) => match resp.code {
            404 => Error::NotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            },
            409 => Error::ConflictError {
                name: name.to_string(),
                namespace: namespace.to_string(),
                message: resp.message,
            },
            401 | 403 => Error::AuthError(resp.message),
            _ => Error::KubeError(format!(
                "secret {}/{}: {} ({})",
                namespace, name, resp.message, resp.code
            )),
        },
        kube::Error::Auth(e) => Error::AuthError(e.to_string()),
        kube::Error::HyperError(e) => Error::ConnectionError(e.to_string()),
        kube::Error::Service(e) => Error::ConnectionError(e.to_string()),
        other => Error::KubeError(format!("secret {}/{}: {}", namespace, name, other)),
    }
}
