//! Adapters for the Kubernetes API

pub mod kube_client;
pub mod secrets;
