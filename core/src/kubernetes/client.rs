use kube::config::{InferConfigError, KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::{Client, Config};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] KubeconfigError),
    #[error("Failed to infer Kubernetes configuration: {0}")]
    Infer(#[from] InferConfigError),
    #[error("Failed to create Kubernetes client: {0}")]
    Client(#[from] kube::Error),
}

/// Builds a client from an explicit kubeconfig file and/or context, falling back to the
/// usual inference (`KUBECONFIG`, `~/.kube/config`, then in-cluster).
pub async fn create_kube_client(
    kubeconfig_path: Option<&Path>,
    context: Option<&str>,
) -> Result<Client, ClientError> {
    let options = KubeConfigOptions {
        context: context.map(ToString::to_string),
        ..Default::default()
    };

    let config = match (kubeconfig_path, context) {
        (Some(path), _) => {
            debug!("Loading kubeconfig from {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &options).await?
        }
        (None, Some(context)) => {
            debug!("Loading kubeconfig context {context}");
            Config::from_kubeconfig(&options).await?
        }
        (None, None) => Config::infer().await?,
    };

    debug!("Using Kubernetes API server at {}", config.cluster_url);

    Ok(Client::try_from(config)?)
}
