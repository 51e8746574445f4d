//! Lifecycle operations for ConfigMaps owned by this tool.
//!
//! Every ConfigMap created here carries the ownership label from [`Options`], which is
//! what later lets [`ConfigMaps::delete_by_label`] find the objects again.

mod api;

#[cfg(test)]
pub use api::MockConfigMapApi;
pub use api::{ConfigMapApi, KubeConfigMapApi};

use crate::kubernetes::errors::{ClusterError, ClusterErrorExt};
use crate::kubernetes::labels::{LabelSelector, Labels, validate_labels};
use crate::kubernetes::validation::{
    ValidationError, validate_data_key, validate_name, validate_namespace,
};
use crate::options::Options;
use k8s_openapi::ByteString;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::Client;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub type BinaryData = BTreeMap<String, Vec<u8>>;

#[derive(Debug, Error)]
pub enum ConfigMapError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Failed to create ConfigMap {namespace}/{name}: {source}")]
    Create {
        namespace: String,
        name: String,
        source: ClusterError,
    },
    #[error("Failed to delete ConfigMap {namespace}/{name}: {source}")]
    Delete {
        namespace: String,
        name: String,
        source: ClusterError,
    },
    #[error("Failed to delete ConfigMaps in {namespace} matching {selector}: {source}")]
    DeleteByLabel {
        namespace: String,
        selector: String,
        source: ClusterError,
    },
    #[error("Failed to get ConfigMap {namespace}/{name}: {source}")]
    Get {
        namespace: String,
        name: String,
        source: ClusterError,
    },
    #[error("Failed to list ConfigMaps in {namespace} matching {selector:?}: {source}")]
    List {
        namespace: String,
        selector: String,
        source: ClusterError,
    },
}

impl ClusterErrorExt for ConfigMapError {
    fn cluster_error(&self) -> Option<&ClusterError> {
        match self {
            ConfigMapError::Invalid(_) => None,
            ConfigMapError::Create { source, .. }
            | ConfigMapError::Delete { source, .. }
            | ConfigMapError::DeleteByLabel { source, .. }
            | ConfigMapError::Get { source, .. }
            | ConfigMapError::List { source, .. } => Some(source),
        }
    }
}

fn validate_create(
    namespace: &str,
    name: &str,
    labels: &Labels,
    data: &BinaryData,
) -> Result<(), ValidationError> {
    validate_namespace(namespace)?;
    validate_name(name)?;
    validate_labels(labels)?;
    data.keys().try_for_each(|key| validate_data_key(key))
}

#[derive(Clone)]
pub struct ConfigMaps {
    api: Arc<dyn ConfigMapApi>,
    options: Arc<Options>,
}

impl ConfigMaps {
    pub fn new(api: Arc<dyn ConfigMapApi>, options: Arc<Options>) -> Self {
        Self { api, options }
    }

    pub fn for_client(client: Client, options: Arc<Options>) -> Self {
        Self::new(Arc::new(KubeConfigMapApi::new(client)), options)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The labels a created ConfigMap ends up with: the ownership label, with the caller's
    /// labels merged on top.
    pub fn managed_labels(&self, labels: &Labels) -> Labels {
        let mut managed = Labels::from([(
            self.options.managed_by_label().clone(),
            self.options.managed_by_value().clone(),
        )]);
        managed.extend(labels.iter().map(|(k, v)| (k.clone(), v.clone())));
        managed
    }

    pub fn build(
        &self,
        namespace: &str,
        name: &str,
        labels: &Labels,
        data: BinaryData,
    ) -> ConfigMap {
        let binary_data = data
            .into_iter()
            .map(|(key, value)| (key, ByteString(value)))
            .collect();

        ConfigMap {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                labels: Some(self.managed_labels(labels)),
                ..Default::default()
            },
            binary_data: Some(binary_data),
            ..Default::default()
        }
    }

    #[instrument(
        skip_all,
        level = "debug",
        name = "ConfigMaps::create",
        fields(namespace = %namespace, name = %name)
    )]
    pub async fn create(
        &self,
        namespace: &str,
        name: &str,
        labels: &Labels,
        data: BinaryData,
    ) -> Result<ConfigMap, ConfigMapError> {
        debug!("ConfigMaps::create({namespace}, {name}, {} data keys)", data.len());

        validate_create(namespace, name, &self.managed_labels(labels), &data)?;

        let config_map = self.build(namespace, name, labels, data);

        let created = self
            .api
            .create(namespace, &config_map)
            .await
            .map_err(|source| ConfigMapError::Create {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            })?;

        info!("Created ConfigMap {namespace}/{name}");
        Ok(created)
    }

    /// Deletes a ConfigMap. A ConfigMap that is already gone counts as deleted.
    #[instrument(
        skip_all,
        level = "debug",
        name = "ConfigMaps::delete",
        fields(namespace = %namespace, name = %name)
    )]
    pub async fn delete(&self, namespace: &str, name: &str) -> Result<(), ConfigMapError> {
        debug!("ConfigMaps::delete({namespace}, {name})");

        if let Err(err) = validate_namespace(namespace).and_then(|()| validate_name(name)) {
            debug!("ConfigMap {namespace}/{name} cannot exist ({err}), nothing to delete");
            return Ok(());
        }

        match self.api.delete(namespace, name).await {
            Ok(()) => {
                info!("Deleted ConfigMap {namespace}/{name}");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                debug!("ConfigMap {namespace}/{name} already absent");
                Ok(())
            }
            Err(source) => Err(ConfigMapError::Delete {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Deletes then recreates a ConfigMap.
    ///
    /// This is two requests, not one: if the create fails the ConfigMap is left absent.
    #[instrument(
        skip_all,
        level = "debug",
        name = "ConfigMaps::replace",
        fields(namespace = %namespace, name = %name)
    )]
    pub async fn replace(
        &self,
        namespace: &str,
        name: &str,
        labels: &Labels,
        data: BinaryData,
    ) -> Result<ConfigMap, ConfigMapError> {
        debug!("ConfigMaps::replace({namespace}, {name}, {} data keys)", data.len());

        // Checked up front so bad input cannot leave the old ConfigMap deleted.
        validate_create(namespace, name, &self.managed_labels(labels), &data)?;

        self.delete(namespace, name).await?;
        self.create(namespace, name, labels, data).await
    }

    /// Deletes every ConfigMap in `namespace` carrying all of `labels`. Empty `labels`
    /// select the whole namespace.
    #[instrument(
        skip_all,
        level = "debug",
        name = "ConfigMaps::delete_by_label",
        fields(namespace = %namespace)
    )]
    pub async fn delete_by_label(
        &self,
        namespace: &str,
        labels: &Labels,
    ) -> Result<(), ConfigMapError> {
        debug!("ConfigMaps::delete_by_label({namespace}, {labels:?})");

        validate_namespace(namespace)?;
        let selector = LabelSelector::new(labels.clone())?;

        self.api
            .delete_collection(namespace, &selector)
            .await
            .map_err(|source| ConfigMapError::DeleteByLabel {
                namespace: namespace.to_string(),
                selector: selector.to_string(),
                source,
            })?;

        info!("Deleted ConfigMaps in {namespace} matching {selector}");
        Ok(())
    }

    /// Fetches a ConfigMap, returning `None` when it does not exist.
    #[instrument(
        skip_all,
        level = "debug",
        name = "ConfigMaps::get",
        fields(namespace = %namespace, name = %name)
    )]
    pub async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ConfigMap>, ConfigMapError> {
        debug!("ConfigMaps::get({namespace}, {name})");

        validate_namespace(namespace)?;
        validate_name(name)?;

        match self.api.get(namespace, name).await {
            Ok(config_map) => Ok(Some(config_map)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(source) => Err(ConfigMapError::Get {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Lists ConfigMaps carrying all of `labels`; empty `labels` lists the whole namespace.
    #[instrument(
        skip_all,
        level = "debug",
        name = "ConfigMaps::list_by_label",
        fields(namespace = %namespace)
    )]
    pub async fn list_by_label(
        &self,
        namespace: &str,
        labels: &Labels,
    ) -> Result<Vec<ConfigMap>, ConfigMapError> {
        debug!("ConfigMaps::list_by_label({namespace}, {labels:?})");

        validate_namespace(namespace)?;
        let selector = LabelSelector::new(labels.clone())?;

        self.api
            .list(namespace, &selector)
            .await
            .map_err(|source| ConfigMapError::List {
                namespace: namespace.to_string(),
                selector: selector.to_string(),
                source,
            })
    }
}
