use crate::kubernetes::errors::ClusterError;
use crate::kubernetes::labels::LabelSelector;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::api::{DeleteParams, ListParams, PostParams};
use kube::{Api, Client};
#[cfg(test)]
use mockall::automock;
use tracing::trace;

/// The namespaced ConfigMap calls the lifecycle layer needs from a cluster.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConfigMapApi: Send + Sync {
    async fn get(&self, namespace: &str, name: &str) -> Result<ConfigMap, ClusterError>;

    async fn list(
        &self,
        namespace: &str,
        selector: &LabelSelector,
    ) -> Result<Vec<ConfigMap>, ClusterError>;

    async fn create(
        &self,
        namespace: &str,
        config_map: &ConfigMap,
    ) -> Result<ConfigMap, ClusterError>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClusterError>;

    async fn delete_collection(
        &self,
        namespace: &str,
        selector: &LabelSelector,
    ) -> Result<(), ClusterError>;
}

#[derive(Clone)]
pub struct KubeConfigMapApi {
    client: Client,
}

impl KubeConfigMapApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<ConfigMap> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

fn list_params(selector: &LabelSelector) -> ListParams {
    if selector.is_empty() {
        ListParams::default()
    } else {
        ListParams::default().labels(&selector.to_string())
    }
}

#[async_trait]
impl ConfigMapApi for KubeConfigMapApi {
    async fn get(&self, namespace: &str, name: &str) -> Result<ConfigMap, ClusterError> {
        Ok(self.api(namespace).get(name).await?)
    }

    async fn list(
        &self,
        namespace: &str,
        selector: &LabelSelector,
    ) -> Result<Vec<ConfigMap>, ClusterError> {
        let list = self.api(namespace).list(&list_params(selector)).await?;
        Ok(list.items)
    }

    async fn create(
        &self,
        namespace: &str,
        config_map: &ConfigMap,
    ) -> Result<ConfigMap, ClusterError> {
        Ok(self
            .api(namespace)
            .create(&PostParams::default(), config_map)
            .await?)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let response = self
            .api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        trace!(
            "Delete of {namespace}/{name} accepted; pending={}",
            response.is_left()
        );
        Ok(())
    }

    async fn delete_collection(
        &self,
        namespace: &str,
        selector: &LabelSelector,
    ) -> Result<(), ClusterError> {
        let response = self
            .api(namespace)
            .delete_collection(&DeleteParams::default(), &list_params(selector))
            .await?;
        trace!(
            "Delete of ConfigMaps in {namespace} matching {selector} accepted; pending={}",
            response.is_left()
        );
        Ok(())
    }
}
