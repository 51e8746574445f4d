//! Shared helpers for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use parcel_core::kubernetes::config_maps::{BinaryData, ConfigMapApi, ConfigMaps};
use parcel_core::kubernetes::errors::ClusterError;
use parcel_core::kubernetes::labels::{LabelSelector, Labels};
use parcel_core::options::Options;
use std::collections::BTreeMap;
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initialize test environment once
pub fn init_test_env() {
    INIT.call_once(|| {
        parcel_core::crypto::init_crypto();
    });
}

/// A namespaced ConfigMap store that answers like an API server would.
#[derive(Default)]
pub struct InMemoryConfigMapApi {
    objects: RwLock<BTreeMap<(String, String), ConfigMap>>,
}

impl InMemoryConfigMapApi {
    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.objects
            .read()
            .unwrap()
            .contains_key(&(namespace.to_string(), name.to_string()))
    }

    pub fn names(&self, namespace: &str) -> Vec<String> {
        self.objects
            .read()
            .unwrap()
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Stores an object directly, bypassing the lifecycle layer.
    pub fn seed(&self, namespace: &str, name: &str, labels: &Labels) {
        let config_map = ConfigMap {
            metadata: kube::api::ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                labels: Some(labels.clone()),
                ..Default::default()
            },
            ..Default::default()
        };
        self.objects
            .write()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), config_map);
    }
}

fn labels_of(config_map: &ConfigMap) -> Labels {
    config_map.metadata.labels.clone().unwrap_or_default()
}

#[async_trait]
impl ConfigMapApi for InMemoryConfigMapApi {
    async fn get(&self, namespace: &str, name: &str) -> Result<ConfigMap, ClusterError> {
        self.objects
            .read()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| ClusterError::NotFound(format!("configmaps \"{name}\" not found")))
    }

    async fn list(
        &self,
        namespace: &str,
        selector: &LabelSelector,
    ) -> Result<Vec<ConfigMap>, ClusterError> {
        Ok(self
            .objects
            .read()
            .unwrap()
            .iter()
            .filter(|((ns, _), cm)| ns == namespace && selector.matches(&labels_of(cm)))
            .map(|(_, cm)| cm.clone())
            .collect())
    }

    async fn create(
        &self,
        namespace: &str,
        config_map: &ConfigMap,
    ) -> Result<ConfigMap, ClusterError> {
        let name = config_map.metadata.name.clone().unwrap_or_default();
        let mut objects = self.objects.write().unwrap();
        let key = (namespace.to_string(), name.clone());
        if objects.contains_key(&key) {
            return Err(ClusterError::AlreadyExists(format!(
                "configmaps \"{name}\" already exists"
            )));
        }
        objects.insert(key, config_map.clone());
        Ok(config_map.clone())
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        self.objects
            .write()
            .unwrap()
            .remove(&(namespace.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| ClusterError::NotFound(format!("configmaps \"{name}\" not found")))
    }

    async fn delete_collection(
        &self,
        namespace: &str,
        selector: &LabelSelector,
    ) -> Result<(), ClusterError> {
        self.objects
            .write()
            .unwrap()
            .retain(|(ns, _), cm| ns != namespace || !selector.matches(&labels_of(cm)));
        Ok(())
    }
}

pub fn in_memory_config_maps() -> (Arc<InMemoryConfigMapApi>, ConfigMaps) {
    let api = Arc::new(InMemoryConfigMapApi::default());
    let config_maps = ConfigMaps::new(api.clone(), Arc::new(Options::default()));
    (api, config_maps)
}

pub fn labels(pairs: &[(&str, &str)]) -> Labels {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn data(pairs: Vec<(&str, Vec<u8>)>) -> BinaryData {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
