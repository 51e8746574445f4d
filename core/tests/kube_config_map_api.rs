//! Exercises the kube-backed API against a mock API server.

mod common;

use assertables::{assert_err, assert_ok};
use common::{data, init_test_env, labels};
use kube::{Client, Config};
use parcel_core::kubernetes::config_maps::{ConfigMapError, ConfigMaps};
use parcel_core::kubernetes::errors::{ClusterError, ClusterErrorExt};
use parcel_core::kubernetes::labels::Labels;
use parcel_core::options::Options;
use serde_json::{Value, json};
use std::sync::Arc;
use test_log::test;
use wiremock::matchers::{body_partial_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLLECTION_PATH: &str = "/api/v1/namespaces/demo/configmaps";
const OBJECT_PATH: &str = "/api/v1/namespaces/demo/configmaps/cfg1";

fn config_maps_for(server: &MockServer) -> ConfigMaps {
    init_test_env();
    let uri: http::Uri = server.uri().parse().unwrap();
    let client = Client::try_from(Config::new(uri)).unwrap();
    ConfigMaps::for_client(client, Arc::new(Options::default()))
}

fn status(code: u16, reason: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(code).set_body_json(json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code,
    }))
}

fn config_map_json(name: &str, labels: Value) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": "demo",
            "labels": labels,
        },
        "binaryData": { "k": "AQID" },
    })
}

#[test(tokio::test)]
async fn test_create_posts_labelled_config_map() {
    let server = MockServer::start().await;
    let expected = config_map_json(
        "cfg1",
        json!({ "app": "x", "app.kubernetes.io/managed-by": "parcel" }),
    );

    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .and(body_partial_json(expected.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(expected))
        .expect(1)
        .mount(&server)
        .await;

    let created = assert_ok!(
        config_maps_for(&server)
            .create(
                "demo",
                "cfg1",
                &labels(&[("app", "x")]),
                data(vec![("k", vec![1, 2, 3])])
            )
            .await
    );

    assert_eq!(created.metadata.name.as_deref(), Some("cfg1"));
    assert_eq!(
        created.binary_data.unwrap_or_default().get("k").map(|b| b.0.clone()),
        Some(vec![1, 2, 3])
    );
}

#[test(tokio::test)]
async fn test_create_conflict_is_already_exists() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .respond_with(status(
            409,
            "AlreadyExists",
            "configmaps \"cfg1\" already exists",
        ))
        .mount(&server)
        .await;

    let err = assert_err!(
        config_maps_for(&server)
            .create("demo", "cfg1", &Labels::new(), Default::default())
            .await
    );

    assert!(err.is_already_exists());
}

#[test(tokio::test)]
async fn test_delete_issues_delete_request() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(OBJECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_map_json("cfg1", json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(config_maps_for(&server).delete("demo", "cfg1").await);
}

#[test(tokio::test)]
async fn test_delete_not_found_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(OBJECT_PATH))
        .respond_with(status(404, "NotFound", "configmaps \"cfg1\" not found"))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(config_maps_for(&server).delete("demo", "cfg1").await);
}

#[test(tokio::test)]
async fn test_delete_forbidden_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(OBJECT_PATH))
        .respond_with(status(
            403,
            "Forbidden",
            "configmaps \"cfg1\" is forbidden",
        ))
        .mount(&server)
        .await;

    let err = assert_err!(config_maps_for(&server).delete("demo", "cfg1").await);

    assert!(matches!(
        err,
        ConfigMapError::Delete {
            source: ClusterError::Forbidden(_),
            ..
        }
    ));
}

#[test(tokio::test)]
async fn test_replace_deletes_then_posts() {
    let server = MockServer::start().await;
    let expected = config_map_json(
        "cfg1",
        json!({ "app.kubernetes.io/managed-by": "parcel" }),
    );

    Mock::given(method("DELETE"))
        .and(path(OBJECT_PATH))
        .respond_with(status(404, "NotFound", "configmaps \"cfg1\" not found"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(expected))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(
        config_maps_for(&server)
            .replace(
                "demo",
                "cfg1",
                &Labels::new(),
                data(vec![("k", vec![1, 2, 3])])
            )
            .await
    );
}

#[test(tokio::test)]
async fn test_delete_by_label_sends_label_selector() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(COLLECTION_PATH))
        .and(query_param("labelSelector", "app=x,tier=web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiVersion": "v1",
            "kind": "ConfigMapList",
            "metadata": { "resourceVersion": "42" },
            "items": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(
        config_maps_for(&server)
            .delete_by_label("demo", &labels(&[("app", "x"), ("tier", "web")]))
            .await
    );
}

#[test(tokio::test)]
async fn test_delete_by_label_without_labels_sends_unfiltered_collection_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(COLLECTION_PATH))
        .and(query_param_is_missing("labelSelector"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiVersion": "v1",
            "kind": "ConfigMapList",
            "metadata": { "resourceVersion": "43" },
            "items": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(
        config_maps_for(&server)
            .delete_by_label("demo", &Labels::new())
            .await
    );
}

#[test(tokio::test)]
async fn test_get_missing_config_map_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .respond_with(status(404, "NotFound", "configmaps \"cfg1\" not found"))
        .mount(&server)
        .await;

    let found = assert_ok!(config_maps_for(&server).get("demo", "cfg1").await);
    assert!(found.is_none());
}

#[test(tokio::test)]
async fn test_list_by_label_returns_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .and(query_param("labelSelector", "app=x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiVersion": "v1",
            "kind": "ConfigMapList",
            "metadata": { "resourceVersion": "42" },
            "items": [config_map_json("cfg1", json!({ "app": "x" }))],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let listed = assert_ok!(
        config_maps_for(&server)
            .list_by_label("demo", &labels(&[("app", "x")]))
            .await
    );

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].metadata.name.as_deref(), Some("cfg1"));
}
