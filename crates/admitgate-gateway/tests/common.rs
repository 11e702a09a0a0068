//! Shared `AdmissionReview` builders for gateway tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use serde_json::{json, Value};

pub fn pod(namespace: &str, images: &[&str]) -> Value {
    let containers: Vec<Value> = images
        .iter()
        .enumerate()
        .map(|(i, image)| json!({ "name": format!("c{i}"), "image": image, "ports": [{ "containerPort": 8080 }] }))
        .collect();
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": { "name": "web", "namespace": namespace },
        "spec": { "containers": containers, "restartPolicy": "Always" }
    })
}

pub fn deployment(namespace: &str, annotations: Value) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": { "name": "core", "namespace": namespace, "annotations": annotations },
        "spec": { "replicas": 1 }
    })
}

pub fn review(uid: &str, operation: &str, object: Option<Value>, old_object: Option<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": uid,
            "kind": { "group": "", "version": "v1", "kind": "Pod" },
            "operation": operation,
            "object": object,
            "oldObject": old_object,
        }
    }))
    .unwrap()
}
