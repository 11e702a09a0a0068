//! Shared fixture loader for review tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use admitgate_core::AdmissionRequest;
use admitgate_core::AdmissionReview;

pub fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

pub fn load_request(name: &str) -> AdmissionRequest {
    let review: AdmissionReview = serde_json::from_str(&load(name)).unwrap();
    review.request.expect("fixture must carry a request")
}
