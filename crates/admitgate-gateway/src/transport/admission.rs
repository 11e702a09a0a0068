//! Admission endpoint.
//!
//! Responsibilities:
//! - Resolve the hook bound to the matched path
//! - Hand the raw body to `handler::review` (decode -> dispatch -> encode)
//! - Record outcome/latency metrics
//! - Always answer 200 with an `AdmissionReview`, including for malformed bodies

use std::time::Instant;

use axum::{
    extract::{MatchedPath, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;

use admitgate_core::{handler, AdmissionResponse};

use crate::app_state::AppState;
use crate::obs::Outcome;

pub async fn admission(State(app): State<AppState>, path: MatchedPath, body: Bytes) -> Response {
    let Some(route) = app.route(path.as_str()) else {
        // only reachable if the router and state disagree
        return (StatusCode::NOT_FOUND, "webhook not registered").into_response();
    };

    let span = tracing::info_span!("admission", path = %route.path, hook = route.kind.as_str());
    let started = Instant::now();
    let review = span.in_scope(|| handler::review(&route.hook, &body));

    let outcome = review
        .response
        .as_ref()
        .map(outcome_of)
        .unwrap_or(Outcome::Error);
    app.metrics().record(&route.path, outcome, started.elapsed());

    Json(review).into_response()
}

fn outcome_of(resp: &AdmissionResponse) -> Outcome {
    if resp.allowed {
        Outcome::Allowed
    } else if resp.status.as_ref().is_some_and(|s| s.reason.is_some()) {
        Outcome::Error
    } else {
        Outcome::Denied
    }
}
