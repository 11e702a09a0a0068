//! Admission Handler: decode -> dispatch -> encode.
//!
//! Every call terminates in a response envelope. Decode failures, missing
//! registrations, and decision function faults all become denials.

use serde_json::Value;

use crate::error::{AdmitError, Result};
use crate::hook::Hook;
use crate::request::AdmissionRequest;
use crate::review::{AdmissionResponse, AdmissionReview, DEFAULT_API_VERSION, REVIEW_KIND};

/// Answer one raw `AdmissionReview` body.
pub fn review(hook: &Hook, body: &[u8]) -> AdmissionReview {
    match decode(body) {
        Ok((api_version, kind, req)) => {
            AdmissionReview::respond(api_version, kind, admit(hook, &req))
        }
        Err(e) => {
            let probe = Probe::from_body(body);
            tracing::warn!(uid = %probe.uid, error = %e, "admission review decode failed");
            AdmissionReview::respond(
                probe.api_version,
                REVIEW_KIND,
                AdmissionResponse::from_error(probe.uid, &e),
            )
        }
    }
}

/// Run an already decoded request through `hook`.
pub fn admit(hook: &Hook, req: &AdmissionRequest) -> AdmissionResponse {
    let uid = req.uid.as_str();
    match hook.execute(req) {
        Ok(decision) => {
            tracing::debug!(
                uid,
                operation = %req.operation,
                kind = %req.kind.kind,
                namespace = req.namespace.as_deref().unwrap_or(""),
                name = req.name.as_deref().unwrap_or(""),
                allowed = decision.allowed(),
                patches = decision.patches().len(),
                "admission decision"
            );
            AdmissionResponse::from_decision(uid, decision).unwrap_or_else(|e| {
                tracing::warn!(uid, error = %e, "patch encoding failed");
                AdmissionResponse::from_error(uid, &e)
            })
        }
        Err(e) => {
            tracing::warn!(
                uid,
                operation = %req.operation,
                error = %e,
                "admission evaluation failed"
            );
            AdmissionResponse::from_error(uid, &e)
        }
    }
}

fn decode(body: &[u8]) -> Result<(String, String, AdmissionRequest)> {
    let review: AdmissionReview = serde_json::from_slice(body)?;
    let req = review
        .request
        .ok_or_else(|| AdmitError::Decode("admission review has no request".into()))?;
    Ok((review.api_version, review.kind, req))
}

/// Best-effort fields recovered from a body that failed to decode.
struct Probe {
    uid: String,
    api_version: String,
}

impl Probe {
    fn from_body(body: &[u8]) -> Self {
        let v: Option<Value> = serde_json::from_slice(body).ok();
        let field = |ptr: &str| {
            v.as_ref()
                .and_then(|v| v.pointer(ptr))
                .and_then(Value::as_str)
                .map(str::to_owned)
        };
        Self {
            uid: field("/request/uid").unwrap_or_default(),
            api_version: field("/apiVersion").unwrap_or_else(|| DEFAULT_API_VERSION.into()),
        }
    }
}
