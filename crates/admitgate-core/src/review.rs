//! `AdmissionReview` wire envelope (JSON).
//!
//! Response rules:
//! - `uid` is always the inbound correlation token.
//! - `patch`/`patchType` appear only on an allowed response with patches.
//! - `patch` is the JSON Patch array, base64 encoded (standard, padded).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::error::{AdmitError, Result};
use crate::patch::{PatchOperation, PatchType};
use crate::request::AdmissionRequest;

pub const DEFAULT_API_VERSION: &str = "admission.k8s.io/v1";
pub const REVIEW_KIND: &str = "AdmissionReview";

/// Request/response envelope. Inbound carries `request`, outbound `response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReview {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<AdmissionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<AdmissionResponse>,
}

impl AdmissionReview {
    /// Outbound envelope carrying `response`.
    pub fn respond(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        response: AdmissionResponse,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            request: None,
            response: Some(response),
        }
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.into()
}

fn default_kind() -> String {
    REVIEW_KIND.into()
}

/// Explanation attached to a denial (or to an allow that set a message).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    pub uid: String,
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_type: Option<PatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

impl AdmissionResponse {
    /// Translate a decision. Fails only if the patch document cannot be serialized.
    pub fn from_decision(uid: impl Into<String>, decision: Decision) -> Result<Self> {
        let (allowed, message, patches) = decision.into_parts();

        let status = (!allowed || !message.is_empty()).then(|| Status {
            message,
            reason: None,
        });

        let (patch_type, patch) = if allowed && !patches.is_empty() {
            let doc = serde_json::to_vec(&patches).map_err(|e| AdmitError::Encode(e.to_string()))?;
            (Some(PatchType::JsonPatch), Some(STANDARD.encode(doc)))
        } else {
            (None, None)
        };

        Ok(Self {
            uid: uid.into(),
            allowed,
            status,
            patch_type,
            patch,
        })
    }

    /// Denial carrying the error text and its reason code.
    pub fn from_error(uid: impl Into<String>, err: &AdmitError) -> Self {
        Self {
            uid: uid.into(),
            allowed: false,
            status: Some(Status {
                message: err.to_string(),
                reason: Some(err.reason().as_str().to_string()),
            }),
            patch_type: None,
            patch: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.message.as_str())
    }

    /// Decode the embedded patch document. Empty when no patch is present.
    pub fn patches(&self) -> Result<Vec<PatchOperation>> {
        let Some(encoded) = &self.patch else {
            return Ok(Vec::new());
        };
        let doc = STANDARD
            .decode(encoded)
            .map_err(|e| AdmitError::Decode(format!("invalid patch base64: {e}")))?;
        Ok(serde_json::from_slice(&doc)?)
    }
}
