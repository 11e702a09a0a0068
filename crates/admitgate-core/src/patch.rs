//! Patch Model: declarative JSON Patch operations.
//!
//! Operations describe edits to a resource; they are never applied here.
//! The resource owner applies them in sequence order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Patch document format named in `patchType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchType {
    #[serde(rename = "JSONPatch")]
    JsonPatch,
}

/// A single structural edit addressed by a JSON pointer.
///
/// `remove` carries no value; `add`/`replace` always do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
}

impl PatchOperation {
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        PatchOperation::Add {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        PatchOperation::Replace {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        PatchOperation::Remove { path: path.into() }
    }

    /// Wire name of the operation (`add`, `replace`, `remove`).
    pub fn op(&self) -> &'static str {
        match self {
            PatchOperation::Add { .. } => "add",
            PatchOperation::Replace { .. } => "replace",
            PatchOperation::Remove { .. } => "remove",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Replace { path, .. }
            | PatchOperation::Remove { path } => path,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
                Some(value)
            }
            PatchOperation::Remove { .. } => None,
        }
    }
}

/// Build an RFC 6901 pointer from raw segments (`~` -> `~0`, `/` -> `~1`).
///
/// `json_pointer(["metadata", "annotations", "example.com/origin"])`
/// yields `/metadata/annotations/example.com~1origin`.
pub fn json_pointer<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for seg in segments {
        out.push('/');
        // order matters: escape '~' before introducing "~1"
        out.push_str(&seg.as_ref().replace('~', "~0").replace('/', "~1"));
    }
    out
}
