use admitgate_core::patch::json_pointer;
use admitgate_core::{AdmissionRequest, AdmitError, Decision, Hook, PatchOperation, Result};

use super::resource::{Container, Pod};

pub const LATEST_TAG_MESSAGE: &str = "You cannot use the tag 'latest' in a container.";

/// Namespace that receives the injected sidecar.
pub const SIDECAR_NAMESPACE: &str = "special";

pub fn validation_hook() -> Hook {
    Hook::new().on_create(validate_create)
}

pub fn mutation_hook() -> Hook {
    Hook::new().on_create(mutate_create)
}

/// Reject any container pinned to the floating `latest` tag.
fn validate_create(req: &AdmissionRequest) -> Result<Decision> {
    let pod: Pod = match req.object() {
        Ok(p) => p,
        Err(e) => return Ok(Decision::deny(e.to_string())),
    };

    if pod.spec.containers.iter().any(|c| c.image.ends_with(":latest")) {
        return Ok(Decision::deny(LATEST_TAG_MESSAGE));
    }

    Ok(Decision::allow())
}

fn mutate_create(req: &AdmissionRequest) -> Result<Decision> {
    let pod: Pod = match req.object() {
        Ok(p) => p,
        Err(e) => return Ok(Decision::deny(e.to_string())),
    };

    let mut ops = Vec::new();

    if pod.metadata.namespace == SIDECAR_NAMESPACE {
        let mut containers = pod.spec.containers;
        containers.push(sidecar());
        let value = serde_json::to_value(&containers)
            .map_err(|e| AdmitError::Encode(format!("containers: {e}")))?;
        ops.push(PatchOperation::replace(json_pointer(["spec", "containers"]), value));
    }

    // replaces any existing annotations map
    ops.push(PatchOperation::add(
        json_pointer(["metadata", "annotations"]),
        serde_json::json!({ "origin": "fromMutation" }),
    ));

    Ok(Decision::mutate(ops))
}

fn sidecar() -> Container {
    Container {
        name: "test-sidecar".into(),
        image: "busybox:stable".into(),
        command: vec![
            "sh".into(),
            "-c".into(),
            "while true; do echo 'I am a container injected by mutating webhook'; sleep 2; done".into(),
        ],
        ..Container::default()
    }
}
